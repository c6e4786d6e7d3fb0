//! A NuGet v2 (OData) feed over HTTP.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::Url;

use moo_core::dependency::PackageDependency;
use moo_core::package::{Package, PackageLocation};
use moo_util::errors::{MooError, MooResult};

use crate::archive;
use crate::download;
use crate::feed;
use crate::source::{latest_by_id, Source};

/// Stop following `next` links after this many pages.
const MAX_PAGES: usize = 500;
const API_KEY_HEADER: &str = "X-NuGet-ApiKey";

pub struct RemoteSource {
    name: String,
    url: String,
    api_key: Option<String>,
    client: Client,
}

impl RemoteSource {
    pub fn new(name: &str, url: &str, api_key: Option<String>) -> MooResult<Self> {
        Ok(Self {
            name: name.to_string(),
            url: url.trim_end_matches('/').to_string(),
            api_key,
            client: download::build_client()?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn parse_url(url: &str, params: &[(&str, String)]) -> MooResult<Url> {
        Url::parse_with_params(url, params).map_err(|e| MooError::Config {
            message: format!("invalid feed URL '{url}': {e}"),
        })
    }

    pub fn packages_url(&self) -> String {
        format!("{}/Packages()", self.url)
    }

    pub fn find_by_id_url(&self, id: &str) -> MooResult<Url> {
        let url = format!("{}/FindPackagesById()", self.url);
        Self::parse_url(&url, &[("id", odata_string(id))])
    }

    pub fn search_url(&self, query: &str) -> MooResult<Url> {
        let url = format!("{}/Search()", self.url);
        Self::parse_url(
            &url,
            &[
                ("searchTerm", odata_string(query)),
                ("targetFramework", odata_string("")),
                ("includePrerelease", "false".to_string()),
            ],
        )
    }

    pub fn package_url(&self, id: &str, version: &str) -> String {
        format!("{}/package/{id}/{version}", self.url)
    }

    pub fn push_url(&self) -> String {
        format!("{}/package", self.url)
    }

    /// Fetch a query and every page linked from it.
    fn query(&self, url: &str) -> MooResult<Vec<Package>> {
        let mut packages = Vec::new();
        let mut next = Some(url.to_string());
        let mut pages = 0;

        while let Some(url) = next.take() {
            if pages == MAX_PAGES {
                tracing::warn!("{}: stopped after {MAX_PAGES} feed pages", self.name);
                break;
            }
            pages += 1;
            tracing::debug!("GET {url}");
            let Some(xml) = download::get_text(&self.client, &url)? else {
                break;
            };
            let page = feed::parse_feed(&xml)?;
            packages.extend(page.packages);
            next = page.next;
        }
        Ok(packages)
    }

    fn api_key(&self) -> MooResult<&str> {
        self.api_key.as_deref().ok_or_else(|| MooError::Config {
            message: format!(
                "source '{}' needs an API key; set `api-key` in config.toml or MOO_API_KEY",
                self.name
            ),
        })
    }

    fn download_url(&self, package: &Package) -> String {
        match &package.location {
            PackageLocation::Remote(url) => url.clone(),
            _ => self.package_url(&package.id, &package.version.to_string()),
        }
    }
}

/// Quote a value as an OData string literal.
fn odata_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl Source for RemoteSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn packages(&self) -> MooResult<Vec<Package>> {
        self.query(&self.packages_url())
    }

    fn get_packages_with_id(&self, id: &str) -> MooResult<Vec<Package>> {
        Ok(self
            .query(self.find_by_id_url(id)?.as_str())?
            .into_iter()
            .filter(|p| p.has_id(id))
            .collect())
    }

    fn search(&self, query: &str) -> MooResult<Vec<Package>> {
        Ok(latest_by_id(self.query(self.search_url(query)?.as_str())?))
    }

    fn fetch(&self, dependency: &PackageDependency, dest_dir: &Path) -> MooResult<PathBuf> {
        let not_found = || MooError::PackageNotFound {
            dependency: dependency.to_string(),
        };
        let package = self.get(dependency)?.ok_or_else(not_found)?;
        let url = self.download_url(&package);

        let pb = moo_util::progress::spinner(&format!("Downloading {package}"));
        let bytes = download::get_bytes(&self.client, &url);
        pb.finish_and_clear();
        let bytes = bytes?.ok_or_else(not_found)?;

        fs::create_dir_all(dest_dir)?;
        let dest = dest_dir.join(package.file_name());
        fs::write(&dest, bytes)?;
        Ok(dest)
    }

    fn push(&self, archive_path: &Path) -> MooResult<Option<Package>> {
        let key = self.api_key()?;
        let package = archive::read_package(archive_path)?;
        let bytes = fs::read(archive_path)?;
        let form = Form::new().part("package", Part::bytes(bytes).file_name(package.file_name()));

        let request = self
            .client
            .put(self.push_url())
            .header(API_KEY_HEADER, key)
            .multipart(form);
        download::send(request, &format!("Push of {package} to {}", self.name))?;
        let url = self.package_url(&package.id, &package.version.to_string());
        Ok(Some(package.with_location(PackageLocation::Remote(url))))
    }

    fn yank(&self, dependency: &PackageDependency) -> MooResult<bool> {
        let key = self.api_key()?;
        let Some(package) = self.get(dependency)? else {
            return Ok(false);
        };
        let url = self.package_url(&package.id, &package.version.to_string());
        let request = self.client.delete(url).header(API_KEY_HEADER, key);
        download::send(request, &format!("Yank of {package} from {}", self.name))?;
        Ok(true)
    }
}
