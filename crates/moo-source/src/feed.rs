//! NuGet v2 (OData Atom) feed documents.
//!
//! A feed page is an Atom `<feed>` of `<entry>` elements, each carrying the
//! package fields in `<m:properties>` and the download URL in
//! `<content src=".."/>`. Large result sets are split across pages linked
//! with `<link rel="next" href=".."/>`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use moo_core::dependency::PackageDependency;
use moo_core::package::{Package, PackageDetails, PackageLocation};
use moo_core::version::PackageVersion;
use moo_util::errors::{MooError, MooResult};

use crate::nuspec;

/// One parsed page of a feed.
#[derive(Debug, Default)]
pub struct FeedPage {
    pub packages: Vec<Package>,
    pub next: Option<String>,
}

#[derive(Debug, Default)]
struct RawEntry {
    title: Option<String>,
    id: Option<String>,
    version: Option<String>,
    dependencies: Option<String>,
    content_src: Option<String>,
    details: PackageDetails,
}

impl RawEntry {
    /// Entries whose version or dependencies don't fit the moo grammar
    /// (prerelease labels, for one) are skipped.
    fn into_package(self) -> Option<Package> {
        let id = self.id.or(self.title).filter(|s| !s.is_empty())?;
        let version = self.version.unwrap_or_default();
        let version = match PackageVersion::parse(&version) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("skipping feed entry {id} '{version}': {e}");
                return None;
            }
        };
        let dependencies = match parse_odata_dependencies(self.dependencies.as_deref().unwrap_or("")) {
            Ok(deps) => deps,
            Err(e) => {
                tracing::debug!("skipping feed entry {id} {version}: {e}");
                return None;
            }
        };
        let location = self
            .content_src
            .map(PackageLocation::Remote)
            .unwrap_or_default();
        Some(
            Package::new(id, version)
                .with_details(self.details)
                .with_dependencies(dependencies)
                .with_location(location),
        )
    }
}

fn feed_err(e: impl std::fmt::Display) -> MooError {
    MooError::Manifest {
        message: format!("Failed to parse feed XML: {e}"),
    }
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> MooResult<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(feed_err)?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value().map_err(feed_err)?.to_string()));
        }
    }
    Ok(None)
}

/// Parse a feed page, or a single `<entry>` document.
pub fn parse_feed(xml: &str) -> MooResult<FeedPage> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();
    let mut page = FeedPage::default();
    let mut entry: Option<RawEntry> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if tag == "entry" {
                    entry = Some(RawEntry::default());
                }
                path.push(tag);
                text_buf.clear();
            }
            Ok(Event::Empty(ref e)) => {
                let parent = path.last().map(String::as_str);
                match (e.local_name().as_ref(), parent) {
                    (b"content", Some("entry")) => {
                        if let Some(entry) = entry.as_mut() {
                            entry.content_src = attribute(e, b"src")?;
                        }
                    }
                    (b"link", Some("feed")) => {
                        if attribute(e, b"rel")?.as_deref() == Some("next") {
                            page.next = attribute(e, b"href")?;
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().map_err(feed_err)?.to_string();
            }
            Ok(Event::End(_)) => {
                let tag = path.pop().unwrap_or_default();
                let parent = path.last().map(String::as_str);
                let value = std::mem::take(&mut text_buf).trim().to_string();

                if tag == "entry" {
                    if let Some(package) = entry.take().and_then(RawEntry::into_package) {
                        page.packages.push(package);
                    }
                    continue;
                }
                let Some(entry) = entry.as_mut() else {
                    continue;
                };
                match (parent, tag.as_str()) {
                    (Some("entry"), "title") => entry.title = Some(value),
                    (Some("properties"), field) => set_property(entry, field, value),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(feed_err(e)),
            _ => {}
        }
    }
    Ok(page)
}

fn set_property(entry: &mut RawEntry, field: &str, value: String) {
    if value.is_empty() {
        return;
    }
    let details = &mut entry.details;
    match field {
        "Id" => entry.id = Some(value),
        "Version" => entry.version = Some(value),
        "Dependencies" => entry.dependencies = Some(value),
        "Title" => details.title = Some(value),
        "Authors" => details.authors = Some(value),
        "Owners" => details.owners = Some(value),
        "Description" => details.description = Some(value),
        "Summary" => details.summary = Some(value),
        "ProjectUrl" => details.project_url = Some(value),
        "LicenseUrl" => details.license_url = Some(value),
        "Tags" => details.tags = value.split_whitespace().map(str::to_string).collect(),
        _ => {}
    }
}

/// Parse the OData `Dependencies` property: `Id:VersionSpec:Framework`
/// triples separated by `|`. The version spec follows manifest rules; the
/// framework is ignored and the first occurrence of an id wins.
pub fn parse_odata_dependencies(text: &str) -> MooResult<Vec<PackageDependency>> {
    let mut dependencies: Vec<PackageDependency> = Vec::new();
    for item in text.split('|') {
        let mut parts = item.splitn(3, ':');
        let id = parts.next().unwrap_or_default().trim();
        if id.is_empty() {
            continue;
        }
        let spec = parts.next();
        let dependency = nuspec::parse_dependency(id, spec)?;
        if !dependencies.iter().any(|d| d.is_for(dependency.id())) {
            dependencies.push(dependency);
        }
    }
    Ok(dependencies)
}
