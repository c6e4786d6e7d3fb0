//! The `Source` capability contract and the latest-version selection rules
//! every backend shares.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use moo_core::config::{MooConfig, SourceEntry};
use moo_core::dependency::PackageDependency;
use moo_core::package::Package;
use moo_util::errors::{MooError, MooResult};

use crate::directory::DirectorySource;
use crate::remote::RemoteSource;

/// A catalog of packages, queryable and optionally mutable.
///
/// Only [`Source::name`] and [`Source::packages`] are required. Queries have
/// default implementations in terms of `packages()`, which backends with a
/// cheaper native query (remote feeds) override. Mutating operations default
/// to [`MooError::Unsupported`].
pub trait Source {
    fn name(&self) -> &str;

    /// Every package version this source holds.
    fn packages(&self) -> MooResult<Vec<Package>>;

    /// All versions of `id` (ignoring case), unordered.
    fn get_packages_with_id(&self, id: &str) -> MooResult<Vec<Package>> {
        Ok(self
            .packages()?
            .into_iter()
            .filter(|p| p.has_id(id))
            .collect())
    }

    /// The latest version satisfying `dependency`, if any.
    fn get(&self, dependency: &PackageDependency) -> MooResult<Option<Package>> {
        Ok(best_match(
            self.get_packages_with_id(dependency.id())?,
            dependency,
        ))
    }

    /// The latest version of every package id.
    fn latest_packages(&self) -> MooResult<Vec<Package>> {
        Ok(latest_by_id(self.packages()?))
    }

    /// Latest packages whose id or tags contain `query`, ignoring case.
    fn search(&self, query: &str) -> MooResult<Vec<Package>> {
        let needle = query.to_ascii_lowercase();
        Ok(self
            .latest_packages()?
            .into_iter()
            .filter(|p| {
                p.id_key().contains(&needle)
                    || p
                        .details
                        .tags
                        .iter()
                        .any(|t| t.to_ascii_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Copy or download the archive of the best match into `dest_dir`.
    fn fetch(&self, _dependency: &PackageDependency, _dest_dir: &Path) -> MooResult<PathBuf> {
        Err(MooError::unsupported(self.name(), "fetch"))
    }

    /// Add an archive to this source.
    fn push(&self, _archive: &Path) -> MooResult<Option<Package>> {
        Err(MooError::unsupported(self.name(), "push"))
    }

    /// Remove the best match from this source. `false` when nothing matched.
    fn yank(&self, _dependency: &PackageDependency) -> MooResult<bool> {
        Err(MooError::unsupported(self.name(), "yank"))
    }

    /// Unpack an archive into this source.
    fn install(&self, _archive: &Path) -> MooResult<Package> {
        Err(MooError::unsupported(self.name(), "install"))
    }

    /// Remove an unpacked package. `false` when nothing matched.
    fn uninstall(&self, _dependency: &PackageDependency) -> MooResult<bool> {
        Err(MooError::unsupported(self.name(), "uninstall"))
    }
}

/// The highest version among `packages` that `dependency` matches.
///
/// When several candidates share the highest version the first one wins.
pub fn best_match(
    packages: impl IntoIterator<Item = Package>,
    dependency: &PackageDependency,
) -> Option<Package> {
    let mut best: Option<Package> = None;
    for package in packages {
        if !dependency.matches(&package) {
            continue;
        }
        let newer = best.as_ref().map_or(true, |b| package.version > b.version);
        if newer {
            best = Some(package);
        }
    }
    best
}

/// Group packages by id (ignoring case) and keep the highest version of each.
///
/// Groups come out in first-seen order; equal versions keep the first seen.
pub fn latest_by_id(packages: impl IntoIterator<Item = Package>) -> Vec<Package> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<Package> = Vec::new();
    for package in packages {
        match index.get(&package.id_key()) {
            Some(&i) => {
                if package.version > latest[i].version {
                    latest[i] = package;
                }
            }
            None => {
                index.insert(package.id_key(), latest.len());
                latest.push(package);
            }
        }
    }
    latest
}

/// Open the backend for a configured source entry: HTTP(S) URLs are remote
/// feeds, anything else a directory of archives.
pub fn open_source(entry: &SourceEntry, config: &MooConfig) -> MooResult<Box<dyn Source>> {
    if entry.is_remote() {
        let remote = RemoteSource::new(&entry.name, &entry.url, config.api_key.clone())?;
        Ok(Box::new(remote))
    } else {
        Ok(Box::new(DirectorySource::new(&entry.name, &entry.url)))
    }
}

/// Open every configured source, in configuration order.
pub fn open_sources(config: &MooConfig) -> MooResult<Vec<Box<dyn Source>>> {
    config
        .sources
        .iter()
        .map(|entry| open_source(entry, config))
        .collect()
}
