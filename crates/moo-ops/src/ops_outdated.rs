//! Operation: installed packages with a newer version in a source.

use moo_core::config::MooConfig;
use moo_core::dependency::PackageDependency;
use moo_core::version::PackageVersion;
use moo_source::{latest_by_id, Source};

/// A single outdated package entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedEntry {
    pub id: String,
    pub installed: PackageVersion,
    pub latest: PackageVersion,
    pub source: String,
}

/// Compare the latest installed version of each id with the newest version
/// any configured source (or only `source`) offers.
pub fn outdated(config: &MooConfig, source: Option<&str>) -> miette::Result<Vec<OutdatedEntry>> {
    let installed = latest_by_id(crate::installed_source(config).packages()?);
    if installed.is_empty() {
        return Ok(Vec::new());
    }
    let sources = crate::open_configured_sources(config, source)?;
    outdated_against(&installed, &sources)
}

pub fn outdated_against(
    installed: &[moo_core::package::Package],
    sources: &[Box<dyn Source>],
) -> miette::Result<Vec<OutdatedEntry>> {
    let sp = moo_util::progress::spinner("Checking for newer versions...");
    let mut entries = Vec::new();
    for package in installed {
        let any = PackageDependency::any(package.id.clone());
        let mut newest: Option<(PackageVersion, &str)> = None;
        for source in sources {
            let candidate = match source.get(&any) {
                Ok(candidate) => candidate,
                Err(e) => {
                    sp.finish_and_clear();
                    return Err(e.into());
                }
            };
            let Some(candidate) = candidate else {
                continue;
            };
            if newest.as_ref().map_or(true, |(v, _)| candidate.version > *v) {
                newest = Some((candidate.version, source.name()));
            }
        }
        if let Some((latest, source)) = newest {
            if latest > package.version {
                entries.push(OutdatedEntry {
                    id: package.id.clone(),
                    installed: package.version.clone(),
                    latest,
                    source: source.to_string(),
                });
            }
        }
    }
    sp.finish_and_clear();
    Ok(entries)
}
