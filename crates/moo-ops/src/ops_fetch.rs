//! Operation: download a package archive without installing it.

use std::path::{Path, PathBuf};

use moo_core::config::MooConfig;
use moo_resolver::resolver::find_in_sources;
use moo_util::errors::MooError;
use moo_util::progress::status;

/// Fetch the archive `dependency` resolves to into `dest_dir`.
pub fn fetch(
    config: &MooConfig,
    dependency: &str,
    dest_dir: &Path,
    source: Option<&str>,
) -> miette::Result<PathBuf> {
    let dependency = crate::parse_dependency(dependency)?;
    let sources = crate::open_configured_sources(config, source)?;
    let (index, package) =
        find_in_sources(&dependency, &sources)?.ok_or_else(|| MooError::PackageNotFound {
            dependency: dependency.to_string(),
        })?;

    let path = sources[index].fetch(&package.to_dependency(), dest_dir)?;
    status("Fetched", &format!("{package} to {}", path.display()));
    Ok(path)
}
