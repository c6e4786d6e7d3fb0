//! Operation: push an archive to a source.

use std::path::Path;

use moo_core::config::MooConfig;
use moo_core::package::Package;
use moo_source::archive;
use moo_util::progress::{spinner, status};

/// Push `archive_path` to the named source, or the first configured one.
pub fn push(config: &MooConfig, archive_path: &Path, source: Option<&str>) -> miette::Result<Package> {
    let target = crate::target_source(config, source)?;
    let package = archive::read_package(archive_path)?;

    let sp = spinner(&format!("Pushing {package} to {}...", target.name()));
    let pushed = target.push(archive_path);
    sp.finish_and_clear();

    let package = pushed?.unwrap_or(package);
    status("Pushed", &format!("{package} to {}", target.name()));
    Ok(package)
}
