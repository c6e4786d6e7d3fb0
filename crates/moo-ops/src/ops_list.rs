//! Operation: list installed packages.

use moo_core::config::MooConfig;
use moo_core::package::Package;
use moo_source::{latest_by_id, Source};

#[derive(Debug, Default)]
pub struct ListOptions {
    /// Only ids containing this text, ignoring case.
    pub filter: Option<String>,
    /// Every installed version instead of the latest per id.
    pub all: bool,
}

/// Installed packages sorted by id, then version.
pub fn list(config: &MooConfig, opts: &ListOptions) -> miette::Result<Vec<Package>> {
    let packages = crate::installed_source(config).packages()?;
    let mut packages = if opts.all {
        packages
    } else {
        latest_by_id(packages)
    };

    if let Some(filter) = &opts.filter {
        let needle = filter.to_ascii_lowercase();
        packages.retain(|p| p.id_key().contains(&needle));
    }
    packages.sort_by(|a, b| a.id_key().cmp(&b.id_key()).then_with(|| a.version.cmp(&b.version)));
    Ok(packages)
}
