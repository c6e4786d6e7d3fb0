pub mod ops_fetch;
pub mod ops_install;
pub mod ops_list;
pub mod ops_outdated;
pub mod ops_pack;
pub mod ops_push;
pub mod ops_search;
pub mod ops_show;
pub mod ops_source;
pub mod ops_uninstall;
pub mod ops_unpack;
pub mod ops_yank;

use moo_core::config::MooConfig;
use moo_core::dependency::PackageDependency;
use moo_source::installed::InstalledSource;
use moo_source::{open_source, open_sources, Source};
use moo_util::errors::MooError;

/// Parse a dependency expression given on the command line.
pub fn parse_dependency(text: &str) -> miette::Result<PackageDependency> {
    Ok(PackageDependency::parse(text)?)
}

/// Open the configured sources in query order, or only the one named `only`.
pub fn open_configured_sources(
    config: &MooConfig,
    only: Option<&str>,
) -> miette::Result<Vec<Box<dyn Source>>> {
    match only {
        Some(name) => Ok(vec![target_source(config, Some(name))?]),
        None => Ok(open_sources(config)?),
    }
}

/// The source write operations go to: the one named, else the first
/// configured source.
pub fn target_source(config: &MooConfig, name: Option<&str>) -> miette::Result<Box<dyn Source>> {
    let entry = match name {
        Some(name) => config.source(name).ok_or_else(|| MooError::Config {
            message: format!("no source named '{name}'"),
        })?,
        None => config.sources.first().ok_or_else(|| MooError::Config {
            message: "no sources configured".to_string(),
        })?,
    };
    Ok(open_source(entry, config)?)
}

/// The packages installed under the configured moo directory.
pub fn installed_source(config: &MooConfig) -> InstalledSource {
    InstalledSource::new(config.moo_dir())
}
