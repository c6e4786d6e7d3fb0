//! Operation: remove an installed package.

use moo_core::config::MooConfig;
use moo_core::package::Package;
use moo_source::{best_match, Source};
use moo_util::errors::MooError;
use moo_util::progress::status;

/// Remove the installed package that best matches `dependency`.
pub fn uninstall(config: &MooConfig, dependency: &str) -> miette::Result<Package> {
    let dependency = crate::parse_dependency(dependency)?;
    let installed = crate::installed_source(config);

    let candidates = installed.get_packages_with_id(dependency.id())?;
    let package = best_match(candidates, &dependency).ok_or_else(|| MooError::PackageNotFound {
        dependency: format!("{dependency} (not installed)"),
    })?;

    installed.uninstall(&package.to_dependency())?;
    status("Removed", &package.to_string());
    Ok(package)
}
