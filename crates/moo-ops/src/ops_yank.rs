//! Operation: remove a package version from a source.

use moo_core::config::MooConfig;
use moo_util::errors::MooError;
use moo_util::progress::status;

/// Yank the best match for `dependency` from the named source, or the first
/// configured one.
pub fn yank(config: &MooConfig, dependency: &str, source: Option<&str>) -> miette::Result<()> {
    let dependency = crate::parse_dependency(dependency)?;
    let target = crate::target_source(config, source)?;
    let package = target
        .get(&dependency)?
        .ok_or_else(|| MooError::PackageNotFound {
            dependency: dependency.to_string(),
        })?;

    if !target.yank(&package.to_dependency())? {
        return Err(MooError::PackageNotFound {
            dependency: package.to_dependency().to_string(),
        }
        .into());
    }
    status("Yanked", &format!("{package} from {}", target.name()));
    Ok(())
}
