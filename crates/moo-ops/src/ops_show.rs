//! Operation: show the details of a package.

use std::fmt::Write;

use moo_core::config::MooConfig;
use moo_core::package::{Package, PackageLocation};
use moo_resolver::resolver::find_in_sources;
use moo_util::errors::MooError;

/// The package `dependency` resolves to across the configured sources, with
/// the name of the source that provided it.
pub fn show(
    config: &MooConfig,
    dependency: &str,
    source: Option<&str>,
) -> miette::Result<(String, Package)> {
    let dependency = crate::parse_dependency(dependency)?;
    let sources = crate::open_configured_sources(config, source)?;
    let (index, package) =
        find_in_sources(&dependency, &sources)?.ok_or_else(|| MooError::PackageNotFound {
            dependency: dependency.to_string(),
        })?;
    Ok((sources[index].name().to_string(), package))
}

/// Human-readable details, one `Field: value` line each.
pub fn describe(package: &Package, source: &str) -> String {
    let mut out = String::new();
    let details = &package.details;
    let _ = writeln!(out, "{package}");
    let fields = [
        ("Title", &details.title),
        ("Summary", &details.summary),
        ("Description", &details.description),
        ("Authors", &details.authors),
        ("Owners", &details.owners),
        ("Project URL", &details.project_url),
        ("License URL", &details.license_url),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    if !details.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", details.tags.join(", "));
    }
    let _ = writeln!(out, "Source: {source}");
    match &package.location {
        PackageLocation::Archive(path) | PackageLocation::Installed(path) => {
            let _ = writeln!(out, "Location: {}", path.display());
        }
        PackageLocation::Remote(url) => {
            let _ = writeln!(out, "Location: {url}");
        }
        PackageLocation::Unknown => {}
    }
    if package.dependencies.is_empty() {
        let _ = writeln!(out, "Dependencies: none");
    } else {
        let _ = writeln!(out, "Dependencies:");
        for dependency in &package.dependencies {
            let _ = writeln!(out, "  {dependency}");
        }
    }
    out
}
