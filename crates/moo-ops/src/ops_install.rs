//! Operation: resolve dependencies and install missing packages.

use std::path::PathBuf;

use moo_core::config::MooConfig;
use moo_core::dependency::PackageDependency;
use moo_core::moofile::Moofile;
use moo_core::package::Package;
use moo_resolver::conflict::ConflictReport;
use moo_resolver::plan::InstallPlan;
use moo_resolver::resolver::resolve_all;
use moo_source::Source;
use moo_util::errors::MooError;
use moo_util::progress::{spinner, status, status_info, status_warn};

/// Options for `moo install`.
#[derive(Debug, Default)]
pub struct InstallOptions {
    /// Dependency expressions. When empty, the nearest `Moofile` is read.
    pub dependencies: Vec<String>,
    /// Directory the `Moofile` search starts from.
    pub project_dir: PathBuf,
    /// Restrict resolution to one configured source.
    pub source: Option<String>,
}

#[derive(Debug, Default)]
pub struct InstallReport {
    pub installed: Vec<Package>,
    pub already_installed: Vec<Package>,
    pub conflicts: ConflictReport,
}

/// The root dependencies: the given expressions, else the nearest Moofile.
pub fn root_dependencies(opts: &InstallOptions) -> miette::Result<Vec<PackageDependency>> {
    if !opts.dependencies.is_empty() {
        return opts
            .dependencies
            .iter()
            .map(|d| crate::parse_dependency(d))
            .collect();
    }
    let dir = moo_util::fs::find_ancestor_with(&opts.project_dir, Moofile::FILE_NAME).ok_or_else(
        || MooError::Manifest {
            message: format!(
                "no dependencies given and no {} found in {} or its parents",
                Moofile::FILE_NAME,
                opts.project_dir.display()
            ),
        },
    )?;
    let moofile = Moofile::from_path(&dir.join(Moofile::FILE_NAME))?;
    tracing::debug!(
        "read {} dependencies from {}",
        moofile.dependencies.len(),
        dir.display()
    );
    Ok(moofile.dependencies)
}

pub fn install(config: &MooConfig, opts: &InstallOptions) -> miette::Result<InstallReport> {
    let roots = root_dependencies(opts)?;
    let sources = crate::open_configured_sources(config, opts.source.as_deref())?;
    install_with_sources(config, &roots, &sources)
}

/// Resolve `roots` against `sources`, then fetch and install every resolved
/// package whose id is not installed yet.
pub fn install_with_sources(
    config: &MooConfig,
    roots: &[PackageDependency],
    sources: &[Box<dyn Source>],
) -> miette::Result<InstallReport> {
    let sp = spinner("Resolving dependencies...");
    let resolution = resolve_all(roots, sources);
    sp.finish_and_clear();
    let resolution = resolution?;

    let conflicts = resolution.conflicts.clone();
    for conflict in conflicts.iter() {
        status_warn("Conflict", &conflict.to_string());
    }

    let installed = crate::installed_source(config);
    let plan = InstallPlan::new(resolution, &installed)?;

    let mut report = InstallReport {
        conflicts,
        ..InstallReport::default()
    };
    for (resolved, existing) in plan.already_installed {
        if config.verbose {
            status_info("Skipping", &format!("{existing} (already installed)"));
        }
        tracing::debug!("{} already installed as {existing}", resolved.package);
        report.already_installed.push(existing);
    }

    let cache = config.cache_dir();
    for resolved in plan.to_install {
        let source = &sources[resolved.source_index];
        status("Fetching", &format!("{} from {}", resolved.package, resolved.source_name));
        let archive = source.fetch(&resolved.package.to_dependency(), &cache)?;
        let package = installed.install(&archive)?;
        tracing::info!("installed {package}");
        status("Installed", &package.to_string());
        report.installed.push(package);
    }
    Ok(report)
}
