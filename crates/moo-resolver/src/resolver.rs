//! Depth-first dependency resolution.
//!
//! For each requested dependency the configured sources are asked in order
//! and the first match wins. The resolved package's own dependencies are then
//! walked depth-first in declaration order. Once an id has been resolved it
//! is never resolved again, so the result is a flat list with the root first
//! and each id at most once.

use moo_core::dependency::PackageDependency;
use moo_core::package::Package;
use moo_source::Source;
use moo_util::errors::{MooError, MooResult};

use crate::cache::VisitedSet;
use crate::conflict::{ConflictReport, VersionConflict};

/// A package chosen by resolution and the source that provided it.
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    pub package: Package,
    /// Index into the source list passed to the resolver.
    pub source_index: usize,
    pub source_name: String,
}

/// The output of dependency resolution.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Resolved packages, roots first, dependencies depth-first.
    pub packages: Vec<ResolvedPackage>,
    pub conflicts: ConflictReport,
}

impl Resolution {
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// The resolved package for `id`, ignoring case.
    pub fn get(&self, id: &str) -> Option<&ResolvedPackage> {
        self.packages.iter().find(|r| r.package.has_id(id))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.packages.iter().map(|r| r.package.id.as_str()).collect()
    }
}

/// Ask each source in order for `dependency`; the first hit wins.
pub fn find_in_sources(
    dependency: &PackageDependency,
    sources: &[Box<dyn Source>],
) -> MooResult<Option<(usize, Package)>> {
    for (index, source) in sources.iter().enumerate() {
        if let Some(package) = source.get(dependency)? {
            tracing::debug!("{dependency}: {package} from {}", source.name());
            return Ok(Some((index, package)));
        }
    }
    Ok(None)
}

/// Resolution session shared across several roots.
pub struct Resolver<'a> {
    sources: &'a [Box<dyn Source>],
    visited: VisitedSet,
    resolution: Resolution,
}

impl<'a> Resolver<'a> {
    pub fn new(sources: &'a [Box<dyn Source>]) -> Self {
        Self {
            sources,
            visited: VisitedSet::new(),
            resolution: Resolution::default(),
        }
    }

    /// Resolve a root dependency and everything it depends on.
    ///
    /// Roots that were already resolved through an earlier root are not
    /// resolved again.
    pub fn add(&mut self, root: &PackageDependency) -> MooResult<()> {
        self.visit(root, None)
    }

    pub fn finish(self) -> Resolution {
        self.resolution
    }

    fn visit(&mut self, dependency: &PackageDependency, requested_by: Option<&str>) -> MooResult<()> {
        if self.visited.contains(dependency.id()) {
            self.check_conflict(dependency, requested_by);
            return Ok(());
        }

        let (source_index, package) = find_in_sources(dependency, self.sources)?.ok_or_else(|| {
            MooError::PackageNotFound {
                dependency: dependency.to_string(),
            }
        })?;

        self.visited.visit(dependency.id());
        let dependencies = package.dependencies.clone();
        let parent = package.to_string();
        self.resolution.packages.push(ResolvedPackage {
            source_name: self.sources[source_index].name().to_string(),
            source_index,
            package,
        });

        for child in &dependencies {
            self.visit(child, Some(&parent))?;
        }
        Ok(())
    }

    fn check_conflict(&mut self, dependency: &PackageDependency, requested_by: Option<&str>) {
        let Some(resolved) = self.resolution.get(dependency.id()) else {
            return;
        };
        if dependency.matches(&resolved.package) {
            return;
        }
        let conflict = VersionConflict {
            requested: dependency.to_string(),
            resolved: resolved.package.to_string(),
            requested_by: requested_by.map(str::to_string),
        };
        tracing::debug!("conflict: {conflict}");
        self.resolution.conflicts.add(conflict);
    }
}

/// Resolve a single root dependency against `sources`.
pub fn resolve(root: &PackageDependency, sources: &[Box<dyn Source>]) -> MooResult<Resolution> {
    let mut resolver = Resolver::new(sources);
    resolver.add(root)?;
    Ok(resolver.finish())
}

/// Resolve several roots in one session, so shared dependencies appear once.
pub fn resolve_all(roots: &[PackageDependency], sources: &[Box<dyn Source>]) -> MooResult<Resolution> {
    let mut resolver = Resolver::new(sources);
    for root in roots {
        resolver.add(root)?;
    }
    Ok(resolver.finish())
}
