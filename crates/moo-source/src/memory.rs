//! In-memory package source for tests and embedding.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use moo_core::dependency::PackageDependency;
use moo_core::package::{Package, PackageLocation};
use moo_util::errors::{MooError, MooResult};

use crate::archive;
use crate::source::{best_match, Source};

/// A source held entirely in memory.
///
/// Push and install add the archive's package to the list; yank and
/// uninstall remove the best match. Fetch needs a package that points at an
/// archive on disk.
#[derive(Debug, Default)]
pub struct InMemorySource {
    name: String,
    packages: RefCell<Vec<Package>>,
}

impl InMemorySource {
    pub fn new(name: &str, packages: Vec<Package>) -> Self {
        Self {
            name: name.to_string(),
            packages: RefCell::new(packages),
        }
    }

    pub fn add(&self, package: Package) {
        self.packages.borrow_mut().push(package);
    }

    fn remove_best(&self, dependency: &PackageDependency) -> bool {
        let Some(target) = best_match(self.packages.borrow().iter().cloned(), dependency) else {
            return false;
        };
        let mut packages = self.packages.borrow_mut();
        if let Some(i) = packages.iter().position(|p| *p == target) {
            packages.remove(i);
        }
        true
    }
}

impl Source for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn packages(&self) -> MooResult<Vec<Package>> {
        Ok(self.packages.borrow().clone())
    }

    fn fetch(&self, dependency: &PackageDependency, dest_dir: &Path) -> MooResult<PathBuf> {
        let package = self.get(dependency)?.ok_or_else(|| MooError::PackageNotFound {
            dependency: dependency.to_string(),
        })?;
        let PackageLocation::Archive(source) = &package.location else {
            return Err(MooError::unsupported(&self.name, "fetch"));
        };
        std::fs::create_dir_all(dest_dir)?;
        let dest = dest_dir.join(package.file_name());
        moo_util::fs::copy_unless_same(source, &dest)?;
        Ok(dest)
    }

    fn push(&self, archive_path: &Path) -> MooResult<Option<Package>> {
        let package = archive::read_package(archive_path)?;
        self.add(package.clone());
        Ok(Some(package))
    }

    fn yank(&self, dependency: &PackageDependency) -> MooResult<bool> {
        Ok(self.remove_best(dependency))
    }

    fn install(&self, archive_path: &Path) -> MooResult<Package> {
        let package = archive::read_package(archive_path)?;
        self.add(package.clone());
        Ok(package)
    }

    fn uninstall(&self, dependency: &PackageDependency) -> MooResult<bool> {
        Ok(self.remove_best(dependency))
    }
}
