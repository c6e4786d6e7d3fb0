//! A flat directory of `.nupkg` archives.

use std::fs;
use std::path::{Path, PathBuf};

use moo_core::dependency::PackageDependency;
use moo_core::package::{Package, PackageLocation};
use moo_util::errors::{MooError, MooResult};
use moo_util::fs::{copy_unless_same, same_file};

use crate::archive::{self, ARCHIVE_EXTENSION};
use crate::source::{best_match, Source};

#[derive(Debug, Clone)]
pub struct DirectorySource {
    name: String,
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(name: &str, root: impl AsRef<Path>) -> Self {
        Self {
            name: name.to_string(),
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn archive_path(package: &Package) -> MooResult<&Path> {
        match &package.location {
            PackageLocation::Archive(path) => Ok(path),
            other => Err(MooError::Generic {
                message: format!("{package} has no archive on disk ({other:?})"),
            }),
        }
    }
}

impl Source for DirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    /// Every readable archive in the directory. Unreadable archives are
    /// skipped with a warning so one bad file doesn't hide the rest.
    fn packages(&self) -> MooResult<Vec<Package>> {
        let mut packages = Vec::new();
        for path in moo_util::fs::files_with_extension(&self.root, ARCHIVE_EXTENSION)? {
            match archive::read_package(&path) {
                Ok(package) => packages.push(package),
                Err(e) => tracing::warn!("skipping {}: {e}", path.display()),
            }
        }
        tracing::debug!("{}: {} packages in {}", self.name, packages.len(), self.root.display());
        Ok(packages)
    }

    fn fetch(&self, dependency: &PackageDependency, dest_dir: &Path) -> MooResult<PathBuf> {
        let package = self.get(dependency)?.ok_or_else(|| MooError::PackageNotFound {
            dependency: dependency.to_string(),
        })?;
        let source = Self::archive_path(&package)?;
        fs::create_dir_all(dest_dir)?;
        let dest = dest_dir.join(package.file_name());
        copy_unless_same(source, &dest)?;
        Ok(dest)
    }

    /// Copy an archive into the directory, replacing an archive of the same
    /// package id and version.
    fn push(&self, archive_path: &Path) -> MooResult<Option<Package>> {
        let package = archive::read_package(archive_path)?;
        fs::create_dir_all(&self.root)?;

        let existing = self
            .get_packages_with_id(&package.id)?
            .into_iter()
            .filter(|p| p.version == package.version);
        for old in existing {
            if let PackageLocation::Archive(path) = &old.location {
                if !same_file(path, archive_path) {
                    fs::remove_file(path)?;
                }
            }
        }

        let dest = self.root.join(package.file_name());
        copy_unless_same(archive_path, &dest)?;
        Ok(Some(package.with_location(PackageLocation::Archive(dest))))
    }

    fn yank(&self, dependency: &PackageDependency) -> MooResult<bool> {
        let packages = self.get_packages_with_id(dependency.id())?;
        let Some(package) = best_match(packages, dependency) else {
            return Ok(false);
        };
        fs::remove_file(Self::archive_path(&package)?)?;
        Ok(true)
    }
}
