//! Unpacked packages under the moo directory, one `<Id>-<Version>` folder each.

use std::fs;
use std::path::{Path, PathBuf};

use moo_core::dependency::PackageDependency;
use moo_core::package::{Package, PackageLocation};
use moo_util::errors::MooResult;

use crate::archive;
use crate::nuspec;
use crate::source::{best_match, Source};

pub const INSTALLED_SOURCE_NAME: &str = "installed";

#[derive(Debug, Clone)]
pub struct InstalledSource {
    root: PathBuf,
}

impl InstalledSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether any version of `id` is installed.
    pub fn is_installed(&self, id: &str) -> MooResult<bool> {
        Ok(!self.get_packages_with_id(id)?.is_empty())
    }

    fn read_dir_package(dir: &Path) -> MooResult<Option<Package>> {
        let Some(manifest) = archive::find_manifest(dir)? else {
            return Ok(None);
        };
        let spec = nuspec::parse(&fs::read_to_string(&manifest)?)?;
        Ok(Some(
            spec.into_package(PackageLocation::Installed(dir.to_path_buf())),
        ))
    }
}

impl Source for InstalledSource {
    fn name(&self) -> &str {
        INSTALLED_SOURCE_NAME
    }

    fn packages(&self) -> MooResult<Vec<Package>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut dirs: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .filter(|path| {
                !path
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            })
            .collect();
        dirs.sort();

        let mut packages = Vec::new();
        for dir in dirs {
            match Self::read_dir_package(&dir) {
                Ok(Some(package)) => packages.push(package),
                Ok(None) => tracing::debug!("{} has no manifest, ignoring", dir.display()),
                Err(e) => tracing::warn!("skipping {}: {e}", dir.display()),
            }
        }
        Ok(packages)
    }

    /// Unpack into a staging directory next to the target, then move it into
    /// place so a failed extraction never leaves a half-installed package.
    fn install(&self, archive_path: &Path) -> MooResult<Package> {
        let spec = archive::read_nuspec(archive_path)?;
        fs::create_dir_all(&self.root)?;

        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(&self.root)?;
        archive::unpack(archive_path, staging.path())?;

        let package = spec.into_package(PackageLocation::Unknown);
        let target = self.root.join(package.dir_name());
        moo_util::fs::remove_dir_if_exists(&target)?;
        fs::rename(staging.path(), &target)?;

        tracing::debug!("installed {package} into {}", target.display());
        Ok(package.with_location(PackageLocation::Installed(target)))
    }

    fn uninstall(&self, dependency: &PackageDependency) -> MooResult<bool> {
        let packages = self.get_packages_with_id(dependency.id())?;
        let Some(package) = best_match(packages, dependency) else {
            return Ok(false);
        };
        match &package.location {
            PackageLocation::Installed(dir) => Ok(moo_util::fs::remove_dir_if_exists(dir)?),
            _ => Ok(false),
        }
    }
}
