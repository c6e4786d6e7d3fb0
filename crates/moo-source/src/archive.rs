//! `.nupkg` archives: zip files with a `.nuspec` manifest at the root.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use moo_core::package::{Package, PackageLocation};
use moo_util::errors::{MooError, MooResult};

use crate::nuspec::{self, Nuspec};

pub const ARCHIVE_EXTENSION: &str = "nupkg";
pub const MANIFEST_EXTENSION: &str = "nuspec";

fn archive_err(path: &Path, e: impl std::fmt::Display) -> MooError {
    MooError::Archive {
        message: format!("{}: {e}", path.display()),
    }
}

fn open(path: &Path) -> MooResult<ZipArchive<fs::File>> {
    let file = fs::File::open(path)?;
    ZipArchive::new(file).map_err(|e| archive_err(path, e))
}

fn is_root_manifest(name: &str) -> bool {
    !name.contains('/')
        && Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION))
}

/// Read the manifest stored at the root of an archive.
pub fn read_nuspec(path: &Path) -> MooResult<Nuspec> {
    let mut archive = open(path)?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| archive_err(path, e))?;
        if !is_root_manifest(entry.name()) {
            continue;
        }
        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .map_err(|e| archive_err(path, e))?;
        return nuspec::parse(&xml);
    }
    Err(MooError::Archive {
        message: format!("{} has no .nuspec manifest", path.display()),
    })
}

/// Read the package described by an archive.
pub fn read_package(path: &Path) -> MooResult<Package> {
    Ok(read_nuspec(path)?.into_package(PackageLocation::Archive(path.to_path_buf())))
}

/// Extract every entry of an archive under `dest`.
///
/// Entries whose names would escape `dest` are rejected.
pub fn unpack(path: &Path, dest: &Path) -> MooResult<()> {
    let mut archive = open(path)?;
    fs::create_dir_all(dest)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| archive_err(path, e))?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(MooError::Archive {
                message: format!("{}: unsafe entry name '{}'", path.display(), entry.name()),
            });
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut buf = Vec::new();
        entry
            .read_to_end(&mut buf)
            .map_err(|e| archive_err(path, e))?;
        fs::write(&out_path, &buf)?;
    }
    Ok(())
}

/// Find the manifest at the root of a package directory.
pub fn find_manifest(dir: &Path) -> MooResult<Option<PathBuf>> {
    Ok(moo_util::fs::files_with_extension(dir, MANIFEST_EXTENSION)?
        .into_iter()
        .next())
}

fn build_excludes(patterns: &[String]) -> MooResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let defaults = [format!("*.{ARCHIVE_EXTENSION}")];
    for pattern in defaults.iter().chain(patterns) {
        let glob = Glob::new(pattern)
            .map_err(|e| MooError::format(format!("invalid exclude pattern '{pattern}': {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| MooError::format(format!("invalid exclude patterns: {e}")))
}

/// Relative paths (with `/` separators) of every file under `dir`, sorted.
fn collect_files(root: &Path, dir: &Path, files: &mut Vec<String>) -> MooResult<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push(name);
        }
    }
    Ok(())
}

/// Zip a package directory into `<output_dir>/<Id>.<Version>.nupkg`.
///
/// The directory must hold a `.nuspec` at its root. Files matching any
/// `excludes` glob, and existing archives, are left out.
pub fn pack(dir: &Path, output_dir: &Path, excludes: &[String]) -> MooResult<(PathBuf, Package)> {
    let manifest = find_manifest(dir)?.ok_or_else(|| MooError::Manifest {
        message: format!("no .nuspec manifest in {}", dir.display()),
    })?;
    let spec = nuspec::parse(&fs::read_to_string(&manifest)?)?;

    let excludes = build_excludes(excludes)?;
    let mut files = Vec::new();
    collect_files(dir, dir, &mut files)?;
    files.sort();
    files.retain(|name| !excludes.is_match(name));

    fs::create_dir_all(output_dir)?;
    let package = spec.into_package(PackageLocation::Unknown);
    let output = output_dir.join(package.file_name());

    let file = fs::File::create(&output)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for name in &files {
        zip.start_file(name.as_str(), options)
            .map_err(|e| archive_err(&output, e))?;
        let bytes = fs::read(dir.join(name))?;
        zip.write_all(&bytes)?;
    }
    zip.finish().map_err(|e| archive_err(&output, e))?;

    tracing::debug!("packed {} files into {}", files.len(), output.display());
    let package = package.with_location(PackageLocation::Archive(output.clone()));
    Ok((output, package))
}
