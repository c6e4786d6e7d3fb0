//! Operation: extract a package archive.

use std::path::{Path, PathBuf};

use moo_source::archive;
use moo_util::progress::status;

/// Extract `archive_path` into `dest`, or into `<Id>-<Version>` next to the
/// archive when no destination is given.
pub fn unpack(archive_path: &Path, dest: Option<&Path>) -> miette::Result<PathBuf> {
    let package = archive::read_package(archive_path)?;
    let dest = match dest {
        Some(dest) => dest.to_path_buf(),
        None => archive_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(package.dir_name()),
    };
    archive::unpack(archive_path, &dest)?;
    status("Unpacked", &format!("{package} into {}", dest.display()));
    Ok(dest)
}
