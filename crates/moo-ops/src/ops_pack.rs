//! Operation: build a `.nupkg` from a package directory.

use std::path::{Path, PathBuf};

use moo_core::package::Package;
use moo_source::archive;
use moo_util::progress::status;

/// Options for `moo pack`.
#[derive(Debug, Default)]
pub struct PackOptions {
    /// Directory holding the `.nuspec` and package files.
    pub dir: PathBuf,
    /// Where the archive is written. Defaults to `dir`.
    pub output: Option<PathBuf>,
    /// Glob patterns of files to leave out.
    pub excludes: Vec<String>,
}

pub fn pack(opts: &PackOptions) -> miette::Result<(PathBuf, Package)> {
    let output: &Path = opts.output.as_deref().unwrap_or(&opts.dir);
    let (path, package) = archive::pack(&opts.dir, output, &opts.excludes)?;
    status("Packed", &format!("{package} into {}", path.display()));
    Ok((path, package))
}
