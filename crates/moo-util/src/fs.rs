use std::path::{Path, PathBuf};

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Ensure a directory exists, creating it and any parents if needed.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Remove a directory tree if it exists. Returns whether anything was removed.
pub fn remove_dir_if_exists(path: &Path) -> std::io::Result<bool> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// List the entries of `dir` with the given extension (case-insensitive),
/// sorted by path. A missing directory yields an empty list.
pub fn files_with_extension(dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Whether `a` and `b` name the same existing file, however they are spelled.
/// Paths that don't resolve are never the same.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy `from` to `to` unless they are already the same file.
pub fn copy_unless_same(from: &Path, to: &Path) -> std::io::Result<()> {
    if !same_file(from, to) {
        std::fs::copy(from, to)?;
    }
    Ok(())
}
