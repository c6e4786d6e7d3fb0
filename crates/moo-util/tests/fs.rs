use moo_util::fs::{
    copy_unless_same, ensure_dir, files_with_extension, find_ancestor_with, remove_dir_if_exists,
    same_file,
};
use tempfile::TempDir;

#[test]
fn test_find_ancestor_with_direct() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Moofile"), "").unwrap();
    let result = find_ancestor_with(tmp.path(), "Moofile");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_nested() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Moofile"), "").unwrap();
    let nested = tmp.path().join("a").join("b").join("c");
    std::fs::create_dir_all(&nested).unwrap();
    let result = find_ancestor_with(&nested, "Moofile");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_not_found() {
    let tmp = TempDir::new().unwrap();
    let result = find_ancestor_with(tmp.path(), "NonExistent.file");
    assert_eq!(result, None);
}

#[test]
fn test_ensure_dir_creates_nested() {
    let tmp = TempDir::new().unwrap();
    let deep = tmp.path().join("x").join("y").join("z");
    assert!(!deep.exists());
    ensure_dir(&deep).unwrap();
    assert!(deep.is_dir());
}

#[test]
fn test_ensure_dir_idempotent() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("already");
    std::fs::create_dir(&dir).unwrap();
    ensure_dir(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn test_remove_dir_if_exists() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("gone");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("file.txt"), "x").unwrap();
    assert!(remove_dir_if_exists(&dir).unwrap());
    assert!(!dir.exists());
    assert!(!remove_dir_if_exists(&dir).unwrap());
}

#[test]
fn test_files_with_extension_filters_and_sorts() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("b.nupkg"), "").unwrap();
    std::fs::write(tmp.path().join("a.NUPKG"), "").unwrap();
    std::fs::write(tmp.path().join("notes.txt"), "").unwrap();
    std::fs::create_dir(tmp.path().join("dir.nupkg")).unwrap();

    let files = files_with_extension(tmp.path(), "nupkg").unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.NUPKG", "b.nupkg"]);
}

#[test]
fn test_files_with_extension_missing_dir() {
    let tmp = TempDir::new().unwrap();
    let files = files_with_extension(&tmp.path().join("missing"), "nupkg").unwrap();
    assert!(files.is_empty());
}

#[test]
fn test_same_file_through_aliased_path() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("sub")).unwrap();
    let file = tmp.path().join("a.nupkg");
    std::fs::write(&file, b"data").unwrap();

    let aliased = tmp.path().join(".").join("sub").join("..").join("a.nupkg");
    assert!(same_file(&file, &aliased));
    assert!(!same_file(&file, &tmp.path().join("missing.nupkg")));
}

#[test]
fn test_copy_unless_same_keeps_contents() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("sub")).unwrap();
    let file = tmp.path().join("a.nupkg");
    std::fs::write(&file, b"data").unwrap();

    copy_unless_same(&file, &tmp.path().join("sub").join("..").join("a.nupkg")).unwrap();
    assert_eq!(std::fs::read(&file).unwrap(), b"data");

    let other = tmp.path().join("b.nupkg");
    copy_unless_same(&file, &other).unwrap();
    assert_eq!(std::fs::read(&other).unwrap(), b"data");
}
