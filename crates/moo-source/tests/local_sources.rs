use std::fs;
use std::path::{Path, PathBuf};

use moo_core::dependency::PackageDependency;
use moo_core::package::{Package, PackageDetails, PackageLocation};
use moo_core::version::PackageVersion;
use moo_source::archive;
use moo_source::directory::DirectorySource;
use moo_source::installed::InstalledSource;
use moo_source::nuspec::{self, Nuspec};
use moo_source::Source;
use moo_util::errors::MooError;

/// Pack `<id>.<version>.nupkg` into `out` with the given dependency lines.
fn make_archive(work: &Path, out: &Path, id: &str, version: &str, deps: &[&str]) -> PathBuf {
    let spec = Nuspec {
        id: id.to_string(),
        version: PackageVersion::parse(version).unwrap(),
        details: PackageDetails {
            tags: vec!["sample".to_string()],
            ..PackageDetails::default()
        },
        dependencies: deps
            .iter()
            .map(|d| PackageDependency::parse(d).unwrap())
            .collect(),
    };
    let dir = work.join(format!("{id}-{version}-src"));
    fs::create_dir_all(dir.join("lib")).unwrap();
    fs::write(dir.join(format!("{id}.nuspec")), nuspec::to_xml(&spec).unwrap()).unwrap();
    fs::write(dir.join("lib").join(format!("{id}.dll")), id.as_bytes()).unwrap();
    archive::pack(&dir, out, &[]).unwrap().0
}

fn dep(text: &str) -> PackageDependency {
    PackageDependency::parse(text).unwrap()
}

fn versions(packages: &[Package]) -> Vec<String> {
    let mut v: Vec<String> = packages.iter().map(|p| p.version.to_string()).collect();
    v.sort();
    v
}

#[test]
fn directory_source_lists_and_selects() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = tmp.path().join("repo");
    for v in ["1.0", "1.1", "2.0"] {
        make_archive(tmp.path(), &repo, "Foo", v, &["Bar >= 1.0"]);
    }
    make_archive(tmp.path(), &repo, "Bar", "1.0", &[]);

    let source = DirectorySource::new("local", &repo);
    assert_eq!(source.packages().unwrap().len(), 4);
    assert_eq!(
        versions(&source.get_packages_with_id("FOO").unwrap()),
        vec!["1.0", "1.1", "2.0"]
    );
    assert_eq!(source.get(&dep("Foo")).unwrap().unwrap().version.to_string(), "2.0");
    assert_eq!(
        source.get(&dep("Foo < 2.0")).unwrap().unwrap().version.to_string(),
        "1.1"
    );
    let foo = source.get(&dep("Foo 1.0")).unwrap().unwrap();
    assert_eq!(foo.dependencies[0].to_string(), "Bar >= 1.0");
    assert!(source.get(&dep("Missing")).unwrap().is_none());
}

#[test]
fn directory_source_skips_unreadable_archives() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = tmp.path().join("repo");
    make_archive(tmp.path(), &repo, "Good", "1.0", &[]);
    fs::write(repo.join("Bad.1.0.nupkg"), b"garbage").unwrap();

    let source = DirectorySource::new("local", &repo);
    let packages = source.packages().unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].id, "Good");
}

#[test]
fn missing_directory_is_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let source = DirectorySource::new("nowhere", tmp.path().join("absent"));
    assert!(source.packages().unwrap().is_empty());
}

#[test]
fn directory_push_fetch_yank() {
    let tmp = tempfile::tempdir().unwrap();
    let built = make_archive(tmp.path(), &tmp.path().join("out"), "Lib", "3.2", &[]);
    let source = DirectorySource::new("local", tmp.path().join("repo"));

    let pushed = source.push(&built).unwrap().unwrap();
    assert_eq!(pushed.to_string(), "Lib 3.2");
    assert!(source.root().join("Lib.3.2.nupkg").is_file());

    // pushing the same version again replaces it
    source.push(&built).unwrap();
    assert_eq!(source.packages().unwrap().len(), 1);

    let fetched = source.fetch(&dep("Lib"), &tmp.path().join("cache")).unwrap();
    assert_eq!(fetched, tmp.path().join("cache").join("Lib.3.2.nupkg"));
    assert_eq!(archive::read_package(&fetched).unwrap().id, "Lib");

    assert!(source.yank(&dep("Lib 3.2")).unwrap());
    assert!(source.packages().unwrap().is_empty());
    assert!(!source.yank(&dep("Lib")).unwrap());

    let err = source.fetch(&dep("Lib"), tmp.path()).unwrap_err();
    assert!(matches!(err, MooError::PackageNotFound { .. }));
}

#[test]
fn directory_fetch_and_push_through_aliased_paths_keep_the_archive() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = tmp.path().join("repo");
    fs::create_dir_all(repo.join("sub")).unwrap();
    let archive_path = make_archive(tmp.path(), &repo, "Foo", "1.0", &[]);
    let size = fs::metadata(&archive_path).unwrap().len();
    let source = DirectorySource::new("local", &repo);

    let aliased_dir = repo.join(".").join("sub").join("..");
    let fetched = source.fetch(&dep("Foo"), &aliased_dir).unwrap();
    assert_eq!(fs::metadata(&archive_path).unwrap().len(), size);
    assert_eq!(archive::read_package(&fetched).unwrap().to_string(), "Foo 1.0");

    let pushed = source.push(&aliased_dir.join("Foo.1.0.nupkg")).unwrap().unwrap();
    assert_eq!(pushed.to_string(), "Foo 1.0");
    assert_eq!(fs::metadata(&archive_path).unwrap().len(), size);
    assert_eq!(source.packages().unwrap().len(), 1);
}

#[test]
fn directory_source_does_not_install() {
    let tmp = tempfile::tempdir().unwrap();
    let source = DirectorySource::new("local", tmp.path());
    let err = source.uninstall(&dep("Foo")).unwrap_err();
    assert_eq!(err.to_string(), "Source 'local' does not support uninstall");
}

#[test]
fn installed_source_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let built = make_archive(tmp.path(), &tmp.path().join("out"), "Tool", "0.5", &["Dep"]);
    let installed = InstalledSource::new(tmp.path().join("packages"));

    assert!(installed.packages().unwrap().is_empty());
    assert!(!installed.is_installed("tool").unwrap());

    let package = installed.install(&built).unwrap();
    let dir = installed.root().join("Tool-0.5");
    assert_eq!(package.location, PackageLocation::Installed(dir.clone()));
    assert!(dir.join("Tool.nuspec").is_file());
    assert_eq!(fs::read(dir.join("lib/Tool.dll")).unwrap(), b"Tool");
    assert!(installed.is_installed("tool").unwrap());

    // reinstalling replaces the directory and leaves no staging behind
    installed.install(&built).unwrap();
    let entries: Vec<_> = fs::read_dir(installed.root()).unwrap().collect();
    assert_eq!(entries.len(), 1);

    let listed = installed.packages().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].dependencies[0].to_string(), "Dep");

    assert!(installed.uninstall(&dep("Tool")).unwrap());
    assert!(!dir.exists());
    assert!(!installed.uninstall(&dep("Tool")).unwrap());
}

#[test]
fn installed_source_ignores_directories_without_manifest() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("stray")).unwrap();
    let installed = InstalledSource::new(tmp.path());
    assert!(installed.packages().unwrap().is_empty());
    assert_eq!(installed.name(), "installed");
}
