#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use moo_core::config::{MooConfig, SourceEntry};
use moo_core::dependency::PackageDependency;
use moo_core::package::PackageDetails;
use moo_core::version::PackageVersion;
use moo_source::archive;
use moo_source::nuspec::{self, Nuspec};

/// A moo home with one directory source named `local`.
pub struct Fixture {
    pub tmp: tempfile::TempDir,
    pub config: MooConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = MooConfig::for_home(tmp.path().join("home"));
        config.sources = vec![SourceEntry::new("local", tmp.path().join("repo").to_string_lossy())];
        Self { tmp, config }
    }

    pub fn repo(&self) -> PathBuf {
        self.tmp.path().join("repo")
    }

    /// Build `<id>.<version>.nupkg` into the `local` source.
    pub fn publish(&self, id: &str, version: &str, deps: &[&str]) -> PathBuf {
        self.publish_to(&self.repo(), id, version, deps)
    }

    pub fn publish_to(&self, out: &Path, id: &str, version: &str, deps: &[&str]) -> PathBuf {
        let spec = Nuspec {
            id: id.to_string(),
            version: PackageVersion::parse(version).unwrap(),
            details: PackageDetails {
                description: Some(format!("The {id} package")),
                tags: vec!["fixture".to_string()],
                ..PackageDetails::default()
            },
            dependencies: deps
                .iter()
                .map(|d| PackageDependency::parse(d).unwrap())
                .collect(),
        };
        let dir = self.tmp.path().join("work").join(format!("{id}-{version}"));
        fs::create_dir_all(dir.join("content")).unwrap();
        fs::write(dir.join(format!("{id}.nuspec")), nuspec::to_xml(&spec).unwrap()).unwrap();
        fs::write(dir.join("content").join("readme.txt"), id).unwrap();
        archive::pack(&dir, out, &[]).unwrap().0
    }
}
