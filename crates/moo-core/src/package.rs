use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dependency::PackageDependency;
use crate::version::PackageVersion;

/// Descriptive metadata carried by a package. Not used for resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owners: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
}

/// Where a package's bytes live, as reported by the source that listed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "path")]
pub enum PackageLocation {
    #[default]
    Unknown,
    /// A `.nupkg` archive on disk.
    Archive(PathBuf),
    /// An unpacked package directory.
    Installed(PathBuf),
    /// A download URL.
    Remote(String),
}

/// An identified, versioned unit with metadata and dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub version: PackageVersion,
    #[serde(default)]
    pub details: PackageDetails,
    #[serde(default)]
    pub dependencies: Vec<PackageDependency>,
    #[serde(default)]
    pub location: PackageLocation,
}

impl Package {
    pub fn new(id: impl Into<String>, version: PackageVersion) -> Self {
        Self {
            id: id.into(),
            version,
            details: PackageDetails::default(),
            dependencies: Vec::new(),
            location: PackageLocation::Unknown,
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<PackageDependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_details(mut self, details: PackageDetails) -> Self {
        self.details = details;
        self
    }

    pub fn with_location(mut self, location: PackageLocation) -> Self {
        self.location = location;
        self
    }

    /// Whether this package has the given id, ignoring ASCII case.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }

    /// Key used to group packages by id.
    pub fn id_key(&self) -> String {
        self.id.to_ascii_lowercase()
    }

    /// Archive file name: `<Id>.<Version>.nupkg`.
    pub fn file_name(&self) -> String {
        format!("{}.{}.nupkg", self.id, self.version)
    }

    /// Installed directory name: `<Id>-<Version>`.
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.id, self.version)
    }

    /// A dependency pinned to exactly this package's id and version.
    pub fn to_dependency(&self) -> PackageDependency {
        PackageDependency::exact(self.id.clone(), self.version.clone())
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}
