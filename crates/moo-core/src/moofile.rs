//! `Moofile`: a project's list of dependency expressions, one per line.
//!
//! ```text
//! # test tooling
//! NUnit ~> 2.5
//! log4net >= 1.2, < 1.3
//! ```

use std::path::Path;

use moo_util::errors::{MooError, MooResult};

use crate::dependency::PackageDependency;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Moofile {
    pub dependencies: Vec<PackageDependency>,
}

impl Moofile {
    pub const FILE_NAME: &'static str = "Moofile";

    /// Parse Moofile content. `#` starts a comment; blank lines are skipped.
    pub fn parse(content: &str) -> MooResult<Self> {
        let mut dependencies = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let dependency = PackageDependency::parse(line).map_err(|e| match e {
                MooError::Format { message } => {
                    MooError::format(format!("{} line {}: {message}", Self::FILE_NAME, index + 1))
                }
                other => other,
            })?;
            dependencies.push(dependency);
        }
        Ok(Self { dependencies })
    }

    pub fn from_path(path: &Path) -> MooResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MooError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content)
    }
}
