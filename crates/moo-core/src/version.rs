//! Package version parsing and ordering.
//!
//! A version is a dotted sequence of non-negative integers of any length
//! (`1`, `1.2`, `1.2.3.4`, ...). Ordering compares segment by segment, and a
//! shorter version behaves as if padded with trailing zeros, so `1.2` equals
//! `1.2.0`. The explicit segments are kept for display, which means a parsed
//! version always prints back exactly as written.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use moo_util::errors::{MooError, MooResult};
use serde::{Deserialize, Serialize};

/// A parsed package version with comparable numeric segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageVersion {
    segments: Vec<u64>,
}

impl PackageVersion {
    /// Build a version from explicit segments. At least one segment is required.
    pub fn new(segments: Vec<u64>) -> MooResult<Self> {
        if segments.is_empty() {
            return Err(MooError::format("a version needs at least one segment"));
        }
        Ok(Self { segments })
    }

    /// Parse a dotted numeric version such as `"1.2.3.4"`.
    pub fn parse(text: &str) -> MooResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MooError::format("empty version string"));
        }

        let mut segments = Vec::new();
        for component in text.split('.') {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(MooError::format(format!(
                    "invalid version '{text}': segment '{component}' is not a non-negative integer"
                )));
            }
            let n = component.parse::<u64>().map_err(|e| {
                MooError::format(format!("invalid version '{text}': segment '{component}': {e}"))
            })?;
            segments.push(n);
        }

        Ok(Self { segments })
    }

    /// The explicit segments, exactly as parsed or constructed.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// The leftmost (most significant) segment.
    pub fn major(&self) -> u64 {
        self.segments[0]
    }

    /// Segments without trailing zeros; the canonical form used for hashing.
    fn significant(&self) -> &[u64] {
        let end = self
            .segments
            .iter()
            .rposition(|&s| s != 0)
            .map_or(0, |i| i + 1);
        &self.segments[..end]
    }
}

impl PartialEq for PackageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PackageVersion {}

impl Hash for PackageVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl Ord for PackageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let max_len = self.segments.len().max(other.segments.len());
        for i in 0..max_len {
            let a = self.segments.get(i).copied().unwrap_or(0);
            let b = other.segments.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for PackageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for PackageVersion {
    type Err = MooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = MooError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PackageVersion> for String {
    fn from(version: PackageVersion) -> Self {
        version.to_string()
    }
}
