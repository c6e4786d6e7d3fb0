//! Conflict reporting.
//!
//! The first resolution of an id wins. Later requests for the same id whose
//! constraints the winner does not satisfy are recorded here; they never
//! change what was resolved.

use std::fmt;

/// All constraint conflicts encountered during one resolution.
#[derive(Debug, Default, Clone)]
pub struct ConflictReport {
    pub conflicts: Vec<VersionConflict>,
}

/// A request the already-resolved package does not satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConflict {
    /// The dependency expression as requested, e.g. `log4net >= 2.0`.
    pub requested: String,
    /// The package that was kept, e.g. `log4net 1.2.10`.
    pub resolved: String,
    /// The package whose dependency list made the request, `None` for a root.
    pub requested_by: Option<String>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, conflict: VersionConflict) {
        self.conflicts.push(conflict);
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionConflict> {
        self.conflicts.iter()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return write!(f, "No version conflicts.");
        }
        writeln!(f, "Version conflicts ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            writeln!(f, "  {c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for VersionConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.requested_by {
            Some(by) => write!(
                f,
                "{by} requires {} but {} was resolved",
                self.requested, self.resolved
            ),
            None => write!(
                f,
                "{} requested but {} was resolved",
                self.requested, self.resolved
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report() {
        let report = ConflictReport::new();
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
        assert_eq!(report.to_string(), "No version conflicts.");
    }

    #[test]
    fn report_with_conflicts() {
        let mut report = ConflictReport::new();
        report.add(VersionConflict {
            requested: "log4net >= 2.0".to_string(),
            resolved: "log4net 1.2.10".to_string(),
            requested_by: Some("NHibernate 3.1".to_string()),
        });
        report.add(VersionConflict {
            requested: "log4net = 1.0".to_string(),
            resolved: "log4net 1.2.10".to_string(),
            requested_by: None,
        });
        assert_eq!(report.len(), 2);
        let s = report.to_string();
        assert!(s.starts_with("Version conflicts (2):"));
        assert!(s.contains("NHibernate 3.1 requires log4net >= 2.0 but log4net 1.2.10 was resolved"));
        assert!(s.contains("log4net = 1.0 requested but log4net 1.2.10 was resolved"));
    }
}
