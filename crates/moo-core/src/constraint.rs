//! Single version constraints: an operator paired with a version.

use std::fmt;

use moo_util::errors::{MooError, MooResult};

use crate::version::PackageVersion;

/// Comparison operator of a [`VersionConstraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    EqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    /// `~>`: at least the given version, within the same major segment.
    PessimisticallyGreaterThan,
}

impl Operator {
    /// Map an operator symbol to its operator. `==` is an alias of `=`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" | "==" => Some(Self::EqualTo),
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterThanOrEqualTo),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanOrEqualTo),
            "~>" => Some(Self::PessimisticallyGreaterThan),
            _ => None,
        }
    }

    /// Canonical symbol used when rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::EqualTo => "=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::PessimisticallyGreaterThan => "~>",
        }
    }
}

/// Characters that may appear in an operator symbol.
pub(crate) fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '<' | '>' | '~' | '!')
}

/// One `<operator> <version>` requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionConstraint {
    pub operator: Operator,
    pub version: PackageVersion,
}

impl VersionConstraint {
    pub fn new(operator: Operator, version: PackageVersion) -> Self {
        Self { operator, version }
    }

    /// Parse an operator token and a version token, e.g. `(">=", "1.0")`.
    pub fn parse(operator: &str, version: &str) -> MooResult<Self> {
        let op = Operator::from_symbol(operator.trim()).ok_or_else(|| {
            MooError::format(format!("unrecognized version operator '{operator}'"))
        })?;
        Ok(Self::new(op, PackageVersion::parse(version)?))
    }

    /// Whether `candidate` satisfies this constraint.
    pub fn matches(&self, candidate: &PackageVersion) -> bool {
        match self.operator {
            Operator::EqualTo => candidate == &self.version,
            Operator::GreaterThan => candidate > &self.version,
            Operator::GreaterThanOrEqualTo => candidate >= &self.version,
            Operator::LessThan => candidate < &self.version,
            Operator::LessThanOrEqualTo => candidate <= &self.version,
            Operator::PessimisticallyGreaterThan => {
                candidate >= &self.version && candidate.major() == self.version.major()
            }
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator.symbol(), self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(op: &str, version: &str) -> VersionConstraint {
        VersionConstraint::parse(op, version).unwrap()
    }

    fn v(s: &str) -> PackageVersion {
        PackageVersion::parse(s).unwrap()
    }

    #[test]
    fn equal_to_uses_padded_comparison() {
        let eq = c("=", "1.2");
        assert!(eq.matches(&v("1.2")));
        assert!(eq.matches(&v("1.2.0")));
        assert!(!eq.matches(&v("1.2.1")));
        assert_eq!(c("==", "1.2").operator, Operator::EqualTo);
    }

    #[test]
    fn relational_operators() {
        assert!(c(">", "1.0").matches(&v("1.0.1")));
        assert!(!c(">", "1.0").matches(&v("1.0.0")));
        assert!(c(">=", "1.0").matches(&v("1.0.0")));
        assert!(!c(">=", "1.0").matches(&v("0.9")));
        assert!(c("<", "2.0").matches(&v("1.99")));
        assert!(!c("<", "2.0").matches(&v("2")));
        assert!(c("<=", "2.0").matches(&v("2.0.0")));
        assert!(!c("<=", "2.0").matches(&v("2.0.0.1")));
    }

    #[test]
    fn pessimistic_stays_on_major_line() {
        let twiddle = c("~>", "5.0");
        assert!(twiddle.matches(&v("5.0")));
        assert!(twiddle.matches(&v("5.1")));
        assert!(twiddle.matches(&v("5.9.9")));
        assert!(!twiddle.matches(&v("6.0")));
        assert!(!twiddle.matches(&v("4.9")));
    }

    #[test]
    fn pessimistic_respects_lower_bound() {
        let twiddle = c("~>", "1.2.3");
        assert!(!twiddle.matches(&v("1.2.2")));
        assert!(twiddle.matches(&v("1.2.3")));
        assert!(twiddle.matches(&v("1.8")));
        assert!(!twiddle.matches(&v("2.0")));
    }

    #[test]
    fn pessimistic_single_segment() {
        let twiddle = c("~>", "3");
        assert!(twiddle.matches(&v("3.0.0.1")));
        assert!(twiddle.matches(&v("3.99.1")));
        assert!(!twiddle.matches(&v("4")));
        assert!(!twiddle.matches(&v("2.9")));
    }

    #[test]
    fn unrecognized_operator() {
        for op in ["=>", "=<", "!=", "~", "^", ""] {
            let err = VersionConstraint::parse(op, "1.0").unwrap_err();
            assert!(matches!(err, MooError::Format { .. }), "{op}");
        }
    }

    #[test]
    fn bad_version_is_format_error() {
        let err = VersionConstraint::parse(">", "one").unwrap_err();
        assert!(matches!(err, MooError::Format { .. }));
    }

    #[test]
    fn display() {
        assert_eq!(c("=", "1.2.3").to_string(), "= 1.2.3");
        assert_eq!(c("==", "1.2.3").to_string(), "= 1.2.3");
        assert_eq!(c(">", "1").to_string(), "> 1");
        assert_eq!(c(">=", "1.0").to_string(), ">= 1.0");
        assert_eq!(c("<", "2.0.1").to_string(), "< 2.0.1");
        assert_eq!(c("<=", "2").to_string(), "<= 2");
        assert_eq!(c("~>", "5.0").to_string(), "~> 5.0");
    }
}
