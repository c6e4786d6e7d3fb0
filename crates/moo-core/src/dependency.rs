//! Dependency expressions: a package id plus zero or more version constraints.
//!
//! The text form is the id followed by `<operator> <version>` pairs separated
//! by whitespace or commas:
//!
//! ```text
//! Foo                     any version
//! Foo 1.2.3               exactly 1.2.3
//! Foo >= 1.0              at least 1.0
//! Foo > 1.0 < 2.0.1       both constraints must hold
//! Foo ~>5.0, < 5.4        operators may be glued to the version
//! ```

use std::fmt;
use std::str::FromStr;

use moo_util::errors::{MooError, MooResult};
use serde::{Deserialize, Serialize};

use crate::constraint::{is_operator_char, Operator, VersionConstraint};
use crate::package::Package;
use crate::version::PackageVersion;

/// A package id and the constraints a matching version must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageDependency {
    id: String,
    constraints: Vec<VersionConstraint>,
}

/// A token of the dependency grammar after the id.
enum Token<'a> {
    Operator(&'a str),
    Constraint(&'a str, &'a str),
    Version(&'a str),
}

fn classify(token: &str) -> Token<'_> {
    let split = token
        .char_indices()
        .find(|(_, c)| !is_operator_char(*c))
        .map_or(token.len(), |(i, _)| i);
    match split {
        0 => Token::Version(token),
        n if n == token.len() => Token::Operator(token),
        n => Token::Constraint(&token[..n], &token[n..]),
    }
}

impl PackageDependency {
    /// Build a dependency from an id and explicit constraints.
    pub fn new(id: impl Into<String>, constraints: Vec<VersionConstraint>) -> Self {
        Self {
            id: id.into(),
            constraints,
        }
    }

    /// A dependency on any version of `id`.
    pub fn any(id: impl Into<String>) -> Self {
        Self::new(id, Vec::new())
    }

    /// A dependency on exactly `version` of `id`.
    pub fn exact(id: impl Into<String>, version: PackageVersion) -> Self {
        Self::new(
            id,
            vec![VersionConstraint::new(Operator::EqualTo, version)],
        )
    }

    /// Parse a free-text dependency expression.
    pub fn parse(text: &str) -> MooResult<Self> {
        let tokens: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        let Some((id, rest)) = tokens.split_first() else {
            return Err(MooError::format("empty dependency expression"));
        };
        if id.starts_with(is_operator_char) {
            return Err(MooError::format(format!(
                "dependency '{text}' must start with a package id"
            )));
        }

        let mut constraints = Vec::new();
        let mut i = 0;
        while i < rest.len() {
            match classify(rest[i]) {
                Token::Operator(op) => {
                    let version = rest.get(i + 1).ok_or_else(|| {
                        MooError::format(format!(
                            "operator '{op}' in '{text}' is missing a version"
                        ))
                    })?;
                    constraints.push(VersionConstraint::parse(op, version)?);
                    i += 2;
                }
                Token::Constraint(op, version) => {
                    constraints.push(VersionConstraint::parse(op, version)?);
                    i += 1;
                }
                Token::Version(version) if i + 1 == rest.len() => {
                    constraints.push(VersionConstraint::new(
                        Operator::EqualTo,
                        PackageVersion::parse(version)?,
                    ));
                    i += 1;
                }
                Token::Version(token) => {
                    return Err(MooError::format(format!(
                        "unexpected '{token}' in '{text}': expected an operator"
                    )));
                }
            }
        }

        Ok(Self {
            id: (*id).to_string(),
            constraints,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Constraints in parse order. Empty means any version.
    pub fn constraints(&self) -> &[VersionConstraint] {
        &self.constraints
    }

    /// Whether this dependency names `id`, ignoring ASCII case.
    pub fn is_for(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }

    /// Whether `version` satisfies every constraint.
    pub fn matches_version(&self, version: &PackageVersion) -> bool {
        self.constraints.iter().all(|c| c.matches(version))
    }

    /// Whether `package` has this id (ignoring case) and a satisfying version.
    pub fn matches(&self, package: &Package) -> bool {
        self.is_for(&package.id) && self.matches_version(&package.version)
    }

    /// Whether `package` satisfies every one of `dependencies` at once.
    pub fn matches_all(package: &Package, dependencies: &[PackageDependency]) -> bool {
        dependencies.iter().all(|d| d.matches(package))
    }
}

impl fmt::Display for PackageDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)?;
        for constraint in &self.constraints {
            write!(f, " {constraint}")?;
        }
        Ok(())
    }
}

impl FromStr for PackageDependency {
    type Err = MooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PackageDependency {
    type Error = MooError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PackageDependency> for String {
    fn from(dependency: PackageDependency) -> Self {
        dependency.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(s: &str) -> PackageDependency {
        PackageDependency::parse(s).unwrap()
    }

    fn pkg(id: &str, version: &str) -> Package {
        Package::new(id, PackageVersion::parse(version).unwrap())
    }

    #[test]
    fn any_version() {
        let d = dep("AnyVersion");
        assert!(d.constraints().is_empty());
        assert_eq!(d.to_string(), "AnyVersion");
        assert!(d.matches(&pkg("AnyVersion", "0.0.1")));
        assert!(d.matches(&pkg("anyversion", "99")));
    }

    #[test]
    fn implicit_equal_to() {
        let d = dep("EqualTo 1.2.3");
        assert_eq!(d.constraints().len(), 1);
        assert_eq!(d.constraints()[0].operator, Operator::EqualTo);
        assert_eq!(d.to_string(), "EqualTo = 1.2.3");
    }

    #[test]
    fn glued_pessimistic() {
        let d = dep("SortaGreater ~>5.0");
        assert_eq!(d.to_string(), "SortaGreater ~> 5.0");
        assert!(d.matches(&pkg("SortaGreater", "5.1")));
        assert!(!d.matches(&pkg("SortaGreater", "6.0")));
    }

    #[test]
    fn two_constraints_and_together() {
        let d = dep("GreaterThanOrLess > 1.0 < 2.0.1");
        assert_eq!(d.constraints().len(), 2);
        assert!(d.matches(&pkg("GreaterThanOrLess", "1.5")));
        assert!(!d.matches(&pkg("GreaterThanOrLess", "2.0.1")));
        assert!(!d.matches(&pkg("GreaterThanOrLess", "0.9")));
        assert_eq!(d.to_string(), "GreaterThanOrLess > 1.0 < 2.0.1");
    }

    #[test]
    fn commas_tabs_and_runs_of_spaces() {
        let d = dep("Foo\t>=  1.0,<2.0");
        assert_eq!(d.id(), "Foo");
        assert_eq!(d.to_string(), "Foo >= 1.0 < 2.0");
        let d = dep("Foo >= 1.0 , < 2.0");
        assert_eq!(d.constraints().len(), 2);
    }

    #[test]
    fn double_equals_alias() {
        assert_eq!(dep("Foo == 1.0").to_string(), "Foo = 1.0");
        assert_eq!(dep("Foo =1.0").to_string(), "Foo = 1.0");
    }

    #[test]
    fn display_round_trips() {
        for text in [
            "Foo",
            "Foo 1.0",
            "Foo >= 1.0",
            "Foo ~>5",
            "Foo > 1.0 < 2.0.1",
            "Foo >=1, <=3.0.0.0",
        ] {
            let first = dep(text);
            let second = dep(&first.to_string());
            assert_eq!(first, second, "{text}");
        }
    }

    #[test]
    fn id_comparison_ignores_case() {
        let d = dep("NUnit >= 2.5");
        assert!(d.matches(&pkg("nunit", "2.5.10")));
        assert!(d.matches(&pkg("NUNIT", "2.6")));
        assert!(!d.matches(&pkg("NUnit.Mocks", "2.6")));
    }

    #[test]
    fn dangling_operator() {
        let err = PackageDependency::parse("Foo >=").unwrap_err();
        assert!(matches!(err, MooError::Format { .. }));
        let err = PackageDependency::parse("Foo > 1.0 <").unwrap_err();
        assert!(matches!(err, MooError::Format { .. }));
    }

    #[test]
    fn malformed_inputs() {
        for bad in [
            "",
            "   ",
            ">= 1.0",
            "Foo => 1.0",
            "Foo >= one",
            "Foo 1.0 2.0",
            "Foo 1.0 < 2.0",
            "Foo > >= 1.0",
        ] {
            let err = PackageDependency::parse(bad).unwrap_err();
            assert!(matches!(err, MooError::Format { .. }), "{bad:?}: {err}");
        }
    }

    #[test]
    fn matches_all_requires_every_dependency() {
        let package = pkg("Foo", "1.5");
        let deps = vec![dep("Foo > 1.0"), dep("foo < 2.0")];
        assert!(PackageDependency::matches_all(&package, &deps));

        let deps = vec![dep("Foo > 1.0"), dep("Foo < 1.5")];
        assert!(!PackageDependency::matches_all(&package, &deps));

        let deps = vec![dep("Foo"), dep("Bar")];
        assert!(!PackageDependency::matches_all(&package, &deps));
    }

    #[test]
    fn programmatic_constructors() {
        let exact = PackageDependency::exact("Foo", PackageVersion::parse("1.0").unwrap());
        assert_eq!(exact.to_string(), "Foo = 1.0");
        assert_eq!(PackageDependency::any("Bar").to_string(), "Bar");
    }

    #[test]
    fn serde_uses_text_form() {
        let json = serde_json::to_string(&dep("Foo ~> 1.2")).unwrap();
        assert_eq!(json, "\"Foo ~> 1.2\"");
        let back: PackageDependency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dep("Foo ~> 1.2"));
    }
}
