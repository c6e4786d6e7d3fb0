//! Core data types for the moo package manager.
//!
//! This crate defines the version and dependency model shared by every other
//! moo crate: dotted package versions, single version constraints, dependency
//! expressions with their text grammar, package records, the explicit
//! configuration value, and the `Moofile` dependency list.
//!
//! This crate is intentionally free of network and archive I/O.

pub mod config;
pub mod constraint;
pub mod dependency;
pub mod moofile;
pub mod package;
pub mod version;
