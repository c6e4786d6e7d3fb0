//! Dependency resolution: depth-first traversal across ordered sources,
//! first resolution of an id wins, with a non-invasive conflict report.

pub mod cache;
pub mod conflict;
pub mod plan;
pub mod resolver;
