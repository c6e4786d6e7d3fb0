//! Package sources: where packages are listed, fetched, pushed and installed.
//!
//! Every backend implements [`source::Source`]. Directory and remote sources
//! are what users configure; the installed source is the package directory
//! under `moo_dir`; the in-memory source backs tests.

pub mod archive;
pub mod directory;
pub mod download;
pub mod feed;
pub mod installed;
pub mod memory;
pub mod nuspec;
pub mod remote;
pub mod source;

pub use source::{best_match, latest_by_id, open_source, open_sources, Source};
