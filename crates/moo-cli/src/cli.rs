//! CLI argument definitions for moo.
//!
//! Uses `clap` derive macros to define the full command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "moo",
    version,
    about = "A package manager for NuGet packages",
    long_about = "moo installs, packs and publishes .nupkg packages from NuGet feeds \
                  and local directories, resolving dependencies across ordered sources."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Install packages into this directory instead of the configured one
    #[arg(long, global = true, value_name = "DIR")]
    pub moo_dir: Option<PathBuf>,

    /// Use only the named configured source
    #[arg(short, long, global = true, value_name = "NAME")]
    pub source: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install packages and their dependencies (reads Moofile when none given)
    Install {
        /// Dependency expressions, e.g. "NUnit" or "log4net >= 1.2 < 1.3"
        dependencies: Vec<String>,
    },

    /// Remove an installed package
    Uninstall {
        /// Dependency expression selecting the installed package
        dependency: String,
    },

    /// List installed packages
    List {
        /// Only packages whose id contains this text
        filter: Option<String>,
        /// Show every installed version, not just the latest
        #[arg(short, long)]
        all: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Search configured sources
    Search {
        /// Text to look for in package ids and tags
        query: String,
    },

    /// Show details of the package a dependency resolves to
    Show {
        /// Dependency expression
        dependency: String,
    },

    /// List installed packages with newer versions available
    Outdated,

    /// Download a package archive without installing it
    Fetch {
        /// Dependency expression
        dependency: String,
        /// Directory to download into
        #[arg(short, long, default_value = ".")]
        dest: PathBuf,
    },

    /// Extract a package archive
    Unpack {
        /// Path to the .nupkg
        archive: PathBuf,
        /// Directory to extract into (default: <Id>-<Version> next to the archive)
        #[arg(short, long)]
        dest: Option<PathBuf>,
    },

    /// Build a .nupkg from a directory containing a .nuspec
    Pack {
        /// Package directory
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Directory to write the archive to (default: the package directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Glob of files to leave out (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Publish an archive to a source
    Push {
        /// Path to the .nupkg
        archive: PathBuf,
    },

    /// Remove a package version from a source
    Yank {
        /// Dependency expression selecting the version
        dependency: String,
    },

    /// Manage package sources
    Source {
        #[command(subcommand)]
        action: SourceAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SourceAction {
    /// List configured sources in query order
    List,
    /// Add a source (feed URL or directory path)
    Add {
        /// Source name
        name: String,
        /// Feed URL or directory path
        url: String,
    },
    /// Remove a source
    Remove {
        /// Source name
        name: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
