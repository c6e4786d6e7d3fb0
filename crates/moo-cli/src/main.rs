//! moo CLI binary.
//!
//! Initializes logging via `tracing`, parses arguments with `clap`, loads the
//! configuration and dispatches to the command handler.

mod cli;
mod commands;

use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = moo_core::config::MooConfig::load()?;
    if let Some(dir) = &args.moo_dir {
        config.moo_dir = Some(dir.clone());
    }
    config.verbose = args.verbose;
    config.debug = args.debug;
    tracing::debug!("moo home {}, installing into {}", config.home.display(), config.moo_dir().display());

    commands::dispatch(args, &config)
}
