//! Command dispatch and handler modules.

mod fetch;
mod install;
mod list;
mod outdated;
mod pack;
mod push;
mod search;
mod show;
mod source;
mod uninstall;
mod unpack;
mod yank;

use miette::Result;

use moo_core::config::MooConfig;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli, config: &MooConfig) -> Result<()> {
    let only = cli.source.as_deref();
    match cli.command {
        Command::Install { dependencies } => install::exec(config, dependencies, only),
        Command::Uninstall { dependency } => uninstall::exec(config, &dependency),
        Command::List { filter, all, json } => list::exec(config, filter, all, json),
        Command::Search { query } => search::exec(config, &query, only),
        Command::Show { dependency } => show::exec(config, &dependency, only),
        Command::Outdated => outdated::exec(config, only),
        Command::Fetch { dependency, dest } => fetch::exec(config, &dependency, &dest, only),
        Command::Unpack { archive, dest } => unpack::exec(&archive, dest.as_deref()),
        Command::Pack {
            dir,
            output,
            exclude,
        } => pack::exec(dir, output, exclude),
        Command::Push { archive } => push::exec(config, &archive, only),
        Command::Yank { dependency } => yank::exec(config, &dependency, only),
        Command::Source { action } => source::exec(config, action),
    }
}
