//! Handler for `moo source`.

use console::style;
use miette::Result;

use moo_core::config::MooConfig;
use moo_ops::ops_source;

use crate::cli::SourceAction;

pub fn exec(config: &MooConfig, action: SourceAction) -> Result<()> {
    match action {
        SourceAction::List => {
            let sources = ops_source::list(config);
            if sources.is_empty() {
                println!("No sources configured.");
            }
            for entry in &sources {
                println!("{} {}", style(&entry.name).bold(), entry.url);
            }
            Ok(())
        }
        SourceAction::Add { name, url } => ops_source::add(config, &name, &url).map(|_| ()),
        SourceAction::Remove { name } => ops_source::remove(config, &name),
    }
}
