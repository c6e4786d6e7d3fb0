//! Handler for `moo list`.

use console::style;
use miette::Result;

use moo_core::config::MooConfig;
use moo_ops::ops_list::{self, ListOptions};
use moo_util::errors::MooError;

pub fn exec(config: &MooConfig, filter: Option<String>, all: bool, json: bool) -> Result<()> {
    let packages = ops_list::list(config, &ListOptions { filter, all })?;

    if json {
        let text = serde_json::to_string_pretty(&packages).map_err(|e| MooError::Generic {
            message: format!("Failed to serialize package list: {e}"),
        })?;
        println!("{text}");
        return Ok(());
    }

    if packages.is_empty() {
        println!("No packages installed.");
        return Ok(());
    }
    for package in &packages {
        println!("{} {}", style(&package.id).bold(), package.version);
    }
    Ok(())
}
