//! Handler for `moo outdated`.

use miette::Result;

use moo_core::config::MooConfig;

pub fn exec(config: &MooConfig, source: Option<&str>) -> Result<()> {
    let entries = moo_ops::ops_outdated::outdated(config, source)?;
    if entries.is_empty() {
        println!("All installed packages are up to date.");
        return Ok(());
    }
    let width = entries.iter().map(|e| e.id.len()).max().unwrap_or(0);
    for entry in &entries {
        println!(
            "{:<width$}  {} -> {} ({})",
            entry.id, entry.installed, entry.latest, entry.source
        );
    }
    Ok(())
}
