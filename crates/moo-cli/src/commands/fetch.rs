//! Handler for `moo fetch`.

use std::path::Path;

use miette::Result;

use moo_core::config::MooConfig;

pub fn exec(config: &MooConfig, dependency: &str, dest: &Path, source: Option<&str>) -> Result<()> {
    let path = moo_ops::ops_fetch::fetch(config, dependency, dest, source)?;
    println!("{}", path.display());
    Ok(())
}
