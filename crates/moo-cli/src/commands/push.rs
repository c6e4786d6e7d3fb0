//! Handler for `moo push`.

use std::path::Path;

use miette::Result;

use moo_core::config::MooConfig;

pub fn exec(config: &MooConfig, archive: &Path, source: Option<&str>) -> Result<()> {
    moo_ops::ops_push::push(config, archive, source)?;
    Ok(())
}
