//! Handler for `moo uninstall`.

use miette::Result;

use moo_core::config::MooConfig;

pub fn exec(config: &MooConfig, dependency: &str) -> Result<()> {
    moo_ops::ops_uninstall::uninstall(config, dependency)?;
    Ok(())
}
