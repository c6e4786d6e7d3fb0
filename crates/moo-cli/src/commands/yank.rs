//! Handler for `moo yank`.

use miette::Result;

use moo_core::config::MooConfig;

pub fn exec(config: &MooConfig, dependency: &str, source: Option<&str>) -> Result<()> {
    moo_ops::ops_yank::yank(config, dependency, source)
}
