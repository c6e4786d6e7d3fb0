//! Handler for `moo show`.

use miette::Result;

use moo_core::config::MooConfig;
use moo_ops::ops_show;

pub fn exec(config: &MooConfig, dependency: &str, source: Option<&str>) -> Result<()> {
    let (source, package) = ops_show::show(config, dependency, source)?;
    print!("{}", ops_show::describe(&package, &source));
    Ok(())
}
