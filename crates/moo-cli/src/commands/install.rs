//! Handler for `moo install`.

use miette::Result;

use moo_core::config::MooConfig;
use moo_ops::ops_install::{self, InstallOptions};
use moo_util::errors::MooError;
use moo_util::progress::status_info;

pub fn exec(config: &MooConfig, dependencies: Vec<String>, source: Option<&str>) -> Result<()> {
    let opts = InstallOptions {
        dependencies,
        project_dir: std::env::current_dir().map_err(MooError::Io)?,
        source: source.map(str::to_string),
    };
    let report = ops_install::install(config, &opts)?;

    if report.installed.is_empty() {
        status_info("Finished", "nothing to install, everything is up to date");
    } else {
        let n = report.installed.len();
        let noun = if n == 1 { "package" } else { "packages" };
        status_info("Finished", &format!("installed {n} {noun}"));
    }
    Ok(())
}
