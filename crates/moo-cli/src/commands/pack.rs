//! Handler for `moo pack`.

use std::path::PathBuf;

use miette::Result;

use moo_ops::ops_pack::{self, PackOptions};

pub fn exec(dir: PathBuf, output: Option<PathBuf>, excludes: Vec<String>) -> Result<()> {
    let (path, _) = ops_pack::pack(&PackOptions {
        dir,
        output,
        excludes,
    })?;
    println!("{}", path.display());
    Ok(())
}
