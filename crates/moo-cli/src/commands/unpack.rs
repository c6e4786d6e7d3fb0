//! Handler for `moo unpack`.

use std::path::Path;

use miette::Result;

pub fn exec(archive: &Path, dest: Option<&Path>) -> Result<()> {
    moo_ops::ops_unpack::unpack(archive, dest)?;
    Ok(())
}
