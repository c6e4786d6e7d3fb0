//! Handler for `moo search`.

use console::style;
use miette::Result;

use moo_core::config::MooConfig;

pub fn exec(config: &MooConfig, query: &str, source: Option<&str>) -> Result<()> {
    let hits = moo_ops::ops_search::search(config, query, source)?;
    if hits.is_empty() {
        println!("No packages matching '{query}'.");
        return Ok(());
    }
    for hit in &hits {
        let summary = hit
            .package
            .details
            .summary
            .as_deref()
            .or(hit.package.details.description.as_deref())
            .and_then(|s| s.lines().next())
            .unwrap_or("");
        println!(
            "{} {} [{}] {summary}",
            style(&hit.package.id).bold(),
            hit.package.version,
            hit.source,
        );
    }
    Ok(())
}
