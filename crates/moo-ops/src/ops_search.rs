//! Operation: search configured sources.

use moo_core::config::MooConfig;
use moo_core::package::Package;

/// A search hit and the source it came from.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub source: String,
    pub package: Package,
}

/// Search every configured source (or only `source`), in source order.
pub fn search(
    config: &MooConfig,
    query: &str,
    source: Option<&str>,
) -> miette::Result<Vec<SearchHit>> {
    let sources = crate::open_configured_sources(config, source)?;
    let sp = moo_util::progress::spinner(&format!("Searching for '{query}'..."));
    let mut hits = Vec::new();
    for source in &sources {
        let found = match source.search(query) {
            Ok(found) => found,
            Err(e) => {
                sp.finish_and_clear();
                return Err(e.into());
            }
        };
        hits.extend(found.into_iter().map(|package| SearchHit {
            source: source.name().to_string(),
            package,
        }));
    }
    sp.finish_and_clear();
    Ok(hits)
}
