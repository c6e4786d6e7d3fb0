//! Operation: manage the `[[source]]` entries of `config.toml`.

use std::path::Path;

use toml_edit::{value, Array, ArrayOfTables, DocumentMut, Item, Table};

use moo_core::config::{MooConfig, SourceEntry};
use moo_util::errors::MooError;
use moo_util::progress::status;

/// Configured sources in query order.
pub fn list(config: &MooConfig) -> Vec<SourceEntry> {
    config.sources.clone()
}

fn read_doc(path: &Path) -> miette::Result<DocumentMut> {
    if !path.is_file() {
        return Ok(DocumentMut::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| MooError::Config {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;
    let doc = content.parse::<DocumentMut>().map_err(|e| MooError::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })?;
    Ok(doc)
}

fn write_doc(path: &Path, doc: &DocumentMut) -> miette::Result<()> {
    if let Some(parent) = path.parent() {
        moo_util::fs::ensure_dir(parent).map_err(MooError::Io)?;
    }
    std::fs::write(path, doc.to_string()).map_err(MooError::Io)?;
    Ok(())
}

fn entry_table(entry: &SourceEntry) -> Table {
    let mut table = Table::new();
    table["name"] = value(entry.name.as_str());
    table["url"] = value(entry.url.as_str());
    table
}

/// The `[[source]]` array of `doc`. A file without one is seeded with the
/// sources currently in effect, so editing never drops the default feed.
fn source_tables<'a>(
    doc: &'a mut DocumentMut,
    current: &[SourceEntry],
) -> miette::Result<&'a mut ArrayOfTables> {
    let needs_seed = match doc.get("source") {
        None => true,
        Some(Item::Value(v)) => v.as_array().is_some_and(|a| a.is_empty()),
        Some(_) => false,
    };
    if needs_seed {
        let mut tables = ArrayOfTables::new();
        if doc.get("source").is_none() {
            for entry in current {
                tables.push(entry_table(entry));
            }
        }
        doc["source"] = Item::ArrayOfTables(tables);
    }
    doc["source"]
        .as_array_of_tables_mut()
        .ok_or_else(|| {
            MooError::Config {
                message: "`source` in config.toml must be a list of [[source]] tables".to_string(),
            }
            .into()
        })
}

fn table_name(table: &Table) -> Option<&str> {
    table.get("name").and_then(|item| item.as_str())
}

/// Append a source to the config file, keeping its formatting.
pub fn add(config: &MooConfig, name: &str, url: &str) -> miette::Result<SourceEntry> {
    if name.trim().is_empty() || url.trim().is_empty() {
        return Err(MooError::Config {
            message: "a source needs a name and a URL or path".to_string(),
        }
        .into());
    }
    let path = config.config_path();
    let mut doc = read_doc(&path)?;
    let tables = source_tables(&mut doc, &config.sources)?;

    let exists = tables
        .iter()
        .any(|t| table_name(t).is_some_and(|n| n.eq_ignore_ascii_case(name)));
    if exists {
        return Err(MooError::Config {
            message: format!("a source named '{name}' already exists"),
        }
        .into());
    }

    let entry = SourceEntry::new(name.trim(), url.trim());
    tables.push(entry_table(&entry));
    write_doc(&path, &doc)?;
    status("Added", &format!("source {} ({})", entry.name, entry.url));
    Ok(entry)
}

/// Remove a source from the config file by name, ignoring case.
pub fn remove(config: &MooConfig, name: &str) -> miette::Result<()> {
    let path = config.config_path();
    let mut doc = read_doc(&path)?;
    let tables = source_tables(&mut doc, &config.sources)?;

    let index = tables
        .iter()
        .position(|t| table_name(t).is_some_and(|n| n.eq_ignore_ascii_case(name)))
        .ok_or_else(|| MooError::Config {
            message: format!("no source named '{name}'"),
        })?;
    tables.remove(index);

    // An empty [[source]] list can't be written; keep `source = []` so the
    // default feed doesn't come back on the next load.
    if tables.is_empty() {
        doc["source"] = value(Array::new());
    }
    write_doc(&path, &doc)?;
    status("Removed", &format!("source {name}"));
    Ok(())
}
