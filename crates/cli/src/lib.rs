//! Library surface of the `triage` binary.
//!
//! The catalog is supplied by an external persistence layer as a JSON array
//! ordered newest-first; every command here loads that snapshot read-only,
//! runs one pure engine operation, and returns a serializable output.

pub mod commands;

use std::path::Path;

use anyhow::{bail, Context, Result};
use triage_catalog::IssueRecord;

/// Load a catalog export. File order is recency order (newest first) and is
/// preserved: the matcher's tie-break depends on it.
pub fn load_catalog(path: &Path) -> Result<Vec<IssueRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("catalog file {} is not valid JSON", path.display()))?;
    if !value.is_array() {
        bail!(
            "catalog file {} must contain a JSON array of issue records",
            path.display()
        );
    }
    let catalog: Vec<IssueRecord> = serde_json::from_value(value)
        .with_context(|| format!("catalog file {} has malformed records", path.display()))?;
    log::info!("loaded {} issue(s) from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Look up one record by its externally assigned id.
pub fn find_issue<'c>(catalog: &'c [IssueRecord], id: &str) -> Result<&'c IssueRecord> {
    catalog
        .iter()
        .find(|record| record.id == id)
        .with_context(|| format!("no issue with id `{id}` in the catalog"))
}
