//! CSV export of stored filings

use crate::output::OutputResult;
use crate::storage::FilingStore;
use std::path::Path;

/// What an export run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// This many rows were written after the header
    Written(usize),

    /// The store was empty; no file was created
    Empty,
}

/// Writes every stored filing to `path`, newest filing date first
///
/// The header names every persisted column. An empty store writes nothing
/// and leaves any existing file at `path` untouched.
pub fn export_csv(storage: &dyn FilingStore, path: &Path) -> OutputResult<ExportOutcome> {
    let records = storage.list_all()?;
    if records.is_empty() {
        tracing::warn!("No filings to export");
        return Ok(ExportOutcome::Empty);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::info!(rows = records.len(), path = %path.display(), "Exported filings");
    Ok(ExportOutcome::Written(records.len()))
}
