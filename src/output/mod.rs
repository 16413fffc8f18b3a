//! Output module for exporting and summarizing stored filings
//!
//! This module handles:
//! - CSV export of every stored filing
//! - The short summary printed by `hoot summary`
//! - The fuller analysis report, for the terminal or as markdown

mod csv_export;
mod markdown;
pub mod stats;

pub use csv_export::{export_csv, ExportOutcome};
pub use markdown::{format_markdown_report, generate_markdown_report};
pub use stats::{
    build_report, print_report, print_summary, summarize, FilingReport, FilingSummary, TypeShare,
};

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
