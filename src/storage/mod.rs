//! Storage module for persisting scraped filings
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Idempotent insertion keyed on the accession number
//! - Listing and aggregate queries used by export and reporting

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{FilingStore, StorageError, StorageResult};

use serde::Serialize;

/// A filing as persisted, with the fields owned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilingRecord {
    pub id: i64,
    pub cik: String,
    pub company_name: String,
    pub filing_type: String,
    pub filing_date: String,
    pub accession_number: String,
    pub document_url: Option<String>,
    pub scraped_at: String,
    pub created_at: Option<String>,
}

/// Result of inserting a single filing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Stored under the given row id
    Inserted(i64),

    /// A filing with the same accession number already exists
    DuplicateSkipped,
}

/// Tally of a batch insert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertReport {
    pub inserted: usize,
    pub duplicates: usize,
}

impl InsertReport {
    /// Adds one outcome to the tally
    pub fn record(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted(_) => self.inserted += 1,
            InsertOutcome::DuplicateSkipped => self.duplicates += 1,
        }
    }
}

/// A grouped count, such as filings per form type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    pub name: String,
    pub count: u64,
}
