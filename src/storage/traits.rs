//! Storage traits and error types

use crate::filing::Filing;
use crate::storage::{FilingRecord, InsertOutcome, InsertReport, TallyEntry};
use thiserror::Error;

/// Errors that can occur during storage operations
///
/// A duplicate accession number is not an error; it is reported as
/// [`InsertOutcome::DuplicateSkipped`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for filing store backends
pub trait FilingStore {
    /// Inserts one filing unless its accession number is already stored
    fn insert(&mut self, filing: &Filing) -> StorageResult<InsertOutcome>;

    /// Inserts a batch in one transaction
    ///
    /// Duplicates are counted, not raised. Any other failure rolls the whole
    /// batch back.
    fn insert_many(&mut self, filings: &[Filing]) -> StorageResult<InsertReport>;

    /// All stored filings, newest filing date first
    fn list_all(&self) -> StorageResult<Vec<FilingRecord>>;

    /// The `limit` newest filings
    fn recent(&self, limit: usize) -> StorageResult<Vec<FilingRecord>>;

    /// Number of stored filings
    fn count(&self) -> StorageResult<u64>;

    /// Filing types by descending count
    fn top_filing_types(&self, limit: usize) -> StorageResult<Vec<TallyEntry>>;

    /// Companies by descending filing count
    fn top_companies(&self, limit: usize) -> StorageResult<Vec<TallyEntry>>;
}
