//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the FilingStore trait.

use crate::filing::Filing;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{FilingStore, StorageResult};
use crate::storage::{FilingRecord, InsertOutcome, InsertReport, TallyEntry};
use crate::HootError;
use rusqlite::{params, Connection, Row};
use std::path::Path;

const INSERT_SQL: &str = "INSERT INTO filings
    (cik, company_name, filing_type, filing_date, accession_number, document_url, scraped_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    ON CONFLICT(accession_number) DO NOTHING";

const SELECT_COLUMNS: &str = "SELECT id, cik, company_name, filing_type, filing_date,
    accession_number, document_url, scraped_at, created_at FROM filings";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database at `path`
    ///
    /// Missing parent directories are created, and the schema is applied
    /// if it is not there yet.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hoot_scraper::SqliteStorage;
    /// use std::path::Path;
    ///
    /// let storage = SqliteStorage::open(Path::new("data/hoot.sqlite")).unwrap();
    /// ```
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;
        tracing::debug!(path = %path.display(), "Database ready");

        Ok(Self { conn })
    }

    /// Opens a database that must already exist
    ///
    /// Used by the read-only commands so a mistyped path does not silently
    /// produce an empty database.
    pub fn open_existing(path: &Path) -> Result<Self, HootError> {
        if !path.exists() {
            return Err(HootError::DatabaseNotFound(path.display().to_string()));
        }
        Ok(Self::open(path)?)
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn insert_on(conn: &Connection, filing: &Filing) -> StorageResult<InsertOutcome> {
    let changed = conn.execute(
        INSERT_SQL,
        params![
            filing.cik,
            filing.company_name,
            filing.filing_type,
            filing.filing_date,
            filing.accession_number,
            filing.document_url,
            filing.scraped_at,
        ],
    )?;

    if changed == 0 {
        tracing::debug!(
            accession_number = %filing.accession_number,
            "Skipping duplicate filing"
        );
        Ok(InsertOutcome::DuplicateSkipped)
    } else {
        Ok(InsertOutcome::Inserted(conn.last_insert_rowid()))
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<FilingRecord> {
    Ok(FilingRecord {
        id: row.get(0)?,
        cik: row.get(1)?,
        company_name: row.get(2)?,
        filing_type: row.get(3)?,
        filing_date: row.get(4)?,
        accession_number: row.get(5)?,
        document_url: row.get(6)?,
        scraped_at: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

impl SqliteStorage {
    fn query_records(&self, sql: &str, limit: i64) -> StorageResult<Vec<FilingRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let records = stmt
            .query_map(params![limit], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn tally(&self, column: &str, limit: usize) -> StorageResult<Vec<TallyEntry>> {
        let sql = format!(
            "SELECT {col}, COUNT(*) AS n FROM filings GROUP BY {col} ORDER BY n DESC, {col} ASC LIMIT ?1",
            col = column
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let entries = stmt
            .query_map(params![sql_limit(limit)], |row| {
                Ok(TallyEntry {
                    name: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

impl FilingStore for SqliteStorage {
    fn insert(&mut self, filing: &Filing) -> StorageResult<InsertOutcome> {
        insert_on(&self.conn, filing)
    }

    fn insert_many(&mut self, filings: &[Filing]) -> StorageResult<InsertReport> {
        let mut report = InsertReport::default();
        if filings.is_empty() {
            return Ok(report);
        }

        let tx = self.conn.transaction()?;
        for filing in filings {
            report.record(insert_on(&tx, filing)?);
        }
        tx.commit()?;

        tracing::info!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            "Stored filings"
        );
        Ok(report)
    }

    fn list_all(&self) -> StorageResult<Vec<FilingRecord>> {
        let sql = format!("{} ORDER BY filing_date DESC, id ASC LIMIT ?1", SELECT_COLUMNS);
        self.query_records(&sql, -1)
    }

    fn recent(&self, limit: usize) -> StorageResult<Vec<FilingRecord>> {
        let sql = format!("{} ORDER BY filing_date DESC, id ASC LIMIT ?1", SELECT_COLUMNS);
        self.query_records(&sql, sql_limit(limit))
    }

    fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM filings", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn top_filing_types(&self, limit: usize) -> StorageResult<Vec<TallyEntry>> {
        self.tally("filing_type", limit)
    }

    fn top_companies(&self, limit: usize) -> StorageResult<Vec<TallyEntry>> {
        self.tally("company_name", limit)
    }
}
