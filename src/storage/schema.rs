//! Database schema definitions
//!
//! One table holds every scraped filing. The accession number is the
//! natural key; the surrogate `id` and `created_at` belong to the store.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS filings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cik TEXT NOT NULL,
    company_name TEXT NOT NULL,
    filing_type TEXT NOT NULL,
    filing_date TEXT NOT NULL,
    accession_number TEXT NOT NULL UNIQUE,
    document_url TEXT,
    scraped_at TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_cik ON filings(cik);
CREATE INDEX IF NOT EXISTS idx_filing_type ON filings(filing_type);
CREATE INDEX IF NOT EXISTS idx_filing_date ON filings(filing_date);
"#;

/// Creates the schema if it is not there yet
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
