//! Hoot Scraper: a polite SEC EDGAR filings harvester
//!
//! This crate fetches the EDGAR "current filings" listing, extracts one record per
//! table row and stores the records in SQLite, skipping filings it has already seen.
//! Every run checks robots.txt first and spaces its requests with a rate limiter.

pub mod config;
pub mod crawler;
pub mod filing;
pub mod output;
pub mod robots;
pub mod storage;

use thiserror::Error;

/// Main error type for Hoot Scraper operations
#[derive(Debug, Error)]
pub enum HootError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("URL disallowed by robots.txt: {url}")]
    RobotsDenied { url: String },

    #[error("No filings scraped from {url}")]
    NoFilings { url: String },

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl HootError {
    /// Returns true for failures worth another attempt: timeouts, refused
    /// connections, HTTP 429 and HTTP 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Http { source, .. } => source.is_timeout() || source.is_connect(),
            Self::HttpStatus { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },
}

/// Result type alias for Hoot Scraper operations
pub type Result<T> = std::result::Result<T, HootError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{extract_filings, Extraction, RateLimiter, RowSkip};
pub use filing::Filing;
pub use robots::PolicyDecision;
pub use storage::{FilingRecord, InsertOutcome, InsertReport, SqliteStorage};
