//! Crawler module: the fetch-and-extract half of a scrape
//!
//! This module contains:
//! - The rate limiter spacing outbound requests
//! - HTTP fetching with a single identifying client
//! - Filing extraction from the listing markup
//! - Overall scrape coordination

mod coordinator;
mod fetcher;
mod limiter;
mod parser;

pub use coordinator::{run_scrape, ScrapeReport, Scraper, Source};
pub use fetcher::{build_http_client, fetch_page};
pub use limiter::{RateLimiter, MAX_DELAY};
pub use parser::{
    extract_accession, extract_cik, extract_filings, extract_filings_at, resolve_document_url,
    Extraction, RowSkip, MIN_CELLS,
};
