//! Scrape coordinator - runs one scrape from policy check to storage
//!
//! A run is strictly sequential:
//! 1. Check robots.txt for the listing URL
//! 2. Fetch the listing, retrying transient failures
//! 3. Extract filings from the markup
//! 4. Store them, skipping accession numbers already present

use crate::config::Config;
use crate::crawler::parser::{extract_filings, Extraction};
use crate::crawler::{build_http_client, fetch_page, RateLimiter};
use crate::robots::{check_robots, log_decision, PolicyDecision};
use crate::storage::{FilingStore, SqliteStorage};
use crate::HootError;
use reqwest::Client;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Listing sources the scraper knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    SecEdgar,
}

impl FromStr for Source {
    type Err = HootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sec-edgar" => Ok(Self::SecEdgar),
            other => Err(HootError::UnknownSource(other.to_string())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecEdgar => f.write_str("sec-edgar"),
        }
    }
}

/// What a completed scrape run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Filings extracted from the listing
    pub scraped: usize,

    /// Listing rows that produced no filing
    pub skipped_rows: usize,

    /// Filings newly written to the store
    pub inserted: usize,

    /// Filings already present in the store
    pub duplicates: usize,
}

/// Fetches and extracts filings from one listing source
pub struct Scraper {
    client: Client,
    limiter: RateLimiter,
    user_agent: String,
    search_url: Url,
    base_url: Url,
    max_retries: u32,
}

impl Scraper {
    /// Creates a scraper from validated configuration
    pub fn new(config: &Config) -> Result<Self, HootError> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.scraper.timeout_secs),
        )?;

        Ok(Self {
            client,
            limiter: RateLimiter::from_secs_f64(config.scraper.request_delay),
            user_agent: config.user_agent.header_value(),
            search_url: Url::parse(&config.source.search_url)?,
            base_url: Url::parse(&config.source.base_url)?,
            max_retries: config.scraper.max_retries,
        })
    }

    /// The limiter spacing this scraper's requests
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Checks robots.txt for the listing URL and logs the decision
    ///
    /// A published `Crawl-delay` longer than the configured delay widens
    /// the limiter for the rest of the run, up to the limiter's maximum.
    /// Values that are not a usable duration are ignored.
    pub async fn check_policy(&mut self) -> PolicyDecision {
        let decision = check_robots(
            &self.client,
            &mut self.limiter,
            &self.search_url,
            &self.user_agent,
        )
        .await;
        log_decision(&decision, &self.search_url);

        if let Some(delay) = decision.crawl_delay() {
            self.limiter.widen_to_secs(delay);
        }

        decision
    }

    /// Fetches the listing page
    ///
    /// Transient failures (timeouts, connect errors, 429, 5xx) are retried up
    /// to the configured retry count; every attempt goes through the limiter.
    pub async fn fetch_listing(&mut self) -> Result<String, HootError> {
        let url = self.search_url.as_str().to_string();
        let mut attempt: u32 = 0;

        loop {
            match fetch_page(&self.client, &url, &mut self.limiter).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        url = %url,
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "Transient fetch failure, retrying"
                    );
                }
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Failed to fetch listing");
                    return Err(e);
                }
            }
        }
    }

    /// Runs policy check, fetch and extraction
    ///
    /// # Errors
    ///
    /// * `HootError::RobotsDenied` - robots.txt forbids the listing URL
    /// * any fetch error left after retries
    pub async fn scrape(&mut self, limit: usize) -> Result<Extraction, HootError> {
        if !self.check_policy().await.permits() {
            return Err(HootError::RobotsDenied {
                url: self.search_url.to_string(),
            });
        }

        let html = self.fetch_listing().await?;
        let extraction = extract_filings(&html, &self.base_url, limit);

        tracing::info!(
            scraped = extraction.filings.len(),
            skipped = extraction.skipped.len(),
            "Scraped filings"
        );
        Ok(extraction)
    }
}

/// Runs a complete scrape and stores the result in the database at `db_path`
///
/// # Errors
///
/// * `HootError::NoFilings` - the listing produced no filings; nothing is stored
/// * `HootError::RobotsDenied` and fetch errors from [`Scraper::scrape`]
/// * `HootError::Storage` - the database could not be opened or written
///
/// # Example
///
/// ```no_run
/// use hoot_scraper::config::Config;
/// use hoot_scraper::crawler::{run_scrape, Source};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let report = run_scrape(&config, Source::SecEdgar, 100, Path::new("data/hoot.sqlite")).await?;
/// println!("{} new filings", report.inserted);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(
    config: &Config,
    source: Source,
    limit: usize,
    db_path: &Path,
) -> Result<ScrapeReport, HootError> {
    tracing::info!(source = %source, limit, "Starting scrape");

    let mut scraper = Scraper::new(config)?;
    let extraction = scraper.scrape(limit).await?;

    if extraction.filings.is_empty() {
        tracing::error!("No filings scraped");
        return Err(HootError::NoFilings {
            url: config.source.search_url.clone(),
        });
    }

    let mut storage = SqliteStorage::open(db_path)?;
    let stored = storage.insert_many(&extraction.filings)?;

    let report = ScrapeReport {
        scraped: extraction.filings.len(),
        skipped_rows: extraction.skipped.len(),
        inserted: stored.inserted,
        duplicates: stored.duplicates,
    };
    tracing::info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        db = %db_path.display(),
        "Scrape complete"
    );
    Ok(report)
}
