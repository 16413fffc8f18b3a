use serde::Deserialize;

/// Request timeout applied to every outbound request (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Attempts after the first for a transient fetch failure
pub const MAX_RETRIES: u32 = 3;

/// Rows requested from EDGAR per listing page, also the default scrape limit
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Upper bound on the gap between requests (seconds), configured or published
pub const MAX_DELAY_SECS: u64 = 60;

pub const SEC_BASE_URL: &str = "https://www.sec.gov";

pub const SEC_SEARCH_URL: &str = "https://www.sec.gov/cgi-bin/browse-edgar?action=getcurrent&type=&company=&dateb=&owner=exclude&count=100";

/// Main configuration structure for Hoot Scraper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Request pacing and limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Minimum time between requests (seconds)
    #[serde(rename = "request-delay")]
    pub request_delay: f64,

    /// Maximum number of listing rows to process per run
    pub limit: usize,

    /// Fixed; not read from the config file
    #[serde(skip, default = "fixed_timeout_secs")]
    pub timeout_secs: u64,

    /// Fixed; not read from the config file
    #[serde(skip, default = "fixed_max_retries")]
    pub max_retries: u32,
}

fn fixed_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

fn fixed_max_retries() -> u32 {
    MAX_RETRIES
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            request_delay: 0.5,
            limit: DEFAULT_PAGE_SIZE,
            timeout_secs: REQUEST_TIMEOUT_SECS,
            max_retries: MAX_RETRIES,
        }
    }
}

/// User agent identification configuration
///
/// SEC asks automated clients to name themselves and give a contact address.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the tool
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the tool
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Short statement of purpose
    pub purpose: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,

    /// Full identification string; replaces the composed one when set
    pub identity: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "HootScrapper".to_string(),
            crawler_version: "0.1".to_string(),
            purpose: "Educational Portfolio Project".to_string(),
            contact_email: "your.email@example.com".to_string(),
            identity: None,
        }
    }
}

impl UserAgentConfig {
    /// The `User-Agent` header value
    ///
    /// Format: `Name/Version (Purpose; email)` unless `identity` is set.
    pub fn header_value(&self) -> String {
        match &self.identity {
            Some(identity) => identity.clone(),
            None => format!(
                "{}/{} ({}; {})",
                self.crawler_name, self.crawler_version, self.purpose, self.contact_email
            ),
        }
    }
}

/// Where filings are fetched from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Origin that root-relative links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// The current-filings listing page
    #[serde(rename = "search-url")]
    pub search_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: SEC_BASE_URL.to_string(),
            search_url: SEC_SEARCH_URL.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the CSV export file
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "data/hoot.sqlite".to_string(),
            csv_path: "data/snapshot.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
