//! Configuration module for Hoot Scraper
//!
//! Settings come from built-in defaults, an optional TOML file and `HOOT_*`
//! environment variables, in that order of precedence (later wins).
//!
//! # Example
//!
//! ```no_run
//! use hoot_scraper::config::load_settings;
//!
//! let config = load_settings(None).unwrap();
//! println!("User agent: {}", config.user_agent.header_value());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, LoggingConfig, OutputConfig, ScraperConfig, SourceConfig, UserAgentConfig,
    DEFAULT_PAGE_SIZE, MAX_DELAY_SECS, MAX_RETRIES, REQUEST_TIMEOUT_SECS, SEC_BASE_URL,
    SEC_SEARCH_URL,
};

// Re-export parser functions
pub use parser::{apply_env_overrides, load_config, load_settings, load_settings_with};
pub use validation::validate;
