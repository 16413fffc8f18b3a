//! HTTP fetcher implementation
//!
//! This module handles the outbound requests of a scrape:
//! - Building the HTTP client with the identifying user agent
//! - Rate-limited GET requests with a bounded timeout
//! - Error classification (timeout, transport failure, non-success status)
//!
//! There is no retry here; see the coordinator for the retry policy.

use crate::config::UserAgentConfig;
use crate::crawler::RateLimiter;
use crate::HootError;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Whole-request timeout
///
/// # Example
///
/// ```no_run
/// use hoot_scraper::config::UserAgentConfig;
/// use hoot_scraper::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches `url` and returns the response body
///
/// Waits on `limiter` first. Any non-2xx status is an error.
///
/// # Errors
///
/// * `HootError::Timeout` - the request exceeded the client timeout
/// * `HootError::HttpStatus` - the server answered with a non-success status
/// * `HootError::Http` - connection, TLS or body decoding failure
pub async fn fetch_page(
    client: &Client,
    url: &str,
    limiter: &mut RateLimiter,
) -> Result<String, HootError> {
    limiter.wait().await;
    tracing::debug!(url, "Fetching");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HootError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| classify_error(url, e))?;
    tracing::debug!(url, bytes = body.len(), "Fetched");

    Ok(body)
}

fn classify_error(url: &str, error: reqwest::Error) -> HootError {
    if error.is_timeout() {
        HootError::Timeout {
            url: url.to_string(),
        }
    } else {
        HootError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
