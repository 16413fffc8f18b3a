//! Shared helpers for the integration tests

use hoot_scraper::config::Config;
use wiremock::MockServer;

pub const LISTING_PATH: &str = "/cgi-bin/browse-edgar";

pub const FIXTURE: &str = include_str!("../fixtures/current_filings.html");

pub const TEST_AGENT: &str = "TestBot/1.0 (integration; test@example.com)";

/// Creates a configuration pointing at the mock server, with no request delay
pub fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.scraper.request_delay = 0.0;
    config.user_agent.identity = Some(TEST_AGENT.to_string());
    config.source.base_url = server.uri();
    config.source.search_url = format!("{}{}?action=getcurrent&count=100", server.uri(), LISTING_PATH);
    config
}
