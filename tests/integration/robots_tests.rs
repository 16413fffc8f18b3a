//! robots.txt decisions against a live mock origin

use crate::common::{create_test_config, LISTING_PATH, TEST_AGENT};
use hoot_scraper::config::UserAgentConfig;
use hoot_scraper::crawler::{build_http_client, Scraper, MAX_DELAY};
use hoot_scraper::robots::{check_robots, is_permitted};
use hoot_scraper::{PolicyDecision, RateLimiter};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn decision_for(server_uri: &str) -> PolicyDecision {
    let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
    let mut limiter = RateLimiter::new(Duration::ZERO);
    let target = Url::parse(&format!("{}{}?action=getcurrent", server_uri, LISTING_PATH)).unwrap();
    check_robots(&client, &mut limiter, &target, TEST_AGENT).await
}

async fn serve_robots(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_allow_all() {
    let server = MockServer::start().await;
    serve_robots(
        &server,
        ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"),
    )
    .await;

    assert_eq!(
        decision_for(&server.uri()).await,
        PolicyDecision::Allowed { crawl_delay: None }
    );
}

#[tokio::test]
async fn test_disallowed_path() {
    let server = MockServer::start().await;
    serve_robots(
        &server,
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /cgi-bin/"),
    )
    .await;

    assert_eq!(decision_for(&server.uri()).await, PolicyDecision::Disallowed);
}

#[tokio::test]
async fn test_agent_specific_block() {
    let server = MockServer::start().await;
    serve_robots(
        &server,
        ResponseTemplate::new(200)
            .set_body_string("User-agent: TestBot\nDisallow: /\n\nUser-agent: *\nAllow: /"),
    )
    .await;

    assert_eq!(decision_for(&server.uri()).await, PolicyDecision::Disallowed);
}

#[tokio::test]
async fn test_missing_robots_allows() {
    let server = MockServer::start().await;
    serve_robots(&server, ResponseTemplate::new(404)).await;

    assert_eq!(
        decision_for(&server.uri()).await,
        PolicyDecision::Allowed { crawl_delay: None }
    );
}

#[tokio::test]
async fn test_forbidden_robots_disallows() {
    let server = MockServer::start().await;
    serve_robots(&server, ResponseTemplate::new(403)).await;

    assert_eq!(decision_for(&server.uri()).await, PolicyDecision::Disallowed);
}

#[tokio::test]
async fn test_server_error_is_unknown_and_permits() {
    let server = MockServer::start().await;
    serve_robots(&server, ResponseTemplate::new(500)).await;

    let decision = decision_for(&server.uri()).await;
    assert!(matches!(decision, PolicyDecision::Unknown { .. }));
    assert!(decision.permits());
}

/// An http origin on a local port with nothing listening
fn closed_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn test_unreachable_origin_fails_open() {
    let origin = closed_origin();

    let decision = decision_for(&origin).await;
    assert!(matches!(decision, PolicyDecision::Unknown { .. }));
    assert!(decision.permits());

    let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
    let mut limiter = RateLimiter::new(Duration::ZERO);
    let target = Url::parse(&format!("{}/anything", origin)).unwrap();
    assert!(is_permitted(&client, &mut limiter, &target, TEST_AGENT).await);
}

#[tokio::test]
async fn test_crawl_delay_widens_limiter() {
    let server = MockServer::start().await;
    serve_robots(
        &server,
        ResponseTemplate::new(200).set_body_string("User-agent: *\nCrawl-delay: 2\nAllow: /"),
    )
    .await;

    let mut scraper = Scraper::new(&create_test_config(&server)).unwrap();
    let decision = scraper.check_policy().await;

    assert_eq!(decision.crawl_delay(), Some(2.0));
    assert_eq!(scraper.limiter().delay(), Duration::from_secs(2));
}

#[tokio::test]
async fn test_unrepresentable_crawl_delay_ignored() {
    let server = MockServer::start().await;
    serve_robots(
        &server,
        ResponseTemplate::new(200).set_body_string("User-agent: *\nCrawl-delay: 1e30\nAllow: /"),
    )
    .await;

    let mut scraper = Scraper::new(&create_test_config(&server)).unwrap();
    let decision = scraper.check_policy().await;

    assert!(decision.permits());
    assert_eq!(scraper.limiter().delay(), Duration::ZERO);
}

#[tokio::test]
async fn test_excessive_crawl_delay_capped() {
    let server = MockServer::start().await;
    serve_robots(
        &server,
        ResponseTemplate::new(200).set_body_string("User-agent: *\nCrawl-delay: 86400\nAllow: /"),
    )
    .await;

    let mut scraper = Scraper::new(&create_test_config(&server)).unwrap();
    scraper.check_policy().await;

    assert_eq!(scraper.limiter().delay(), MAX_DELAY);
}
