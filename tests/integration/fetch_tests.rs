//! Fetcher behavior: identification header, status handling, retries

use crate::common::{create_test_config, LISTING_PATH, TEST_AGENT};
use hoot_scraper::config::UserAgentConfig;
use hoot_scraper::crawler::{build_http_client, fetch_page, Scraper};
use hoot_scraper::{HootError, RateLimiter};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> reqwest::Client {
    let config = UserAgentConfig {
        identity: Some(TEST_AGENT.to_string()),
        ..UserAgentConfig::default()
    };
    build_http_client(&config, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", TEST_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&server)
        .await;

    let mut limiter = RateLimiter::new(Duration::ZERO);
    let body = fetch_page(&test_client(), &format!("{}/page", server.uri()), &mut limiter)
        .await
        .unwrap();
    assert_eq!(body, "hello");
}

#[tokio::test]
async fn test_fetch_server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut limiter = RateLimiter::new(Duration::ZERO);
    let err = fetch_page(&test_client(), &format!("{}/page", server.uri()), &mut limiter)
        .await
        .unwrap_err();

    assert!(matches!(err, HootError::HttpStatus { status: 500, .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_fetch_not_found_is_permanent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut limiter = RateLimiter::new(Duration::ZERO);
    let err = fetch_page(&test_client(), &format!("{}/missing", server.uri()), &mut limiter)
        .await
        .unwrap_err();

    assert!(matches!(err, HootError::HttpStatus { status: 404, .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_fetch_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = build_http_client(&UserAgentConfig::default(), Duration::from_millis(200)).unwrap();
    let mut limiter = RateLimiter::new(Duration::ZERO);
    let err = fetch_page(&client, &format!("{}/slow", server.uri()), &mut limiter)
        .await
        .unwrap_err();

    assert!(matches!(err, HootError::Timeout { .. }));
}

#[tokio::test]
async fn test_fetch_respects_limiter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = test_client();
    let url = format!("{}/page", server.uri());
    let mut limiter = RateLimiter::new(Duration::from_millis(150));

    let start = std::time::Instant::now();
    fetch_page(&client, &url, &mut limiter).await.unwrap();
    fetch_page(&client, &url, &mut limiter).await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(140));
}

#[tokio::test]
async fn test_listing_retried_after_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("listing"))
        .expect(1)
        .mount(&server)
        .await;

    let mut scraper = Scraper::new(&create_test_config(&server)).unwrap();
    assert_eq!(scraper.fetch_listing().await.unwrap(), "listing");
}

#[tokio::test]
async fn test_listing_gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&server)
        .await;

    let mut scraper = Scraper::new(&create_test_config(&server)).unwrap();
    let err = scraper.fetch_listing().await.unwrap_err();
    assert!(matches!(err, HootError::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_listing_not_retried_on_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut scraper = Scraper::new(&create_test_config(&server)).unwrap();
    assert!(scraper.fetch_listing().await.is_err());
}
