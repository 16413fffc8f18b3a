//! End-to-end scrape runs: policy check, fetch, extract, store

use crate::common::{create_test_config, FIXTURE, LISTING_PATH};
use hoot_scraper::crawler::{run_scrape, Scraper, Source};
use hoot_scraper::output::{export_csv, summarize, ExportOutcome};
use hoot_scraper::storage::FilingStore;
use hoot_scraper::{HootError, SqliteStorage};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_site(server: &MockServer, robots: &str, listing: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(robots.to_string()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scrape_is_idempotent() {
    let server = MockServer::start().await;
    mount_site(&server, "User-agent: *\nAllow: /", FIXTURE).await;

    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("data").join("hoot.sqlite");
    let config = create_test_config(&server);

    let first = run_scrape(&config, Source::SecEdgar, 100, &db_path).await.unwrap();
    assert_eq!(first.scraped, 2);
    assert_eq!(first.skipped_rows, 1);
    assert_eq!(first.inserted, 2);
    assert_eq!(first.duplicates, 0);

    let second = run_scrape(&config, Source::SecEdgar, 100, &db_path).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.duplicates, 2);

    let storage = SqliteStorage::open(&db_path).unwrap();
    let summary = summarize(&storage).unwrap();
    assert_eq!(summary.total_filings, 2);

    let records = storage.list_all().unwrap();
    assert_eq!(records[0].company_name, "Test Corp A (Filer)");
    assert_eq!(records[0].cik, "1234567");
    assert_eq!(records[0].accession_number, "0001234567-26-000001");
    assert!(records[0]
        .document_url
        .as_deref()
        .unwrap()
        .starts_with(&server.uri()));
}

#[tokio::test]
async fn test_scrape_then_export() {
    let server = MockServer::start().await;
    mount_site(&server, "", FIXTURE).await;

    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("hoot.sqlite");
    let csv_path = dir.path().join("snapshot.csv");
    let config = create_test_config(&server);

    run_scrape(&config, Source::SecEdgar, 100, &db_path).await.unwrap();

    let storage = SqliteStorage::open(&db_path).unwrap();
    assert_eq!(export_csv(&storage, &csv_path).unwrap(), ExportOutcome::Written(2));

    let contents = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,cik,company_name,filing_type,filing_date,accession_number,document_url,scraped_at,created_at"
    );
    assert_eq!(lines.count(), 2);
}

#[tokio::test]
async fn test_limit_applies_to_rows() {
    let server = MockServer::start().await;
    mount_site(&server, "User-agent: *\nAllow: /", FIXTURE).await;

    let mut scraper = Scraper::new(&create_test_config(&server)).unwrap();
    let extraction = scraper.scrape(1).await.unwrap();
    assert_eq!(extraction.filings.len(), 1);
    assert_eq!(extraction.filings[0].filing_type, "10-K");
}

#[tokio::test]
async fn test_robots_denial_skips_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("hoot.sqlite");

    let err = run_scrape(&create_test_config(&server), Source::SecEdgar, 100, &db_path)
        .await
        .unwrap_err();
    assert!(matches!(err, HootError::RobotsDenied { .. }));
    assert!(!db_path.exists());
}

#[tokio::test]
async fn test_unavailable_robots_still_scrapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let report = run_scrape(
        &create_test_config(&server),
        Source::SecEdgar,
        100,
        &dir.path().join("hoot.sqlite"),
    )
    .await
    .unwrap();
    assert_eq!(report.inserted, 2);
}

#[tokio::test]
async fn test_no_filings_is_an_error() {
    let server = MockServer::start().await;
    mount_site(&server, "", "<html><body><p>Maintenance</p></body></html>").await;

    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("hoot.sqlite");

    let err = run_scrape(&create_test_config(&server), Source::SecEdgar, 100, &db_path)
        .await
        .unwrap_err();
    assert!(matches!(err, HootError::NoFilings { .. }));
    assert!(!db_path.exists());
}

#[tokio::test]
async fn test_export_of_empty_database() {
    let dir = TempDir::new().unwrap();
    let storage = SqliteStorage::open(&dir.path().join("hoot.sqlite")).unwrap();
    let csv_path = dir.path().join("snapshot.csv");

    assert_eq!(export_csv(&storage, &csv_path).unwrap(), ExportOutcome::Empty);
    assert!(!csv_path.exists());
}
