//! Hoot Scraper main entry point
//!
//! This is the command-line interface for the SEC EDGAR filings scraper.

use anyhow::Context;
use clap::{Parser, Subcommand};
use hoot_scraper::config::{load_settings_with, Config};
use hoot_scraper::crawler::{run_scrape, Source};
use hoot_scraper::output::{
    build_report, export_csv, generate_markdown_report, print_report, print_summary, summarize,
    stats::DEFAULT_RECENT, ExportOutcome,
};
use hoot_scraper::storage::SqliteStorage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Hoot Scraper: a polite SEC EDGAR filings harvester
///
/// Fetches the EDGAR current-filings listing while respecting robots.txt and
/// a request delay, and keeps every filing it has seen in SQLite.
#[derive(Parser, Debug)]
#[command(name = "hoot")]
#[command(version)]
#[command(about = "A polite SEC EDGAR filings scraper", long_about = None)]
struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape filings from a source into the database
    Scrape {
        /// Data source
        #[arg(long, default_value = "sec-edgar")]
        source: String,

        /// Maximum number of listing rows to read
        #[arg(long)]
        limit: Option<usize>,

        /// Output database path
        #[arg(long, value_name = "DB")]
        out: Option<PathBuf>,

        /// Delay between requests, in seconds
        #[arg(long)]
        delay: Option<f64>,
    },

    /// Export stored filings to CSV
    Export {
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,

        /// Output CSV path
        #[arg(long, value_name = "CSV")]
        out: Option<PathBuf>,
    },

    /// Show a short summary of stored filings
    Summary {
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Print the analysis report, optionally also as markdown
    Report {
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,

        /// Write the report as markdown to this path
        #[arg(long, value_name = "MD")]
        out: Option<PathBuf>,

        /// Number of recent filings to list
        #[arg(long, default_value_t = DEFAULT_RECENT)]
        recent: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_settings_with(cli.config.as_deref(), |config| {
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Command::Scrape { limit, delay, .. } = &cli.command {
            if let Some(limit) = limit {
                config.scraper.limit = *limit;
            }
            if let Some(delay) = delay {
                config.scraper.request_delay = *delay;
            }
        }
    })
    .context("invalid settings")?;

    setup_logging(&config.logging.level);

    match cli.command {
        Command::Scrape { source, out, .. } => {
            let source: Source = source.parse()?;
            let db_path = out.unwrap_or_else(|| PathBuf::from(&config.output.database_path));
            handle_scrape(&config, source, &db_path).await
        }
        Command::Export { db, out } => {
            let db_path = db.unwrap_or_else(|| PathBuf::from(&config.output.database_path));
            let csv_path = out.unwrap_or_else(|| PathBuf::from(&config.output.csv_path));
            handle_export(&db_path, &csv_path)
        }
        Command::Summary { db } => {
            let db_path = db.unwrap_or_else(|| PathBuf::from(&config.output.database_path));
            handle_summary(&db_path)
        }
        Command::Report { db, out, recent } => {
            let db_path = db.unwrap_or_else(|| PathBuf::from(&config.output.database_path));
            handle_report(&db_path, out.as_deref(), recent)
        }
    }
}

/// Sets up the logging/tracing subscriber for the given level
fn setup_logging(level: &str) {
    let level = level.trim().to_lowercase();
    let filter = EnvFilter::try_new(format!("hoot_scraper={},hoot={},warn", level, level))
        .unwrap_or_else(|_| EnvFilter::new("hoot_scraper=info,hoot=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `hoot scrape`
async fn handle_scrape(config: &Config, source: Source, db_path: &Path) -> anyhow::Result<()> {
    let report = run_scrape(config, source, config.scraper.limit, db_path).await?;

    tracing::info!(
        "Scrape complete: {} new filings saved to {} ({} already stored, {} rows skipped)",
        report.inserted,
        db_path.display(),
        report.duplicates,
        report.skipped_rows
    );
    Ok(())
}

/// Handles `hoot export`
fn handle_export(db_path: &Path, csv_path: &Path) -> anyhow::Result<()> {
    let storage = SqliteStorage::open(db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;

    match export_csv(&storage, csv_path)? {
        ExportOutcome::Written(rows) => {
            tracing::info!("Export complete: {} filings written to {}", rows, csv_path.display());
        }
        ExportOutcome::Empty => {
            tracing::info!("Nothing exported; {} has no filings", db_path.display());
        }
    }
    Ok(())
}

/// Handles `hoot summary`
fn handle_summary(db_path: &Path) -> anyhow::Result<()> {
    let storage = SqliteStorage::open(db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;

    let summary = summarize(&storage)?;
    print_summary(&summary);
    Ok(())
}

/// Handles `hoot report`
fn handle_report(
    db_path: &Path,
    out: Option<&Path>,
    recent: usize,
) -> anyhow::Result<()> {
    let storage = SqliteStorage::open_existing(db_path)
        .context("run 'hoot scrape' first to collect data")?;

    let report = build_report(&storage, recent)?;
    print_report(&report);

    if let Some(path) = out {
        generate_markdown_report(&report, path)?;
        println!("Report written to: {}", path.display());
    }
    Ok(())
}
