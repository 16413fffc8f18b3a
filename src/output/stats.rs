//! Aggregate views over the stored filings
//!
//! `summarize` backs the short `hoot summary` printout; `build_report` backs
//! the fuller analysis report, which can also be rendered as markdown.

use crate::filing::truncate_chars;
use crate::output::OutputResult;
use crate::storage::{FilingRecord, FilingStore, TallyEntry};
use serde::Serialize;

/// Number of entries kept in the "top" lists
pub const TOP_N: usize = 10;

/// Default number of recent filings in a report
pub const DEFAULT_RECENT: usize = 5;

/// Short summary of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilingSummary {
    pub total_filings: u64,
    pub top_filing_types: Vec<TallyEntry>,
    pub top_companies: Vec<TallyEntry>,
}

/// One filing type and its share of all filings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    pub filing_type: String,
    pub count: u64,
    pub percent: f64,
}

/// Full analysis report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilingReport {
    pub total_filings: u64,

    /// Every filing type, most frequent first
    pub type_distribution: Vec<TypeShare>,

    pub top_companies: Vec<TallyEntry>,

    /// Newest filings by filing date
    pub recent: Vec<FilingRecord>,
}

/// Loads the short summary from storage
pub fn summarize(storage: &dyn FilingStore) -> OutputResult<FilingSummary> {
    Ok(FilingSummary {
        total_filings: storage.count()?,
        top_filing_types: storage.top_filing_types(TOP_N)?,
        top_companies: storage.top_companies(TOP_N)?,
    })
}

/// Loads the analysis report, keeping `recent` newest filings
pub fn build_report(storage: &dyn FilingStore, recent: usize) -> OutputResult<FilingReport> {
    let total_filings = storage.count()?;
    let type_distribution = storage
        .top_filing_types(usize::MAX)?
        .into_iter()
        .map(|entry| TypeShare {
            percent: percentage(entry.count, total_filings),
            filing_type: entry.name,
            count: entry.count,
        })
        .collect();

    Ok(FilingReport {
        total_filings,
        type_distribution,
        top_companies: storage.top_companies(TOP_N)?,
        recent: storage.recent(recent)?,
    })
}

fn percentage(count: u64, total: u64) -> f64 {
    if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Prints the short summary to stdout
pub fn print_summary(summary: &FilingSummary) {
    println!("\n=== Hoot Scraper Summary ===\n");
    println!("Total filings: {}", summary.total_filings);

    println!("\nTop filing types:");
    for entry in &summary.top_filing_types {
        println!("  {}: {}", entry.name, entry.count);
    }

    println!("\nTop companies:");
    for entry in &summary.top_companies {
        println!("  {}: {}", entry.name, entry.count);
    }
    println!();
}

/// Prints the analysis report to stdout
pub fn print_report(report: &FilingReport) {
    let rule = "=".repeat(60);
    println!("\n{}", rule);
    println!("SEC EDGAR FILINGS ANALYSIS");
    println!("{}", rule);

    println!("\nTotal filings collected: {}", report.total_filings);

    println!("\nFiling types distribution:");
    for share in &report.type_distribution {
        println!(
            "  {:15} {:4} ({:5.1}%)",
            share.filing_type, share.count, share.percent
        );
    }

    println!("\nTop {} most active companies:", TOP_N);
    for (rank, entry) in report.top_companies.iter().enumerate() {
        println!(
            "  {:2}. {:50} {:3} filings",
            rank + 1,
            truncate_chars(&entry.name, 50),
            entry.count
        );
    }

    println!("\n{} most recent filings:", report.recent.len());
    for record in &report.recent {
        println!(
            "  {} - {:10} - {}",
            record.filing_date,
            record.filing_type,
            truncate_chars(&record.company_name, 40)
        );
    }

    println!("\n{}", rule);
}
