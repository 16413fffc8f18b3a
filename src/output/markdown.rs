//! Markdown rendering of the analysis report

use crate::output::stats::FilingReport;
use crate::output::OutputResult;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Renders `report` and writes it to `output_path`
pub fn generate_markdown_report(report: &FilingReport, output_path: &Path) -> OutputResult<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output_path, format_markdown_report(report))?;
    tracing::info!(path = %output_path.display(), "Wrote markdown report");
    Ok(())
}

/// Formats the analysis report as markdown
pub fn format_markdown_report(report: &FilingReport) -> String {
    let mut md = String::new();

    md.push_str("# SEC EDGAR Filings Analysis\n\n");
    let _ = writeln!(md, "- **Total Filings**: {}\n", report.total_filings);

    md.push_str("## Filing Types\n\n");
    md.push_str("| Type | Count | Share |\n");
    md.push_str("|------|-------|-------|\n");
    for share in &report.type_distribution {
        let _ = writeln!(
            md,
            "| {} | {} | {:.1}% |",
            escape_cell(&share.filing_type),
            share.count,
            share.percent
        );
    }
    md.push('\n');

    if !report.top_companies.is_empty() {
        md.push_str("## Most Active Companies\n\n");
        md.push_str("| Rank | Company | Filings |\n");
        md.push_str("|------|---------|---------|\n");
        for (rank, entry) in report.top_companies.iter().enumerate() {
            let _ = writeln!(
                md,
                "| {} | {} | {} |",
                rank + 1,
                escape_cell(&entry.name),
                entry.count
            );
        }
        md.push('\n');
    }

    if !report.recent.is_empty() {
        md.push_str("## Recent Filings\n\n");
        md.push_str("| Date | Type | Company | Accession |\n");
        md.push_str("|------|------|---------|-----------|\n");
        for record in &report.recent {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} |",
                record.filing_date,
                escape_cell(&record.filing_type),
                escape_cell(&record.company_name),
                record.accession_number
            );
        }
        md.push('\n');
    }

    md
}

// Pipes would end the table cell early
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
