//! Filing extraction from the EDGAR current-filings listing
//!
//! The listing is a single `table.tableFile2` whose first row is a header.
//! Every following row describes one filing:
//!
//! | Cell | Content |
//! |------|---------|
//! | 0 | form type |
//! | 1 | company name, with a link carrying `CIK=` and `accession-number=` |
//! | 3 | filing date |
//!
//! Rows are parsed independently. A row that cannot be turned into a
//! [`Filing`] is recorded as a [`RowSkip`] and the next row is processed.

use crate::filing::Filing;
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Rows with fewer `td` cells than this are skipped
pub const MIN_CELLS: usize = 5;

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.tableFile2").expect("static selector"));

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static selector"));

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));

static CIK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"CIK=(\d+)").expect("static regex"));

static ACCESSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"accession-number=([0-9-]+)").expect("static regex"));

/// Why a table row produced no filing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSkip {
    /// The row has too few cells to be a filing (spacers, sub-headers)
    TooFewCells { row: usize, found: usize },

    /// The row looked like a filing but could not be parsed
    Malformed { row: usize, reason: String },
}

/// Result of one extraction pass
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Parsed filings in table order
    pub filings: Vec<Filing>,

    /// Rows that were skipped
    pub skipped: Vec<RowSkip>,

    /// Whether the filings table was present at all
    pub table_found: bool,
}

/// Extracts up to `limit` listing rows from `html`
///
/// `base_url` is the origin that root-relative links are resolved against.
/// `limit` counts table rows after the header, including rows that end up
/// skipped. A missing table yields an empty extraction, not an error.
///
/// # Example
///
/// ```
/// use hoot_scraper::crawler::extract_filings;
/// use url::Url;
///
/// let html = r#"<table class="tableFile2">
///   <tr><th>Form</th></tr>
///   <tr><td>8-K</td><td><a href="/cgi-bin/browse-edgar?CIK=0000320193">Apple Inc.</a></td>
///       <td>Current report</td><td>2026-02-06</td><td></td></tr>
/// </table>"#;
/// let base = Url::parse("https://www.sec.gov").unwrap();
/// let extraction = extract_filings(html, &base, 10);
/// assert_eq!(extraction.filings[0].cik, "320193");
/// ```
pub fn extract_filings(html: &str, base_url: &Url, limit: usize) -> Extraction {
    extract_filings_at(html, base_url, limit, Utc::now())
}

/// Same as [`extract_filings`] with an explicit `scraped_at` timestamp
pub fn extract_filings_at(
    html: &str,
    base_url: &Url,
    limit: usize,
    scraped_at: DateTime<Utc>,
) -> Extraction {
    let scraped_at = scraped_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let document = Html::parse_document(html);

    let Some(table) = document.select(&TABLE_SELECTOR).next() else {
        tracing::warn!("Could not find filings table");
        return Extraction::default();
    };

    let mut extraction = Extraction {
        table_found: true,
        ..Extraction::default()
    };

    for (index, row) in own_rows(table).into_iter().enumerate().skip(1).take(limit) {
        match parse_row(row, index, base_url, &scraped_at) {
            Ok(filing) => {
                tracing::debug!(
                    company = %filing.display_name(40),
                    filing_type = %filing.filing_type,
                    "Parsed filing"
                );
                extraction.filings.push(filing);
            }
            Err(skip) => {
                match &skip {
                    RowSkip::TooFewCells { row, found } => {
                        tracing::debug!(row, found, "Skipping short row");
                    }
                    RowSkip::Malformed { row, reason } => {
                        tracing::warn!(row, reason = %reason, "Failed to parse row");
                    }
                }
                extraction.skipped.push(skip);
            }
        }
    }

    extraction
}

/// Rows belonging to `table` itself, excluding rows of nested tables
fn own_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    table
        .select(&ROW_SELECTOR)
        .filter(|row| {
            row.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "table")
                .map(|el| el.id())
                == Some(table.id())
        })
        .collect()
}

fn parse_row(
    row: ElementRef<'_>,
    index: usize,
    base_url: &Url,
    scraped_at: &str,
) -> Result<Filing, RowSkip> {
    let cells: Vec<ElementRef<'_>> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect();

    if cells.len() < MIN_CELLS {
        return Err(RowSkip::TooFewCells {
            row: index,
            found: cells.len(),
        });
    }

    let filing_type = cell_text(cells[0]);
    let company_name = cell_text(cells[1]);
    let filing_date = cell_text(cells[3]);

    let href = cells[1]
        .select(&ANCHOR_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .unwrap_or("");

    let cik = extract_cik(href).unwrap_or_default();
    let document_url = resolve_document_url(href, base_url).map_err(|reason| RowSkip::Malformed {
        row: index,
        reason,
    })?;
    let accession_number = extract_accession(&document_url).unwrap_or_default();

    Ok(Filing {
        cik,
        company_name,
        filing_type,
        filing_date,
        accession_number,
        document_url,
        scraped_at: scraped_at.to_string(),
    })
}

/// Text content of a cell: text nodes trimmed, empty ones dropped, joined by spaces
///
/// Joining with a space keeps `<a>Test Corp A</a> (Filer)` readable as
/// `Test Corp A (Filer)`. A plain strip-and-concatenate would give
/// `Test Corp A(Filer)`; this differs from that on purpose.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pulls the registrant id out of a link target, leading zeros stripped
///
/// Returns `None` when the link carries no `CIK=` parameter.
pub fn extract_cik(href: &str) -> Option<String> {
    if !href.contains("CIK") {
        return None;
    }
    CIK_RE
        .captures(href)
        .map(|caps| caps[1].trim_start_matches('0').to_string())
}

/// Pulls the `accession-number=` value out of a URL
pub fn extract_accession(url: &str) -> Option<String> {
    ACCESSION_RE.captures(url).map(|caps| caps[1].to_string())
}

/// Turns a link target into the stored document URL
///
/// Targets starting with `/` are prefixed with the origin of `base_url` as
/// written, without re-encoding. This includes `//host/...` targets, which
/// stay on the source origin. Anything else is kept as written. An empty
/// target gives an empty URL.
pub fn resolve_document_url(href: &str, base_url: &Url) -> Result<String, String> {
    if href.is_empty() {
        return Ok(String::new());
    }
    if href.starts_with('/') {
        let origin = base_url.origin();
        if !origin.is_tuple() {
            return Err(format!("cannot resolve link '{}': {} has no origin", href, base_url));
        }
        return Ok(format!("{}{}", origin.ascii_serialization(), href));
    }
    Ok(href.to_string())
}
