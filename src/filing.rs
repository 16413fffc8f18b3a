//! The filing record extracted from one row of the EDGAR listing

use serde::Serialize;

/// One regulatory disclosure as listed on the current-filings page
///
/// Built once by the extractor and handed to storage; never mutated afterwards.
/// `cik` and `accession_number` may be empty when the row did not carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filing {
    /// Registrant identifier with leading zeros stripped
    pub cik: String,

    /// Company name as shown in the listing
    pub company_name: String,

    /// Form code, e.g. "10-K" or "8-K"
    pub filing_type: String,

    /// Filing date in the source's literal format
    pub filing_date: String,

    /// EDGAR accession number, the deduplication key
    pub accession_number: String,

    /// Absolute link to the filing or filer page
    pub document_url: String,

    /// UTC timestamp shared by every filing from the same extraction
    pub scraped_at: String,
}

impl Filing {
    /// Returns the company name cut to at most `max_chars` characters
    pub fn display_name(&self, max_chars: usize) -> &str {
        truncate_chars(&self.company_name, max_chars)
    }
}

/// Cuts a string to at most `max_chars` characters on a char boundary
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
