use chrono::NaiveDate;
use thiserror::Error;

pub mod backend;
pub mod config;
pub mod parse;
pub mod patterns;
pub mod select;

pub use backend::{OcrEngine, PageRenderer, PdfTextBackend};
pub use config::{DEFAULT_RENDER_DPI, ExtractorConfig};
pub use parse::parse_candidate;
pub use patterns::{PatternMatch, PatternTier, scan_text, strip_keyword_prefix};
pub use select::select_latest;

/// The externally visible result of one extraction call.
///
/// Everything below this level — unreadable files, missing text layers,
/// unparseable matches — collapses into [`Outcome::NotFound`]; the error
/// kinds are logged before being discarded. Callers that need the failure
/// taxonomy use the acquisition API directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A single resolved calendar date.
    Resolved(NaiveDate),
    /// No date could be determined from the document.
    NotFound,
}

impl Outcome {
    /// The resolved date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Outcome::Resolved(d) => Some(*d),
            Outcome::NotFound => None,
        }
    }
}

/// A successfully parsed date plus the provenance of its match.
///
/// Candidates are produced and consumed within one extraction call; nothing
/// retains them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCandidate {
    pub date: NaiveDate,
    /// Which priority tier the matching pattern belongs to.
    pub tier: PatternTier,
    /// Index of the matching pattern within the catalog.
    pub pattern_index: usize,
    /// The matched substring, keyword prefix included for tier-1 matches.
    pub matched: String,
}

/// Failure of an underlying extraction backend (text layer, renderer, OCR).
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("failed to render page: {0}")]
    Render(String),
    #[error("OCR failed: {0}")]
    Ocr(String),
}

/// Scan `text` for date-like substrings, parse each match leniently, and
/// select the chronologically latest candidate.
///
/// Matches that fail to parse are dropped silently (logged at debug level);
/// they never abort extraction of the remaining candidates.
pub fn extract_date_from_text(text: &str) -> Option<DateCandidate> {
    let matches = patterns::scan_text(text);
    let mut candidates = Vec::with_capacity(matches.len());

    for m in matches {
        let cleaned = patterns::strip_keyword_prefix(&m.matched);
        match parse::parse_candidate(&cleaned) {
            Some(date) => candidates.push(DateCandidate {
                date,
                tier: m.tier,
                pattern_index: m.pattern_index,
                matched: m.matched,
            }),
            None => {
                tracing::debug!(matched = %m.matched, "dropping unparseable date candidate");
            }
        }
    }

    select::select_latest(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_expiry_match_wins() {
        let picked = extract_date_from_text("Membership expires: 06/30/2027").unwrap();
        assert_eq!(picked.date, ymd(2027, 6, 30));
        assert_eq!(picked.tier, PatternTier::ExpiryContext);
    }

    #[test]
    fn latest_date_wins_across_tiers() {
        // The expiry-keyword match is also the chronological maximum here.
        let picked =
            extract_date_from_text("Valid Until: 12/31/2025 Issued: 01/15/2024").unwrap();
        assert_eq!(picked.date, ymd(2025, 12, 31));
    }

    #[test]
    fn latest_date_wins_even_against_expiry_keyword() {
        // Documented quirk of the selection policy: the bare issue date is
        // numerically later than the keyword-tagged expiry date, and it wins.
        let picked =
            extract_date_from_text("Issued: 12/31/2025 Expires: 01/15/2024").unwrap();
        assert_eq!(picked.date, ymd(2025, 12, 31));
    }

    #[test]
    fn no_matches_yields_none() {
        assert!(extract_date_from_text("no dates in here at all").is_none());
    }

    #[test]
    fn all_unparseable_yields_none() {
        assert!(extract_date_from_text("expires: 32/13/2024").is_none());
    }

    #[test]
    fn malformed_candidate_does_not_abort_others() {
        let picked = extract_date_from_text("32/13/2024 then 5/6/2024").unwrap();
        assert_eq!(picked.date, ymd(2024, 5, 6));
    }

    #[test]
    fn month_name_forms_compete() {
        let picked = extract_date_from_text("issued 1 Jan 2024, renew by Mar 15, 2026").unwrap();
        assert_eq!(picked.date, ymd(2026, 3, 15));
    }

    #[test]
    fn outcome_date_accessor() {
        assert_eq!(Outcome::NotFound.date(), None);
        assert_eq!(
            Outcome::Resolved(ymd(2025, 1, 2)).date(),
            Some(ymd(2025, 1, 2))
        );
    }
}
