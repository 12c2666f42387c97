//! The ordered catalog of date-matching rules.
//!
//! Patterns are grouped into two priority tiers. Tier-1 rules anchor a
//! numeric date to an expiry keyword ("expires", "valid until", ...); tier-2
//! rules match bare numeric and month-name dates anywhere in the text.
//! Scanning is exhaustive: every non-overlapping occurrence of every pattern
//! is reported, in catalog order.

use once_cell::sync::Lazy;
use regex::Regex;

/// Priority tier of a catalog pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternTier {
    /// Numeric date preceded by an expiry keyword.
    ExpiryContext,
    /// Bare date with no surrounding context.
    BareDate,
}

/// One raw match produced by a catalog scan.
///
/// `matched` is the verbatim substring — tier-1 matches still carry their
/// keyword prefix, which [`strip_keyword_prefix`] removes before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub tier: PatternTier,
    pub pattern_index: usize,
    pub matched: String,
}

/// Numeric date body shared by the tier-1 rules: `D[-/]M[-/]Y` or
/// `M[-/]D[-/]Y` — the day/month order is deliberately left ambiguous.
const NUMERIC_DATE: &str = r"\d{1,2}[-/]\d{1,2}[-/]\d{2,4}";

static CATALOG: Lazy<Vec<(PatternTier, Regex)>> = Lazy::new(|| {
    vec![
        // Tier 1 — expiry-contextual dates
        (
            PatternTier::ExpiryContext,
            Regex::new(&format!(r"(?i)expires?:?\s*{NUMERIC_DATE}")).unwrap(),
        ),
        (
            PatternTier::ExpiryContext,
            Regex::new(&format!(r"(?i)expiry\s*date:?\s*{NUMERIC_DATE}")).unwrap(),
        ),
        (
            PatternTier::ExpiryContext,
            Regex::new(&format!(r"(?i)valid\s*until:?\s*{NUMERIC_DATE}")).unwrap(),
        ),
        (
            PatternTier::ExpiryContext,
            Regex::new(&format!(r"(?i)exp\.?\s*date:?\s*{NUMERIC_DATE}")).unwrap(),
        ),
        // Tier 2 — bare dates
        (PatternTier::BareDate, Regex::new(NUMERIC_DATE).unwrap()),
        (
            PatternTier::BareDate,
            Regex::new(r"\d{4}[-/]\d{1,2}[-/]\d{1,2}").unwrap(),
        ),
        (
            PatternTier::BareDate,
            Regex::new(
                r"(?i)\d{1,2}\s(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s\d{2,4}",
            )
            .unwrap(),
        ),
        (
            PatternTier::BareDate,
            Regex::new(
                r"(?i)(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s\d{1,2},?\s\d{2,4}",
            )
            .unwrap(),
        ),
    ]
});

/// The keyword prefixes that tier-1 matches carry.
static KEYWORD_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)expires?:?\s*|expiry\s*date:?\s*|valid\s*until:?\s*|exp\.?\s*date:?\s*")
        .unwrap()
});

/// Scan `text` against every catalog pattern.
///
/// Returns the full set of matches across all patterns, tagged with the
/// pattern that produced them. Matching is exhaustive per pattern, not
/// first-match-only; no normalization of the matched substrings happens here.
pub fn scan_text(text: &str) -> Vec<PatternMatch> {
    let mut matches = Vec::new();
    for (pattern_index, (tier, re)) in CATALOG.iter().enumerate() {
        for m in re.find_iter(text) {
            matches.push(PatternMatch {
                tier: *tier,
                pattern_index,
                matched: m.as_str().to_string(),
            });
        }
    }
    matches
}

/// Remove an expiry-keyword prefix from a matched substring.
///
/// Tier-2 matches pass through unchanged.
pub fn strip_keyword_prefix(matched: &str) -> String {
    KEYWORD_PREFIX.replace_all(matched, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers(text: &str) -> Vec<PatternTier> {
        scan_text(text).into_iter().map(|m| m.tier).collect()
    }

    #[test]
    fn expires_keyword_matches_tier_one() {
        let matches = scan_text("Expires: 01/15/2024");
        assert_eq!(matches[0].tier, PatternTier::ExpiryContext);
        assert_eq!(matches[0].matched, "Expires: 01/15/2024");
    }

    #[test]
    fn keyword_variants_match() {
        assert!(tiers("expiry date 3/4/25").contains(&PatternTier::ExpiryContext));
        assert!(tiers("VALID UNTIL: 3-4-2025").contains(&PatternTier::ExpiryContext));
        assert!(tiers("exp. date: 3/4/2025").contains(&PatternTier::ExpiryContext));
        assert!(tiers("Exp Date 3/4/2025").contains(&PatternTier::ExpiryContext));
    }

    #[test]
    fn bare_numeric_date_is_tier_two_only() {
        let matches = scan_text("dated 01/15/2024");
        assert!(matches.iter().all(|m| m.tier == PatternTier::BareDate));
        assert!(!matches.is_empty());
    }

    #[test]
    fn iso_order_date_matches() {
        let matches = scan_text("2024-01-15");
        assert!(matches.iter().any(|m| m.matched == "2024-01-15"));
    }

    #[test]
    fn month_name_forms_match() {
        assert!(!scan_text("1 Jan 2024").is_empty());
        assert!(!scan_text("January 1, 2024").is_empty());
        assert!(!scan_text("15 september 24").is_empty());
    }

    #[test]
    fn scanning_is_exhaustive_per_pattern() {
        let matches = scan_text("from 01/01/2024 to 12/31/2025");
        let bare: Vec<_> = matches
            .iter()
            .filter(|m| m.pattern_index == 4)
            .map(|m| m.matched.as_str())
            .collect();
        assert_eq!(bare, vec!["01/01/2024", "12/31/2025"]);
    }

    #[test]
    fn keyword_match_also_surfaces_as_bare_date() {
        // Exhaustive scanning means a keyword-tagged date shows up twice:
        // once through tier 1 and once through the bare-date rule.
        let matches = scan_text("Expires: 01/15/2024");
        assert!(matches.iter().any(|m| m.tier == PatternTier::ExpiryContext));
        assert!(matches.iter().any(|m| m.tier == PatternTier::BareDate));
    }

    #[test]
    fn strip_keyword_prefix_removes_keywords() {
        assert_eq!(strip_keyword_prefix("Expires: 01/15/2024"), "01/15/2024");
        assert_eq!(strip_keyword_prefix("valid until 3-4-25"), "3-4-25");
        assert_eq!(strip_keyword_prefix("Exp. Date: 3/4/25"), "3/4/25");
    }

    #[test]
    fn strip_keyword_prefix_leaves_bare_dates_alone() {
        assert_eq!(strip_keyword_prefix("01/15/2024"), "01/15/2024");
    }

    #[test]
    fn no_matches_in_plain_text() {
        assert!(scan_text("nothing date-like in this sentence").is_empty());
    }
}
