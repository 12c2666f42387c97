//! Lenient parsing of matched date substrings.
//!
//! Converts one matched substring (keyword prefix already stripped) into a
//! calendar date. Parsing tolerates surrounding punctuation, resolves
//! two-digit years against a fixed pivot, and infers day/month order the way
//! a US-default fuzzy parser does: month-first, swapping to day-first when
//! the leading field cannot be a month. Anything that does not resolve to a
//! real calendar date is reported as unparseable, never as an error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Numeric triple with `-` or `/` separators: `12/31/2025`, `1-1-24`,
/// `2024/01/01`.
static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,4})[-/](\d{1,2})[-/](\d{1,4})").unwrap());

/// Day-first month-name form: `1 Jan 2024`, `15 september 24`.
static DAY_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2})\s+([a-z]{3,})\.?,?\s+(\d{2,4})").unwrap());

/// Month-first month-name form: `Jan 1, 2024`, `September 01 2024`.
static MONTH_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([a-z]{3,})\.?\s+(\d{1,2}),?\s+(\d{2,4})").unwrap());

/// Parse one candidate substring into a calendar date.
///
/// Returns `None` for anything that is not a plausible date; the caller
/// drops such candidates and carries on with the rest.
pub fn parse_candidate(s: &str) -> Option<NaiveDate> {
    let s = s.trim_matches(|c: char| !c.is_ascii_alphanumeric());
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = NUMERIC_RE.captures(s) {
        return parse_numeric(&caps[1], &caps[2], &caps[3]);
    }
    if let Some(caps) = DAY_MONTH_RE.captures(s) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year = expand_year(caps[3].parse().ok()?);
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    if let Some(caps) = MONTH_DAY_RE.captures(s) {
        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year = expand_year(caps[3].parse().ok()?);
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    None
}

/// Interpret a separated numeric triple.
///
/// A 4-digit leading field is year-month-day. Otherwise month-first is
/// assumed, swapping to day-first when the leading field exceeds 12. Both
/// orders being impossible (e.g. `32/13/2024`) fails the candidate.
fn parse_numeric(a: &str, b: &str, c: &str) -> Option<NaiveDate> {
    if a.len() == 4 {
        let year: i32 = a.parse().ok()?;
        let month: u32 = b.parse().ok()?;
        let day: u32 = c.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let first: u32 = a.parse().ok()?;
    let second: u32 = b.parse().ok()?;
    let year = expand_year(c.parse().ok()?);

    let (month, day) = if first <= 12 {
        (first, second)
    } else {
        (second, first)
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Resolve a possibly two-digit year against a fixed pivot: 00–69 map to
/// 2000–2069, 70–99 to 1970–1999. Fixed rather than clock-relative so that
/// parsing the same text always yields the same date.
fn expand_year(year: i32) -> i32 {
    if year >= 100 {
        year
    } else if year < 70 {
        2000 + year
    } else {
        1900 + year
    }
}

/// Map an English month name (or any prefix of at least three letters) to
/// its number.
fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    let prefix = lower.get(..3)?;
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}
