//! Final selection over the parsed candidate set.

use crate::DateCandidate;

/// Pick the chronologically latest candidate, regardless of which pattern
/// or tier produced it.
///
/// Expiry-contextual matches are scanned first but get no precedence here:
/// the policy is purely "furthest-future date wins". A document whose issue
/// date is numerically later than its expiry date will therefore resolve to
/// the issue date — this is the documented behavior, not an accident. Ties
/// keep the earliest-scanned candidate.
pub fn select_latest(candidates: Vec<DateCandidate>) -> Option<DateCandidate> {
    let mut best: Option<DateCandidate> = None;
    for candidate in candidates {
        match &best {
            Some(current) if candidate.date <= current.date => {}
            _ => best = Some(candidate),
        }
    }
    best
}
