//! Batch format validation for ATS coordinate columns
//!
//! This is a coarse sanity gate run before any expensive work begins. It
//! catches "the wrong column was selected" rather than validating every
//! row: rows that individually mismatch still proceed to parsing and fail
//! individually later with a reported warning instead of aborting the
//! batch.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::patterns;

/// The four fixed-format patterns, coarsest to finest
static PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(patterns::TOWNSHIP).unwrap(),
        Regex::new(patterns::SECTION).unwrap(),
        Regex::new(patterns::QUARTER_SECTION).unwrap(),
        Regex::new(patterns::LEGAL_SUBDIVISION).unwrap(),
    ]
});

/// Check whether a single string matches any of the four ATS formats
///
/// Field order within each format is fixed and the whole string must
/// match; trailing content fails the check.
pub fn matches_any(coord: &str) -> bool {
    PATTERNS.iter().any(|pattern| pattern.is_match(coord))
}

/// Check whether a collection of strings plausibly holds ATS coordinates
///
/// Returns true iff at least one string matches any one of the four
/// formats. Pure, no side effects.
pub fn looks_valid<S: AsRef<str>>(coords: &[S]) -> bool {
    coords.iter().any(|coord| matches_any(coord.as_ref()))
}
