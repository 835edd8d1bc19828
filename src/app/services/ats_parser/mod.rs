//! ATS coordinate string parsing
//!
//! This module turns a raw ATS coordinate string into its structured,
//! leveled representation. Parsing is a pure transform: it never fails,
//! unrecognized tokens are silently ignored, and a string with no
//! recognized tags yields a coordinate with an empty level map that will
//! later fail resolution gracefully.

use std::collections::HashMap;

use crate::app::models::{LevelTag, ParsedCoordinate};

pub mod validator;

#[cfg(test)]
pub mod tests;

/// Parse a raw ATS string into a [`ParsedCoordinate`]
///
/// Splits the input on whitespace and records the value of every token of
/// the form `<TAG>-<value>` whose tag is one of TWP, RGE, MER, SEC, QS or
/// LSD. Tokens with unrecognized tags are ignored; this is deliberate
/// tolerance for extra or irrelevant columns in source data. When a tag
/// appears more than once the last occurrence wins.
///
/// # Examples
/// ```
/// use ats_converter::app::services::ats_parser;
/// use ats_converter::app::models::LevelTag;
///
/// let coord = ats_parser::parse("TWP-110 RGE-10 MER-4");
/// assert_eq!(coord.level(LevelTag::Twp), Some("110"));
/// assert_eq!(coord.level(LevelTag::Rge), Some("10"));
/// assert_eq!(coord.level(LevelTag::Mer), Some("4"));
/// ```
pub fn parse(raw: &str) -> ParsedCoordinate {
    let mut levels = HashMap::new();

    for token in raw.split_whitespace() {
        for tag in LevelTag::ALL {
            if let Some(value) = tag.strip(token) {
                levels.insert(tag, value.to_string());
                break;
            }
        }
    }

    ParsedCoordinate::new(raw.to_string(), levels)
}
