//! Data models for ATS conversion
//!
//! This module contains the core data structures for representing parsed ATS
//! coordinates, the reference grid hierarchy, and input/output records,
//! following the AltaLIS V4-1 grid conventions.

use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Survey Level Tags
// =============================================================================

/// The six recognized ATS token tags, from coarsest to finest
///
/// A raw coordinate string is a whitespace-separated sequence of
/// `<TAG>-<value>` tokens; these are the tags the parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelTag {
    /// Township number (3 digits)
    Twp,
    /// Range number (2 digits)
    Rge,
    /// Meridian digit (4-7 within Alberta)
    Mer,
    /// Section number (2 digits)
    Sec,
    /// Quarter-section code (two letters of NESW)
    Qs,
    /// Legal subdivision number (2 digits)
    Lsd,
}

impl LevelTag {
    /// All recognized tags, in the order the parser tries them
    pub const ALL: [LevelTag; 6] = [
        LevelTag::Twp,
        LevelTag::Rge,
        LevelTag::Mer,
        LevelTag::Sec,
        LevelTag::Qs,
        LevelTag::Lsd,
    ];

    /// The tag text as it appears in coordinate tokens
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelTag::Twp => "TWP",
            LevelTag::Rge => "RGE",
            LevelTag::Mer => "MER",
            LevelTag::Sec => "SEC",
            LevelTag::Qs => "QS",
            LevelTag::Lsd => "LSD",
        }
    }

    /// Strip this tag's `<TAG>-` prefix from a token, returning the value
    ///
    /// Returns `None` when the token does not begin with this tag's prefix.
    pub fn strip<'a>(&self, token: &'a str) -> Option<&'a str> {
        token.strip_prefix(self.as_str())?.strip_prefix('-')
    }
}

impl fmt::Display for LevelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Grid Resolution Levels
// =============================================================================

/// The four resolution tiers of the reference grid
///
/// Each tier is a polygon partition of the province, each finer than the
/// last and wholly contained within the coarser levels above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridLevel {
    Township,
    Section,
    QuarterSection,
    LegalSubdivision,
}

impl GridLevel {
    /// All grid levels, coarsest first
    pub const ALL: [GridLevel; 4] = [
        GridLevel::Township,
        GridLevel::Section,
        GridLevel::QuarterSection,
        GridLevel::LegalSubdivision,
    ];

    /// Name of the AltaLIS reference collection for this level
    pub fn collection_name(&self) -> &'static str {
        match self {
            GridLevel::Township => "V4-1_TWP",
            GridLevel::Section => "V4-1_SEC",
            GridLevel::QuarterSection => "V4-1_QTR",
            GridLevel::LegalSubdivision => "V4-1_LSD",
        }
    }

    /// Whether lookups at this level must filter on an empty area code
    ///
    /// The area-code-empty condition distinguishes base parcels from
    /// subdivided and aggregated records in the reference data. The township
    /// level carries no such records, so no filter is needed there.
    pub fn requires_base_filter(&self) -> bool {
        !matches!(self, GridLevel::Township)
    }
}

impl fmt::Display for GridLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GridLevel::Township => "township",
            GridLevel::Section => "section",
            GridLevel::QuarterSection => "quarter-section",
            GridLevel::LegalSubdivision => "legal subdivision",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Parsed Coordinate
// =============================================================================

/// A resolved geographic centroid in decimal degrees
///
/// Field orientation matters: `lon` is the X ordinate and `lat` is the Y
/// ordinate, consistent with a longitude-latitude convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub lon: f64,
    pub lat: f64,
}

/// A structured, leveled representation of one raw ATS coordinate string
///
/// Constructed once at batch-build time; `centroid` is the only field ever
/// mutated, exactly once, during resolution. An absent centroid means
/// "not yet resolved / unresolvable", which is distinguishable from a
/// coordinate resolved to zero.
#[derive(Debug, Clone)]
pub struct ParsedCoordinate {
    /// Original string, preserved verbatim for output and diagnostics
    pub raw: String,

    /// Level values keyed by tag; only tags present in the input appear
    pub(crate) levels: HashMap<LevelTag, String>,

    /// Resolved centroid; `None` until resolution succeeds
    pub(crate) centroid: Option<Centroid>,
}

impl ParsedCoordinate {
    /// Create a coordinate from its raw string and parsed level map
    pub(crate) fn new(raw: String, levels: HashMap<LevelTag, String>) -> Self {
        Self {
            raw,
            levels,
            centroid: None,
        }
    }

    /// Get the value recorded for a level tag, if the input carried one
    pub fn level(&self, tag: LevelTag) -> Option<&str> {
        self.levels.get(&tag).map(String::as_str)
    }

    /// Check whether the input carried a value for a level tag
    pub fn has_level(&self, tag: LevelTag) -> bool {
        self.levels.contains_key(&tag)
    }

    /// Number of recognized level tokens in the input
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// The deepest complete grid level this coordinate specifies
    ///
    /// Selection is deepest-first, first match wins: a legal subdivision
    /// token takes priority over a quarter-section token, which takes
    /// priority over a section token. The township level requires all three
    /// of TWP, RGE and MER. Returns `None` when no level is determinable.
    pub fn resolved_level(&self) -> Option<GridLevel> {
        if self.has_level(LevelTag::Lsd) {
            Some(GridLevel::LegalSubdivision)
        } else if self.has_level(LevelTag::Qs) {
            Some(GridLevel::QuarterSection)
        } else if self.has_level(LevelTag::Sec) {
            Some(GridLevel::Section)
        } else if self.has_level(LevelTag::Twp)
            && self.has_level(LevelTag::Rge)
            && self.has_level(LevelTag::Mer)
        {
            Some(GridLevel::Township)
        } else {
            None
        }
    }

    /// The resolved centroid, if resolution has succeeded
    pub fn centroid(&self) -> Option<Centroid> {
        self.centroid
    }

    /// Record the resolved centroid
    ///
    /// Called at most once per coordinate, during batch resolution.
    pub(crate) fn set_centroid(&mut self, centroid: Centroid) {
        self.centroid = Some(centroid);
    }
}

// =============================================================================
// Input and Output Records
// =============================================================================

/// One raw input table row before parsing
#[derive(Debug, Clone)]
pub struct InputRow {
    /// Optional row title, stringified from whatever scalar the source held
    pub title: Option<String>,

    /// The ATS coordinate text
    pub coordinate: String,
}

/// One output point record
///
/// An absent centroid is written as a degenerate (0, 0) point with null
/// latitude/longitude fields; the original ATS text is always preserved.
#[derive(Debug, Clone)]
pub struct PointRecord {
    /// Resolved centroid, or `None` for unresolved coordinates
    pub centroid: Option<Centroid>,

    /// Original ATS coordinate string, verbatim
    pub ats: String,

    /// Row title, when the input supplied one
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate_with(tags: &[(LevelTag, &str)]) -> ParsedCoordinate {
        let levels = tags
            .iter()
            .map(|(tag, value)| (*tag, value.to_string()))
            .collect();
        ParsedCoordinate::new("test".to_string(), levels)
    }

    #[test]
    fn test_level_tag_strip() {
        assert_eq!(LevelTag::Twp.strip("TWP-110"), Some("110"));
        assert_eq!(LevelTag::Qs.strip("QS-NE"), Some("NE"));
        assert_eq!(LevelTag::Twp.strip("RGE-10"), None);
        // Tag without the hyphen separator is not a token of that tag
        assert_eq!(LevelTag::Twp.strip("TWP110"), None);
        // Empty values are still recorded as values
        assert_eq!(LevelTag::Twp.strip("TWP-"), Some(""));
    }

    #[test]
    fn test_resolved_level_deepest_first() {
        let coord = coordinate_with(&[
            (LevelTag::Lsd, "04"),
            (LevelTag::Qs, "NE"),
            (LevelTag::Sec, "05"),
            (LevelTag::Twp, "110"),
            (LevelTag::Rge, "10"),
            (LevelTag::Mer, "4"),
        ]);
        assert_eq!(coord.resolved_level(), Some(GridLevel::LegalSubdivision));

        let coord = coordinate_with(&[
            (LevelTag::Qs, "NE"),
            (LevelTag::Sec, "05"),
            (LevelTag::Twp, "110"),
            (LevelTag::Rge, "10"),
            (LevelTag::Mer, "4"),
        ]);
        assert_eq!(coord.resolved_level(), Some(GridLevel::QuarterSection));

        let coord = coordinate_with(&[
            (LevelTag::Sec, "05"),
            (LevelTag::Twp, "110"),
            (LevelTag::Rge, "10"),
            (LevelTag::Mer, "4"),
        ]);
        assert_eq!(coord.resolved_level(), Some(GridLevel::Section));

        let coord = coordinate_with(&[
            (LevelTag::Twp, "110"),
            (LevelTag::Rge, "10"),
            (LevelTag::Mer, "4"),
        ]);
        assert_eq!(coord.resolved_level(), Some(GridLevel::Township));
    }

    #[test]
    fn test_resolved_level_requires_complete_township() {
        // TWP and RGE without MER is not a determinable level
        let coord = coordinate_with(&[(LevelTag::Twp, "110"), (LevelTag::Rge, "10")]);
        assert_eq!(coord.resolved_level(), None);

        let coord = coordinate_with(&[]);
        assert_eq!(coord.resolved_level(), None);
    }

    #[test]
    fn test_centroid_absent_until_set() {
        let mut coord = coordinate_with(&[(LevelTag::Twp, "110")]);
        assert!(coord.centroid().is_none());

        coord.set_centroid(Centroid {
            lon: -113.5,
            lat: 52.3,
        });
        assert_eq!(
            coord.centroid(),
            Some(Centroid {
                lon: -113.5,
                lat: 52.3
            })
        );
    }

    #[test]
    fn test_grid_level_base_filter() {
        assert!(!GridLevel::Township.requires_base_filter());
        assert!(GridLevel::Section.requires_base_filter());
        assert!(GridLevel::QuarterSection.requires_base_filter());
        assert!(GridLevel::LegalSubdivision.requires_base_filter());
    }

    #[test]
    fn test_grid_level_collection_names() {
        assert_eq!(GridLevel::Township.collection_name(), "V4-1_TWP");
        assert_eq!(GridLevel::Section.collection_name(), "V4-1_SEC");
        assert_eq!(GridLevel::QuarterSection.collection_name(), "V4-1_QTR");
        assert_eq!(GridLevel::LegalSubdivision.collection_name(), "V4-1_LSD");
    }
}
