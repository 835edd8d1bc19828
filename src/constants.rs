//! Application constants for the ATS converter
//!
//! This module contains the reference grid collection names, attribute field
//! names, output schema fields, and format patterns used throughout the
//! application.

// =============================================================================
// Reference Grid Collections (AltaLIS V4-1)
// =============================================================================

/// Required reference grid collection names, one per resolution level
pub const GRID_COLLECTIONS: &[&str] = &["V4-1_LSD", "V4-1_QTR", "V4-1_SEC", "V4-1_TWP"];

/// File extension of the reference grid collections
pub const GRID_COLLECTION_EXT: &str = "geojson";

/// Attribute carrying the full ATS identity string of a parcel
pub const DESCRIPTOR_FIELD: &str = "DESCRIPTOR";

/// Auxiliary area-code attribute; empty for base parcels
pub const AREA_CODE_FIELD: &str = "RA";

// =============================================================================
// Output Schema
// =============================================================================

/// Output field holding the original ATS coordinate string
pub const FIELD_ATS: &str = "ATS";

/// Output field holding the latitude in decimal degrees
pub const FIELD_LAT_DD: &str = "LAT_DD";

/// Output field holding the longitude in decimal degrees
pub const FIELD_LON_DD: &str = "LON_DD";

/// Optional output field holding the row title
pub const FIELD_TITLE: &str = "TITLE";

// =============================================================================
// Input Defaults
// =============================================================================

/// Default name of the input column holding ATS coordinates
pub const DEFAULT_COORDINATE_COLUMN: &str = "ATS";

// =============================================================================
// ATS Format Patterns
// =============================================================================

/// Anchored patterns for the four AltaLIS coordinate formats, coarsest first.
///
/// Township is exactly 3 digits, range exactly 2, meridian a single digit in
/// 4-7, section and legal subdivision exactly 2 digits, quarter-section two
/// letters of NESW in either case. Field order is fixed and each pattern must
/// match the whole string.
pub mod patterns {
    /// `TWP-110 RGE-10 MER-4`
    pub const TOWNSHIP: &str = r"^TWP-[0-9]{3} RGE-[0-9]{2} MER-[4-7]$";

    /// `SEC-05 TWP-110 RGE-10 MER-4`
    pub const SECTION: &str = r"^SEC-[0-9]{2} TWP-[0-9]{3} RGE-[0-9]{2} MER-[4-7]$";

    /// `QS-NE SEC-05 TWP-110 RGE-10 MER-4`
    pub const QUARTER_SECTION: &str =
        r"^QS-[neswNESW]{2} SEC-[0-9]{2} TWP-[0-9]{3} RGE-[0-9]{2} MER-[4-7]$";

    /// `LSD-04 SEC-05 TWP-110 RGE-10 MER-4`
    pub const LEGAL_SUBDIVISION: &str =
        r"^LSD-[0-9]{2} SEC-[0-9]{2} TWP-[0-9]{3} RGE-[0-9]{2} MER-[4-7]$";
}

// =============================================================================
// Logging Defaults
// =============================================================================

/// Default log level when no verbosity flags are given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Accepted log level names for configuration validation
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
