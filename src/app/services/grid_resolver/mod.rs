//! Coordinate resolution against the reference grid
//!
//! Given a parsed coordinate, this module selects the deepest grid level
//! the coordinate specifies, renders the canonical lookup descriptor for
//! that level, queries the registry for the matching base parcel, and
//! extracts the polygon centroid.
//!
//! Resolution is stateless across calls and never fails the batch: every
//! failure path emits a warning naming the offending raw string and
//! returns `None`, leaving the coordinate unresolved.

use geo::Centroid as _;
use tracing::warn;

use crate::app::models::{Centroid, GridLevel, LevelTag, ParsedCoordinate};
use crate::app::services::grid_registry::GridRegistry;

/// Resolver over an explicitly injected grid registry
///
/// The registry is a parameter rather than state owned by each
/// coordinate, so resolution is trivially testable in isolation.
#[derive(Debug)]
pub struct GridResolver<'a> {
    registry: &'a GridRegistry,
}

impl<'a> GridResolver<'a> {
    /// Create a resolver over a loaded registry
    pub fn new(registry: &'a GridRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a coordinate to the centroid of its reference parcel
    ///
    /// Returns `None` when no grid level is determinable, when no base
    /// parcel matches the descriptor, or when the matched geometry cannot
    /// produce a centroid. Each case emits a warning; none aborts the
    /// batch.
    pub fn resolve(&self, coord: &ParsedCoordinate) -> Option<Centroid> {
        let Some(level) = coord.resolved_level() else {
            warn!(
                "[ {} ] has no determinable grid level and will be left unresolved; \
                 it may be in an incorrect format",
                coord.raw
            );
            return None;
        };

        let Some(descriptor) = lookup_descriptor(coord, level) else {
            warn!(
                "[ {} ] is missing levels required for a {} lookup; \
                 it may be in an incorrect format",
                coord.raw, level
            );
            return None;
        };

        let Some(parcel) = self.registry.find_base_parcel(level, &descriptor) else {
            warn!(
                "[ {} ] matched no {} parcel in the reference grid; \
                 it may be in an incorrect format",
                coord.raw, level
            );
            return None;
        };

        match parcel.geometry.centroid() {
            Some(point) => Some(Centroid {
                lon: point.x(),
                lat: point.y(),
            }),
            None => {
                warn!(
                    "[ {} ] matched a {} parcel whose geometry yields no centroid; \
                     the reference record may be corrupt",
                    coord.raw, level
                );
                None
            }
        }
    }
}

/// Render the canonical lookup descriptor for a coordinate at a level
///
/// The descriptor reuses the original token text (values are not
/// re-derived or reformatted) but fixes the canonical field order:
/// `LSD-a SEC-b TWP-c RGE-d MER-e`. Returns `None` when the coordinate
/// lacks a level the descriptor requires.
pub fn lookup_descriptor(coord: &ParsedCoordinate, level: GridLevel) -> Option<String> {
    let twp = coord.level(LevelTag::Twp)?;
    let rge = coord.level(LevelTag::Rge)?;
    let mer = coord.level(LevelTag::Mer)?;
    let base = format!("TWP-{twp} RGE-{rge} MER-{mer}");

    match level {
        GridLevel::Township => Some(base),
        GridLevel::Section => {
            let sec = coord.level(LevelTag::Sec)?;
            Some(format!("SEC-{sec} {base}"))
        }
        GridLevel::QuarterSection => {
            let qs = coord.level(LevelTag::Qs)?;
            let sec = coord.level(LevelTag::Sec)?;
            Some(format!("QS-{qs} SEC-{sec} {base}"))
        }
        GridLevel::LegalSubdivision => {
            let lsd = coord.level(LevelTag::Lsd)?;
            let sec = coord.level(LevelTag::Sec)?;
            Some(format!("LSD-{lsd} SEC-{sec} {base}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use geo::{Geometry, LineString, MultiPolygon, Polygon};

    use super::*;
    use crate::app::services::ats_parser;
    use crate::app::services::grid_registry::GridParcel;

    fn square(lon: f64, lat: f64) -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            LineString::from(vec![
                (lon - 0.1, lat - 0.05),
                (lon + 0.1, lat - 0.05),
                (lon + 0.1, lat + 0.05),
                (lon - 0.1, lat + 0.05),
                (lon - 0.1, lat - 0.05),
            ]),
            vec![],
        ))
    }

    fn parcel(descriptor: &str, area_code: &str, geometry: Geometry<f64>) -> GridParcel {
        GridParcel {
            descriptor: descriptor.to_string(),
            area_code: area_code.to_string(),
            geometry,
        }
    }

    fn test_registry() -> GridRegistry {
        let mut registry = GridRegistry::new(PathBuf::from("/test"));
        registry.insert_parcel(
            GridLevel::Township,
            parcel("TWP-110 RGE-10 MER-4", "", square(-113.5, 52.3)),
        );
        registry.insert_parcel(
            GridLevel::Section,
            parcel("SEC-05 TWP-110 RGE-10 MER-4", "", square(-113.6, 52.25)),
        );
        registry.insert_parcel(
            GridLevel::QuarterSection,
            parcel("QS-NE SEC-05 TWP-110 RGE-10 MER-4", "", square(-113.55, 52.28)),
        );
        registry.insert_parcel(
            GridLevel::LegalSubdivision,
            parcel(
                "LSD-04 SEC-05 TWP-110 RGE-10 MER-4",
                "",
                square(-113.52, 52.29),
            ),
        );
        registry
    }

    fn assert_close(centroid: Centroid, lon: f64, lat: f64) {
        assert!(
            (centroid.lon - lon).abs() < 1e-9,
            "lon {} != {}",
            centroid.lon,
            lon
        );
        assert!(
            (centroid.lat - lat).abs() < 1e-9,
            "lat {} != {}",
            centroid.lat,
            lat
        );
    }

    #[test]
    fn test_resolve_township() {
        let registry = test_registry();
        let resolver = GridResolver::new(&registry);

        let coord = ats_parser::parse("TWP-110 RGE-10 MER-4");
        let centroid = resolver.resolve(&coord).unwrap();
        assert_close(centroid, -113.5, 52.3);
    }

    #[test]
    fn test_resolve_section() {
        let registry = test_registry();
        let resolver = GridResolver::new(&registry);

        let coord = ats_parser::parse("SEC-05 TWP-110 RGE-10 MER-4");
        let centroid = resolver.resolve(&coord).unwrap();
        assert_close(centroid, -113.6, 52.25);
    }

    #[test]
    fn test_lsd_takes_priority_over_all_other_levels() {
        let registry = test_registry();
        let resolver = GridResolver::new(&registry);

        // Every tag present: the LSD parcel must win
        let coord = ats_parser::parse("LSD-04 QS-NE SEC-05 TWP-110 RGE-10 MER-4");
        assert_eq!(coord.resolved_level(), Some(GridLevel::LegalSubdivision));
        let centroid = resolver.resolve(&coord).unwrap();
        assert_close(centroid, -113.52, 52.29);
    }

    #[test]
    fn test_qs_takes_priority_over_section() {
        let registry = test_registry();
        let resolver = GridResolver::new(&registry);

        let coord = ats_parser::parse("QS-NE SEC-05 TWP-110 RGE-10 MER-4");
        let centroid = resolver.resolve(&coord).unwrap();
        assert_close(centroid, -113.55, 52.28);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let registry = test_registry();
        let resolver = GridResolver::new(&registry);

        let coord = ats_parser::parse("TWP-110 RGE-10 MER-4");
        let first = resolver.resolve(&coord).unwrap();
        let second = resolver.resolve(&coord).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_recognized_tags_resolves_to_none() {
        let registry = test_registry();
        let resolver = GridResolver::new(&registry);

        assert!(resolver.resolve(&ats_parser::parse("garbage")).is_none());
        assert!(resolver.resolve(&ats_parser::parse("")).is_none());
    }

    #[test]
    fn test_incomplete_township_resolves_to_none() {
        let registry = test_registry();
        let resolver = GridResolver::new(&registry);

        // TWP and RGE without MER cannot determine a level
        let coord = ats_parser::parse("TWP-110 RGE-10");
        assert!(resolver.resolve(&coord).is_none());
    }

    #[test]
    fn test_section_token_without_township_context() {
        let registry = test_registry();
        let resolver = GridResolver::new(&registry);

        // Level selection picks Section, but the descriptor cannot be built
        let coord = ats_parser::parse("SEC-05");
        assert_eq!(coord.resolved_level(), Some(GridLevel::Section));
        assert!(resolver.resolve(&coord).is_none());
    }

    #[test]
    fn test_zero_match_lookup_resolves_to_none() {
        let registry = test_registry();
        let resolver = GridResolver::new(&registry);

        let coord = ats_parser::parse("TWP-999 RGE-99 MER-4");
        assert!(resolver.resolve(&coord).is_none());
    }

    #[test]
    fn test_degenerate_geometry_resolves_to_none() {
        let mut registry = test_registry();
        registry.insert_parcel(
            GridLevel::Township,
            parcel(
                "TWP-120 RGE-10 MER-4",
                "",
                Geometry::MultiPolygon(MultiPolygon::new(vec![])),
            ),
        );
        let resolver = GridResolver::new(&registry);

        let coord = ats_parser::parse("TWP-120 RGE-10 MER-4");
        assert!(resolver.resolve(&coord).is_none());
    }

    #[test]
    fn test_lookup_descriptor_canonical_order() {
        // Token order in the raw string does not affect the descriptor
        let coord = ats_parser::parse("MER-4 TWP-110 SEC-05 RGE-10 LSD-04");
        assert_eq!(
            lookup_descriptor(&coord, GridLevel::LegalSubdivision).as_deref(),
            Some("LSD-04 SEC-05 TWP-110 RGE-10 MER-4")
        );
        assert_eq!(
            lookup_descriptor(&coord, GridLevel::Township).as_deref(),
            Some("TWP-110 RGE-10 MER-4")
        );
    }

    #[test]
    fn test_lookup_descriptor_reuses_original_token_text() {
        // Values are not zero-padded or otherwise re-derived
        let coord = ats_parser::parse("SEC-5 TWP-110 RGE-10 MER-4");
        assert_eq!(
            lookup_descriptor(&coord, GridLevel::Section).as_deref(),
            Some("SEC-5 TWP-110 RGE-10 MER-4")
        );
    }

    #[test]
    fn test_lookup_descriptor_missing_component() {
        let coord = ats_parser::parse("QS-NE TWP-110 RGE-10 MER-4");
        assert_eq!(lookup_descriptor(&coord, GridLevel::QuarterSection), None);
    }
}
