//! Tests for descriptor lookups

use std::path::PathBuf;

use super::parcel;
use crate::app::models::GridLevel;
use crate::app::services::grid_registry::GridRegistry;

fn registry_with_parcels() -> GridRegistry {
    let mut registry = GridRegistry::new(PathBuf::from("/test"));

    registry.insert_parcel(
        GridLevel::Township,
        parcel("TWP-110 RGE-10 MER-4", "", -113.5, 52.3),
    );
    registry.insert_parcel(
        GridLevel::Section,
        parcel("SEC-05 TWP-110 RGE-10 MER-4", "", -113.6, 52.25),
    );
    // A subdivided record sharing the base parcel's descriptor
    registry.insert_parcel(
        GridLevel::Section,
        parcel("SEC-06 TWP-110 RGE-10 MER-4", "R1", -113.7, 52.25),
    );
    registry.insert_parcel(
        GridLevel::QuarterSection,
        parcel("QS-NE SEC-05 TWP-110 RGE-10 MER-4", "", -113.55, 52.28),
    );

    registry
}

#[test]
fn test_find_base_parcel_exact_match() {
    let registry = registry_with_parcels();

    let parcel = registry
        .find_base_parcel(GridLevel::Township, "TWP-110 RGE-10 MER-4")
        .unwrap();
    assert_eq!(parcel.descriptor, "TWP-110 RGE-10 MER-4");

    let parcel = registry
        .find_base_parcel(GridLevel::Section, "SEC-05 TWP-110 RGE-10 MER-4")
        .unwrap();
    assert_eq!(parcel.area_code, "");
}

#[test]
fn test_find_base_parcel_requires_empty_area_code() {
    let registry = registry_with_parcels();

    // SEC-06 only exists as a subdivided record, so the base lookup fails
    assert!(
        registry
            .find_base_parcel(GridLevel::Section, "SEC-06 TWP-110 RGE-10 MER-4")
            .is_none()
    );
    // ...but the descriptor itself is known
    assert!(registry.contains_descriptor(GridLevel::Section, "SEC-06 TWP-110 RGE-10 MER-4"));
}

#[test]
fn test_find_base_parcel_zero_matches() {
    let registry = registry_with_parcels();

    assert!(
        registry
            .find_base_parcel(GridLevel::Township, "TWP-999 RGE-99 MER-4")
            .is_none()
    );
    assert!(
        registry
            .find_base_parcel(GridLevel::LegalSubdivision, "LSD-04 SEC-05 TWP-110 RGE-10 MER-4")
            .is_none()
    );
}

#[test]
fn test_find_base_parcel_duplicates_take_first() {
    let mut registry = registry_with_parcels();

    // Two base parcels sharing a descriptor should not occur, but the
    // lookup is defensive: first inserted wins
    registry.insert_parcel(
        GridLevel::Township,
        parcel("TWP-111 RGE-10 MER-4", "", -113.5, 52.4),
    );
    registry.insert_parcel(
        GridLevel::Township,
        parcel("TWP-111 RGE-10 MER-4", "", -120.0, 55.0),
    );

    let found = registry
        .find_base_parcel(GridLevel::Township, "TWP-111 RGE-10 MER-4")
        .unwrap();
    use geo::Centroid;
    let centroid = found.geometry.centroid().unwrap();
    assert!((centroid.x() - (-113.5)).abs() < 1e-9);
}

#[test]
fn test_parcel_counts() {
    let registry = registry_with_parcels();

    assert_eq!(registry.parcel_count(GridLevel::Township), 1);
    assert_eq!(registry.parcel_count(GridLevel::Section), 2);
    assert_eq!(registry.parcel_count(GridLevel::QuarterSection), 1);
    assert_eq!(registry.parcel_count(GridLevel::LegalSubdivision), 0);
    assert_eq!(registry.total_parcels(), 4);

    let metadata = registry.metadata();
    assert_eq!(metadata.total_parcels, 4);
    assert!(!metadata.has_crs);
}
