//! Tests for the grid registry service

pub mod query_tests;

use geo::{Geometry, LineString, Polygon};

use super::GridParcel;

/// Square parcel polygon centered on (lon, lat) with the given half-width
pub(crate) fn square_geometry(lon: f64, lat: f64, half: f64) -> Geometry<f64> {
    Geometry::Polygon(Polygon::new(
        LineString::from(vec![
            (lon - half, lat - half),
            (lon + half, lat - half),
            (lon + half, lat + half),
            (lon - half, lat + half),
            (lon - half, lat - half),
        ]),
        vec![],
    ))
}

pub(crate) fn parcel(descriptor: &str, area_code: &str, lon: f64, lat: f64) -> GridParcel {
    GridParcel {
        descriptor: descriptor.to_string(),
        area_code: area_code.to_string(),
        geometry: square_geometry(lon, lat, 0.1),
    }
}
