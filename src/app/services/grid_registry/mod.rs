//! Reference grid registry for O(1) parcel descriptor lookups
//!
//! This module provides an in-memory registry over the four AltaLIS V4-1
//! reference grid collections (township, section, quarter-section, legal
//! subdivision). Collections are loaded from GeoJSON and indexed by
//! descriptor per level, replacing the per-query attribute scans of the
//! source data with exact-match lookups.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use geo::Geometry;
use serde_json::Value as JsonValue;

use crate::app::models::GridLevel;

pub mod loader;
pub mod query;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use loader::LoadStats;

/// One reference grid parcel
#[derive(Debug, Clone)]
pub struct GridParcel {
    /// Full ATS identity string of the parcel, the exact-match lookup key
    pub descriptor: String,

    /// Auxiliary area code; empty for base parcels, non-empty for
    /// subdivided or aggregated records
    pub area_code: String,

    /// Parcel geometry in the reference grid's coordinate system
    pub geometry: Geometry<f64>,
}

/// Parcels of one grid level, indexed by descriptor
#[derive(Debug, Clone, Default)]
pub(crate) struct LevelIndex {
    pub(crate) parcels: Vec<GridParcel>,
    pub(crate) by_descriptor: HashMap<String, Vec<usize>>,
}

impl LevelIndex {
    fn insert(&mut self, parcel: GridParcel) {
        let idx = self.parcels.len();
        self.by_descriptor
            .entry(parcel.descriptor.clone())
            .or_default()
            .push(idx);
        self.parcels.push(parcel);
    }
}

/// Registry over the four reference grid collections
///
/// Fixed for the lifetime of a conversion batch; resolution never mutates
/// it, so repeated lookups against an unchanged registry are idempotent.
#[derive(Debug, Clone)]
pub struct GridRegistry {
    /// Per-level parcel indexes
    pub(crate) levels: HashMap<GridLevel, LevelIndex>,

    /// Path to the directory holding the reference collections
    pub(crate) grid_path: PathBuf,

    /// CRS member carried over from the reference collections, if present
    pub(crate) crs: Option<JsonValue>,
}

impl GridRegistry {
    /// Create a new empty registry
    pub fn new(grid_path: PathBuf) -> Self {
        Self {
            levels: HashMap::new(),
            grid_path,
            crs: None,
        }
    }

    /// Number of parcels loaded for a grid level
    pub fn parcel_count(&self, level: GridLevel) -> usize {
        self.levels
            .get(&level)
            .map(|index| index.parcels.len())
            .unwrap_or(0)
    }

    /// Total number of parcels across all levels
    pub fn total_parcels(&self) -> usize {
        self.levels.values().map(|index| index.parcels.len()).sum()
    }

    /// Path to the grid directory this registry was loaded from
    pub fn grid_path(&self) -> &Path {
        &self.grid_path
    }

    /// CRS of the reference collections, when one was declared
    pub fn crs(&self) -> Option<&JsonValue> {
        self.crs.as_ref()
    }

    /// Registry metadata for reporting
    pub fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            grid_path: self.grid_path.clone(),
            parcel_counts: GridLevel::ALL
                .iter()
                .map(|&level| (level, self.parcel_count(level)))
                .collect(),
            total_parcels: self.total_parcels(),
            has_crs: self.crs.is_some(),
        }
    }

    /// Insert a parcel into a level's index
    pub(crate) fn insert_parcel(&mut self, level: GridLevel, parcel: GridParcel) {
        self.levels.entry(level).or_default().insert(parcel);
    }
}

/// Metadata about a loaded registry
#[derive(Debug, Clone)]
pub struct RegistryMetadata {
    pub grid_path: PathBuf,
    pub parcel_counts: Vec<(GridLevel, usize)>,
    pub total_parcels: usize,
    pub has_crs: bool,
}
