//! Loading of the reference grid collections from GeoJSON
//!
//! Each of the four AltaLIS collections is read fully into memory. Features
//! without a usable descriptor or geometry are skipped with a warning
//! rather than failing the load; a missing collection file is fatal.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use geojson::{FeatureCollection, GeoJson};
use tracing::{debug, info, warn};

use super::{GridParcel, GridRegistry};
use crate::app::models::GridLevel;
use crate::constants::{AREA_CODE_FIELD, DESCRIPTOR_FIELD, GRID_COLLECTION_EXT};
use crate::{Error, Result};

/// Statistics from loading the reference grid
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Number of collection files read
    pub collections_loaded: usize,

    /// Number of parcels indexed across all levels
    pub parcels_loaded: usize,

    /// Number of features skipped for missing descriptors or bad geometry
    pub features_skipped: usize,

    /// Wall-clock time spent loading
    pub load_duration: Duration,
}

impl GridRegistry {
    /// File path of one reference collection under a grid directory
    pub fn collection_path(grid_path: &Path, level: GridLevel) -> PathBuf {
        grid_path.join(format!(
            "{}.{}",
            level.collection_name(),
            GRID_COLLECTION_EXT
        ))
    }

    /// Verify that all four reference collections are present
    ///
    /// Precondition probe run before any processing; a missing collection
    /// is fatal for the whole run.
    pub fn verify_collections(grid_path: &Path) -> Result<()> {
        for level in GridLevel::ALL {
            let path = Self::collection_path(grid_path, level);
            if !path.is_file() {
                return Err(Error::collection_missing(
                    level.collection_name(),
                    grid_path.display().to_string(),
                ));
            }
        }
        debug!(
            "All reference grid collections present under {}",
            grid_path.display()
        );
        Ok(())
    }

    /// Load the four reference collections into an indexed registry
    pub fn load(grid_path: &Path) -> Result<(Self, LoadStats)> {
        let start = Instant::now();

        Self::verify_collections(grid_path)?;

        let mut registry = Self::new(grid_path.to_path_buf());
        let mut stats = LoadStats::default();

        for level in GridLevel::ALL {
            let path = Self::collection_path(grid_path, level);
            info!("Loading {} collection: {}", level, path.display());

            let collection = read_collection(&path)?;

            // Carry the reference CRS forward so the output dataset can
            // declare the same coordinate system
            if registry.crs.is_none() {
                if let Some(members) = &collection.foreign_members {
                    if let Some(crs) = members.get("crs") {
                        debug!("Captured CRS from {}", path.display());
                        registry.crs = Some(crs.clone());
                    }
                }
            }

            let mut level_parcels = 0usize;
            for feature in collection.features {
                match parcel_from_feature(feature) {
                    Some(parcel) => {
                        registry.insert_parcel(level, parcel);
                        level_parcels += 1;
                    }
                    None => {
                        stats.features_skipped += 1;
                        warn!(
                            "Skipped a {} feature without a usable descriptor or geometry",
                            level
                        );
                    }
                }
            }

            debug!("Indexed {} {} parcels", level_parcels, level);
            stats.parcels_loaded += level_parcels;
            stats.collections_loaded += 1;
        }

        stats.load_duration = start.elapsed();
        info!(
            "Grid registry loaded: {} parcels from {} collections in {:.2}s",
            stats.parcels_loaded,
            stats.collections_loaded,
            stats.load_duration.as_secs_f64()
        );

        Ok((registry, stats))
    }
}

/// Read and parse one GeoJSON feature collection
fn read_collection(path: &Path) -> Result<FeatureCollection> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::io(
            format!("Failed to read collection {}", path.display()),
            e,
        )
    })?;

    let geojson: GeoJson = content.parse().map_err(|e| {
        Error::geojson_parsing(
            path.display().to_string(),
            "Failed to parse GeoJSON",
            Some(e),
        )
    })?;

    FeatureCollection::try_from(geojson).map_err(|e| {
        Error::geojson_parsing(
            path.display().to_string(),
            "Collection is not a FeatureCollection",
            Some(e),
        )
    })
}

/// Convert one GeoJSON feature into a grid parcel
///
/// Returns `None` when the feature has no string descriptor or its
/// geometry cannot be converted. A missing area-code property is treated
/// as an empty string, i.e. a base parcel.
fn parcel_from_feature(feature: geojson::Feature) -> Option<GridParcel> {
    let properties = feature.properties?;

    let descriptor = match properties.get(DESCRIPTOR_FIELD) {
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => return None,
    };

    let area_code = match properties.get(AREA_CODE_FIELD) {
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => String::new(),
    };

    let geometry = feature.geometry?;
    let geometry = geo::Geometry::<f64>::try_from(&geometry).ok()?;

    Some(GridParcel {
        descriptor,
        area_code,
        geometry,
    })
}
