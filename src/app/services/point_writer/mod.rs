//! Point dataset writer
//!
//! Writes the output point feature collection. The dataset is created
//! fresh (a pre-existing file at the target path is a fatal precondition
//! failure), records are appended in input order, and the collection is
//! serialized to disk in a single pass when finished.
//!
//! Schema: point geometry + `ATS` (text) + `LAT_DD` / `LON_DD` (float,
//! null when unresolved) + optional `TITLE` (text). Unresolved records
//! carry a degenerate (0, 0) point so every input row is present in the
//! output.

use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde_json::{Map, Number, Value as JsonValue};
use tracing::{debug, info};

use crate::app::models::PointRecord;
use crate::constants::{FIELD_ATS, FIELD_LAT_DD, FIELD_LON_DD, FIELD_TITLE};
use crate::{Error, Result};

/// Report returned after the output dataset has been written
#[derive(Debug, Clone)]
pub struct WriteReport {
    /// Path of the written dataset
    pub path: PathBuf,

    /// Number of features in the dataset
    pub features_written: usize,
}

/// Writer for a newly created point dataset
#[derive(Debug)]
pub struct PointDatasetWriter {
    path: PathBuf,
    features: Vec<Feature>,
    foreign_members: Option<Map<String, JsonValue>>,
    with_title: bool,
}

impl PointDatasetWriter {
    /// Open a writer for a dataset that must not already exist
    ///
    /// `crs` is the coordinate reference system carried over from the
    /// reference grid collections; when present it is embedded in the
    /// output collection. `with_title` controls whether the `TITLE` field
    /// is part of the schema.
    pub fn create(path: &Path, crs: Option<JsonValue>, with_title: bool) -> Result<Self> {
        if path.exists() {
            return Err(Error::output_exists(path.display().to_string()));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("Failed to create output directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let foreign_members = crs.map(|value| {
            let mut members = Map::new();
            members.insert("crs".to_string(), value);
            members
        });

        debug!("Opened point dataset writer for {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            features: Vec::new(),
            foreign_members,
            with_title,
        })
    }

    /// Append one point record
    ///
    /// Unresolved records are written with a (0, 0) point and null
    /// latitude/longitude fields; the original ATS text is always kept.
    /// Fails when a resolved ordinate is not a finite number.
    pub fn append(&mut self, record: &PointRecord) -> Result<()> {
        let (lon, lat) = match record.centroid {
            Some(centroid) => (centroid.lon, centroid.lat),
            None => (0.0, 0.0),
        };

        let mut properties = Map::new();
        properties.insert(
            FIELD_ATS.to_string(),
            JsonValue::String(record.ats.clone()),
        );
        properties.insert(FIELD_LAT_DD.to_string(), ordinate_value(record, lat)?);
        properties.insert(FIELD_LON_DD.to_string(), ordinate_value(record, lon)?);

        if self.with_title {
            let title = match &record.title {
                Some(title) => JsonValue::String(title.clone()),
                None => JsonValue::Null,
            };
            properties.insert(FIELD_TITLE.to_string(), title);
        }

        self.features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![lon, lat]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });

        Ok(())
    }

    /// Number of records appended so far
    pub fn features_pending(&self) -> usize {
        self.features.len()
    }

    /// Serialize the collection to disk and return a write report
    pub fn finish(self) -> Result<WriteReport> {
        let features_written = self.features.len();

        let collection = FeatureCollection {
            bbox: None,
            features: self.features,
            foreign_members: self.foreign_members,
        };

        let content = GeoJson::from(collection).to_string();
        std::fs::write(&self.path, content).map_err(|e| {
            Error::point_writing(
                format!("Failed to write output dataset {}", self.path.display()),
                Some(Box::new(e)),
            )
        })?;

        info!(
            "Wrote {} point features to {}",
            features_written,
            self.path.display()
        );

        Ok(WriteReport {
            path: self.path,
            features_written,
        })
    }
}

/// Float field value for a record: null when unresolved, else a finite number
fn ordinate_value(record: &PointRecord, ordinate: f64) -> Result<JsonValue> {
    if record.centroid.is_none() {
        return Ok(JsonValue::Null);
    }
    Number::from_f64(ordinate)
        .map(JsonValue::Number)
        .ok_or_else(|| {
            Error::point_writing(
                format!(
                    "Record [ {} ] has a non-finite ordinate {}",
                    record.ats, ordinate
                ),
                None,
            )
        })
}
