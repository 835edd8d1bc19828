//! ATS Converter Library
//!
//! A Rust library for converting Alberta Township System (ATS) land-survey
//! coordinates into geographic latitude/longitude points using the AltaLIS
//! V4-1 reference land grid.
//!
//! This library provides tools for:
//! - Parsing ATS coordinate strings into their hierarchical survey levels
//! - Batch-validating that an input column plausibly holds ATS coordinates
//! - Loading and indexing the four reference grid collections for O(1) lookups
//! - Resolving coordinates to parcel polygons and extracting their centroids
//! - Writing point datasets with the original identifiers preserved
//! - Comprehensive error handling with per-row degradation

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod ats_parser;
        pub mod coordinate_batch;
        pub mod grid_registry;
        pub mod grid_resolver;
        pub mod point_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Centroid, GridLevel, LevelTag, ParsedCoordinate};
pub use config::Config;

/// Result type alias for the ATS converter
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for ATS conversion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Input table failed the ATS format gate
    #[error("Input format error: {message}")]
    InputFormat { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Grid registry error
    #[error("Grid registry error: {message}")]
    GridRegistry { message: String },

    /// Required reference grid collection is missing
    #[error("Reference grid collection '{collection}' not found under '{path}'")]
    CollectionMissing { collection: String, path: String },

    /// GeoJSON parsing error
    #[error("GeoJSON error in file '{file}': {message}")]
    GeoJsonParsing {
        file: String,
        message: String,
        #[source]
        source: Option<geojson::Error>,
    },

    /// Output dataset already exists at the requested location
    #[error("Output dataset already exists: {path}")]
    OutputExists { path: String },

    /// Point dataset writing error
    #[error("Point writing error: {message}")]
    PointWriting {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an input format error
    pub fn input_format(message: impl Into<String>) -> Self {
        Self::InputFormat {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a grid registry error
    pub fn grid_registry(message: impl Into<String>) -> Self {
        Self::GridRegistry {
            message: message.into(),
        }
    }

    /// Create a missing collection error
    pub fn collection_missing(collection: impl Into<String>, path: impl Into<String>) -> Self {
        Self::CollectionMissing {
            collection: collection.into(),
            path: path.into(),
        }
    }

    /// Create a GeoJSON parsing error with context
    pub fn geojson_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<geojson::Error>,
    ) -> Self {
        Self::GeoJsonParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an output-exists error
    pub fn output_exists(path: impl Into<String>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create a point writing error
    pub fn point_writing(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::PointWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an I/O error with a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message_str = message.into();
        Self::Io {
            message: message_str.clone(),
            source: std::io::Error::other(message_str),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<geojson::Error> for Error {
    fn from(error: geojson::Error) -> Self {
        Self::GeoJsonParsing {
            file: "unknown".to_string(),
            message: "GeoJSON parsing failed".to_string(),
            source: Some(error),
        }
    }
}
