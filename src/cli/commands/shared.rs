//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::app::models::InputRow;
use crate::cli::args::ConvertArgs;
use crate::config::Config;
use crate::{Error, Result};

/// Conversion statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Number of input rows read
    pub rows_read: usize,
    /// Number of coordinates resolved to a centroid
    pub rows_resolved: usize,
    /// Number of coordinates left unresolved
    pub rows_unresolved: usize,
    /// Number of records written to the output dataset
    pub records_written: usize,
    /// Number of records that failed to write
    pub write_failures: usize,
    /// Number of reference parcels loaded
    pub parcels_loaded: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

impl ConversionStats {
    /// Fraction of rows that resolved, as a percentage
    pub fn resolution_rate(&self) -> f64 {
        if self.rows_read == 0 {
            return 0.0;
        }
        self.rows_resolved as f64 / self.rows_read as f64 * 100.0
    }
}

/// Set up structured logging to stderr
///
/// The filter defaults to this crate at the requested level and can be
/// overridden through the standard environment variable.
pub fn setup_logging(log_level: &str, structured: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ats_converter={}", log_level)));

    if structured {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
pub fn load_configuration(args: &ConvertArgs) -> Result<Config> {
    info!("Loading configuration");

    let mut config = Config::load_layered(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &ConvertArgs) {
    if let Some(grid_path) = &args.grid_path {
        config.processing.grid_path = Some(grid_path.clone());
    }
    if let Some(input_path) = &args.input_path {
        config.processing.input_path = Some(input_path.clone());
    }
    if let Some(output_path) = &args.output_path {
        config.processing.output_path = Some(output_path.clone());
    }
    if let Some(coordinate_column) = &args.coordinate_column {
        config.processing.coordinate_column = coordinate_column.clone();
    }
    if let Some(title_column) = &args.title_column {
        config.processing.title_column = Some(title_column.clone());
    }

    config.logging.level = args.get_log_level().to_string();
    config.logging.structured = !args.quiet;
}

/// Read the input table fully into memory, in row order
///
/// The title column is optional; the coordinate column is required and
/// its absence is a configuration error reported before any processing.
pub fn read_input_rows(
    path: &Path,
    coordinate_column: &str,
    title_column: Option<&str>,
) -> Result<Vec<InputRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            Error::csv_parsing(
                path.display().to_string(),
                "Failed to open input table",
                Some(e),
            )
        })?;

    let headers = reader
        .headers()
        .map_err(|e| {
            Error::csv_parsing(
                path.display().to_string(),
                "Failed to read header row",
                Some(e),
            )
        })?
        .clone();

    let coordinate_idx = headers
        .iter()
        .position(|header| header == coordinate_column)
        .ok_or_else(|| {
            Error::configuration(format!(
                "Input table has no column named '{}'",
                coordinate_column
            ))
        })?;

    let title_idx = match title_column {
        Some(name) => Some(headers.iter().position(|header| header == name).ok_or_else(
            || Error::configuration(format!("Input table has no column named '{}'", name)),
        )?),
        None => None,
    };

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            Error::csv_parsing(
                path.display().to_string(),
                format!("Failed to read record {}", i + 1),
                Some(e),
            )
        })?;

        rows.push(InputRow {
            title: title_idx.map(|idx| record.get(idx).unwrap_or("").to_string()),
            coordinate: record.get(coordinate_idx).unwrap_or("").to_string(),
        });
    }

    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Create a styled progress bar for batch operations
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_conversion_stats_resolution_rate() {
        let stats = ConversionStats::default();
        assert_eq!(stats.resolution_rate(), 0.0);

        let stats = ConversionStats {
            rows_read: 4,
            rows_resolved: 3,
            ..Default::default()
        };
        assert!((stats.resolution_rate() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_cli_overrides() {
        let mut config = Config::default();
        let args = ConvertArgs {
            grid_path: Some("/grid".into()),
            input_path: Some("/input.csv".into()),
            output_path: Some("/out.geojson".into()),
            coordinate_column: Some("LOCATION".to_string()),
            title_column: Some("NAME".to_string()),
            verbose: 1,
            ..Default::default()
        };

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.processing.grid_path, Some("/grid".into()));
        assert_eq!(config.processing.coordinate_column, "LOCATION");
        assert_eq!(config.processing.title_column, Some("NAME".to_string()));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_read_input_rows_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("input.csv");
        std::fs::write(
            &path,
            "TITLE,ATS\nfirst,TWP-110 RGE-10 MER-4\nsecond,garbage\n",
        )
        .unwrap();

        let rows = read_input_rows(&path, "ATS", Some("TITLE")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].coordinate, "TWP-110 RGE-10 MER-4");
        assert_eq!(rows[0].title.as_deref(), Some("first"));
        assert_eq!(rows[1].coordinate, "garbage");
        assert_eq!(rows[1].title.as_deref(), Some("second"));
    }

    #[test]
    fn test_read_input_rows_without_title_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("input.csv");
        std::fs::write(&path, "ATS\nTWP-110 RGE-10 MER-4\n").unwrap();

        let rows = read_input_rows(&path, "ATS", None).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].title.is_none());
    }

    #[test]
    fn test_read_input_rows_missing_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("input.csv");
        std::fs::write(&path, "A,B\n1,2\n").unwrap();

        assert!(read_input_rows(&path, "ATS", None).is_err());
        assert!(read_input_rows(&path, "A", Some("TITLE")).is_err());
    }
}
