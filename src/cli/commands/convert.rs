//! Convert command implementation for the ATS converter CLI
//!
//! This module contains the complete conversion workflow: configuration
//! loading, precondition checks, batch resolution with progress
//! reporting, and point dataset output.

use std::time::Instant;

use colored::Colorize;
use tracing::{debug, info, warn};

use super::shared::{
    ConversionStats, create_progress_bar, load_configuration, read_input_rows, setup_logging,
};
use crate::app::services::ats_parser::validator;
use crate::app::services::coordinate_batch::CoordinateBatch;
use crate::app::services::grid_registry::GridRegistry;
use crate::app::services::point_writer::PointDatasetWriter;
use crate::cli::args::ConvertArgs;
use crate::{Error, Result};

/// Convert command runner
///
/// Orchestrates the conversion workflow:
/// 1. Set up logging and configuration
/// 2. Read the input table and check all preconditions
/// 3. Load the reference grid and resolve every coordinate
/// 4. Write the output dataset and report a summary
pub fn run_convert(args: ConvertArgs) -> Result<ConversionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), !args.quiet)?;

    info!("Starting ATS conversion");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;

    // validate() has already checked these are present
    let grid_path = config
        .processing
        .grid_path
        .clone()
        .ok_or_else(|| Error::configuration("No reference grid directory configured"))?;
    let input_path = config
        .processing
        .input_path
        .clone()
        .ok_or_else(|| Error::configuration("No input table configured"))?;
    let output_path = config
        .processing
        .output_path
        .clone()
        .ok_or_else(|| Error::configuration("No output path configured"))?;
    let coordinate_column = config.processing.coordinate_column.clone();
    let title_column = config.processing.title_column.clone();

    info!("Reference grid     : {}", grid_path.display());
    info!("Input coordinates  : {}", input_path.display());
    info!("Output coordinates : {}", output_path.display());

    // Read the full input table before anything else; row order is
    // preserved through to the output
    let rows = read_input_rows(&input_path, &coordinate_column, title_column.as_deref())?;
    if rows.is_empty() {
        return Err(Error::input_format(format!(
            "Input table '{}' contains no rows",
            input_path.display()
        )));
    }

    // All preconditions are checked before any derived state is built;
    // each failure aborts without writing anything.
    let coordinates: Vec<&str> = rows.iter().map(|row| row.coordinate.as_str()).collect();
    if !validator::looks_valid(&coordinates) {
        return Err(Error::input_format(format!(
            "No coordinates in column '{}' are of a valid ATS format; an incorrect field \
             may have been selected, or there are no ATS coordinates in the column",
            coordinate_column
        )));
    }

    GridRegistry::verify_collections(&grid_path)?;

    if output_path.exists() {
        return Err(Error::output_exists(output_path.display().to_string()));
    }

    if args.dry_run {
        info!(
            "Dry run: {} rows would be converted into {}",
            rows.len(),
            output_path.display()
        );
        return Ok(ConversionStats {
            rows_read: rows.len(),
            processing_time: start_time.elapsed(),
            ..Default::default()
        });
    }

    // Load the reference grid
    let (registry, load_stats) = GridRegistry::load(&grid_path)?;
    info!(
        "Grid registry loaded: {} parcels in {:.2}s",
        load_stats.parcels_loaded,
        load_stats.load_duration.as_secs_f64()
    );
    if registry.crs().is_none() {
        warn!("Reference collections declare no CRS; the output will not carry one");
    }

    // Phase 1: resolve all centroids, in input order
    let mut batch = CoordinateBatch::from_rows(rows);
    let progress = args
        .show_progress()
        .then(|| create_progress_bar(batch.len() as u64, "Converting to Lat/Lon"));

    let resolution = batch.resolve_all(&registry, |current, total| {
        if let Some(pb) = &progress {
            pb.set_message(format!("Converting {} / {}...", current, total));
            pb.set_position(current as u64);
        }
    });

    if let Some(pb) = &progress {
        pb.finish_with_message("Centroids resolved");
    }

    // Phase 2: stream the results to the output dataset, in input order
    let with_title = title_column.is_some();
    let mut writer = PointDatasetWriter::create(&output_path, registry.crs().cloned(), with_title)?;

    let progress = args
        .show_progress()
        .then(|| create_progress_bar(batch.len() as u64, "Creating point dataset"));

    let write_stats = batch.write_output(&mut writer, |current, total| {
        if let Some(pb) = &progress {
            pb.set_message(format!("Writing {} / {}...", current, total));
            pb.set_position(current as u64);
        }
    });

    if let Some(pb) = &progress {
        pb.finish_with_message("Point dataset written");
    }

    let report = writer.finish()?;

    let stats = ConversionStats {
        rows_read: batch.len(),
        rows_resolved: resolution.resolved,
        rows_unresolved: resolution.unresolved,
        records_written: write_stats.records_written,
        write_failures: write_stats.write_failures,
        parcels_loaded: load_stats.parcels_loaded,
        processing_time: start_time.elapsed(),
    };

    if !args.quiet {
        print_final_report(&stats, &report.path.display().to_string());
    }

    Ok(stats)
}

/// Print the colorized end-of-run summary
fn print_final_report(stats: &ConversionStats, output: &str) {
    println!();
    println!("{}", "Conversion complete".green().bold());
    println!("  Rows read        : {}", stats.rows_read);
    println!(
        "  Resolved         : {} ({:.1}%)",
        stats.rows_resolved,
        stats.resolution_rate()
    );
    if stats.rows_unresolved > 0 {
        println!(
            "  Unresolved       : {}",
            stats.rows_unresolved.to_string().yellow()
        );
    }
    println!("  Records written  : {}", stats.records_written);
    if stats.write_failures > 0 {
        println!(
            "  Write failures   : {}",
            stats.write_failures.to_string().red()
        );
    }
    println!(
        "  Elapsed          : {:.2}s",
        stats.processing_time.as_secs_f64()
    );
    println!("  Output           : {}", output);
}
