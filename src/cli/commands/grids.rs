//! Grids command implementation for the ATS converter CLI
//!
//! This module reports on the reference grid collections: parcel counts
//! per level, load time, and whether a CRS is declared. Useful for
//! checking that a grid directory is complete before a long conversion.

use std::time::Instant;

use colored::Colorize;
use tracing::{debug, info};

use super::shared::{ConversionStats, setup_logging};
use crate::app::services::grid_registry::GridRegistry;
use crate::cli::args::{GridsArgs, OutputFormat};
use crate::Result;

/// Grids command runner
pub fn run_grids(args: GridsArgs) -> Result<ConversionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), true)?;

    info!("Starting reference grid report");
    debug!("Grids arguments: {:?}", args);

    args.validate()?;

    GridRegistry::verify_collections(&args.grid_path)?;
    let (registry, load_stats) = GridRegistry::load(&args.grid_path)?;
    let metadata = registry.metadata();

    match args.output_format {
        OutputFormat::Human => {
            println!();
            println!("{}", "Reference grid report".green().bold());
            println!("  Grid directory : {}", metadata.grid_path.display());
            for (level, count) in &metadata.parcel_counts {
                println!("  {:<15}: {} parcels", level.collection_name(), count);
            }
            println!("  Total parcels  : {}", metadata.total_parcels);
            println!(
                "  CRS declared   : {}",
                if metadata.has_crs { "yes" } else { "no" }
            );
            println!(
                "  Load time      : {:.2}s",
                load_stats.load_duration.as_secs_f64()
            );
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "grid_path": metadata.grid_path.display().to_string(),
                "collections": metadata
                    .parcel_counts
                    .iter()
                    .map(|(level, count)| {
                        serde_json::json!({
                            "collection": level.collection_name(),
                            "level": level.to_string(),
                            "parcels": count,
                        })
                    })
                    .collect::<Vec<_>>(),
                "total_parcels": metadata.total_parcels,
                "has_crs": metadata.has_crs,
                "load_seconds": load_stats.load_duration.as_secs_f64(),
            });
            println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
        }
    }

    Ok(ConversionStats {
        parcels_loaded: load_stats.parcels_loaded,
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}
