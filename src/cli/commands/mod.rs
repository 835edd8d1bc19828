//! Command implementations for the ATS converter CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and error handling for the CLI interface. Each command is
//! implemented in its own module.

pub mod convert;
pub mod grids;
pub mod shared;

// Re-export the main types and functions for convenience
pub use shared::ConversionStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the ATS converter
///
/// Dispatches to the appropriate subcommand handler based on CLI args:
/// - `convert`: the conversion pipeline with point dataset output
/// - `grids`: reference grid inspection and reporting
pub fn run(args: Args) -> Result<ConversionStats> {
    match args.get_command() {
        Commands::Convert(convert_args) => convert::run_convert(convert_args),
        Commands::Grids(grids_args) => grids::run_grids(grids_args),
    }
}
