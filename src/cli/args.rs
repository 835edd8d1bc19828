//! Command-line argument definitions for the ATS converter
//!
//! This module defines the complete CLI interface using the clap derive
//! API.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{Error, Result};

/// CLI arguments for the ATS coordinate converter
///
/// Converts Alberta Township System land-survey coordinates into
/// geographic latitude/longitude points using the AltaLIS V4-1 reference
/// grid.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ats-converter",
    version,
    about = "Convert ATS land-survey coordinates to geographic points",
    long_about = "Converts Alberta Township System (ATS) coordinates such as \
                  'TWP-110 RGE-10 MER-4' into latitude/longitude points by looking up \
                  the centroid of the matching parcel polygon in the AltaLIS V4-1 \
                  reference grid. Reads a CSV table, writes a GeoJSON point dataset."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the ATS converter
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert a table of ATS coordinates to a point dataset (main command)
    Convert(ConvertArgs),
    /// Report on the reference grid collections
    Grids(GridsArgs),
}

/// Arguments for the convert command (main conversion pipeline)
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Directory holding the AltaLIS V4-1 reference grid collections
    ///
    /// Must contain V4-1_TWP, V4-1_SEC, V4-1_QTR and V4-1_LSD as GeoJSON
    /// feature collections.
    #[arg(
        short = 'g',
        long = "grid",
        value_name = "PATH",
        help = "Directory holding the AltaLIS V4-1 reference grid collections"
    )]
    pub grid_path: Option<PathBuf>,

    /// Input CSV table with ATS coordinates
    ///
    /// Must have a header row naming the coordinate column (and the title
    /// column when one is used).
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input CSV table with ATS coordinates"
    )]
    pub input_path: Option<PathBuf>,

    /// Output path for the generated point dataset
    ///
    /// Must not already exist; a pre-existing dataset at this location is
    /// a fatal precondition failure.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output path for the generated point dataset"
    )]
    pub output_path: Option<PathBuf>,

    /// Name of the input column holding ATS coordinates
    #[arg(
        long = "coordinate-column",
        value_name = "NAME",
        help = "Name of the input column holding ATS coordinates"
    )]
    pub coordinate_column: Option<String>,

    /// Name of the input column holding row titles
    ///
    /// When given, a TITLE field is added to the output schema.
    #[arg(
        long = "title-column",
        value_name = "NAME",
        help = "Name of the input column holding row titles"
    )]
    pub title_column: Option<String>,

    /// Perform a dry run without writing anything
    ///
    /// Runs all preconditions and reports what would be converted.
    #[arg(long = "dry-run", help = "Check preconditions without writing output")]
    pub dry_run: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ats-converter/config.toml under the user config directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and disables the
    /// progress bar.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the grids command (reference grid report)
#[derive(Debug, Clone, Parser)]
pub struct GridsArgs {
    /// Directory holding the AltaLIS V4-1 reference grid collections
    #[arg(
        short = 'g',
        long = "grid",
        value_name = "PATH",
        help = "Directory holding the AltaLIS V4-1 reference grid collections"
    )]
    pub grid_path: PathBuf,

    /// Output format for the grid report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the grid report"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ConvertArgs {
    /// Validate the convert command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(grid_path) = &self.grid_path {
            if !grid_path.exists() {
                return Err(Error::configuration(format!(
                    "Grid directory does not exist: {}",
                    grid_path.display()
                )));
            }
            if !grid_path.is_dir() {
                return Err(Error::configuration(format!(
                    "Grid path is not a directory: {}",
                    grid_path.display()
                )));
            }
        }

        if let Some(input_path) = &self.input_path {
            if !input_path.is_file() {
                return Err(Error::configuration(format!(
                    "Input table does not exist: {}",
                    input_path.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(column) = &self.coordinate_column {
            if column.trim().is_empty() {
                return Err(Error::configuration(
                    "Coordinate column name cannot be empty",
                ));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl GridsArgs {
    /// Validate the grids command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.grid_path.is_dir() {
            return Err(Error::configuration(format!(
                "Grid path is not a directory: {}",
                self.grid_path.display()
            )));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            grid_path: None,
            input_path: None,
            output_path: None,
            coordinate_column: None,
            title_column: None,
            dry_run: false,
            config_file: None,
            verbose: 0,
            quiet: false,
        }
    }
}
