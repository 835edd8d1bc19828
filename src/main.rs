use std::process;

use ats_converter::cli::{args::Args, commands};
use clap::Parser;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("ATS Converter - Alberta Township System Coordinate Converter");
    println!("============================================================");
    println!();
    println!("Convert ATS land-survey coordinates (e.g. 'TWP-110 RGE-10 MER-4') into");
    println!("geographic latitude/longitude points using the AltaLIS V4-1 reference grid.");
    println!();
    println!("USAGE:");
    println!("    ats-converter <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert a table of ATS coordinates to a point dataset");
    println!("    grids       Report on the reference grid collections");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert a CSV of coordinates:");
    println!("    ats-converter convert --grid /data/altalis --input wells.csv \\");
    println!("                          --output wells.geojson --title-column WELL_NAME");
    println!();
    println!("    # Inspect a reference grid directory:");
    println!("    ats-converter grids --grid /data/altalis --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ats-converter <COMMAND> --help");
}
