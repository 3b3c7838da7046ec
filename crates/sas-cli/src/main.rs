//! # sas CLI entry point
//!
//! Parses command-line arguments, sets up logging, builds the meter
//! registry from the configured catalog, and dispatches to subcommand
//! handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sas_cli::bcd::{run_bcd, BcdArgs};
use sas_cli::checksum::{run_checksum, ChecksumArgs};
use sas_cli::meters::{run_meters, MetersArgs};
use sas_cli::validation::{run_validation, ValidationArgs};

/// SAS accounting core toolchain.
///
/// Inspects meter catalogs, converts packed-decimal values, computes frame
/// checksums, and generates secure-enhanced ticket validation numbers.
#[derive(Parser, Debug)]
#[command(name = "sas", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Meter catalog file (.yaml, .yml, or .json). Defaults to the SAS 6.02 catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List catalog meters and their wire encoding.
    Meters(MetersArgs),

    /// Compute or verify a frame checksum.
    Checksum(ChecksumArgs),

    /// Packed-decimal encode and decode.
    Bcd(BcdArgs),

    /// Generate a secure-enhanced validation number.
    Validation(ValidationArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = sas_core::SAS_VERSION, "sas CLI starting");

    let result = match cli.command {
        Commands::Meters(args) => sas_cli::load_registry(cli.catalog.as_deref())
            .and_then(|registry| run_meters(&args, &registry)),
        Commands::Checksum(args) => run_checksum(&args),
        Commands::Bcd(args) => run_bcd(&args),
        Commands::Validation(args) => sas_cli::load_registry(cli.catalog.as_deref())
            .and_then(|mut registry| run_validation(&args, &mut registry)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
