//! # Validation Subcommand
//!
//! Assigns the validation sequence and id to a registry, as the host would,
//! and prints the resulting secure-enhanced validation number.

use anyhow::{Context, Result};
use clap::Args;

use sas_meters::MeterRegistry;
use sas_validation::ValidationNumber;

/// Arguments for the validation subcommand.
#[derive(Args, Debug)]
pub struct ValidationArgs {
    /// Validation sequence number (24 bits).
    #[arg(long)]
    pub sequence: u32,

    /// Validation id (24 bits).
    #[arg(long)]
    pub id: u32,
}

/// Execute the validation subcommand.
pub fn run_validation(args: &ValidationArgs, registry: &mut MeterRegistry) -> Result<u8> {
    let number = compute(args, registry)?;
    println!("{number}");
    Ok(0)
}

fn compute(args: &ValidationArgs, registry: &mut MeterRegistry) -> Result<ValidationNumber> {
    registry
        .set_validation_sequence(args.sequence)
        .context("invalid validation sequence")?;
    registry
        .set_validation_id(args.id)
        .context("invalid validation id")?;
    let number = ValidationNumber::from_registry(registry)
        .context("failed to generate validation number")?;
    tracing::info!(
        sequence = args.sequence,
        id = args.id,
        validation_number = %number,
        "validation number generated"
    );
    Ok(number)
}
