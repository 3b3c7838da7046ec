//! # Meters Subcommand
//!
//! Lists the meters a catalog defines, with their zero-value wire encoding.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use sas_core::bcd;
use sas_meters::{Meter, MeterRegistry};

/// Arguments for the meters subcommand.
#[derive(Args, Debug)]
pub struct MetersArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// One row of meter output.
#[derive(Debug, Serialize)]
pub struct MeterReport {
    pub code: u8,
    pub size: usize,
    pub name: String,
    pub description: String,
    pub value: u64,
    /// Packed-decimal wire bytes as lowercase hex.
    pub wire: String,
}

impl MeterReport {
    /// Describe a meter, including its serialized form.
    pub fn from_meter(meter: &Meter) -> Result<Self> {
        let wire = meter
            .serialize()
            .with_context(|| format!("failed to serialize meter {}", meter.name()))?;
        Ok(Self {
            code: meter.code().as_u8(),
            size: meter.size(),
            name: meter.name().to_string(),
            description: meter.description().to_string(),
            value: meter.value(),
            wire: bcd::to_hex(&wire),
        })
    }
}

/// Collect reports for every meter in catalog order.
pub fn reports(registry: &MeterRegistry) -> Result<Vec<MeterReport>> {
    registry.iter().map(MeterReport::from_meter).collect()
}

/// Execute the meters subcommand.
pub fn run_meters(args: &MetersArgs, registry: &MeterRegistry) -> Result<u8> {
    let rows = reports(registry)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(0);
    }

    println!("Meters ({}):", rows.len());
    for row in &rows {
        println!(
            "  {:#06x}  {:>2}B  {:<24} {:>20}  {}  {}",
            row.code, row.size, row.name, row.value, row.wire, row.description
        );
    }
    Ok(0)
}
