//! # Checksum Subcommand
//!
//! Computes the 16-bit frame checksum of a hex payload, or verifies a
//! sealed frame whose last two bytes are the checksum.

use anyhow::{Context, Result};
use clap::Args;

use sas_core::{bcd, checksum, seal_frame, verify_frame};

/// Arguments for the checksum subcommand.
#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Payload bytes as hex (e.g. `011f`).
    pub data: String,

    /// Initial accumulator value, decimal or 0x-prefixed hex.
    #[arg(long, default_value = "0", value_parser = crate::parse_u16)]
    pub seed: u16,

    /// Treat the input as a sealed frame and verify its trailer.
    #[arg(long, conflicts_with = "seed")]
    pub verify: bool,
}

/// Execute the checksum subcommand.
pub fn run_checksum(args: &ChecksumArgs) -> Result<u8> {
    let data = bcd::from_hex(&args.data).context("payload is not valid hex")?;

    if args.verify {
        let payload = verify_frame(&data).context("frame failed verification")?;
        println!("OK: frame verified, payload {}", bcd::to_hex(payload));
        return Ok(0);
    }

    let sum = checksum(&data, args.seed);
    println!("checksum: {}", bcd::to_hex(&sum));
    if args.seed == 0 {
        println!("frame:    {}", bcd::to_hex(&seal_frame(&data)));
    }
    Ok(0)
}
