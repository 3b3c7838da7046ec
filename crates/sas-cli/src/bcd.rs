//! # BCD Subcommand
//!
//! Packed-decimal conversions. `encode` and `decode` are deliberately not
//! inverses; see `sas_core::bcd`.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use sas_core::bcd;

/// Arguments for the bcd subcommand.
#[derive(Args, Debug)]
pub struct BcdArgs {
    #[command(subcommand)]
    pub command: BcdCommand,
}

/// Packed-decimal operations.
#[derive(Subcommand, Debug)]
pub enum BcdCommand {
    /// Pack the decimal digits of a value into a fixed-width field.
    Encode {
        /// Non-negative integer to pack.
        value: u64,

        /// Field width in bytes.
        #[arg(long, default_value_t = 4)]
        width: usize,
    },

    /// Read hex bytes back as a base-16 integer.
    Decode {
        /// Bytes as hex (e.g. `00001234`).
        data: String,
    },
}

/// Execute the bcd subcommand.
pub fn run_bcd(args: &BcdArgs) -> Result<u8> {
    match &args.command {
        BcdCommand::Encode { value, width } => {
            let bytes = bcd::encode(*value, *width)
                .with_context(|| format!("cannot pack {value} into {width} bytes"))?;
            println!("{}", bcd::to_hex(&bytes));
        }
        BcdCommand::Decode { data } => {
            let bytes = bcd::from_hex(data).context("input is not valid hex")?;
            let value = bcd::decode(&bytes).context("cannot decode input")?;
            println!("{value}");
        }
    }
    Ok(0)
}
