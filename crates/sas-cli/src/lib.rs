//! # sas-cli — Command-Line Front End for the SAS Accounting Core
//!
//! Provides the `sas` binary. Every subcommand is a thin wrapper over the
//! library crates; nothing here talks to a host link.
//!
//! ## Subcommands
//!
//! - `sas meters` — list catalog meters and their wire encoding.
//! - `sas checksum` — compute or verify a frame checksum.
//! - `sas bcd` — packed-decimal encode/decode.
//! - `sas validation` — compute a secure-enhanced validation number.
//!
//! ```bash
//! sas meters --catalog meters.yaml --json
//! sas checksum 011f
//! sas bcd encode 1234 --width 4
//! sas validation --sequence 1 --id 1
//! ```

pub mod bcd;
pub mod checksum;
pub mod meters;
pub mod validation;

use std::path::Path;

use anyhow::{Context, Result};

use sas_meters::{MeterCatalog, MeterRegistry};

/// Build a registry from `catalog`, or from the built-in SAS 6.02 catalog
/// when no path is given.
pub fn load_registry(catalog: Option<&Path>) -> Result<MeterRegistry> {
    match catalog {
        Some(path) => MeterRegistry::from_catalog_file(path)
            .with_context(|| format!("failed to load meter catalog {}", path.display())),
        None => {
            tracing::debug!("no catalog given; using the SAS 6.02 catalog");
            MeterRegistry::build(&MeterCatalog::sas_602())
                .context("built-in catalog is invalid")
        }
    }
}

/// Parse an unsigned integer in decimal or `0x`-prefixed hex.
pub fn parse_u16(s: &str) -> std::result::Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid 16-bit value {s:?}: {e}"))
}
