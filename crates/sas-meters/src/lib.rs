//! # sas-meters — Accounting Meters and the Meter Registry
//!
//! Meters are the audit counters a gaming machine reports to its host:
//! cumulative coin in, coin out, and so on. This crate holds:
//!
//! - [`meter`] — the monotonic `Meter` and its packed-decimal serialization.
//! - [`catalog`] — `MeterCatalog`, the configuration a registry is built from.
//! - [`registry`] — `MeterRegistry`, the per-session keyed set of meters plus
//!   the validation id and sequence counters.
//!
//! ## Crate Policy
//!
//! - Meter mutations never fail. A mutation that would move a meter
//!   backwards is dropped and reported as `MeterUpdate::Ignored`.
//! - No global catalog and no global registry.
//! - No `unsafe` code; no `.unwrap()` outside tests.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod meter;
pub mod registry;

pub use catalog::{CatalogEntry, MeterCatalog};
pub use error::{CatalogError, CatalogResult};
pub use meter::{Meter, MeterUpdate, MAX_NAME_LEN, MAX_WIDTH};
pub use registry::MeterRegistry;
