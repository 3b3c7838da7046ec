//! # sas-core — Foundational Primitives for the SAS Accounting Core
//!
//! This crate is the leaf of the workspace. It holds the pure functions and
//! small types every other crate builds on:
//!
//! - [`bcd`] — packed-decimal codec for meter wire values.
//! - [`checksum`] — the 16-bit nibble-wise checksum used for frame integrity
//!   and inside the validation-number algorithm.
//! - [`identity`] — `MeterCode` and the 24-bit `Counter24`.
//! - [`error`] — the shared `SasError` taxonomy.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sas-*` crates.
//! - No `unsafe` code.
//! - No I/O, no global mutable state. Every function is deterministic.
//! - No `panic!()` or `.unwrap()` outside tests.

#![forbid(unsafe_code)]

pub mod bcd;
pub mod checksum;
pub mod error;
pub mod identity;

// Re-export primary types for ergonomic imports.
pub use checksum::{checksum, crc16, seal_frame, verify_frame};
pub use error::{SasError, SasResult};
pub use identity::{Counter24, MeterCode};

/// SAS protocol revision implemented by this workspace (6.02).
pub const SAS_VERSION: u16 = 602;
