//! # sas-validation — Ticket Validation Numbers
//!
//! Computes the secure-enhanced validation number a gaming machine prints
//! on a cashout ticket. The number is a pure function of the validation
//! sequence and validation id the host assigns to the machine; this crate
//! only reads those counters and never mutates registry state.
//!
//! The checksum from `sas-core` is reused here as a byte-mixing step.

#![forbid(unsafe_code)]

pub mod secure_enhanced;

pub use secure_enhanced::{
    assemble_digits, ValidationNumber, DIGIT_COUNT, VALIDATION_NUMBER_LEN,
};
