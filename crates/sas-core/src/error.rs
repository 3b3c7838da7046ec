//! # Error Types — SAS Accounting Errors
//!
//! Defines the error taxonomy shared by every crate in the workspace. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Every error is local and synchronous. Nothing here is retried.
//! - Rejected meter mutations (a `set` below the current value, a
//!   non-positive `increment`) are NOT errors. They are reported through
//!   `MeterUpdate::Ignored` in `sas-meters`.
//! - `Overflow` is raised when a meter is serialized, never when it is
//!   incremented.

use thiserror::Error;

/// Top-level error type for the SAS accounting core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SasError {
    /// Out-of-domain input to the codec, frame helpers, or counter setters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A meter value no longer fits its declared serialization width.
    #[error("meter {name} value {value} exceeds {digits} decimal digits")]
    Overflow {
        /// Name of the overflowing meter.
        name: String,
        /// The value that could not be serialized.
        value: u64,
        /// Maximum digit count for the meter's width (`size * 2`).
        digits: usize,
    },

    /// Two catalog entries collide on name or code.
    #[error("duplicate meter: {0}")]
    DuplicateMeter(String),

    /// A validation-number check digit left the decimal range.
    #[error("validation digit at position {position} is {value}, outside 0..=9")]
    ChecksumDigitOverflow {
        /// Index within the 16-digit body (excluding the `00` prefix).
        position: usize,
        /// The out-of-range digit value.
        value: u8,
    },

    /// A sealed frame's trailing checksum does not match its payload.
    #[error("frame checksum mismatch: expected {expected:#06x}, found {actual:#06x}")]
    ChecksumMismatch {
        /// Checksum recomputed over the payload.
        expected: u16,
        /// Checksum carried in the frame trailer.
        actual: u16,
    },
}

/// Convenience alias used across the workspace.
pub type SasResult<T> = Result<T, SasError>;
