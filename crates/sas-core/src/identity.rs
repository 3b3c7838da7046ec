//! # Protocol Identifier Newtypes
//!
//! Newtype wrappers for the small integers SAS passes around. These keep a
//! meter code from being confused with a validation counter, and carry the
//! 24-bit bound of the validation counters in the type.

use serde::{Deserialize, Serialize};

use crate::error::{SasError, SasResult};

/// Protocol-defined meter code (one byte on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeterCode(pub u8);

impl MeterCode {
    /// Access the raw code.
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for MeterCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// A validation counter bounded to 24 bits (three bytes on the wire).
///
/// The only fallible constructor is [`Counter24::new`]; the inner value is
/// private so an out-of-range counter cannot be built.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Counter24(u32);

impl Counter24 {
    /// Largest representable counter value, `2^24 - 1`.
    pub const MAX: u32 = 0x00ff_ffff;

    /// The zero counter.
    pub const ZERO: Counter24 = Counter24(0);

    /// Construct a counter, rejecting values of 2^24 or more.
    ///
    /// # Errors
    ///
    /// Returns `SasError::InvalidArgument` if `value > Counter24::MAX`.
    pub fn new(value: u32) -> SasResult<Self> {
        if value > Self::MAX {
            return Err(SasError::InvalidArgument(format!(
                "{value} does not fit in 24 bits"
            )));
        }
        Ok(Self(value))
    }

    /// Access the raw value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// The three wire bytes, least significant first.
    pub fn to_le_bytes(&self) -> [u8; 3] {
        let [b0, b1, b2, _] = self.0.to_le_bytes();
        [b0, b1, b2]
    }
}

impl TryFrom<u32> for Counter24 {
    type Error = SasError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Counter24> for u32 {
    fn from(c: Counter24) -> Self {
        c.0
    }
}

impl std::fmt::Display for Counter24 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
