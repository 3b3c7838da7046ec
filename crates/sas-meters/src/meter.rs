//! # Meter — Monotonic Accounting Counter
//!
//! A `Meter` stores a value that can only move forward, plus the byte width
//! used to serialize it in answer to a meter poll.
//!
//! ## Invariant
//!
//! The stored value never decreases except through [`Meter::clear`]. A
//! `set` at or below the current value and a non-positive `increment` are
//! dropped and reported as [`MeterUpdate::Ignored`]. Neither is an error.

use serde::Serialize;

use sas_core::{bcd, MeterCode, SasError, SasResult};

/// Maximum meter name length, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Widest serialization width, in bytes. A `u64` has at most 20 decimal digits.
pub const MAX_WIDTH: usize = 10;

/// Outcome of a meter mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterUpdate {
    /// The stored value changed.
    Applied,
    /// The mutation would not have advanced the meter and was dropped.
    Ignored,
}

impl MeterUpdate {
    /// Returns true if the mutation changed the meter.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// A named, monotonically non-decreasing counter with a fixed wire width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meter {
    code: MeterCode,
    size: usize,
    name: String,
    description: String,
    value: u64,
}

impl Meter {
    /// Create a zeroed meter with an empty name and description.
    pub fn new(code: MeterCode, size: usize) -> Self {
        Self {
            code,
            size,
            name: String::new(),
            description: String::new(),
            value: 0,
        }
    }

    /// Protocol meter code.
    pub fn code(&self) -> MeterCode {
        self.code
    }

    /// Serialization width in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Maximum number of decimal digits the meter can serialize.
    pub fn digits(&self) -> usize {
        self.size.saturating_mul(2)
    }

    /// Short identifier, at most [`MAX_NAME_LEN`] characters.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the name, truncating to [`MAX_NAME_LEN`] characters.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.chars().take(MAX_NAME_LEN).collect();
    }

    /// Free-text label.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Current counter value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Add `delta` if it is strictly positive.
    ///
    /// Saturates at `u64::MAX`; the overflow surfaces later from
    /// [`Meter::serialize`].
    pub fn increment(&mut self, delta: i64) -> MeterUpdate {
        match u64::try_from(delta) {
            Ok(d) if d > 0 => {
                self.value = self.value.saturating_add(d);
                MeterUpdate::Applied
            }
            _ => {
                tracing::trace!(meter = %self.name, delta, "non-positive increment ignored");
                MeterUpdate::Ignored
            }
        }
    }

    /// Move the meter to `value` if that is strictly greater than the current value.
    pub fn set(&mut self, value: u64) -> MeterUpdate {
        if value > self.value {
            self.value = value;
            MeterUpdate::Applied
        } else {
            tracing::trace!(
                meter = %self.name,
                current = self.value,
                requested = value,
                "non-advancing set ignored"
            );
            MeterUpdate::Ignored
        }
    }

    /// Reset the meter to zero. The only way a meter value goes down.
    pub fn clear(&mut self) {
        self.value = 0;
    }

    /// Packed-decimal wire bytes, exactly `size` long.
    ///
    /// # Errors
    ///
    /// - `SasError::InvalidArgument` if `size` exceeds [`MAX_WIDTH`].
    /// - `SasError::Overflow` if the value has more than `size * 2` decimal
    ///   digits. Zero has no significant digits, so a zero-width meter
    ///   serializes to an empty vector while it reads zero.
    pub fn serialize(&self) -> SasResult<Vec<u8>> {
        if self.size > MAX_WIDTH {
            return Err(SasError::InvalidArgument(format!(
                "meter {} width {} exceeds {MAX_WIDTH} bytes",
                self.name, self.size
            )));
        }
        let digits = match self.value {
            0 => 0,
            v => v.to_string().len(),
        };
        if digits > self.digits() {
            return Err(SasError::Overflow {
                name: self.name.clone(),
                value: self.value,
                digits: self.digits(),
            });
        }
        bcd::encode(self.value, self.size)
    }
}

impl std::fmt::Display for Meter {
    /// The value left-zero-padded to `size * 2` digits.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.digits())
    }
}

impl From<&Meter> for u64 {
    fn from(m: &Meter) -> Self {
        m.value
    }
}

impl From<&Meter> for f64 {
    fn from(m: &Meter) -> Self {
        m.value as f64
    }
}
