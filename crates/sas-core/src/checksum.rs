//! # Checksum — 16-bit Nibble-wise Accumulator
//!
//! The checksum SAS appends to every long-poll frame. It is also a mixing
//! step inside the secure-enhanced validation-number algorithm (see
//! `sas-validation`).
//!
//! Each input byte is folded in two nibble steps, low nibble first:
//!
//! ```text
//! q    = (seed ^ nibble) & 0x0f
//! seed = (seed >> 4) ^ (q * 0x1081)
//! ```
//!
//! The result is order-sensitive and seed-sensitive. It is serialized least
//! significant byte first.

use crate::error::{SasError, SasResult};

/// Multiplier applied to each nibble residue.
pub const CHECKSUM_POLY: u16 = 0x1081;

/// Length of the checksum trailer on a sealed frame.
pub const CHECKSUM_LEN: usize = 2;

/// Fold one nibble into the accumulator.
#[inline]
fn step(seed: u16, nibble: u8) -> u16 {
    let q = (seed ^ u16::from(nibble)) & 0x0f;
    (seed >> 4) ^ (q * CHECKSUM_POLY)
}

/// Compute the 16-bit checksum of `data` starting from `seed`.
pub fn crc16(data: &[u8], seed: u16) -> u16 {
    data.iter().fold(seed, |acc, &x| step(step(acc, x), x >> 4))
}

/// Compute the checksum of `data` as two little-endian bytes.
pub fn checksum(data: &[u8], seed: u16) -> [u8; CHECKSUM_LEN] {
    crc16(data, seed).to_le_bytes()
}

/// Append the checksum of `payload` (seed 0) to a copy of it.
pub fn seal_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    frame.extend_from_slice(payload);
    frame.extend_from_slice(&checksum(payload, 0));
    frame
}

/// Verify a sealed frame and return its payload.
///
/// # Errors
///
/// Returns `SasError::InvalidArgument` if the frame cannot hold a trailer,
/// and `SasError::ChecksumMismatch` if the trailer does not match.
pub fn verify_frame(frame: &[u8]) -> SasResult<&[u8]> {
    if frame.len() < CHECKSUM_LEN {
        return Err(SasError::InvalidArgument(format!(
            "frame of {} bytes is shorter than the checksum trailer",
            frame.len()
        )));
    }

    let (payload, trailer) = frame.split_at(frame.len() - CHECKSUM_LEN);
    let expected = crc16(payload, 0);
    let actual = u16::from_le_bytes([trailer[0], trailer[1]]);
    if expected != actual {
        return Err(SasError::ChecksumMismatch { expected, actual });
    }
    Ok(payload)
}
