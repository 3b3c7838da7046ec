//! # Secure-Enhanced Validation Numbers
//!
//! Derives the 18-digit number printed on a cashout ticket from the
//! host-assigned validation sequence and validation id.
//!
//! ## Algorithm
//!
//! 1. Sequence and id, three little-endian bytes each, form `a[0..6]`.
//! 2. `b = [a0, a1, a2^a0, a3^a1, a4^a0, a5^a1]`.
//! 3. `c` is the checksum (seed 0) of each byte pair of `b`, concatenated.
//! 4. `n0` is `c[3..6]` and `n1` is `c[0..3]`, both read little-endian.
//! 5. The digits of `n0` then `n1`, each zero-padded to eight, form `v`.
//! 6. With `v` reversed, OR `(sum(v[0..8]) % 5) << 1` into `v[7]` and
//!    `(sum(v[8..16]) % 5) << 1` into `v[15]`; reverse back.
//! 7. The number is `"00"` followed by the sixteen digits.
//!
//! ## Digit Range
//!
//! Step 6 is a bitwise OR on a decimal digit and can in principle produce
//! a value above 9. The two positions it touches are the leading digits of
//! `n0` and `n1`, which are below 2^24 and so lead with 0 or 1; the OR can
//! then reach at most 9. The range is still checked on every digit, and a
//! violation is reported as `SasError::ChecksumDigitOverflow` instead of
//! emitting a malformed number. [`assemble_digits`] accepts any eight-digit
//! pair so the violation can be reproduced.

use serde::Serialize;

use sas_core::{checksum, Counter24, SasError, SasResult};
use sas_meters::MeterRegistry;

/// Total length of a validation number, including the `00` prefix.
pub const VALIDATION_NUMBER_LEN: usize = 18;

/// Number of digits after the prefix.
pub const DIGIT_COUNT: usize = 16;

const PREFIX: &str = "00";

/// Exclusive upper bound of each half passed to [`assemble_digits`].
const HALF_LIMIT: u32 = 100_000_000;

/// An 18-character secure-enhanced validation number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidationNumber(String);

impl ValidationNumber {
    /// Generate the validation number for a sequence/id pair.
    ///
    /// Pure and deterministic: identical inputs always give identical output.
    ///
    /// # Errors
    ///
    /// Returns `SasError::ChecksumDigitOverflow` if a check digit leaves the
    /// decimal range.
    pub fn generate(sequence: Counter24, id: Counter24) -> SasResult<Self> {
        let b = scramble(sequence, id);
        let c = mix(&b);
        let (n0, n1) = split(&c);
        tracing::trace!(?b, ?c, n0, n1, "validation number intermediates");
        render(&assemble_digits(n0, n1)?)
    }

    /// Generate from a registry's current validation sequence and id.
    pub fn from_registry(registry: &MeterRegistry) -> SasResult<Self> {
        Self::generate(registry.validation_sequence(), registry.validation_id())
    }

    /// The number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The sixteen digits after the prefix.
    pub fn digits(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().skip(PREFIX.len()).map(|b| b - b'0')
    }
}

impl std::fmt::Display for ValidationNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidationNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Steps 1 and 2: lay out the counters and cross-XOR them.
pub fn scramble(sequence: Counter24, id: Counter24) -> [u8; 6] {
    let [s0, s1, s2] = sequence.to_le_bytes();
    let [i0, i1, i2] = id.to_le_bytes();
    [s0, s1, s2 ^ s0, i0 ^ s1, i1 ^ s0, i2 ^ s1]
}

/// Step 3: checksum each byte pair.
pub fn mix(b: &[u8; 6]) -> [u8; 6] {
    let mut c = [0u8; 6];
    for (out, pair) in c.chunks_exact_mut(2).zip(b.chunks_exact(2)) {
        out.copy_from_slice(&checksum(pair, 0));
    }
    c
}

/// Step 4: read the two 24-bit halves.
pub fn split(c: &[u8; 6]) -> (u32, u32) {
    let n0 = u32::from_le_bytes([c[3], c[4], c[5], 0]);
    let n1 = u32::from_le_bytes([c[0], c[1], c[2], 0]);
    (n0, n1)
}

/// Steps 5 and 6: lay out the decimal digits and inject the check bits.
///
/// Returns the raw digits, which may include values above 9.
///
/// # Errors
///
/// Returns `SasError::InvalidArgument` if either half has more than eight
/// decimal digits.
pub fn assemble_digits(n0: u32, n1: u32) -> SasResult<[u8; DIGIT_COUNT]> {
    if n0 >= HALF_LIMIT || n1 >= HALF_LIMIT {
        return Err(SasError::InvalidArgument(format!(
            "validation halves {n0}, {n1} exceed eight digits"
        )));
    }

    let mut v = [0u8; DIGIT_COUNT];
    write_decimal(&mut v[..8], n0);
    write_decimal(&mut v[8..], n1);

    v.reverse();
    v[7] |= check_bits(&v[..8]);
    v[15] |= check_bits(&v[8..]);
    v.reverse();
    Ok(v)
}

/// Step 7: range-check the digits and render with the prefix.
fn render(digits: &[u8; DIGIT_COUNT]) -> SasResult<ValidationNumber> {
    let mut out = String::with_capacity(VALIDATION_NUMBER_LEN);
    out.push_str(PREFIX);
    for (position, &d) in digits.iter().enumerate() {
        if d > 9 {
            return Err(SasError::ChecksumDigitOverflow { position, value: d });
        }
        out.push(char::from(b'0' + d));
    }
    Ok(ValidationNumber(out))
}

fn write_decimal(out: &mut [u8], mut n: u32) {
    for slot in out.iter_mut().rev() {
        *slot = (n % 10) as u8;
        n /= 10;
    }
}

fn check_bits(digits: &[u8]) -> u8 {
    let sum: u32 = digits.iter().map(|&d| u32::from(d)).sum();
    ((sum % 5) as u8) << 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c24(v: u32) -> Counter24 {
        Counter24::new(v).unwrap()
    }

    #[test]
    fn scramble_one_one() {
        assert_eq!(scramble(c24(1), c24(1)), [1, 0, 1, 1, 1, 0]);
    }

    #[test]
    fn scramble_cross_wiring() {
        // seq 999 = e7 03 00, id 1000 = e8 03 00
        assert_eq!(scramble(c24(999), c24(1000)), [231, 3, 231, 235, 228, 3]);
    }

    #[test]
    fn mix_and_split_one_one() {
        let c = mix(&[1, 0, 1, 1, 1, 0]);
        assert_eq!(c, [0xd8, 0x19, 0x51, 0x08, 0xd8, 0x19]);
        assert_eq!(split(&c), (1_693_704, 5_315_032));
    }

    #[test]
    fn assemble_one_one() {
        let v = assemble_digits(1_693_704, 5_315_032).unwrap();
        assert_eq!(v, [0, 1, 6, 9, 3, 7, 0, 4, 8, 5, 3, 1, 5, 0, 3, 2]);
    }

    #[test]
    fn check_bits_land_on_leading_digits() {
        // n1 digits 12345678 sum to 36, 36 % 5 = 1, so its leading 1 becomes 1 | 2.
        let v = assemble_digits(0, 12_345_678).unwrap();
        assert_eq!(v[8], 3);
        assert_eq!(&v[9..], &[2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&v[..8], &[0; 8]);
    }

    #[test]
    fn crafted_halves_overflow_a_digit() {
        // Leading 5 of n0 with a digit sum of 9: 5 | (4 << 1) = 13.
        let v = assemble_digits(50_000_004, 12_345_678).unwrap();
        assert_eq!(v, [13, 0, 0, 0, 0, 0, 0, 4, 3, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            render(&v),
            Err(SasError::ChecksumDigitOverflow {
                position: 0,
                value: 13
            })
        );
    }

    #[test]
    fn assemble_rejects_nine_digit_halves() {
        assert!(matches!(
            assemble_digits(HALF_LIMIT, 0),
            Err(SasError::InvalidArgument(_))
        ));
        assert!(matches!(
            assemble_digits(0, u32::MAX),
            Err(SasError::InvalidArgument(_))
        ));
    }

    #[test]
    fn generate_golden_one_one() {
        let n = ValidationNumber::generate(c24(1), c24(1)).unwrap();
        assert_eq!(n.as_str(), "000169370485315032");
    }

    #[test]
    fn generate_zero_is_all_zero() {
        let n = ValidationNumber::generate(Counter24::ZERO, Counter24::ZERO).unwrap();
        assert_eq!(n.to_string(), "0".repeat(VALIDATION_NUMBER_LEN));
    }

    #[test]
    fn digits_iterator() {
        let n = ValidationNumber::generate(c24(1), c24(1)).unwrap();
        let digits: Vec<u8> = n.digits().collect();
        assert_eq!(digits, vec![0, 1, 6, 9, 3, 7, 0, 4, 8, 5, 3, 1, 5, 0, 3, 2]);
    }

    #[test]
    fn serializes_as_string() {
        let n = ValidationNumber::generate(c24(1), c24(1)).unwrap();
        assert_eq!(
            serde_json::to_string(&n).unwrap(),
            "\"000169370485315032\""
        );
    }
}
