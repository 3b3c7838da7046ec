//! # Packed-Decimal Codec
//!
//! Converts between integers and the fixed-width packed-decimal byte
//! encoding SAS uses for meters and amounts: two decimal digits per byte,
//! most significant digit first, left-zero-padded to the field width.
//!
//! ## Asymmetry
//!
//! [`encode`] and [`decode`] are independently defined and are NOT inverses.
//! `encode` reads the decimal digits of a value as hex nibbles, so
//! `encode(12, 1)` is `[0x12]`. `decode` reads the bytes back as a plain
//! base-16 integer, so `decode(&[0x12])` is `18`. Host-side tooling depends
//! on both behaviours exactly as they are; do not use `decode` to recover a
//! meter value for audit reconciliation.

use crate::error::{SasError, SasResult};

/// Maximum number of significant bytes [`decode`] can fold into a `u128`.
/// Every [`encode`] output has at most ten.
const DECODE_MAX_BYTES: usize = 16;

/// Pack the decimal digits of `value` into `width` big-endian bytes.
///
/// # Errors
///
/// Returns `SasError::InvalidArgument` if the packed digits need more than
/// `width` bytes. `encode(0, 0)` is valid and yields an empty vector.
pub fn encode(value: u64, width: usize) -> SasResult<Vec<u8>> {
    // u64::MAX has 20 digits, i.e. 80 bits of nibbles.
    let packed = value.to_string().bytes().try_fold(0u128, |acc, ch| {
        if !ch.is_ascii_digit() {
            return Err(SasError::InvalidArgument(format!(
                "non-decimal character {:?} in {value}",
                ch as char
            )));
        }
        Ok((acc << 4) | u128::from(ch - b'0'))
    })?;

    let significant = (128 - packed.leading_zeros() as usize + 7) / 8;
    if significant > width {
        return Err(SasError::InvalidArgument(format!(
            "{value} needs {significant} packed-decimal bytes, width is {width}"
        )));
    }

    let be = packed.to_be_bytes();
    let mut out = vec![0u8; width - significant];
    out.extend_from_slice(&be[be.len() - significant..]);
    Ok(out)
}

/// Read `bytes` as one big-endian base-16 integer.
///
/// Equivalent to rendering every byte as two lowercase hex characters,
/// concatenating them, and parsing the result in base 16.
///
/// # Errors
///
/// Returns `SasError::InvalidArgument` for an empty input, or when the value
/// has more than sixteen significant bytes.
pub fn decode(bytes: &[u8]) -> SasResult<u128> {
    if bytes.is_empty() {
        return Err(SasError::InvalidArgument(
            "cannot decode an empty byte sequence".to_string(),
        ));
    }

    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first..];
    if significant.len() > DECODE_MAX_BYTES {
        return Err(SasError::InvalidArgument(format!(
            "{} significant bytes do not fit in a u128",
            significant.len()
        )));
    }

    Ok(significant
        .iter()
        .fold(0u128, |acc, &b| (acc << 8) | u128::from(b)))
}

/// Render bytes as lowercase hex, two characters per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a hex string (optionally `0x`-prefixed, whitespace ignored) into bytes.
///
/// # Errors
///
/// Returns `SasError::InvalidArgument` for an odd number of hex digits or a
/// non-hex character.
pub fn from_hex(s: &str) -> SasResult<Vec<u8>> {
    let trimmed = s.trim();
    let digits: String = trimmed
        .strip_prefix("0x")
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(SasError::InvalidArgument(format!(
            "invalid hex character {bad:?}"
        )));
    }
    if digits.len() % 2 != 0 {
        return Err(SasError::InvalidArgument(format!(
            "hex string has odd length {}",
            digits.len()
        )));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| SasError::InvalidArgument(format!("invalid hex: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_packs_two_digits_per_byte() {
        assert_eq!(encode(12, 1).unwrap(), vec![0x12]);
    }

    #[test]
    fn encode_left_pads_to_width() {
        assert_eq!(encode(1234, 4).unwrap(), vec![0x00, 0x00, 0x12, 0x34]);
        assert_eq!(encode(7, 2).unwrap(), vec![0x00, 0x07]);
    }

    #[test]
    fn encode_odd_digit_count() {
        assert_eq!(encode(12345, 3).unwrap(), vec![0x01, 0x23, 0x45]);
    }

    #[test]
    fn encode_zero() {
        assert_eq!(encode(0, 4).unwrap(), vec![0, 0, 0, 0]);
        assert!(encode(0, 0).unwrap().is_empty());
    }

    #[test]
    fn encode_rejects_values_wider_than_field() {
        assert!(matches!(encode(100, 1), Err(SasError::InvalidArgument(_))));
        assert!(matches!(encode(1, 0), Err(SasError::InvalidArgument(_))));
    }

    #[test]
    fn encode_max_u64() {
        let out = encode(u64::MAX, 10).unwrap();
        assert_eq!(to_hex(&out), "18446744073709551615");
    }

    #[test]
    fn decode_reads_bytes_as_hex() {
        assert_eq!(decode(&[0x12]).unwrap(), 18);
        assert_eq!(decode(&[0x00, 0x00, 0x12, 0x34]).unwrap(), 0x1234);
    }

    #[test]
    fn decode_is_not_inverse_of_encode() {
        let packed = encode(12, 1).unwrap();
        assert_eq!(decode(&packed).unwrap(), 18);
        assert_ne!(decode(&packed).unwrap(), 12);
    }

    #[test]
    fn decode_single_zero_byte() {
        assert_eq!(decode(&[0x00]).unwrap(), 0);
    }

    #[test]
    fn decode_rejects_empty() {
        assert!(matches!(decode(&[]), Err(SasError::InvalidArgument(_))));
    }

    #[test]
    fn decode_ignores_leading_zero_bytes_beyond_u128() {
        let mut bytes = vec![0u8; 20];
        bytes.push(0x01);
        assert_eq!(decode(&bytes).unwrap(), 1);
    }

    #[test]
    fn decode_accepts_every_encode_width() {
        let packed = encode(10_000_000_000_000_000, 9).unwrap();
        assert_eq!(decode(&packed).unwrap(), 1u128 << 64);

        let widest = encode(u64::MAX, 10).unwrap();
        assert_eq!(decode(&widest).unwrap(), 0x1844_6744_0737_0955_1615);
    }

    #[test]
    fn decode_rejects_seventeen_significant_bytes() {
        let bytes = [1u8; 17];
        assert!(matches!(decode(&bytes), Err(SasError::InvalidArgument(_))));
    }

    #[test]
    fn hex_helpers() {
        assert_eq!(to_hex(&[0x00, 0xab, 0x10]), "00ab10");
        assert_eq!(from_hex("00ab10").unwrap(), vec![0x00, 0xab, 0x10]);
        assert_eq!(from_hex("0x01 02").unwrap(), vec![0x01, 0x02]);
        assert!(from_hex("").unwrap().is_empty());
        assert!(from_hex("abc").is_err());
        assert!(from_hex("zz").is_err());
        assert!(from_hex("é1").is_err());
    }
}
