//! Low-level bit-field helpers
//!
//! Pure functions for rendering bytes as binary strings and poking at
//! individual bits. The packed version types build their binary
//! representations on top of these.

use crate::{VersionError, VersionResult};

/// Get the bit of `value` at position `pos` (0 = least significant) as a
/// `'0'`/`'1'` character.
///
/// No upper bound check is performed; positions past the value's width
/// simply yield `'0'`.
pub fn get_bit(value: u32, pos: u32) -> char {
    if value >> pos & 1 == 1 {
        '1'
    } else {
        '0'
    }
}

/// Render a byte as an 8-character binary string, most significant bit
/// first (leading zeros included).
///
/// Fails with [`VersionError::NotAByte`] when `value` does not fit into
/// an unsigned byte.
pub fn byte_as_bit_string(value: u16) -> VersionResult<String> {
    if value > u8::MAX as u16 {
        return Err(VersionError::NotAByte(value));
    }
    Ok(byte_bits(value as u8))
}

/// Infallible variant of [`byte_as_bit_string`] for values already known
/// to be bytes.
pub(crate) fn byte_bits(byte: u8) -> String {
    (0..8).rev().map(|pos| get_bit(byte as u32, pos)).collect()
}

/// Parse a binary string of at most 8 digits back into a byte.
pub fn byte_bits_to_int(bits: &str) -> VersionResult<u8> {
    if bits.is_empty() || bits.len() > 8 {
        return Err(VersionError::InvalidBitString(bits.to_string()));
    }
    u8::from_str_radix(bits, 2).map_err(|_| VersionError::InvalidBitString(bits.to_string()))
}
