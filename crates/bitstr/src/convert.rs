//! Conversions between `0`/`1` strings, hex strings, integers and [`Bits`].
//!
//! Every conversion is MSB first: the first character of a bit string, and the
//! most-significant bit of the first hex nibble, become bit 0 of the sequence.

use crate::{BitStr, Bits, ParseError};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Parse a string of `'0'` and `'1'` characters.
///
/// # Errors
///
/// [`ParseError::InvalidBit`] on the first character outside `{0, 1}`.
pub fn str2bit(text: &str) -> Result<Bits, ParseError> {
  let mut bits = Bits::with_capacity(text.len());
  for (index, ch) in text.chars().enumerate() {
    match ch {
      '0' => bits.push(false),
      '1' => bits.push(true),
      _ => return Err(ParseError::InvalidBit { index, ch }),
    }
  }
  Ok(bits)
}

/// Parse a hex string into a nibble-aligned bit sequence.
///
/// Upper and lower case digits are both accepted.
///
/// # Errors
///
/// [`ParseError::InvalidHexDigit`] on the first non-hex character.
pub fn hex2bit(hex: &str) -> Result<Bits, ParseError> {
  let mut bits = Bits::with_capacity(hex.len().saturating_mul(4));
  for (index, ch) in hex.chars().enumerate() {
    let nibble = ch.to_digit(16).ok_or(ParseError::InvalidHexDigit { index, ch })?;
    for shift in (0..4).rev() {
      bits.push((nibble >> shift) & 1 == 1);
    }
  }
  Ok(bits)
}

/// Parse a hex string into bits; alias of [`hex2bit`] kept for the message
/// decoder, which calls it on its hex view.
///
/// # Errors
///
/// Same as [`hex2bit`].
#[inline]
pub fn str2arr(text: &str) -> Result<Bits, ParseError> {
  hex2bit(text)
}

/// Render bits as lowercase hex.
///
/// A trailing group shorter than four bits is padded with zero bits on the
/// right, so `hex2bit(&bit2hex(b))` returns `b` extended to a nibble boundary.
#[must_use]
pub fn bit2hex(bits: &BitStr) -> String {
  let mut out = String::with_capacity(bits.len().div_ceil(4));
  for nibble in bits.chunks(4) {
    let value = nibble.iter().by_vals().fold(0usize, |acc, bit| (acc << 1) | usize::from(bit));
    let value = value << (4 - nibble.len());
    out.push(char::from(HEX_DIGITS[value & 0xF]));
  }
  out
}

/// Render bits as a `0`/`1` string; inverse of [`str2bit`].
#[must_use]
pub fn bit2str(bits: &BitStr) -> String {
  bits.iter().by_vals().map(|bit| if bit { '1' } else { '0' }).collect()
}

/// The low `width` bits of `value`, most-significant first.
///
/// Positions above bit 63 are zero when `width > 64`.
#[must_use]
pub fn number_to_bits(value: u64, width: usize) -> Bits {
  (0..width).rev().map(|i| i < 64 && (value >> i) & 1 == 1).collect()
}

/// Interpret bits as an MSB-first unsigned integer.
///
/// Only the last 64 bits contribute; earlier bits are shifted out.
#[must_use]
pub fn bits_to_number(bits: &BitStr) -> u64 {
  bits.iter().by_vals().fold(0u64, |acc, bit| (acc << 1) | u64::from(bit))
}
