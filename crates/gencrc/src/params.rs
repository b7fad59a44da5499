//! CRC configuration record.
//!
//! [`CrcParams`] captures everything that defines a CRC variant. Unlike the
//! Rocksoft model, the bit conventions are expressed the way protocol
//! analysers meet them on the air:
//!
//! - `reverse_polynomial`: the generator is used bit-reversed
//! - `lsb_first`: every input byte is transmitted least-significant bit first
//! - `reverse_all`: the finished CRC is bit-reversed
//! - `little_endian`: the finished CRC is byte-swapped
//!
//! The record is plain data. Its invariant (`start_value` and `final_xor` as
//! wide as `polynomial`, width in `1..=64`) is checked by [`CrcParams::validate`],
//! which [`Crc::new`](crate::Crc::new) calls once.

use core::fmt;

use bitstr::{bits_to_number, number_to_bits, BitStr, Bits};

use crate::{registry, ConfigError};

/// Widest supported CRC register.
pub const MAX_WIDTH: usize = 64;

/// CRC parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CrcParams {
  /// Generator polynomial without the implicit leading coefficient, MSB first.
  pub polynomial: Bits,
  /// Initial register value.
  pub start_value: Bits,
  /// Mask XORed into the register after the last input bit.
  pub final_xor: Bits,
  /// Use the bit-reversed polynomial.
  pub reverse_polynomial: bool,
  /// Bit-reverse the finished CRC.
  pub reverse_all: bool,
  /// Consume each input byte least-significant bit first.
  pub lsb_first: bool,
  /// Byte-swap the finished CRC.
  pub little_endian: bool,
}

impl CrcParams {
  /// Parameters for `polynomial` with zero start value and final XOR and no
  /// reversal.
  #[must_use]
  pub fn new(polynomial: Bits) -> Self {
    let width = polynomial.len();
    Self {
      polynomial,
      start_value: Bits::repeat(false, width),
      final_xor: Bits::repeat(false, width),
      reverse_polynomial: false,
      reverse_all: false,
      lsb_first: false,
      little_endian: false,
    }
  }

  /// Parameters for an integer polynomial of the given width.
  #[must_use]
  pub fn from_polynomial(polynomial: u64, width: u8) -> Self {
    Self::new(number_to_bits(polynomial, usize::from(width)))
  }

  /// Parameters for a registry preset.
  ///
  /// # Errors
  ///
  /// [`ConfigError::UnknownPolynomial`] if `name` is not registered.
  pub fn preset(name: &str) -> Result<Self, ConfigError> {
    let preset = registry::lookup(name)?;
    Ok(Self::new(preset.bits()))
  }

  #[must_use]
  pub fn with_start_value(mut self, start_value: Bits) -> Self {
    self.start_value = start_value;
    self
  }

  /// Start value of all zeros (`false`) or all ones (`true`).
  #[must_use]
  pub fn with_start_fill(mut self, ones: bool) -> Self {
    self.start_value = Bits::repeat(ones, self.width());
    self
  }

  #[must_use]
  pub fn with_final_xor(mut self, final_xor: Bits) -> Self {
    self.final_xor = final_xor;
    self
  }

  /// Final XOR of all zeros (`false`) or all ones (`true`).
  #[must_use]
  pub fn with_final_xor_fill(mut self, ones: bool) -> Self {
    self.final_xor = Bits::repeat(ones, self.width());
    self
  }

  #[must_use]
  pub fn with_reverse_polynomial(mut self, on: bool) -> Self {
    self.reverse_polynomial = on;
    self
  }

  #[must_use]
  pub fn with_reverse_all(mut self, on: bool) -> Self {
    self.reverse_all = on;
    self
  }

  #[must_use]
  pub fn with_lsb_first(mut self, on: bool) -> Self {
    self.lsb_first = on;
    self
  }

  #[must_use]
  pub fn with_little_endian(mut self, on: bool) -> Self {
    self.little_endian = on;
    self
  }

  /// CRC width in bits (the polynomial length).
  #[inline]
  #[must_use]
  pub fn width(&self) -> usize {
    self.polynomial.len()
  }

  /// Check the width and the length invariant.
  ///
  /// # Errors
  ///
  /// - [`ConfigError::UnsupportedWidth`] if the polynomial is empty or wider than 64 bits
  /// - [`ConfigError::LengthMismatch`] if `start_value` or `final_xor` differ in length
  pub fn validate(&self) -> Result<(), ConfigError> {
    let width = self.width();
    if width == 0 || width > MAX_WIDTH {
      return Err(ConfigError::UnsupportedWidth(width));
    }
    check_len("start_value", width, &self.start_value)?;
    check_len("final_xor", width, &self.final_xor)
  }

  /// Polynomial as an integer, bit-reversed when `reverse_polynomial` is set.
  #[must_use]
  pub fn effective_polynomial(&self) -> u64 {
    let poly = bits_to_number(&self.polynomial);
    if self.reverse_polynomial {
      reflect_bits(poly, self.width())
    } else {
      poly
    }
  }

  /// Flag combination as a 4-bit mask, in field order. Used to enumerate
  /// conventions.
  #[must_use]
  pub const fn flags(&self) -> u8 {
    (self.reverse_polynomial as u8)
      | ((self.reverse_all as u8) << 1)
      | ((self.lsb_first as u8) << 2)
      | ((self.little_endian as u8) << 3)
  }

  /// Apply a mask produced by [`flags`](Self::flags).
  #[must_use]
  pub fn with_flags(self, flags: u8) -> Self {
    self
      .with_reverse_polynomial(flags & 1 != 0)
      .with_reverse_all(flags & 2 != 0)
      .with_lsb_first(flags & 4 != 0)
      .with_little_endian(flags & 8 != 0)
  }
}

impl Default for CrcParams {
  fn default() -> Self {
    Self::new(number_to_bits(0x8005, 16))
  }
}

/// Formats the generator polynomial, e.g. `x^8 + x^2 + x + 1`.
impl fmt::Display for CrcParams {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let width = self.width();
    write!(f, "x^{width}")?;
    for (i, bit) in self.polynomial.iter().by_vals().enumerate() {
      if !bit {
        continue;
      }
      match width - 1 - i {
        0 => f.write_str(" + 1")?,
        1 => f.write_str(" + x")?,
        exp => write!(f, " + x^{exp}")?,
      }
    }
    Ok(())
  }
}

pub(crate) fn check_len(field: &'static str, expected: usize, bits: &BitStr) -> Result<(), ConfigError> {
  if bits.len() == expected {
    Ok(())
  } else {
    Err(ConfigError::LengthMismatch {
      field,
      expected,
      actual: bits.len(),
    })
  }
}

/// Reflect (bit-reverse) the lower `width` bits of `value`.
#[must_use]
pub(crate) const fn reflect_bits(value: u64, width: usize) -> u64 {
  let mut result = 0u64;
  let mut i = 0;
  while i < width {
    if (value >> i) & 1 != 0 {
      result |= 1 << (width - 1 - i);
    }
    i += 1;
  }
  result
}
