//! Errors for textual bit and hex conversions.

use thiserror::Error;

/// A bit or hex string contained a character outside its alphabet.
///
/// Raised synchronously by the conversion that read the string; `index` is
/// the character position (not the byte offset) of the first bad character.
///
/// # Examples
///
/// ```
/// use bitstr::{str2bit, ParseError};
///
/// let err = str2bit("0120").unwrap_err();
/// assert_eq!(err, ParseError::InvalidBit { index: 2, ch: '2' });
/// assert_eq!(err.to_string(), "invalid bit character '2' at index 2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum ParseError {
  /// A bit string held something other than `'0'` or `'1'`.
  #[error("invalid bit character {ch:?} at index {index}")]
  InvalidBit {
    /// Character position in the input.
    index: usize,
    /// The offending character.
    ch: char,
  },
  /// A hex string held a non-hexadecimal character.
  #[error("invalid hex digit {ch:?} at index {index}")]
  InvalidHexDigit {
    /// Character position in the input.
    index: usize,
    /// The offending character.
    ch: char,
  },
}

impl ParseError {
  /// Character position of the rejected input.
  #[inline]
  #[must_use]
  pub const fn index(&self) -> usize {
    match *self {
      Self::InvalidBit { index, .. } | Self::InvalidHexDigit { index, .. } => index,
    }
  }

  /// The rejected character.
  #[inline]
  #[must_use]
  pub const fn character(&self) -> char {
    match *self {
      Self::InvalidBit { ch, .. } | Self::InvalidHexDigit { ch, .. } => ch,
    }
  }
}
