//! Error types for CRC configuration.
//!
//! Every error is raised at configuration time (registry lookup, engine
//! construction, setters, cache building). Computing a CRC never fails.

use bitstr::ParseError;
use thiserror::Error;

/// Invalid CRC configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum ConfigError {
  /// No registry preset carries this name.
  #[error("unknown polynomial preset {0:?}")]
  UnknownPolynomial(String),
  /// `start_value` or `final_xor` does not have one bit per polynomial bit.
  #[error("{field} has {actual} bits but the polynomial width is {expected}")]
  LengthMismatch {
    /// Name of the offending field.
    field: &'static str,
    /// The polynomial width.
    expected: usize,
    /// Bits actually supplied.
    actual: usize,
  },
  /// Polynomial width outside `1..=64`.
  #[error("unsupported CRC width {0} (expected 1..=64 bits)")]
  UnsupportedWidth(usize),
  /// Cache chunk size outside `1..=16`.
  #[error("cache chunk size {0} out of range (expected 1..=16 bits)")]
  InvalidCacheBits(u32),
}

/// Any error surfaced by this crate.
///
/// Used by calls that parse text and reconfigure the engine in one step,
/// such as [`Crc::set_polynomial_from_hex`](crate::Crc::set_polynomial_from_hex).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
  /// Malformed bit or hex string.
  #[error(transparent)]
  Parse(#[from] ParseError),
  /// Invalid configuration.
  #[error(transparent)]
  Config(#[from] ConfigError),
}
