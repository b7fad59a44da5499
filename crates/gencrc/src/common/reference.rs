//! Bit-vector reference implementation.
//!
//! The canonical "source of truth" for every flag combination. The register
//! is an explicit `Vec<bool>` (index 0 is the most-significant bit) shifted
//! one position per input bit, the polynomial is XORed in element by element,
//! and the output conventions are applied to the bit vector directly. There
//! are no lookup tables, no integer register and no shared state with the
//! engine.
//!
//! All other kernels must produce identical results.
//!
//! # Performance
//!
//! Intentionally slow (O(width) per input bit). Use for:
//! - Correctness verification
//! - Test oracles
//! - Parameter detection, where certainty beats speed

use bitstr::{BitStr, Bits};

use crate::{ConfigError, CrcParams};

/// CRC of `data` under `params`, computed bit by bit.
///
/// # Errors
///
/// Whatever [`CrcParams::validate`] reports.
pub fn reference_crc(params: &CrcParams, data: &BitStr) -> Result<Bits, ConfigError> {
  params.validate()?;
  Ok(crc_bits(params, &params.start_value, data))
}

/// Pre-final-XOR register after consuming `data` from `params.start_value`.
///
/// # Errors
///
/// Whatever [`CrcParams::validate`] reports.
pub fn reference_register(params: &CrcParams, data: &BitStr) -> Result<Bits, ConfigError> {
  params.validate()?;
  Ok(register_bits(params, &params.start_value, data).into_iter().collect())
}

/// Finalized CRC starting from `start`. `params` must be valid.
pub(crate) fn crc_bits(params: &CrcParams, start: &BitStr, data: &BitStr) -> Bits {
  finalize_bits(params, register_bits(params, start, data))
}

/// Shift `data` through a bit-vector register initialised from `start`.
pub(crate) fn register_bits(params: &CrcParams, start: &BitStr, data: &BitStr) -> Vec<bool> {
  let mut poly: Vec<bool> = params.polynomial.iter().by_vals().collect();
  if params.reverse_polynomial {
    poly.reverse();
  }

  let mut crc: Vec<bool> = start.iter().by_vals().collect();
  if crc.is_empty() {
    return crc;
  }

  let len = data.len();
  let mut i = 0;
  while i < len {
    let end = (i + 8).min(len);
    for j in 0..end - i {
      let idx = if params.lsb_first { end - 1 - j } else { i + j };

      let top = crc[0];
      crc.rotate_left(1);
      let last = crc.len() - 1;
      crc[last] = false;

      if top != data[idx] {
        for (c, p) in crc.iter_mut().zip(&poly) {
          *c ^= *p;
        }
      }
    }
    i = end;
  }

  crc
}

/// Apply final XOR, full reversal and byte swap to a raw register.
pub(crate) fn finalize_bits(params: &CrcParams, mut crc: Vec<bool>) -> Bits {
  for (c, x) in crc.iter_mut().zip(params.final_xor.iter().by_vals()) {
    *c ^= x;
  }

  if params.reverse_all {
    crc.reverse();
  }

  if params.little_endian && !crc.is_empty() && crc.len() % 8 == 0 {
    crc = crc.chunks(8).rev().flatten().copied().collect();
  }

  crc.into_iter().collect()
}
