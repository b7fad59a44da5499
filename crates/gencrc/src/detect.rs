//! Recovering CRC parameters and checksum positions from captured messages.
//!
//! Both searches are brute force over small spaces:
//!
//! - [`guess_parameters`] walks every registry preset of the right width with
//!   zero or all-ones start value and final XOR and all 16 flag combinations
//!   (at most 64 candidates per preset).
//! - [`find_data_range`] slides a window over a message and compares the CRC of
//!   each window against the bits that follow it.
//!
//! Candidates are evaluated with the bitwise kernel (no cache is built per
//! candidate). A hit from [`guess_parameters`] is confirmed against
//! [`reference_crc`](crate::reference_crc) before it is returned.

use bitstr::{bits_to_number, BitStr};

use crate::{
  common::reference,
  config::{CrcConfig, CrcForce},
  registry, Crc, CrcParams,
};

/// First configuration whose CRC over `message` equals `expected`.
///
/// Only presets as wide as `expected` are tried. Presets are visited in
/// registry order, then start/final fills, then flag masks in ascending
/// order, so the result is deterministic.
#[must_use]
pub fn guess_parameters(message: &BitStr, expected: &BitStr) -> Option<CrcParams> {
  let config = CrcConfig::DEFAULT.with_force(CrcForce::Bitwise);
  let target = bits_to_number(expected);

  for preset in registry::presets().iter().filter(|p| usize::from(p.width) == expected.len()) {
    for (start_ones, xor_ones) in [(false, false), (true, false), (false, true), (true, true)] {
      for flags in 0..16u8 {
        let params = CrcParams::new(preset.bits())
          .with_start_fill(start_ones)
          .with_final_xor_fill(xor_ones)
          .with_flags(flags);
        let Ok(crc) = Crc::with_config(params, config) else {
          continue;
        };
        let register = crc.advance(crc.start_register(), message);
        if crc.finalize_register(register) != target {
          continue;
        }

        let params = crc.into_params();
        if reference::crc_bits(&params, &params.start_value, message)[..] == *expected {
          log::debug!(
            "matched {} (start={} xor={} flags={flags:04b})",
            preset.name,
            u8::from(start_ones),
            u8::from(xor_ones)
          );
          return Some(params);
        }
      }
    }
  }
  None
}

/// Locate a message section followed by its own CRC.
///
/// Returns the first `(start, end)` with `search_from <= start < end` such
/// that `crc.crc(&bits[start..end])` equals `bits[end..end + width]`. Windows
/// are ordered by `start`, then by `end`.
#[must_use]
pub fn find_data_range(crc: &Crc, bits: &BitStr, search_from: usize) -> Option<(usize, usize)> {
  let width = crc.width();
  let last_end = bits.len().checked_sub(width)?;

  for start in search_from..last_end {
    let mut digest = crc.digest();
    for end in start + 1..=last_end {
      digest.update(&bits[end - 1..end]);
      if digest.finalize()[..] == bits[end..end + width] {
        log::debug!("crc over bits {start}..{end} found at {end}");
        return Some((start, end));
      }
    }
  }
  None
}
