//! Streaming CRC computation.
//!
//! A [`Digest`] borrows an engine and carries the register between calls to
//! [`update`](Digest::update). Splitting a message anywhere gives the same
//! result as a single [`Crc::crc`] call. Under `lsb_first` the input is
//! reordered per eight-bit group counted from the start of the message, so
//! bits that do not yet complete a group are held back until they do (or
//! until the digest is finalized).

use bitstr::{number_to_bits, BitStr, Bits};

use crate::Crc;

/// Incremental CRC state.
#[derive(Clone, Debug)]
pub struct Digest<'a> {
  crc: &'a Crc,
  register: u64,
  pending: Bits,
  consumed: usize,
}

impl<'a> Digest<'a> {
  pub(crate) fn new(crc: &'a Crc) -> Self {
    Self {
      crc,
      register: crc.start_register(),
      pending: Bits::new(),
      consumed: 0,
    }
  }

  /// Feed more input.
  pub fn update(&mut self, data: &BitStr) {
    self.consumed += data.len();
    if !self.crc.params().lsb_first {
      self.register = self.crc.advance(self.register, data);
      return;
    }

    self.pending.extend_from_bitslice(data);
    let whole = self.pending.len() - self.pending.len() % 8;
    if whole > 0 {
      self.register = self.crc.advance(self.register, &self.pending[..whole]);
      self.pending = self.pending.split_off(whole);
    }
  }

  /// Number of input bits fed so far.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.consumed
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.consumed == 0
  }

  /// Register over everything fed so far, as [`Crc::crc_intermediate`] would
  /// return for the concatenated input.
  #[must_use]
  pub fn intermediate(&self) -> Bits {
    number_to_bits(self.flushed(), self.crc.width())
  }

  /// Finished CRC over everything fed so far. The digest stays usable.
  #[must_use]
  pub fn finalize(&self) -> Bits {
    number_to_bits(self.crc.finalize_register(self.flushed()), self.crc.width())
  }

  /// Forget all input and start over from the engine's start value.
  pub fn reset(&mut self) {
    self.register = self.crc.start_register();
    self.pending.clear();
    self.consumed = 0;
  }

  fn flushed(&self) -> u64 {
    if self.pending.is_empty() {
      self.register
    } else {
      self.crc.advance(self.register, &self.pending)
    }
  }
}
