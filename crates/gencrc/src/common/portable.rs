//! Bitwise and table-driven register updates.
//!
//! Both kernels operate on a `u64` register holding the CRC in its low
//! `width` bits, MSB first, and consume input in wire order (see
//! [`wire_order`]). They compute the raw register only; final XOR and output
//! reordering are applied by the engine.
//!
//! # Table Update
//!
//! Feeding `n` bits `c` into register `r` is linear, so
//! `f(r, c) == f(0, c ^ top_n(r)) ^ (r << n)`. The cache stores `f(0, v)` for
//! every `n`-bit `v`:
//!
//! | Width | Index | Next register |
//! |-------|-------|---------------|
//! | `w >= n` | `c ^ (r >> (w - n))` | `((r << n) & mask) ^ T[idx]` |
//! | `w < n` | `c ^ (r << (n - w))` | `T[idx]` |

use std::borrow::Cow;

use bitstr::{BitStr, Bits};

use super::tables::CacheTable;

/// Register geometry: width, effective polynomial and width mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Kernel {
  width: u32,
  poly: u64,
  mask: u64,
}

impl Kernel {
  /// `width` must be in `1..=64`; `poly` is masked to it.
  #[must_use]
  pub const fn new(width: usize, poly: u64) -> Self {
    let mask = mask(width);
    Self {
      width: width as u32,
      poly: poly & mask,
      mask,
    }
  }

  #[inline]
  #[must_use]
  pub const fn width(self) -> u32 {
    self.width
  }

  #[inline]
  #[must_use]
  pub const fn poly(self) -> u64 {
    self.poly
  }

  #[inline]
  #[must_use]
  pub const fn mask(self) -> u64 {
    self.mask
  }

  /// Advance the register by one input bit.
  #[inline]
  #[must_use]
  pub const fn step(self, reg: u64, bit: bool) -> u64 {
    let top = (reg >> (self.width - 1)) & 1 == 1;
    let shifted = (reg << 1) & self.mask;
    if top != bit {
      shifted ^ self.poly
    } else {
      shifted
    }
  }

  /// Advance the register over `bits`, one at a time.
  #[inline]
  #[must_use]
  pub fn bitwise<I>(self, reg: u64, bits: I) -> u64
  where
    I: IntoIterator<Item = bool>,
  {
    bits.into_iter().fold(reg, |reg, bit| self.step(reg, bit))
  }

  /// Advance the register over `data` using `table`, `table.chunk_bits()` bits
  /// per lookup. Trailing bits that do not fill a chunk go through
  /// [`bitwise`](Self::bitwise).
  ///
  /// `table` must have been built for this kernel.
  #[must_use]
  pub fn table(self, mut reg: u64, data: &BitStr, table: &CacheTable) -> u64 {
    debug_assert!(table.matches(self), "cache built for a different register geometry");

    let n = table.chunk_bits();
    let chunk_mask = mask(n as usize);
    let entries = table.entries();

    let mut chunks = data.chunks_exact(n as usize);
    for chunk in &mut chunks {
      let value = chunk_value(chunk);
      let (index, carried) = if self.width >= n {
        (value ^ (reg >> (self.width - n)), (reg << n) & self.mask)
      } else {
        (value ^ (reg << (n - self.width)), 0)
      };
      reg = carried ^ entries[(index & chunk_mask) as usize];
    }

    self.bitwise(reg, chunks.remainder().iter().by_vals())
  }
}

/// Mask of the low `width` bits (`width` in `0..=64`).
#[inline]
#[must_use]
pub const fn mask(width: usize) -> u64 {
  if width >= 64 {
    u64::MAX
  } else {
    (1u64 << width) - 1
  }
}

/// MSB-first value of a chunk of at most 64 bits.
#[inline]
#[must_use]
pub fn chunk_value(chunk: &BitStr) -> u64 {
  chunk.iter().by_vals().fold(0u64, |acc, bit| (acc << 1) | u64::from(bit))
}

/// Input bits in the order the register consumes them.
///
/// With `lsb_first`, each group of eight bits is reversed; a final partial
/// group is reversed among the bits present.
#[must_use]
pub fn wire_order(data: &BitStr, lsb_first: bool) -> Cow<'_, BitStr> {
  if !lsb_first {
    return Cow::Borrowed(data);
  }
  let mut ordered = Bits::with_capacity(data.len());
  for byte in data.chunks(8) {
    ordered.extend(byte.iter().rev().map(|bit| *bit));
  }
  Cow::Owned(ordered)
}

/// Reverse the byte order of the low `width` bits. Widths that are not a
/// whole number of bytes are returned unchanged.
#[inline]
#[must_use]
pub const fn swap_byte_order(value: u64, width: u32) -> u64 {
  if width == 0 || width % 8 != 0 {
    value
  } else {
    value.swap_bytes() >> (64 - width)
  }
}

#[cfg(test)]
mod tests {
  use bitstr::{hex2bit, str2bit};

  use super::*;

  const CRC8_CCITT: Kernel = Kernel::new(8, 0x07);

  #[test]
  fn mask_edges() {
    assert_eq!(mask(0), 0);
    assert_eq!(mask(1), 1);
    assert_eq!(mask(16), 0xFFFF);
    assert_eq!(mask(64), u64::MAX);
  }

  #[test]
  fn bitwise_known_crc8_vectors() {
    for (msg, expected) in [("aabbcc", 0x7D), ("abcdee", 0x24), ("dacafe", 0x33)] {
      let bits = hex2bit(msg).unwrap();
      assert_eq!(CRC8_CCITT.bitwise(0, bits.iter().by_vals()), expected, "{msg}");
    }
  }

  #[test]
  fn table_matches_bitwise_for_every_chunk_size() {
    let data = hex2bit("31323334353637383940deadbeef").unwrap();
    let data = &data[..data.len() - 3];
    for kernel in [CRC8_CCITT, Kernel::new(16, 0x1021), Kernel::new(3, 0b011), Kernel::new(64, 0x42F0_E1EB_A9EA_3693)] {
      let expected = kernel.bitwise(0x5, data.iter().by_vals());
      for n in 1..=12 {
        let table = CacheTable::build(kernel, n);
        assert_eq!(kernel.table(0x5, data, &table), expected, "width {} chunk {n}", kernel.width());
      }
    }
  }

  #[test]
  fn wire_order_reverses_bytes_and_partial_tail() {
    let bits = str2bit("10000000").unwrap();
    assert_eq!(&*wire_order(&bits, true), &*str2bit("00000001").unwrap());

    let bits = str2bit("1100000011100").unwrap();
    assert_eq!(&*wire_order(&bits, true), &*str2bit("0000001100111").unwrap());
    assert!(matches!(wire_order(&bits, false), Cow::Borrowed(_)));
  }

  #[test]
  fn swap_byte_order_whole_bytes_only() {
    assert_eq!(swap_byte_order(0x1234, 16), 0x3412);
    assert_eq!(swap_byte_order(0x12_3456, 24), 0x56_3412);
    assert_eq!(swap_byte_order(0xAB, 8), 0xAB);
    assert_eq!(swap_byte_order(0x0123_4567_89AB_CDEF, 64), 0xEFCD_AB89_6745_2301);
    assert_eq!(swap_byte_order(0x123, 12), 0x123);
  }
}
