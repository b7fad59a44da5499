//! Cache table construction.
//!
//! A cache for chunk size `n` holds `2^n` entries; entry `v` is the register
//! after feeding the `n`-bit value `v` (MSB first) into a zero register. The
//! table depends only on the register geometry (width and effective
//! polynomial), which it records so a stale table is never consulted.
//!
//! | Chunk bits | Entries | Size |
//! |------------|---------|------|
//! | 4 | 16 | 128 B |
//! | 8 | 256 | 2 KiB |
//! | 16 | 65536 | 512 KiB |

use bitstr::{number_to_bits, Bits};

use super::portable::Kernel;

/// Largest supported chunk size.
pub const MAX_CACHE_BITS: u32 = 16;

/// Precomputed per-chunk register contributions.
#[derive(Clone, PartialEq, Eq)]
pub struct CacheTable {
  kernel: Kernel,
  chunk_bits: u32,
  entries: Vec<u64>,
}

impl CacheTable {
  /// Build the table for `kernel` with `chunk_bits`-bit chunks.
  ///
  /// `chunk_bits` must be in `1..=MAX_CACHE_BITS`; the engine validates it
  /// before calling.
  #[must_use]
  pub fn build(kernel: Kernel, chunk_bits: u32) -> Self {
    debug_assert!((1..=MAX_CACHE_BITS).contains(&chunk_bits));

    let entries = (0..1u64 << chunk_bits)
      .map(|value| {
        let chunk = (0..chunk_bits).rev().map(|shift| (value >> shift) & 1 == 1);
        kernel.bitwise(0, chunk)
      })
      .collect();

    Self {
      kernel,
      chunk_bits,
      entries,
    }
  }

  /// Chunk size in bits.
  #[inline]
  #[must_use]
  pub const fn chunk_bits(&self) -> u32 {
    self.chunk_bits
  }

  /// Number of entries (`2^chunk_bits`).
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Raw register contributions, indexed by chunk value.
  #[inline]
  #[must_use]
  pub fn entries(&self) -> &[u64] {
    &self.entries
  }

  /// Contribution of chunk `value` as a `width`-bit pattern.
  #[must_use]
  pub fn entry_bits(&self, value: usize) -> Option<Bits> {
    let entry = *self.entries.get(value)?;
    Some(number_to_bits(entry, self.kernel.width() as usize))
  }

  /// Whether this table was built for `kernel`.
  #[inline]
  #[must_use]
  pub fn matches(&self, kernel: Kernel) -> bool {
    self.kernel == kernel
  }
}

impl core::fmt::Debug for CacheTable {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("CacheTable")
      .field("kernel", &self.kernel)
      .field("chunk_bits", &self.chunk_bits)
      .field("len", &self.entries.len())
      .finish()
  }
}
