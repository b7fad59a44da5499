//! Runtime backend configuration (tunables + env overrides).
//!
//! Each [`Crc`](crate::Crc) picks one of three kernels per call:
//!
//! | Backend | Kernel | When |
//! |---------|--------|------|
//! | reference | bit-vector oracle | forced only |
//! | bitwise | `u64` register, one bit per step | short inputs, no cache |
//! | table | `2^n`-entry cache, `n` bits per step | inputs ≥ `bitwise_to_table` bits |
//!
//! Overrides are read once per process:
//!
//! - `GENCRC_FORCE`: `auto`, `reference`, `bitwise` or `table`
//! - `GENCRC_CACHE_BITS`: chunk size of the cache built at construction (1..=16)
//! - `GENCRC_THRESHOLD_BITWISE_TO_TABLE`: minimum input length in bits for the table kernel

use std::sync::OnceLock;

use crate::common::tables::MAX_CACHE_BITS;

/// Forced backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CrcForce {
  /// Pick by input length and cache availability.
  #[default]
  Auto,
  /// Always use the bit-vector reference implementation (slow, obviously correct).
  Reference,
  /// Always use the bitwise register kernel; no cache is built.
  Bitwise,
  /// Use the table kernel whenever a cache is present.
  Table,
}

impl CrcForce {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Reference => "reference",
      Self::Bitwise => "bitwise",
      Self::Table => "table",
    }
  }

  /// Parse an override value. Case-insensitive; accepts a few aliases.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("reference") || value.eq_ignore_ascii_case("oracle") {
      return Some(Self::Reference);
    }
    if value.eq_ignore_ascii_case("bitwise") || value.eq_ignore_ascii_case("portable") {
      return Some(Self::Bitwise);
    }
    if value.eq_ignore_ascii_case("table") || value.eq_ignore_ascii_case("cache") {
      return Some(Self::Table);
    }
    None
  }
}

/// Kernel actually used for a computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
  Reference,
  Bitwise,
  Table,
}

impl Backend {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Reference => "reference",
      Self::Bitwise => "portable/bitwise",
      Self::Table => "portable/table",
    }
  }
}

/// Selection tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CrcTunables {
  /// Chunk size, in bits, of the cache built when an engine is constructed.
  pub cache_bits: u32,
  /// Minimum input length in bits to use the table kernel (otherwise bitwise).
  pub bitwise_to_table: usize,
}

/// Full runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CrcConfig {
  pub force: CrcForce,
  pub tunables: CrcTunables,
}

impl CrcConfig {
  /// Built-in defaults, ignoring the environment.
  pub const DEFAULT: Self = Self {
    force: CrcForce::Auto,
    tunables: CrcTunables {
      cache_bits: 8,
      bitwise_to_table: 32,
    },
  };

  #[must_use]
  pub const fn with_force(mut self, force: CrcForce) -> Self {
    self.force = force;
    self
  }

  /// Replace the chunk size, clamped to `1..=16`.
  #[must_use]
  pub const fn with_cache_bits(mut self, bits: u32) -> Self {
    self.tunables.cache_bits = clamp_cache_bits(bits);
    self
  }

  #[must_use]
  pub const fn with_bitwise_to_table(mut self, bits: usize) -> Self {
    self.tunables.bitwise_to_table = bits;
    self
  }

  /// Whether engines under this configuration build a cache up front.
  #[must_use]
  pub const fn builds_cache(&self) -> bool {
    matches!(self.force, CrcForce::Auto | CrcForce::Table)
  }
}

impl Default for CrcConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: CrcForce,
  cache_bits: Option<u32>,
  bitwise_to_table: Option<usize>,
}

fn read_env_overrides() -> Overrides {
  fn var(name: &str) -> Option<String> {
    let value = std::env::var(name).ok()?;
    let value = value.trim();
    if value.is_empty() {
      None
    } else {
      Some(value.to_owned())
    }
  }

  fn parse_force(name: &str) -> Option<CrcForce> {
    let value = var(name)?;
    let force = CrcForce::parse(&value);
    if force.is_none() {
      log::warn!("ignoring unrecognised {name}={value:?}");
    }
    force
  }

  fn parse_number<T: core::str::FromStr>(name: &str) -> Option<T> {
    let value = var(name)?;
    let parsed = value.parse::<T>().ok();
    if parsed.is_none() {
      log::warn!("ignoring non-numeric {name}={value:?}");
    }
    parsed
  }

  Overrides {
    force: parse_force("GENCRC_FORCE").unwrap_or(CrcForce::Auto),
    cache_bits: parse_number("GENCRC_CACHE_BITS"),
    bitwise_to_table: parse_number("GENCRC_THRESHOLD_BITWISE_TO_TABLE"),
  }
}

const fn clamp_cache_bits(bits: u32) -> u32 {
  if bits == 0 {
    1
  } else if bits > MAX_CACHE_BITS {
    MAX_CACHE_BITS
  } else {
    bits
  }
}

fn config(ov: Overrides) -> CrcConfig {
  let mut cfg = CrcConfig::DEFAULT.with_force(ov.force);
  if let Some(bits) = ov.cache_bits {
    cfg = cfg.with_cache_bits(bits);
  }
  if let Some(bits) = ov.bitwise_to_table {
    cfg = cfg.with_bitwise_to_table(bits);
  }
  cfg
}

/// Cached process-wide configuration.
#[must_use]
pub fn get() -> CrcConfig {
  static CACHED: OnceLock<CrcConfig> = OnceLock::new();
  *CACHED.get_or_init(|| {
    let cfg = config(read_env_overrides());
    log::debug!(
      "gencrc config: force={} cache_bits={} bitwise_to_table={}",
      cfg.force.as_str(),
      cfg.tunables.cache_bits,
      cfg.tunables.bitwise_to_table
    );
    cfg
  })
}
