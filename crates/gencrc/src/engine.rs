//! The configurable CRC engine.
//!
//! [`Crc`] owns a validated [`CrcParams`], the register geometry derived from
//! it, and an optional cache table. Two pieces of state are mutable:
//!
//! - `start_value`, set by the caller to resume a computation
//! - the cache, rebuilt whenever the geometry it was built for changes
//!
//! # Resuming
//!
//! [`Crc::crc_intermediate`] returns the register before the final XOR and
//! output reordering. Feeding it back through [`Crc::set_start_value`] and
//! continuing over the rest of the message yields the same CRC as a single
//! pass:
//!
//! ```
//! use gencrc::{hex2bit, Crc};
//!
//! let mut crc = Crc::from_preset("16_ccitt").unwrap();
//! let message = hex2bit("1234567890").unwrap();
//! let full = crc.crc(&message);
//!
//! let (seen, appended) = message.split_at(24);
//! let register = crc.crc_intermediate(seen);
//! crc.set_start_value(&register).unwrap();
//! assert_eq!(crc.crc(appended), full);
//! ```

use core::fmt;

use bitstr::{bit2hex, bits_to_number, hex2bit, number_to_bits, BitStr, Bits};

use crate::{
  common::{
    portable::{swap_byte_order, wire_order, Kernel},
    reference,
    tables::{CacheTable, MAX_CACHE_BITS},
  },
  config::{self, Backend, CrcConfig, CrcForce},
  digest::Digest,
  params::{check_len, reflect_bits, MAX_WIDTH},
  ConfigError, CrcParams, Error,
};

/// Configurable CRC engine.
#[derive(Clone, Debug)]
pub struct Crc {
  params: CrcParams,
  kernel: Kernel,
  start: u64,
  final_xor: u64,
  cache: Option<CacheTable>,
  config: CrcConfig,
}

impl Crc {
  /// Validate `params` and build an engine using the process-wide
  /// [`config::get`] configuration.
  ///
  /// # Errors
  ///
  /// Whatever [`CrcParams::validate`] reports.
  pub fn new(params: CrcParams) -> Result<Self, ConfigError> {
    Self::with_config(params, config::get())
  }

  /// Like [`new`](Self::new) with an explicit runtime configuration.
  ///
  /// # Errors
  ///
  /// Whatever [`CrcParams::validate`] reports.
  pub fn with_config(params: CrcParams, config: CrcConfig) -> Result<Self, ConfigError> {
    params.validate()?;

    let kernel = kernel_for(&params);
    let mut crc = Self {
      start: bits_to_number(&params.start_value),
      final_xor: bits_to_number(&params.final_xor),
      kernel,
      params,
      cache: None,
      config,
    };
    if config.builds_cache() {
      crc.cache = Some(crc.build_cache(config.tunables.cache_bits));
    }
    Ok(crc)
  }

  /// Engine for a registry preset with zero start value and final XOR.
  ///
  /// # Errors
  ///
  /// [`ConfigError::UnknownPolynomial`] if `name` is not registered.
  pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
    Self::new(CrcParams::preset(name)?)
  }

  #[inline]
  #[must_use]
  pub fn params(&self) -> &CrcParams {
    &self.params
  }

  #[must_use]
  pub fn into_params(self) -> CrcParams {
    self.params
  }

  #[inline]
  #[must_use]
  pub const fn config(&self) -> CrcConfig {
    self.config
  }

  /// CRC width in bits.
  #[inline]
  #[must_use]
  pub fn width(&self) -> usize {
    self.params.width()
  }

  #[inline]
  #[must_use]
  pub fn polynomial(&self) -> &BitStr {
    &self.params.polynomial
  }

  /// Polynomial as hex, without the implicit leading coefficient.
  #[must_use]
  pub fn polynomial_as_hex(&self) -> String {
    bit2hex(&self.params.polynomial)
  }

  #[inline]
  #[must_use]
  pub fn start_value(&self) -> &BitStr {
    &self.params.start_value
  }

  #[inline]
  #[must_use]
  pub fn final_xor(&self) -> &BitStr {
    &self.params.final_xor
  }

  /// Replace the start value, typically with a register returned by
  /// [`crc_intermediate`](Self::crc_intermediate).
  ///
  /// # Errors
  ///
  /// [`ConfigError::LengthMismatch`] if `start_value` is not `width` bits.
  pub fn set_start_value(&mut self, start_value: &BitStr) -> Result<(), ConfigError> {
    check_len("start_value", self.width(), start_value)?;
    self.params.start_value = start_value.to_bitvec();
    self.start = bits_to_number(start_value);
    Ok(())
  }

  /// # Errors
  ///
  /// [`ConfigError::LengthMismatch`] if `final_xor` is not `width` bits.
  pub fn set_final_xor(&mut self, final_xor: &BitStr) -> Result<(), ConfigError> {
    check_len("final_xor", self.width(), final_xor)?;
    self.params.final_xor = final_xor.to_bitvec();
    self.final_xor = bits_to_number(final_xor);
    Ok(())
  }

  /// Replace the polynomial.
  ///
  /// When the width changes, start value and final XOR are reset to zeros of
  /// the new width. An existing cache is rebuilt with the same chunk size.
  ///
  /// # Errors
  ///
  /// [`ConfigError::UnsupportedWidth`] if `polynomial` is empty or wider than 64 bits.
  pub fn set_polynomial(&mut self, polynomial: &BitStr) -> Result<(), ConfigError> {
    let width = polynomial.len();
    if width == 0 || width > MAX_WIDTH {
      return Err(ConfigError::UnsupportedWidth(width));
    }
    if width != self.width() {
      self.params.start_value = Bits::repeat(false, width);
      self.params.final_xor = Bits::repeat(false, width);
      self.start = 0;
      self.final_xor = 0;
    }
    self.params.polynomial = polynomial.to_bitvec();
    self.reconfigure();
    Ok(())
  }

  /// Replace the polynomial from hex (without the implicit leading
  /// coefficient; four bits per digit).
  ///
  /// # Errors
  ///
  /// [`Error::Parse`] for non-hex input, otherwise as [`set_polynomial`](Self::set_polynomial).
  pub fn set_polynomial_from_hex(&mut self, hex: &str) -> Result<(), Error> {
    let polynomial = hex2bit(hex)?;
    self.set_polynomial(&polynomial)?;
    Ok(())
  }

  pub fn set_reverse_polynomial(&mut self, on: bool) {
    self.params.reverse_polynomial = on;
    self.reconfigure();
  }

  pub fn set_reverse_all(&mut self, on: bool) {
    self.params.reverse_all = on;
  }

  pub fn set_lsb_first(&mut self, on: bool) {
    self.params.lsb_first = on;
  }

  pub fn set_little_endian(&mut self, on: bool) {
    self.params.little_endian = on;
  }

  /// Build (or rebuild) the cache with `bits`-bit chunks.
  ///
  /// # Errors
  ///
  /// [`ConfigError::InvalidCacheBits`] unless `1 <= bits <= 16`.
  pub fn calculate_cache(&mut self, bits: u32) -> Result<&CacheTable, ConfigError> {
    if !(1..=MAX_CACHE_BITS).contains(&bits) {
      return Err(ConfigError::InvalidCacheBits(bits));
    }
    let table = self.build_cache(bits);
    Ok(&*self.cache.insert(table))
  }

  /// The cache, if one exists for the current configuration.
  #[must_use]
  pub fn cache(&self) -> Option<&CacheTable> {
    self.cache.as_ref().filter(|cache| cache.matches(self.kernel))
  }

  pub fn clear_cache(&mut self) {
    self.cache = None;
  }

  /// Kernel a call over `len` input bits would use.
  #[must_use]
  pub fn selected_backend(&self, len: usize) -> Backend {
    let cached = self.cache().is_some();
    match self.config.force {
      CrcForce::Reference => Backend::Reference,
      CrcForce::Bitwise => Backend::Bitwise,
      CrcForce::Table if cached => Backend::Table,
      CrcForce::Auto if cached && len >= self.config.tunables.bitwise_to_table => Backend::Table,
      CrcForce::Table | CrcForce::Auto => Backend::Bitwise,
    }
  }

  /// CRC of `data`: register update, final XOR, then `reverse_all` and
  /// `little_endian`.
  #[must_use]
  pub fn crc(&self, data: &BitStr) -> Bits {
    let register = self.advance(self.start, data);
    number_to_bits(self.finalize_register(register), self.width())
  }

  /// Register after consuming `data`, before the final XOR and output
  /// reordering. Suitable for [`set_start_value`](Self::set_start_value).
  #[must_use]
  pub fn crc_intermediate(&self, data: &BitStr) -> Bits {
    number_to_bits(self.advance(self.start, data), self.width())
  }

  /// Apply final XOR and output reordering to a register produced by
  /// [`crc_intermediate`](Self::crc_intermediate).
  ///
  /// Only the last `width` bits of `register` are used.
  #[must_use]
  pub fn finalize(&self, register: &BitStr) -> Bits {
    let register = bits_to_number(register) & self.kernel.mask();
    number_to_bits(self.finalize_register(register), self.width())
  }

  /// CRC of `data` computed by the bit-vector reference implementation.
  ///
  /// Never touches the cache or the integer register.
  #[must_use]
  pub fn reference_crc(&self, data: &BitStr) -> Bits {
    reference::crc_bits(&self.params, &self.params.start_value, data)
  }

  /// Streaming computation starting from the current start value.
  #[must_use]
  pub fn digest(&self) -> Digest<'_> {
    Digest::new(self)
  }

  #[inline]
  pub(crate) const fn start_register(&self) -> u64 {
    self.start
  }

  /// Advance `register` over `data` with the selected kernel.
  pub(crate) fn advance(&self, register: u64, data: &BitStr) -> u64 {
    let backend = self.selected_backend(data.len());
    log::trace!("crc over {} bits via {}", data.len(), backend.as_str());

    match (backend, self.cache()) {
      (Backend::Reference, _) => {
        let start = number_to_bits(register, self.width());
        let bits = reference::register_bits(&self.params, &start, data);
        bits.into_iter().fold(0u64, |acc, bit| (acc << 1) | u64::from(bit))
      }
      (Backend::Table, Some(cache)) => {
        let ordered = wire_order(data, self.params.lsb_first);
        self.kernel.table(register, &ordered, cache)
      }
      (Backend::Bitwise | Backend::Table, _) => {
        let ordered = wire_order(data, self.params.lsb_first);
        self.kernel.bitwise(register, ordered.iter().by_vals())
      }
    }
  }

  pub(crate) fn finalize_register(&self, register: u64) -> u64 {
    let width = self.kernel.width();
    let mut value = register ^ self.final_xor;
    if self.params.reverse_all {
      value = reflect_bits(value, width as usize);
    }
    if self.params.little_endian {
      value = swap_byte_order(value, width);
    }
    value
  }

  fn build_cache(&self, bits: u32) -> CacheTable {
    let table = CacheTable::build(self.kernel, bits);
    log::debug!(
      "built {}-entry cache for {} ({} bits/lookup)",
      table.len(),
      self.params,
      bits
    );
    table
  }

  fn reconfigure(&mut self) {
    self.kernel = kernel_for(&self.params);
    let stale = self.cache.as_ref().filter(|cache| !cache.matches(self.kernel));
    if let Some(bits) = stale.map(CacheTable::chunk_bits) {
      log::debug!("polynomial changed; rebuilding cache");
      self.cache = Some(self.build_cache(bits));
    }
  }
}

impl TryFrom<CrcParams> for Crc {
  type Error = ConfigError;

  fn try_from(params: CrcParams) -> Result<Self, Self::Error> {
    Self::new(params)
  }
}

/// Formats the generator polynomial.
impl fmt::Display for Crc {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.params, f)
  }
}

fn kernel_for(params: &CrcParams) -> Kernel {
  Kernel::new(params.width(), params.effective_polynomial())
}
