//! Configurable bit-level CRC engine.
//!
//! Protocol analysers meet checksums of arbitrary width over messages that
//! rarely end on a byte boundary. This crate computes CRCs of width 1 to 64
//! over bit sequences under every combination of the four bit conventions
//! found on the air (see [`CrcParams`]).
//!
//! # Quick Start
//!
//! ```
//! use gencrc::{bit2hex, hex2bit, Crc};
//!
//! let crc = Crc::from_preset("8_ccitt").unwrap();
//! assert_eq!(bit2hex(&crc.crc(&hex2bit("aabbcc").unwrap())), "7d");
//! ```
//!
//! # Kernels
//!
//! | Kernel | Cost per input bit | Used for |
//! |--------|--------------------|----------|
//! | [`reference_crc`] | O(width) on a bit vector | oracle, tests, detection checks |
//! | bitwise | one shift and XOR | short inputs, no cache |
//! | table | one lookup per `n` bits | inputs ≥ `bitwise_to_table` bits |
//!
//! All kernels agree for every configuration. Which one runs is decided per
//! call (see [`config`] and [`Crc::selected_backend`]).
//!
//! # Resuming
//!
//! [`Crc::crc_intermediate`] returns the raw register. Setting it as the start
//! value and continuing over the remaining input gives the same CRC as one
//! pass, which lets a caller extend a message without recomputing its
//! prefix. [`Digest`] packages the same idea as a streaming API.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod common;
pub mod config;
pub mod detect;
mod digest;
mod engine;
pub mod error;
mod params;
pub mod registry;

pub use bitstr::{bit2hex, bit2str, bits_to_number, hex2bit, number_to_bits, str2arr, str2bit, BitStr, Bits, ParseError};
pub use common::{
  reference::{reference_crc, reference_register},
  tables::CacheTable,
};
pub use config::{Backend, CrcConfig, CrcForce};
pub use detect::{find_data_range, guess_parameters};
pub use digest::Digest;
pub use engine::Crc;
pub use error::{ConfigError, Error};
pub use params::{CrcParams, MAX_WIDTH};
pub use registry::{Preset, DEFAULT_POLYNOMIAL, WSP_CRC8_POLYNOMIAL};
