//! Bit sequences and their textual forms.
//!
//! Protocol decoders hand the CRC engine raw, frequently non byte-aligned bit
//! sequences, and users type them back in as either `0`/`1` strings or hex.
//! This crate owns the shared sequence types and the conversions between
//! them.
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`str2bit`] | `"0110"` | 4 bits |
//! | [`hex2bit`] / [`str2arr`] | `"a5"` | 8 bits, MSB first per nibble |
//! | [`bit2hex`] | bits | lowercase hex, last nibble zero-padded |
//! | [`bit2str`] | bits | `"0110"` |
//! | [`number_to_bits`] / [`bits_to_number`] | `u64` | MSB-first bits |
//!
//! # Example
//!
//! ```
//! use bitstr::{bit2hex, hex2bit, str2bit};
//!
//! let bits = hex2bit("aabbcc").unwrap();
//! assert_eq!(bits.len(), 24);
//! assert_eq!(bit2hex(&bits), "aabbcc");
//!
//! // Not nibble-aligned: the tail is padded with zero bits.
//! assert_eq!(bit2hex(&str2bit("111").unwrap()), "e");
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec};

mod convert;
pub mod error;

pub use bitvec;
pub use convert::{bit2hex, bit2str, bits_to_number, hex2bit, number_to_bits, str2arr, str2bit};
pub use error::ParseError;

/// Owned, growable bit sequence. Index 0 is the first bit on the wire.
pub type Bits = BitVec<u8, Msb0>;

/// Borrowed view of a [`Bits`] sequence.
pub type BitStr = BitSlice<u8, Msb0>;
