//! Named polynomial presets.
//!
//! A fixed table of the generator polynomials the message view offers by
//! name. Polynomials are stored without the implicit leading coefficient,
//! MSB first (normal, non-reflected notation).
//!
//! | Name | Polynomial | Width | Notes |
//! |------|------------|-------|-------|
//! | `8_standard` | 0xD5 | 8 | DVB-S2 |
//! | `8_ccitt` | 0x07 | 8 | ATM HEC, SMBus PEC |
//! | `8_sae_j1850` | 0x1D | 8 | automotive |
//! | `16_standard` | 0x8005 | 16 | IBM/ARC, Modbus, USB |
//! | `16_ccitt` | 0x1021 | 16 | X.25, HDLC, Bluetooth |
//! | `16_dnp` | 0x3D65 | 16 | DNP3, M-Bus |
//! | `32_standard` | 0x04C11DB7 | 32 | Ethernet, gzip |
//! | `32_castagnoli` | 0x1EDC6F41 | 32 | iSCSI, SCTP |
//! | `wsp_crc8` | 0x07 | 8 | Wireless Short Packet checksum |

use bitstr::{number_to_bits, Bits};

use crate::ConfigError;

/// A named `(polynomial, width)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Preset {
  /// Registry key.
  pub name: &'static str,
  /// Generator polynomial without the implicit high bit.
  pub polynomial: u64,
  /// Width in bits.
  pub width: u8,
}

impl Preset {
  /// The polynomial as an MSB-first bit sequence of `width` bits.
  #[must_use]
  pub fn bits(&self) -> Bits {
    number_to_bits(self.polynomial, usize::from(self.width))
  }
}

/// Preset used when no polynomial is given.
pub const DEFAULT_POLYNOMIAL: &str = "16_standard";

/// CRC-8 polynomial of the Wireless Short Packet checksum (x^8 + x^2 + x + 1).
pub const WSP_CRC8_POLYNOMIAL: Preset = Preset {
  name: "wsp_crc8",
  polynomial: 0x07,
  width: 8,
};

static PRESETS: [Preset; 9] = [
  Preset {
    name: "8_standard",
    polynomial: 0xD5,
    width: 8,
  },
  Preset {
    name: "8_ccitt",
    polynomial: 0x07,
    width: 8,
  },
  Preset {
    name: "8_sae_j1850",
    polynomial: 0x1D,
    width: 8,
  },
  Preset {
    name: "16_standard",
    polynomial: 0x8005,
    width: 16,
  },
  Preset {
    name: "16_ccitt",
    polynomial: 0x1021,
    width: 16,
  },
  Preset {
    name: "16_dnp",
    polynomial: 0x3D65,
    width: 16,
  },
  Preset {
    name: "32_standard",
    polynomial: 0x04C1_1DB7,
    width: 32,
  },
  Preset {
    name: "32_castagnoli",
    polynomial: 0x1EDC_6F41,
    width: 32,
  },
  WSP_CRC8_POLYNOMIAL,
];

/// Look up a preset by name.
///
/// # Errors
///
/// [`ConfigError::UnknownPolynomial`] if `name` is not registered.
pub fn lookup(name: &str) -> Result<&'static Preset, ConfigError> {
  PRESETS
    .iter()
    .find(|preset| preset.name == name)
    .ok_or_else(|| ConfigError::UnknownPolynomial(name.to_owned()))
}

/// All presets, in registry order.
#[must_use]
pub fn presets() -> &'static [Preset] {
  &PRESETS
}

#[cfg(test)]
mod tests {
  use bitstr::bit2hex;

  use super::*;

  #[test]
  fn lookup_known_presets() {
    let ccitt = lookup("8_ccitt").unwrap();
    assert_eq!((ccitt.polynomial, ccitt.width), (0x07, 8));
    assert_eq!(bit2hex(&ccitt.bits()), "07");

    let standard = lookup(DEFAULT_POLYNOMIAL).unwrap();
    assert_eq!((standard.polynomial, standard.width), (0x8005, 16));

    assert_eq!(lookup("wsp_crc8").unwrap(), &WSP_CRC8_POLYNOMIAL);
  }

  #[test]
  fn lookup_unknown_preset() {
    assert_eq!(
      lookup("17_imaginary"),
      Err(ConfigError::UnknownPolynomial("17_imaginary".into()))
    );
    assert!(lookup("8_CCITT").is_err());
  }

  #[test]
  fn names_are_unique_and_polynomials_fit_their_width() {
    for (i, a) in presets().iter().enumerate() {
      assert!(a.width >= 1 && a.width <= 64);
      assert!(a.width == 64 || a.polynomial >> a.width == 0, "{} overflows its width", a.name);
      assert_eq!(a.bits().len(), usize::from(a.width));
      for b in presets().iter().skip(i + 1) {
        assert_ne!(a.name, b.name);
      }
    }
  }
}
