//! Known-answer tests through the public API.

use gencrc::{
  bit2hex, find_data_range, guess_parameters, hex2bit, registry, str2arr, str2bit, Backend, Crc, CrcConfig, CrcForce,
  CrcParams, WSP_CRC8_POLYNOMIAL,
};

/// Captured Wireless Short Packet frames. The checksummed payload sits
/// between a 4-bit preamble tail and 8 trailing bits.
const WSP_FRAMES: [(&str, &str); 3] = [
  (
    "010101010110100111011010111011101110111011100110001011101010001011101110110110101101",
    "78",
  ),
  (
    "010101010110101001101110111011101110111011100110001011101010001011101110110111100101",
    "c9",
  ),
  (
    "010101010110100111010010111011101110111011100110001011101010001011101110110110100101",
    "f2",
  ),
];

const SCENARIOS: [&str; 3] = [
  "101001001010101010101011101111111000000000000111101010011101011",
  "101001001010101101111010110111101010010110111010",
  "00000000000000000000000000000000100000000000000000000000000000000001111111111111",
];

const CHECK: &str = "313233343536373839";

fn with_force(params: CrcParams, force: CrcForce) -> Crc {
  Crc::with_config(params, CrcConfig::DEFAULT.with_force(force).with_bitwise_to_table(0)).unwrap()
}

#[test]
fn wsp_crc8_frames() {
  let crc = Crc::new(CrcParams::new(WSP_CRC8_POLYNOMIAL.bits())).unwrap();
  for (frame, expected) in WSP_FRAMES {
    let payload = str2bit(&frame[4..frame.len() - 8]).unwrap();
    assert_eq!(payload.len(), 72);
    assert_eq!(bit2hex(&crc.crc(&payload)), expected, "{frame}");
  }
}

#[test]
fn crc8_ccitt_messages() {
  let crc = Crc::from_preset("8_ccitt").unwrap();
  for (message, expected) in [("aabbcc", "7d"), ("abcdee", "24"), ("dacafe", "33")] {
    assert_eq!(bit2hex(&crc.crc(&hex2bit(message).unwrap())), expected, "{message}");
  }
}

#[test]
fn catalogue_check_values() {
  let check = hex2bit(CHECK).unwrap();
  let cases = [
    (CrcParams::preset("16_ccitt").unwrap(), "31c3"),
    (CrcParams::preset("16_ccitt").unwrap().with_start_fill(true), "29b1"),
    (
      CrcParams::preset("16_standard").unwrap().with_lsb_first(true).with_reverse_all(true),
      "bb3d",
    ),
    (
      CrcParams::preset("32_standard")
        .unwrap()
        .with_start_fill(true)
        .with_final_xor_fill(true)
        .with_lsb_first(true)
        .with_reverse_all(true),
      "cbf43926",
    ),
  ];

  for (params, expected) in cases {
    for force in [CrcForce::Reference, CrcForce::Bitwise, CrcForce::Table] {
      let crc = with_force(params.clone(), force);
      assert_eq!(bit2hex(&crc.crc(&check)), expected, "{} via {}", params, force.as_str());
    }
  }
}

#[test]
fn multiple_scenarios_match_reference() {
  let crc = Crc::from_preset("16_standard").unwrap();
  for scenario in SCENARIOS {
    let bits = str2bit(scenario).unwrap();
    assert_eq!(crc.crc(&bits), crc.reference_crc(&bits), "{scenario}");
  }
}

#[test]
fn adaptive_crc_extends_a_message() {
  let mut crc = Crc::from_preset("16_ccitt").unwrap();

  let crc1 = crc.crc(&str2arr("10101010101010").unwrap());
  let crc2 = crc.crc(&str2arr("1010101010101001").unwrap());

  crc.set_start_value(&crc1).unwrap();
  assert_eq!(crc.crc(&str2arr("01").unwrap()), crc2);
}

#[test]
fn cache_of_eight_bits_has_256_entries() {
  let mut crc = Crc::from_preset("16_standard").unwrap();
  assert_eq!(crc.calculate_cache(8).unwrap().len(), 256);
  assert_eq!(crc.cache().map(|cache| cache.len()), Some(256));
}

#[test]
fn reverse_polynomial_matches_reference() {
  let mut crc = Crc::from_preset("16_standard").unwrap();
  let bits = str2bit(SCENARIOS[0]).unwrap();
  let normal = crc.crc(&bits);

  crc.set_reverse_polynomial(true);
  assert_eq!(crc.crc(&bits), crc.reference_crc(&bits));
  assert_ne!(crc.crc(&bits), normal);
}

#[test]
fn every_preset_agrees_across_backends() {
  let bits = str2bit(SCENARIOS[2]).unwrap();
  for preset in registry::presets() {
    for flags in 0..16u8 {
      let params = CrcParams::new(preset.bits()).with_start_fill(true).with_flags(flags);
      let reference = with_force(params.clone(), CrcForce::Reference);
      let table = with_force(params, CrcForce::Table);
      assert_eq!(table.selected_backend(bits.len()), Backend::Table);
      assert_eq!(table.crc(&bits), reference.crc(&bits), "{} flags {flags:04b}", preset.name);
    }
  }
}

#[test]
fn detection_on_wsp_frames() {
  let crc = Crc::new(CrcParams::new(WSP_CRC8_POLYNOMIAL.bits())).unwrap();
  for (frame, expected) in WSP_FRAMES {
    let payload = str2bit(&frame[4..frame.len() - 8]).unwrap();
    let expected = hex2bit(expected).unwrap();

    let guessed = guess_parameters(&payload, &expected).unwrap();
    assert_eq!(Crc::new(guessed).unwrap().crc(&payload), expected);

    let mut framed = payload.clone();
    framed.extend_from_bitslice(&expected);
    let (start, end) = find_data_range(&crc, &framed, 0).unwrap();
    assert_eq!(crc.crc(&framed[start..end])[..], framed[end..end + 8]);
  }
}
