//! Differential fuzzing of the bitwise and table kernels against the
//! bit-vector reference.

#![no_main]

use arbitrary::Arbitrary;
use gencrc::{number_to_bits, reference_crc, Bits, Crc, CrcConfig, CrcForce, CrcParams};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  width: u8,
  polynomial: u64,
  start_value: u64,
  final_xor: u64,
  flags: u8,
  cache_bits: u8,
  data: Vec<bool>,
}

fuzz_target!(|input: Input| {
  let width = usize::from(input.width % 64) + 1;
  let params = CrcParams::new(number_to_bits(input.polynomial, width))
    .with_start_value(number_to_bits(input.start_value, width))
    .with_final_xor(number_to_bits(input.final_xor, width))
    .with_flags(input.flags & 0xF);
  let data: Bits = input.data.into_iter().collect();

  let Ok(expected) = reference_crc(&params, &data) else {
    return;
  };

  for force in [CrcForce::Bitwise, CrcForce::Table] {
    let config = CrcConfig::DEFAULT.with_force(force).with_bitwise_to_table(0);
    let Ok(mut crc) = Crc::with_config(params.clone(), config) else {
      return;
    };
    if crc.calculate_cache(u32::from(input.cache_bits % 12) + 1).is_err() {
      return;
    }
    assert_eq!(
      crc.crc(&data),
      expected,
      "{} mismatch: {params:?} len={}",
      force.as_str(),
      data.len()
    );
  }
});
