//! Arbitrary sequences of digest updates must match one-shot computation.

#![no_main]

use arbitrary::Arbitrary;
use gencrc::{Bits, Crc, CrcParams};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  preset: u8,
  flags: u8,
  data: Vec<bool>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let presets = gencrc::registry::presets();
  let preset = &presets[usize::from(input.preset) % presets.len()];
  let params = CrcParams::new(preset.bits()).with_flags(input.flags & 0xF);
  let Ok(crc) = Crc::new(params) else {
    return;
  };
  let data: Bits = input.data.into_iter().collect();
  let expected = crc.crc(&data);

  let mut digest = crc.digest();
  let mut offset = 0;
  let mut chunk_idx = 0;
  while offset < data.len() {
    let chunk_size = if input.chunk_sizes.is_empty() {
      1
    } else {
      usize::from(input.chunk_sizes[chunk_idx % input.chunk_sizes.len()]).max(1)
    };
    let end = (offset + chunk_size).min(data.len());
    digest.update(&data[offset..end]);
    offset = end;
    chunk_idx += 1;
  }

  assert_eq!(digest.finalize(), expected, "{} streaming mismatch", preset.name);
  assert_eq!(digest.intermediate(), crc.crc_intermediate(&data));
});
