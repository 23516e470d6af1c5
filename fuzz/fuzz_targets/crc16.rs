//! Fuzz target for the 16-bit families.
//!
//! Tests that:
//! - Incremental updates produce the same result as one-shot
//! - Resuming from a finalized value produces correct results
//! - Arbitrary chunkings of the stream converge on the one-shot value

#![no_main]

use arbitrary::Arbitrary;
use crcfold::{Checksum, Crc16Arc, Crc16Kermit};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  split_point: usize,
  chunk_sizes: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let split = input.split_point.strict_rem(data.len().strict_add(1));

  test_arc(data, split);
  test_kermit(data, split);
  test_streaming_arc(data, &input.chunk_sizes);
});

fn test_arc(data: &[u8], split: usize) {
  let oneshot = Crc16Arc::checksum(data);

  let (a, b) = data.split_at(split);
  let mut hasher = Crc16Arc::new();
  hasher.update(a);
  hasher.update(b);
  assert_eq!(hasher.finalize(), oneshot, "crc16/arc incremental mismatch");

  let mut resumed = Crc16Arc::with_initial(Crc16Arc::checksum(a));
  resumed.update(b);
  assert_eq!(resumed.finalize(), oneshot, "crc16/arc resume mismatch");
}

fn test_kermit(data: &[u8], split: usize) {
  let oneshot = Crc16Kermit::checksum(data);

  let (a, b) = data.split_at(split);
  let mut hasher = Crc16Kermit::new();
  hasher.update(a);
  hasher.update(b);
  assert_eq!(hasher.finalize(), oneshot, "crc16/kermit incremental mismatch");

  let mut resumed = Crc16Kermit::with_initial(Crc16Kermit::checksum(a));
  resumed.update(b);
  assert_eq!(resumed.finalize(), oneshot, "crc16/kermit resume mismatch");
}

fn test_streaming_arc(data: &[u8], chunk_sizes: &[usize]) {
  let expected = Crc16Arc::checksum(data);

  let mut hasher = Crc16Arc::new();
  let mut offset = 0;
  let mut chunk_idx = 0;

  while offset < data.len() {
    let chunk_size = if chunk_sizes.is_empty() {
      1
    } else {
      let idx = chunk_idx.strict_rem(chunk_sizes.len());
      chunk_sizes[idx].strict_rem(256).max(1)
    };

    let end = offset.strict_add(chunk_size).min(data.len());
    hasher.update(&data[offset..end]);
    offset = end;
    chunk_idx = chunk_idx.strict_add(1);
  }

  assert_eq!(hasher.finalize(), expected, "crc16/arc streaming mismatch");
}
