//! Fuzz target for the 32-bit families.
//!
//! Tests that:
//! - Incremental updates produce the same result as one-shot
//! - Resuming from a finalized value produces correct results

#![no_main]

use arbitrary::Arbitrary;
use crcfold::{Checksum, Crc32, Crc32C};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  split_point: usize,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let split = input.split_point.strict_rem(data.len().strict_add(1));

  test_crc32(data, split);
  test_crc32c(data, split);
});

fn test_crc32(data: &[u8], split: usize) {
  let oneshot = Crc32::checksum(data);

  let (a, b) = data.split_at(split);
  let mut hasher = Crc32::new();
  hasher.update(a);
  hasher.update(b);
  assert_eq!(hasher.finalize(), oneshot, "crc32 incremental mismatch");

  let mut resumed = Crc32::with_initial(Crc32::checksum(a));
  resumed.update(b);
  assert_eq!(resumed.finalize(), oneshot, "crc32 resume mismatch");
}

fn test_crc32c(data: &[u8], split: usize) {
  let oneshot = Crc32C::checksum(data);

  let (a, b) = data.split_at(split);
  let mut hasher = Crc32C::new();
  hasher.update(a);
  hasher.update(b);
  assert_eq!(hasher.finalize(), oneshot, "crc32c incremental mismatch");

  let mut resumed = Crc32C::with_initial(Crc32C::checksum(a));
  resumed.update(b);
  assert_eq!(resumed.finalize(), oneshot, "crc32c resume mismatch");
}
