//! Differential properties for the 32-bit families against `crc-fast`.

use crc_fast::CrcAlgorithm;
use proptest::prelude::*;

use super::*;
use crate::Checksum;

proptest! {
  #[test]
  fn crc32_matches_crc_fast(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let ours = Crc32::checksum(&data);
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32IsoHdlc, &data) as u32;
    prop_assert_eq!(ours, reference);
  }

  #[test]
  fn crc32c_matches_crc_fast(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let ours = Crc32C::checksum(&data);
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, &data) as u32;
    prop_assert_eq!(ours, reference);
  }

  #[test]
  fn crc32_streaming_matches_crc_fast(
    data in proptest::collection::vec(any::<u8>(), 0..=4096),
    chunk in 1usize..=257
  ) {
    let mut ours = Crc32::new();
    let mut reference = crc_fast::Digest::new(CrcAlgorithm::Crc32IsoHdlc);

    for part in data.chunks(chunk) {
      ours.update(part);
      reference.update(part);
    }

    prop_assert_eq!(ours.finalize(), reference.finalize() as u32);
  }

  #[test]
  fn crc32_split_update_matches_oneshot(
    data in proptest::collection::vec(any::<u8>(), 0..=4096),
    split in any::<usize>()
  ) {
    let split = split.strict_rem(data.len().strict_add(1));
    let (a, b) = data.split_at(split);

    let mut hasher = Crc32::new();
    hasher.update(a);
    hasher.update(b);
    prop_assert_eq!(hasher.finalize(), Crc32::checksum(&data));
  }

  #[test]
  fn crc32c_resume_matches_oneshot(
    data in proptest::collection::vec(any::<u8>(), 0..=4096),
    split in any::<usize>()
  ) {
    let split = split.strict_rem(data.len().strict_add(1));
    let (a, b) = data.split_at(split);

    let mut resumed = Crc32C::with_initial(Crc32C::checksum(a));
    resumed.update(b);
    prop_assert_eq!(resumed.finalize(), Crc32C::checksum(&data));
  }
}
