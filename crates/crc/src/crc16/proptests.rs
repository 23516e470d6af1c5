//! Differential properties for the 16-bit families against `crc-fast`.

use crc_fast::CrcAlgorithm;
use proptest::prelude::*;

use super::*;
use crate::Checksum;

proptest! {
  #[test]
  fn crc16_arc_matches_crc_fast(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let ours = Crc16Arc::checksum(&data);
    let reference = crc_fast::checksum(CrcAlgorithm::Crc16Arc, &data) as u16;
    prop_assert_eq!(ours, reference);
  }

  // CRC-16/IBM-SDLC is the Kermit generator with the X.25 presets, so the
  // oracle covers the lifted Kermit schedule end to end.
  #[test]
  fn crc16_kermit_tracks_the_ibm_sdlc_oracle(
    data in proptest::collection::vec(any::<u8>(), 0..=4096)
  ) {
    let mut hasher = Crc16Kermit::with_initial(0xFFFF);
    hasher.update(&data);
    let ours = hasher.finalize() ^ 0xFFFF;

    let reference = crc_fast::checksum(CrcAlgorithm::Crc16IbmSdlc, &data) as u16;
    prop_assert_eq!(ours, reference);
  }

  #[test]
  fn crc16_arc_streaming_matches_crc_fast(
    data in proptest::collection::vec(any::<u8>(), 0..=4096),
    chunk in 1usize..=257
  ) {
    let mut ours = Crc16Arc::new();
    let mut reference = crc_fast::Digest::new(CrcAlgorithm::Crc16Arc);

    for part in data.chunks(chunk) {
      ours.update(part);
      reference.update(part);
    }

    prop_assert_eq!(ours.finalize(), reference.finalize() as u16);
  }

  #[test]
  fn crc16_kermit_split_update_matches_oneshot(
    data in proptest::collection::vec(any::<u8>(), 0..=4096),
    split in any::<usize>()
  ) {
    let split = split.strict_rem(data.len().strict_add(1));
    let (a, b) = data.split_at(split);

    let mut hasher = Crc16Kermit::new();
    hasher.update(a);
    hasher.update(b);
    prop_assert_eq!(hasher.finalize(), Crc16Kermit::checksum(&data));
  }
}
