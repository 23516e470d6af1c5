use crcfold::{Checksum, Crc16Arc, Crc16Kermit, Crc32, Crc32C};

fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed | 1;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x >> 24) as u8;
  }
  out
}

fn crc32_reflected_bitwise(poly_reflected: u32, init: u32, xor_out: u32, data: &[u8]) -> u32 {
  let mut crc = init;
  for &b in data {
    crc ^= u32::from(b);
    for _ in 0..8 {
      let mask = 0u32.wrapping_sub(crc & 1);
      crc = (crc >> 1) ^ (poly_reflected & mask);
    }
  }
  crc ^ xor_out
}

fn crc16_reflected_bitwise(poly_reflected: u16, data: &[u8]) -> u16 {
  let mut crc = 0u16;
  for &b in data {
    crc ^= u16::from(b);
    for _ in 0..8 {
      let mask = 0u16.wrapping_sub(crc & 1);
      crc = (crc >> 1) ^ (poly_reflected & mask);
    }
  }
  crc
}

const LENGTHS: [usize; 19] = [
  0, 1, 2, 7, 8, 15, 16, 17, 31, 63, 64, 65, 127, 128, 129, 256, 1024, 2048, 4096,
];
const SEEDS: [u64; 3] = [1, 0x0123_4567_89ab_cdef, 0xd1b5_4a32_d192_ed03];

#[test]
fn crc32_invariants() {
  for &len in &LENGTHS {
    for &seed in &SEEDS {
      let data = gen_bytes(len, seed ^ len as u64);

      let oneshot = Crc32::checksum(&data);
      let reference = crc32_reflected_bitwise(0xedb8_8320, !0, !0, &data);
      assert_eq!(oneshot, reference, "crc32 reference mismatch at len={len}");

      for &split in &[0usize, 1, len / 2, len.saturating_sub(1), len] {
        if split > len {
          continue;
        }
        let (a, b) = data.split_at(split);

        let mut h = Crc32::new();
        h.update(a);
        h.update(b);
        assert_eq!(h.finalize(), oneshot, "crc32 incremental mismatch at len={len} split={split}");

        let mut r = Crc32::with_initial(Crc32::checksum(a));
        r.update(b);
        assert_eq!(r.finalize(), oneshot, "crc32 resume mismatch at len={len} split={split}");
      }
    }
  }
}

#[test]
fn crc32c_invariants() {
  for &len in &LENGTHS {
    for &seed in &SEEDS {
      let data = gen_bytes(len, seed ^ len as u64);

      let oneshot = Crc32C::checksum(&data);
      let reference = crc32_reflected_bitwise(0x82f6_3b78, !0, !0, &data);
      assert_eq!(oneshot, reference, "crc32c reference mismatch at len={len}");

      for &split in &[0usize, 1, len / 2, len.saturating_sub(1), len] {
        if split > len {
          continue;
        }
        let (a, b) = data.split_at(split);

        let mut h = Crc32C::new();
        h.update(a);
        h.update(b);
        assert_eq!(h.finalize(), oneshot, "crc32c incremental mismatch at len={len} split={split}");

        let mut r = Crc32C::with_initial(Crc32C::checksum(a));
        r.update(b);
        assert_eq!(r.finalize(), oneshot, "crc32c resume mismatch at len={len} split={split}");
      }
    }
  }
}

#[test]
fn crc16_arc_invariants() {
  for &len in &LENGTHS {
    for &seed in &SEEDS {
      let data = gen_bytes(len, seed ^ len as u64);

      let oneshot = Crc16Arc::checksum(&data);
      let reference = crc16_reflected_bitwise(0xA001, &data);
      assert_eq!(oneshot, reference, "crc16/arc reference mismatch at len={len}");

      for &split in &[0usize, 1, len / 2, len.saturating_sub(1), len] {
        if split > len {
          continue;
        }
        let (a, b) = data.split_at(split);

        let mut h = Crc16Arc::new();
        h.update(a);
        h.update(b);
        assert_eq!(h.finalize(), oneshot, "crc16/arc incremental mismatch at len={len} split={split}");

        let mut r = Crc16Arc::with_initial(Crc16Arc::checksum(a));
        r.update(b);
        assert_eq!(r.finalize(), oneshot, "crc16/arc resume mismatch at len={len} split={split}");
      }
    }
  }
}

#[test]
fn crc16_kermit_invariants() {
  for &len in &LENGTHS {
    for &seed in &SEEDS {
      let data = gen_bytes(len, seed ^ len as u64);

      let oneshot = Crc16Kermit::checksum(&data);
      let reference = crc16_reflected_bitwise(0x8408, &data);
      assert_eq!(oneshot, reference, "crc16/kermit reference mismatch at len={len}");

      for &split in &[0usize, 1, len / 2, len.saturating_sub(1), len] {
        if split > len {
          continue;
        }
        let (a, b) = data.split_at(split);

        let mut h = Crc16Kermit::new();
        h.update(a);
        h.update(b);
        assert_eq!(h.finalize(), oneshot, "crc16/kermit incremental mismatch at len={len} split={split}");

        let mut r = Crc16Kermit::with_initial(Crc16Kermit::checksum(a));
        r.update(b);
        assert_eq!(r.finalize(), oneshot, "crc16/kermit resume mismatch at len={len} split={split}");
      }
    }
  }
}

#[test]
fn concurrent_dispatch_agrees_with_serial() {
  let data = gen_bytes(64 * 1024 + 19, 0x9e37_79b9_7f4a_7c15);

  let serial32 = Crc32::checksum(&data);
  let serial32c = Crc32C::checksum(&data);
  let serial16 = Crc16Kermit::checksum(&data);

  let handles: Vec<_> = (0..8)
    .map(|_| {
      let data = data.clone();
      std::thread::spawn(move || {
        let mut h = Crc32::new();
        for chunk in data.chunks(977) {
          h.update(chunk);
        }
        (Crc32::checksum(&data), h.finalize(), Crc32C::checksum(&data), Crc16Kermit::checksum(&data))
      })
    })
    .collect();

  for handle in handles {
    let (oneshot, chunked, castagnoli, kermit) = handle.join().expect("thread panicked");
    assert_eq!(oneshot, serial32, "concurrent crc32 disagrees with serial");
    assert_eq!(chunked, serial32, "concurrent chunked crc32 disagrees with serial");
    assert_eq!(castagnoli, serial32c, "concurrent crc32c disagrees with serial");
    assert_eq!(kermit, serial16, "concurrent crc16/kermit disagrees with serial");
  }
}

#[test]
fn vectored_update_matches_contiguous() {
  let data = gen_bytes(301, 0x5d58_39a7_3d87_1ceb);
  let (a, rest) = data.split_at(7);
  let (b, c) = rest.split_at(130);
  let bufs: [&[u8]; 4] = [a, b, &[], c];

  let mut h32 = Crc32::new();
  h32.update_vectored(&bufs);
  assert_eq!(h32.finalize(), Crc32::checksum(&data));

  let mut h16 = Crc16Kermit::new();
  h16.update_vectored(&bufs);
  assert_eq!(h16.finalize(), Crc16Kermit::checksum(&data));
}
