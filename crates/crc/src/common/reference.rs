//! Bit-serial reference loops.
//!
//! One bit per iteration, no tables, no vector registers. Everything else
//! in the crate is measured against these, and the folding kernels call
//! into them for sub-lane remainders.

#![allow(clippy::indexing_slicing)]

/// Reflected CRC-32 over `data`, one bit at a time.
pub(crate) const fn crc32_bitwise(poly: u32, init: u32, data: &[u8]) -> u32 {
  let mut crc = init;
  let mut i = 0;
  while i < data.len() {
    crc ^= data[i] as u32;
    let mut bit = 0;
    while bit < 8 {
      if crc & 1 == 1 {
        crc = (crc >> 1) ^ poly;
      } else {
        crc >>= 1;
      }
      bit += 1;
    }
    i += 1;
  }
  crc
}

/// Reflected CRC-16 over `data`, one bit at a time.
pub(crate) const fn crc16_bitwise(poly: u16, init: u16, data: &[u8]) -> u16 {
  let mut crc = init;
  let mut i = 0;
  while i < data.len() {
    crc ^= data[i] as u16;
    let mut bit = 0;
    while bit < 8 {
      if crc & 1 == 1 {
        crc = (crc >> 1) ^ poly;
      } else {
        crc >>= 1;
      }
      bit += 1;
    }
    i += 1;
  }
  crc
}

// Published check values for the four shipped parameterizations.
const _: () = {
  assert!((crc32_bitwise(0xEDB8_8320, !0, b"123456789") ^ !0) == 0xCBF4_3926);
  assert!((crc32_bitwise(0x82F6_3B78, !0, b"123456789") ^ !0) == 0xE306_9283);
  assert!(crc16_bitwise(0xA001, 0, b"123456789") == 0xBB3D);
  assert!(crc16_bitwise(0x8408, 0, b"123456789") == 0x2189);
};
