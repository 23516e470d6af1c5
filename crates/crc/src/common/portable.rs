//! Table-driven kernels that run on any CPU.

#![allow(clippy::indexing_slicing)]

/// Slice-by-8: eight table lookups retire eight input bytes per step.
pub(crate) fn slice8_32(tables: &[[u32; 256]; 8], crc: u32, data: &[u8]) -> u32 {
  let (chunks, tail) = data.as_chunks::<8>();
  let mut crc = crc;
  for chunk in chunks {
    let low = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) ^ crc;
    let high = u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);
    crc = tables[7][(low & 0xFF) as usize]
      ^ tables[6][((low >> 8) & 0xFF) as usize]
      ^ tables[5][((low >> 16) & 0xFF) as usize]
      ^ tables[4][(low >> 24) as usize]
      ^ tables[3][(high & 0xFF) as usize]
      ^ tables[2][((high >> 8) & 0xFF) as usize]
      ^ tables[1][((high >> 16) & 0xFF) as usize]
      ^ tables[0][(high >> 24) as usize];
  }
  for &byte in tail {
    crc = tables[0][((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
  }
  crc
}

/// One table lookup per input byte.
pub(crate) fn bytewise_32(table: &[u32; 256], crc: u32, data: &[u8]) -> u32 {
  let mut crc = crc;
  for &byte in data {
    crc = table[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
  }
  crc
}

/// One table lookup per input byte, 16-bit state.
pub(crate) fn bytewise_16(table: &[u16; 256], crc: u16, data: &[u8]) -> u16 {
  let mut crc = crc;
  for &byte in data {
    crc = table[((crc ^ byte as u16) & 0xFF) as usize] ^ (crc >> 8);
  }
  crc
}
