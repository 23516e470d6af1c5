//! Lookup-table generation, evaluated at compile time.

#![allow(clippy::indexing_slicing)]

use crate::common::reference;

/// Chained tables for slice-by-8: `tables[k][i]` advances byte `i` through
/// `k` further zero bytes, so eight lookups retire eight input bytes.
pub(crate) const fn crc32_tables(poly: u32) -> [[u32; 256]; 8] {
  let mut tables = [[0u32; 256]; 8];
  let mut i = 0;
  while i < 256 {
    tables[0][i] = reference::crc32_bitwise(poly, 0, &[i as u8]);
    i += 1;
  }
  let mut k = 1;
  while k < 8 {
    let mut i = 0;
    while i < 256 {
      let prev = tables[k - 1][i];
      tables[k][i] = tables[0][(prev & 0xFF) as usize] ^ (prev >> 8);
      i += 1;
    }
    k += 1;
  }
  tables
}

/// Single bytewise table for the 16-bit families.
pub(crate) const fn crc16_table(poly: u16) -> [u16; 256] {
  let mut table = [0u16; 256];
  let mut i = 0;
  while i < 256 {
    table[i] = reference::crc16_bitwise(poly, 0, &[i as u8]);
    i += 1;
  }
  table
}
