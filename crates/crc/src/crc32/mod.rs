//! 32-bit CRC families.
//!
//! - [`Crc32`]: CRC-32/ISO-HDLC (IEEE 802.3), the Ethernet, zlib and PNG
//!   checksum.
//! - [`Crc32C`]: CRC-32/ISCSI (Castagnoli), used by iSCSI, SCTP, ext4 and
//!   Btrfs.
//!
//! Both run through the shared fold kernels; only the key schedule and
//! tables differ.

use backend::FallbackKind;

use crate::common::clmul::ClmulKeys;
use crate::common::tables;
use crate::engine::Engine32;

/// Reflected CRC-32/ISO-HDLC generator.
const IEEE_POLY: u32 = 0xEDB8_8320;
/// Reflected CRC-32/ISCSI generator.
const CASTAGNOLI_POLY: u32 = 0x82F6_3B78;

static IEEE_KEYS: ClmulKeys = ClmulKeys::new(IEEE_POLY);
static IEEE_TABLES: [[u32; 256]; 8] = tables::crc32_tables(IEEE_POLY);
static IEEE_ENGINE: Engine32 = Engine32::new(&IEEE_KEYS, &IEEE_TABLES, FallbackKind::Slice8);

static CASTAGNOLI_KEYS: ClmulKeys = ClmulKeys::new(CASTAGNOLI_POLY);
static CASTAGNOLI_TABLES: [[u32; 256]; 8] = tables::crc32_tables(CASTAGNOLI_POLY);
static CASTAGNOLI_ENGINE: Engine32 =
  Engine32::new(&CASTAGNOLI_KEYS, &CASTAGNOLI_TABLES, FallbackKind::Slice8);

define_crc32_type! {
  /// CRC-32/ISO-HDLC (IEEE 802.3), the Ethernet, zlib and PNG checksum.
  ///
  /// Polynomial `0x04C11DB7` (reflected `0xEDB88320`), `init` and `xorout`
  /// both `0xFFFFFFFF`. Check value over `b"123456789"` is `0xCBF43926`.
  pub struct Crc32 {
    engine: IEEE_ENGINE,
  }
}

define_crc32_type! {
  /// CRC-32/ISCSI (Castagnoli), used by iSCSI, SCTP, ext4 and Btrfs.
  ///
  /// Polynomial `0x1EDC6F41` (reflected `0x82F63B78`), `init` and `xorout`
  /// both `0xFFFFFFFF`. Check value over `b"123456789"` is `0xE3069283`.
  pub struct Crc32C {
    engine: CASTAGNOLI_ENGINE,
  }
}

// Proptest uses file I/O for failure persistence that Miri cannot interpret.
#[cfg(all(test, not(miri)))]
mod proptests;
