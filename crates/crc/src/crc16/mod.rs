//! 16-bit CRC families, lifted into the shared 32-bit kernel domain.
//!
//! - [`Crc16Arc`]: CRC-16/ARC, the classic IBM CRC-16.
//! - [`Crc16Kermit`]: CRC-16/KERMIT, the reflected CCITT variant.
//!
//! A 16-bit generator zero-extends into the 32-bit fold domain and stays
//! inside the low half for any 16-bit seed, so these families reuse the
//! 32-bit kernels unchanged and truncate on the way out.

use crate::common::clmul::ClmulKeys;
use crate::common::tables;
use crate::engine::Engine16;

/// Reflected CRC-16/ARC generator.
const ARC_POLY: u16 = 0xA001;
/// Reflected CRC-16/KERMIT generator.
const KERMIT_POLY: u16 = 0x8408;

static ARC_KEYS: ClmulKeys = ClmulKeys::new(ARC_POLY as u32);
static ARC_TABLE: [u16; 256] = tables::crc16_table(ARC_POLY);
static ARC_ENGINE: Engine16 = Engine16::new(&ARC_KEYS, &ARC_TABLE);

static KERMIT_KEYS: ClmulKeys = ClmulKeys::new(KERMIT_POLY as u32);
static KERMIT_TABLE: [u16; 256] = tables::crc16_table(KERMIT_POLY);
static KERMIT_ENGINE: Engine16 = Engine16::new(&KERMIT_KEYS, &KERMIT_TABLE);

define_crc16_type! {
  /// CRC-16/ARC, the classic IBM CRC-16 used by ARC and LHA archives and
  /// Modbus-family protocols.
  ///
  /// Polynomial `0x8005` (reflected `0xA001`), zero `init` and `xorout`.
  /// Check value over `b"123456789"` is `0xBB3D`.
  pub struct Crc16Arc {
    engine: ARC_ENGINE,
  }
}

define_crc16_type! {
  /// CRC-16/KERMIT, the reflected CCITT variant used by Kermit and IrDA.
  ///
  /// Polynomial `0x1021` (reflected `0x8408`), zero `init` and `xorout`.
  /// Check value over `b"123456789"` is `0x2189`. The X.25 preset is one
  /// [`with_initial`](crate::Checksum::with_initial) call away: seed with
  /// `0xFFFF` and invert the finalized value.
  pub struct Crc16Kermit {
    engine: KERMIT_ENGINE,
  }
}

// Proptest uses file I/O for failure persistence that Miri cannot interpret.
#[cfg(all(test, not(miri)))]
mod proptests;

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Checksum;

  #[test]
  fn check_values() {
    assert_eq!(Crc16Arc::checksum(b"123456789"), 0xBB3D);
    assert_eq!(Crc16Kermit::checksum(b"123456789"), 0x2189);
  }

  #[test]
  fn empty_input_finalizes_to_zero() {
    assert_eq!(Crc16Arc::checksum(b""), 0);
    assert_eq!(Crc16Kermit::checksum(b""), 0);
  }

  #[test]
  fn streaming_matches_oneshot() {
    let data: Vec<u8> = (0..2048u32).map(|i| (i.wrapping_mul(7) % 256) as u8).collect();
    let want = Crc16Kermit::checksum(&data);

    let mut hasher = Crc16Kermit::new();
    for chunk in data.chunks(61) {
      hasher.update(chunk);
    }
    assert_eq!(hasher.finalize(), want);
  }

  #[test]
  fn with_initial_resumes_a_finalized_value() {
    let mut head = Crc16Arc::new();
    head.update(b"1234");

    let mut resumed = Crc16Arc::with_initial(head.finalize());
    resumed.update(b"56789");
    assert_eq!(resumed.finalize(), 0xBB3D);
  }

  #[test]
  fn x25_preset_via_with_initial() {
    // CRC-16/IBM-SDLC: the Kermit generator with init 0xFFFF and an
    // inverted output.
    let mut hasher = Crc16Kermit::with_initial(0xFFFF);
    hasher.update(b"123456789");
    assert_eq!(hasher.finalize() ^ 0xFFFF, 0x906E);
  }

  #[test]
  fn reset_restores_a_fresh_hasher() {
    let mut hasher = Crc16Kermit::new();
    hasher.update(b"junk");
    hasher.reset();
    hasher.update(b"123456789");
    assert_eq!(hasher.finalize(), 0x2189);
  }

  #[test]
  fn vectored_update_matches_contiguous() {
    let mut hasher = Crc16Arc::new();
    hasher.update_vectored(&[b"12345".as_slice(), b"", b"6789"]);
    assert_eq!(hasher.finalize(), 0xBB3D);
  }

  #[test]
  fn default_is_a_fresh_hasher() {
    assert_eq!(Crc16Arc::default().finalize(), Crc16Arc::new().finalize());
  }

  #[test]
  fn backend_reports_a_name() {
    assert!(!Crc16Arc::backend_name().is_empty());
    assert!(!Crc16Kermit::backend_name().is_empty());
  }
}
