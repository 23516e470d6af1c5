//! Fold key schedules for the carry-less-multiply kernels.
//!
//! Every accelerated path runs in a shared 33-bit reflected domain, so a
//! 16-bit generator is zero-extended and served by the same kernels as the
//! 32-bit families. All constants are derived at compile time from the
//! reflected polynomial alone.

/// Fold and reduction constants for one reflected generator.
pub(crate) struct ClmulKeys {
  /// Reflected generator, zero-extended for the 16-bit families.
  pub poly: u32,
  /// Full 33-bit reflected generator for the final Barrett step.
  pub poly33: u64,
  /// Power-series inverse of `poly33`, the Barrett multiplier.
  pub mu33: u64,
  /// Coefficients carrying a 16-byte lane across 128 bytes.
  pub fold_128b: (u64, u64),
  /// Coefficients carrying a 16-byte lane across 64 bytes.
  pub fold_64b: (u64, u64),
  /// Coefficients carrying a 16-byte lane across 16 bytes.
  pub fold_16b: (u64, u64),
  /// Lane-merge coefficients: shifts by 112B, 96B, 80B, 64B, 48B, 32B.
  pub merge: [(u64, u64); 6],
  /// `K_96`, folding the low qword in the 128 to 96 bit reduction.
  pub k_96: u64,
  /// `K_64`, folding the low dword in the 96 to 64 bit reduction.
  pub k_64: u64,
}

impl ClmulKeys {
  /// Computes the full schedule for a reflected polynomial.
  #[must_use]
  pub(crate) const fn new(reflected_poly: u32) -> Self {
    let poly33 = ((reflected_poly as u64).strict_shl(1)) | 1;
    Self {
      poly: reflected_poly,
      poly33,
      mu33: barrett_mu(poly33),
      fold_128b: fold16_coeff_for_bytes(reflected_poly, 128),
      fold_64b: fold16_coeff_for_bytes(reflected_poly, 64),
      fold_16b: fold16_coeff_for_bytes(reflected_poly, 16),
      merge: [
        fold16_coeff_for_bytes(reflected_poly, 112),
        fold16_coeff_for_bytes(reflected_poly, 96),
        fold16_coeff_for_bytes(reflected_poly, 80),
        fold16_coeff_for_bytes(reflected_poly, 64),
        fold16_coeff_for_bytes(reflected_poly, 48),
        fold16_coeff_for_bytes(reflected_poly, 32),
      ],
      k_96: fold_k(reflected_poly, 96),
      k_64: fold_k(reflected_poly, 64),
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Constant Generation (compile-time)
// ─────────────────────────────────────────────────────────────────────────────

/// Carryless multiplication of two 64-bit values, returning the 128-bit result (hi, lo).
#[must_use]
const fn clmul64(a: u64, b: u64) -> (u64, u64) {
  let mut hi: u64 = 0;
  let mut lo: u64 = 0;

  let mut i: u32 = 0;
  while i < 64 {
    if (a.strict_shr(i)) & 1 != 0 {
      if i == 0 {
        lo ^= b;
      } else {
        lo ^= b.strict_shl(i);
        hi ^= b.strict_shr(64u32.strict_sub(i));
      }
    }
    i = i.strict_add(1);
  }

  (hi, lo)
}

/// Reduce a 128-bit value modulo a degree-32 polynomial `x^32 + poly`.
#[must_use]
const fn reduce128(hi: u64, lo: u64, poly: u32) -> u32 {
  let poly_full: u128 = (1u128.strict_shl(32)) | (poly as u128);
  let mut val: u128 = (hi as u128).strict_shl(64) | (lo as u128);

  let mut bit: i32 = 127;
  while bit >= 32 {
    let b = bit as u32;
    if ((val.strict_shr(b)) & 1) != 0 {
      val ^= poly_full.strict_shl(b.strict_sub(32));
    }
    bit = bit.strict_sub(1);
  }

  val as u32
}

/// Compute x^n mod (x^32 + poly) in GF(2) where `poly` is the normal CRC
/// polynomial without the x^32 term.
#[must_use]
const fn xpow_mod(mut n: u32, poly: u32) -> u32 {
  if n == 0 {
    return 1;
  }
  if n == 1 {
    return 2;
  }

  let mut result: u32 = 1;
  let mut base: u32 = 2;

  while n > 0 {
    if n & 1 != 0 {
      let (hi, lo) = clmul64(result as u64, base as u64);
      result = reduce128(hi, lo, poly);
    }
    let (hi, lo) = clmul64(base as u64, base as u64);
    base = reduce128(hi, lo, poly);
    n = n.strict_shr(1);
  }

  result
}

/// Reverse the low 33 bits of `v`.
#[must_use]
const fn reverse33(v: u64) -> u64 {
  let mask = (1u64.strict_shl(33)).strict_sub(1);
  (v & mask).reverse_bits().strict_shr(31)
}

/// Compute the folding constant K_n for a reflected-mode generator.
#[must_use]
const fn fold_k(reflected_poly: u32, n: u32) -> u64 {
  let normal_poly = reflected_poly.reverse_bits();
  let rem = xpow_mod(n, normal_poly) as u64;
  reverse33(rem)
}

/// Compute a `(high, low)` fold coefficient pair for folding 16 bytes by `shift_bytes`.
///
/// Returns `(K_{d+32}, K_{d-32})` where `d = 8 * shift_bytes`.
#[must_use]
const fn fold16_coeff_for_bytes(reflected_poly: u32, shift_bytes: u32) -> (u64, u64) {
  if shift_bytes == 0 {
    return (0, 0);
  }
  let d = shift_bytes.strict_mul(8);
  if d < 32 {
    return (0, 0);
  }
  (
    fold_k(reflected_poly, d.strict_add(32)),
    fold_k(reflected_poly, d.strict_sub(32)),
  )
}

/// Power-series inverse of the full reflected generator modulo `x^33`, the
/// multiplier for the final Barrett step.
#[must_use]
const fn barrett_mu(poly33: u64) -> u64 {
  let mut mu: u64 = 1;
  let mut k: u32 = 1;
  while k <= 32 {
    let mut parity: u64 = 0;
    let mut j: u32 = 1;
    while j <= k {
      parity ^= (poly33.strict_shr(j) & 1) & (mu.strict_shr(k.strict_sub(j)) & 1);
      j = j.strict_add(1);
    }
    if parity == 1 {
      mu |= 1u64.strict_shl(k);
    }
    k = k.strict_add(1);
  }
  mu
}

#[cfg(test)]
mod tests {
  use super::*;

  // Values cross-checked against the zlib and Linux kernel PCLMULQDQ
  // implementations of these generators.
  #[test]
  fn ieee_schedule_matches_published_constants() {
    let keys = ClmulKeys::new(0xEDB8_8320);
    assert_eq!(keys.poly33, 0x1_DB71_0641);
    assert_eq!(keys.mu33, 0x1_F701_1641);
    assert_eq!(keys.fold_128b, (0x1_E88E_F372, 0x1_4A7F_E880));
    assert_eq!(keys.fold_64b, (0x1_5444_2BD4, 0x1_C6E4_1596));
    assert_eq!(keys.fold_16b, (0x1_7519_97D0, 0xCCAA_009E));
    assert_eq!(keys.k_96, 0xCCAA_009E);
    assert_eq!(keys.k_64, 0x1_63CD_6124);
  }

  #[test]
  fn castagnoli_schedule_matches_published_constants() {
    let keys = ClmulKeys::new(0x82F6_3B78);
    assert_eq!(keys.poly33, 0x1_05EC_76F1);
    assert_eq!(keys.mu33, 0xDEA7_13F1);
    assert_eq!(keys.fold_64b, (0x740E_EF02, 0x9E4A_DDF8));
  }

  #[test]
  fn lifted_kermit_schedule() {
    let keys = ClmulKeys::new(0x8408);
    assert_eq!(keys.poly33, 0x1_0811);
    assert_eq!(keys.mu33, 0x1_1C58_1911);
    assert_eq!(keys.fold_128b, (0x1_BED8, 0x1_60BE));
    assert_eq!(keys.fold_16b, (0x8E10, 0x1_89AE));
    assert_eq!(keys.k_96, 0x1_89AE);
    assert_eq!(keys.k_64, 0x1_14AA);
  }

  #[test]
  fn lifted_arc_schedule() {
    let keys = ClmulKeys::new(0xA001);
    assert_eq!(keys.poly33, 0x1_4003);
    assert_eq!(keys.mu33, 0x1_CFFF_BFFF);
    assert_eq!(keys.merge[0], (0x1_A674, 0xBCAC));
    assert_eq!(keys.merge[5], (0x1_EC02, 0x1_D55E));
  }

  #[test]
  fn schedule_internal_identities() {
    let keys = ClmulKeys::new(0xEDB8_8320);
    // K_96 doubles as the low half of the 16-byte pair, and the 64-byte
    // merge entry is the main-loop coefficient.
    assert_eq!(keys.k_96, keys.fold_16b.1);
    assert_eq!(keys.merge[3], keys.fold_64b);
  }

  #[test]
  fn clmul64_matches_schoolbook_on_small_values() {
    assert_eq!(clmul64(0b101, 0b11), (0, 0b1111));
    assert_eq!(clmul64(1 << 63, 0b10), (1, 0));
    assert_eq!(clmul64(0, !0), (0, 0));
  }
}
