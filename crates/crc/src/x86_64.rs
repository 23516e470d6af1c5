//! x86_64 folding kernels built on carry-less multiplication.
//!
//! Every kernel here is a pure function of `(state, data, keys)` in the
//! shared 32-bit reflected domain: the [`ClmulKeys`] schedule decides which
//! generator runs, and the lifted 16-bit families go through the same code
//! paths as the 32-bit ones. Buffers shorter than one block degrade to
//! narrower folds and finally to the bitwise reference, so callers never
//! need a length precondition beyond "non-empty is worth dispatching".

// SAFETY: This module is SIMD-heavy and requires unsafe for intrinsics.
#![allow(unsafe_code)]
#![allow(clippy::indexing_slicing)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::{
  __m128i, __m256i, __m512i, _mm256_castsi256_si128, _mm256_clmulepi64_epi128,
  _mm256_extracti128_si256, _mm256_loadu_si256, _mm256_set_epi64x, _mm256_ternarylogic_epi64,
  _mm256_xor_si256, _mm512_clmulepi64_epi128, _mm512_extracti32x4_epi32, _mm512_loadu_si512,
  _mm512_set_epi64, _mm512_ternarylogic_epi64, _mm512_xor_si512, _mm_and_si128,
  _mm_clmulepi64_si128, _mm_cvtsi128_si64, _mm_loadu_si128, _mm_set_epi64x, _mm_slli_si128,
  _mm_srli_si128, _mm_xor_si128,
};
use core::ops::{BitXor, BitXorAssign};

use crate::common::clmul::ClmulKeys;
use crate::common::reference;

// ─────────────────────────────────────────────────────────────────────────────
// 128-bit Lane Primitives
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Simd128(__m128i);

impl BitXor for Simd128 {
  type Output = Self;

  #[inline]
  fn bitxor(self, other: Self) -> Self {
    // SAFETY: `_mm_xor_si128` is available on all x86_64 (SSE2 baseline).
    unsafe { Self(_mm_xor_si128(self.0, other.0)) }
  }
}

impl BitXorAssign for Simd128 {
  #[inline]
  fn bitxor_assign(&mut self, other: Self) {
    *self = *self ^ other;
  }
}

impl Simd128 {
  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn new(high: u64, low: u64) -> Self {
    Self(_mm_set_epi64x(high as i64, low as i64))
  }

  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn coeff(pair: (u64, u64)) -> Self {
    Self::new(pair.0, pair.1)
  }

  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn load(chunk: &[u8; 16]) -> Self {
    Self(_mm_loadu_si128(chunk.as_ptr() as *const __m128i))
  }

  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn shift_right_8(self) -> Self {
    Self(_mm_srli_si128::<8>(self.0))
  }

  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn shift_left_12(self) -> Self {
    Self(_mm_slli_si128::<12>(self.0))
  }

  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn and(self, mask: Self) -> Self {
    Self(_mm_and_si128(self.0, mask.0))
  }

  /// Folds this lane forward by `coeff`'s distance and absorbs `data`.
  #[inline]
  #[target_feature(enable = "sse2", enable = "pclmulqdq")]
  unsafe fn fold_16(self, coeff: Self, data: Self) -> Self {
    let h = _mm_clmulepi64_si128::<0x10>(self.0, coeff.0);
    let l = _mm_clmulepi64_si128::<0x01>(self.0, coeff.0);
    Self(_mm_xor_si128(_mm_xor_si128(h, l), data.0))
  }

  /// Folds the 16-byte lane down to the 64-bit pre-Barrett state.
  #[inline]
  #[target_feature(enable = "sse2", enable = "pclmulqdq")]
  unsafe fn fold_width32(self, high: u64, low: u64) -> Self {
    let coeff_low = Self::new(0, low);
    let coeff_high = Self::new(high, 0);

    // 16B -> 8B
    let clmul = _mm_clmulepi64_si128::<0x00>(self.0, coeff_low.0);
    let shifted = self.shift_right_8();
    let mut state = Self(_mm_xor_si128(clmul, shifted.0));

    // 8B -> 4B
    let mask2 = Self::new(0xFFFF_FFFF_FFFF_FFFF, 0xFFFF_FFFF_0000_0000);
    let masked = state.and(mask2);
    let shifted = state.shift_left_12();
    let clmul = _mm_clmulepi64_si128::<0x11>(shifted.0, coeff_high.0);
    state = Self(_mm_xor_si128(clmul, masked.0));

    state
  }

  #[inline]
  #[target_feature(enable = "sse2", enable = "pclmulqdq")]
  unsafe fn barrett_width32(self, poly: u64, mu: u64) -> u32 {
    let polymu = Self::new(poly, mu);
    let clmul1 = _mm_clmulepi64_si128::<0x00>(self.0, polymu.0);
    let clmul2 = _mm_clmulepi64_si128::<0x10>(clmul1, polymu.0);
    let xorred = _mm_xor_si128(self.0, clmul2);

    let hi = _mm_srli_si128::<8>(xorred);
    _mm_cvtsi128_si64(hi) as u32
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lane Merging and Reduction
// ─────────────────────────────────────────────────────────────────────────────

/// Merges four lanes spaced 16 bytes apart into one, oldest lane first.
#[inline]
#[target_feature(enable = "sse2", enable = "pclmulqdq")]
unsafe fn merge_lanes4(x: [Simd128; 4], keys: &ClmulKeys) -> Simd128 {
  // A^3·x0 ⊕ A^2·x1 ⊕ A·x2 ⊕ x3, where A advances one 16-byte lane.
  let mut res = x[3];
  res = x[0].fold_16(Simd128::coeff(keys.merge[4]), res);
  res = x[1].fold_16(Simd128::coeff(keys.merge[5]), res);
  res = x[2].fold_16(Simd128::coeff(keys.fold_16b), res);
  res
}

/// Merges eight lanes spaced 16 bytes apart into one, oldest lane first.
#[inline]
#[target_feature(enable = "sse2", enable = "pclmulqdq")]
unsafe fn merge_lanes8(x: [Simd128; 8], keys: &ClmulKeys) -> Simd128 {
  // A^7·x0 ⊕ A^6·x1 ⊕ … ⊕ x7, where A advances one 16-byte lane.
  let mut res = x[7];
  res = x[0].fold_16(Simd128::coeff(keys.merge[0]), res);
  res = x[1].fold_16(Simd128::coeff(keys.merge[1]), res);
  res = x[2].fold_16(Simd128::coeff(keys.merge[2]), res);
  res = x[3].fold_16(Simd128::coeff(keys.merge[3]), res);
  res = x[4].fold_16(Simd128::coeff(keys.merge[4]), res);
  res = x[5].fold_16(Simd128::coeff(keys.merge[5]), res);
  res = x[6].fold_16(Simd128::coeff(keys.fold_16b), res);
  res
}

/// Folds any remaining whole 16-byte chunks into `acc`, reduces to 32 bits,
/// and runs the final sub-chunk bytes through the bitwise reference.
#[inline]
#[target_feature(enable = "sse2", enable = "pclmulqdq")]
unsafe fn finish_lane(mut acc: Simd128, tail: &[u8], keys: &ClmulKeys) -> u32 {
  let (chunks, rest) = tail.as_chunks::<16>();
  let coeff_16b = Simd128::coeff(keys.fold_16b);
  for chunk in chunks {
    acc = acc.fold_16(coeff_16b, Simd128::load(chunk));
  }

  let folded = acc.fold_width32(keys.k_64, keys.k_96);
  let crc = folded.barrett_width32(keys.poly33, keys.mu33);
  reference::crc32_bitwise(keys.poly, crc, rest)
}

/// Handles buffers shorter than one block: seeds a single lane from the
/// first 16 bytes, or degrades to the bitwise reference below that.
#[inline]
#[target_feature(enable = "sse2", enable = "pclmulqdq")]
unsafe fn fold_short(crc: u32, data: &[u8], keys: &ClmulKeys) -> u32 {
  let Some((first, rest)) = data.split_first_chunk::<16>() else {
    return reference::crc32_bitwise(keys.poly, crc, data);
  };
  let acc = Simd128::load(first) ^ Simd128::new(0, crc as u64);
  finish_lane(acc, rest, keys)
}

// ─────────────────────────────────────────────────────────────────────────────
// PCLMULQDQ Kernel (4 × 16-byte lanes, 64-byte blocks)
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn load_lanes4(block: &[u8; 64]) -> [Simd128; 4] {
  let ptr = block.as_ptr();
  [
    Simd128(_mm_loadu_si128(ptr as *const __m128i)),
    Simd128(_mm_loadu_si128(ptr.add(16) as *const __m128i)),
    Simd128(_mm_loadu_si128(ptr.add(32) as *const __m128i)),
    Simd128(_mm_loadu_si128(ptr.add(48) as *const __m128i)),
  ]
}

#[inline]
#[target_feature(enable = "sse2", enable = "pclmulqdq")]
unsafe fn update_pclmul(crc: u32, data: &[u8], keys: &ClmulKeys) -> u32 {
  let (blocks, tail) = data.as_chunks::<64>();
  let Some((first, rest)) = blocks.split_first() else {
    return fold_short(crc, data, keys);
  };

  let mut x = load_lanes4(first);
  x[0] ^= Simd128::new(0, crc as u64);

  let coeff_64b = Simd128::coeff(keys.fold_64b);
  for block in rest {
    let y = load_lanes4(block);
    x[0] = x[0].fold_16(coeff_64b, y[0]);
    x[1] = x[1].fold_16(coeff_64b, y[1]);
    x[2] = x[2].fold_16(coeff_64b, y[2]);
    x[3] = x[3].fold_16(coeff_64b, y[3]);
  }

  finish_lane(merge_lanes4(x, keys), tail, keys)
}

// ─────────────────────────────────────────────────────────────────────────────
// VPCLMULQDQ Kernels (2 × 256-bit or 2 × 512-bit accumulators)
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
#[target_feature(enable = "avx")]
unsafe fn broadcast_coeff_256(pair: (u64, u64)) -> __m256i {
  _mm256_set_epi64x(pair.0 as i64, pair.1 as i64, pair.0 as i64, pair.1 as i64)
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn state_lane0_256(crc: u32) -> __m256i {
  _mm256_set_epi64x(0, 0, 0, crc as i64)
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn load_lanes2x256(block: &[u8; 64]) -> (__m256i, __m256i) {
  let ptr = block.as_ptr();
  (
    _mm256_loadu_si256(ptr as *const __m256i),
    _mm256_loadu_si256(ptr.add(32) as *const __m256i),
  )
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn split_lanes_256(x0: __m256i, x1: __m256i) -> [Simd128; 4] {
  [
    Simd128(_mm256_castsi256_si128(x0)),
    Simd128(_mm256_extracti128_si256::<1>(x0)),
    Simd128(_mm256_castsi256_si128(x1)),
    Simd128(_mm256_extracti128_si256::<1>(x1)),
  ]
}

/// 256-bit fold with VEX xors only, for parts without AVX-512.
#[inline]
#[target_feature(enable = "avx2,vpclmulqdq")]
unsafe fn fold_32(state: __m256i, coeff: __m256i, data: __m256i) -> __m256i {
  let h = _mm256_clmulepi64_epi128::<0x10>(state, coeff);
  let l = _mm256_clmulepi64_epi128::<0x01>(state, coeff);
  _mm256_xor_si256(_mm256_xor_si256(h, l), data)
}

/// 256-bit fold with a single EVEX three-way xor.
#[inline]
#[target_feature(enable = "avx512f,avx512vl,vpclmulqdq")]
unsafe fn fold_32_ternary(state: __m256i, coeff: __m256i, data: __m256i) -> __m256i {
  _mm256_ternarylogic_epi64::<0x96>(
    _mm256_clmulepi64_epi128::<0x10>(state, coeff),
    _mm256_clmulepi64_epi128::<0x01>(state, coeff),
    data,
  )
}

#[inline]
#[target_feature(enable = "avx2,vpclmulqdq,pclmulqdq,sse2")]
unsafe fn update_vpclmul_avx2(crc: u32, data: &[u8], keys: &ClmulKeys) -> u32 {
  let (blocks, tail) = data.as_chunks::<64>();
  let Some((first, rest)) = blocks.split_first() else {
    return fold_short(crc, data, keys);
  };

  let (mut x0, mut x1) = load_lanes2x256(first);
  x0 = _mm256_xor_si256(x0, state_lane0_256(crc));

  let coeff_64b = broadcast_coeff_256(keys.fold_64b);
  for block in rest {
    let (y0, y1) = load_lanes2x256(block);
    x0 = fold_32(x0, coeff_64b, y0);
    x1 = fold_32(x1, coeff_64b, y1);
  }

  finish_lane(merge_lanes4(split_lanes_256(x0, x1), keys), tail, keys)
}

#[inline]
#[target_feature(enable = "avx512f,avx512vl,avx2,vpclmulqdq,pclmulqdq,sse2")]
unsafe fn update_vpclmul_avx512_ymm(crc: u32, data: &[u8], keys: &ClmulKeys) -> u32 {
  let (blocks, tail) = data.as_chunks::<64>();
  let Some((first, rest)) = blocks.split_first() else {
    return fold_short(crc, data, keys);
  };

  let (mut x0, mut x1) = load_lanes2x256(first);
  x0 = _mm256_xor_si256(x0, state_lane0_256(crc));

  let coeff_64b = broadcast_coeff_256(keys.fold_64b);
  for block in rest {
    let (y0, y1) = load_lanes2x256(block);
    x0 = fold_32_ternary(x0, coeff_64b, y0);
    x1 = fold_32_ternary(x1, coeff_64b, y1);
  }

  finish_lane(merge_lanes4(split_lanes_256(x0, x1), keys), tail, keys)
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn broadcast_coeff_512(pair: (u64, u64)) -> __m512i {
  let (high, low) = pair;
  _mm512_set_epi64(
    high as i64,
    low as i64,
    high as i64,
    low as i64,
    high as i64,
    low as i64,
    high as i64,
    low as i64,
  )
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn state_lane0_512(crc: u32) -> __m512i {
  _mm512_set_epi64(0, 0, 0, 0, 0, 0, 0, crc as i64)
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn load_lanes2x512(block: &[u8; 128]) -> (__m512i, __m512i) {
  let ptr = block.as_ptr();
  (
    _mm512_loadu_si512(ptr as *const __m512i),
    _mm512_loadu_si512(ptr.add(64) as *const __m512i),
  )
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn split_lanes_512(x0: __m512i, x1: __m512i) -> [Simd128; 8] {
  [
    Simd128(_mm512_extracti32x4_epi32::<0>(x0)),
    Simd128(_mm512_extracti32x4_epi32::<1>(x0)),
    Simd128(_mm512_extracti32x4_epi32::<2>(x0)),
    Simd128(_mm512_extracti32x4_epi32::<3>(x0)),
    Simd128(_mm512_extracti32x4_epi32::<0>(x1)),
    Simd128(_mm512_extracti32x4_epi32::<1>(x1)),
    Simd128(_mm512_extracti32x4_epi32::<2>(x1)),
    Simd128(_mm512_extracti32x4_epi32::<3>(x1)),
  ]
}

/// 512-bit fold with a single EVEX three-way xor.
#[inline]
#[target_feature(enable = "avx512f,vpclmulqdq")]
unsafe fn fold_64(state: __m512i, coeff: __m512i, data: __m512i) -> __m512i {
  _mm512_ternarylogic_epi64::<0x96>(
    _mm512_clmulepi64_epi128::<0x10>(state, coeff),
    _mm512_clmulepi64_epi128::<0x01>(state, coeff),
    data,
  )
}

#[inline]
#[target_feature(enable = "avx512f,avx512vl,avx2,vpclmulqdq,pclmulqdq,sse2")]
unsafe fn update_vpclmul_avx512_zmm(crc: u32, data: &[u8], keys: &ClmulKeys) -> u32 {
  let (blocks, tail) = data.as_chunks::<128>();
  let Some((first, rest)) = blocks.split_first() else {
    return fold_short(crc, data, keys);
  };

  let (mut x0, mut x1) = load_lanes2x512(first);
  x0 = _mm512_xor_si512(x0, state_lane0_512(crc));

  let coeff_128b = broadcast_coeff_512(keys.fold_128b);
  for block in rest {
    let (y0, y1) = load_lanes2x512(block);
    x0 = fold_64(x0, coeff_128b, y0);
    x1 = fold_64(x1, coeff_128b, y1);
  }

  finish_lane(merge_lanes8(split_lanes_512(x0, x1), keys), tail, keys)
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch Entry Points
// ─────────────────────────────────────────────────────────────────────────────

/// 64-byte blocks on XMM registers.
#[inline]
pub(crate) fn update_pclmul_safe(crc: u32, data: &[u8], keys: &ClmulKeys) -> u32 {
  // SAFETY: all callers gate on `PCLMUL_READY` before reaching this kernel.
  unsafe { update_pclmul(crc, data, keys) }
}

/// 64-byte blocks on YMM registers, VEX encodings only.
#[inline]
pub(crate) fn update_vpclmul_avx2_safe(crc: u32, data: &[u8], keys: &ClmulKeys) -> u32 {
  // SAFETY: all callers gate on `VPCLMUL_YMM_READY` before reaching this
  // kernel.
  unsafe { update_vpclmul_avx2(crc, data, keys) }
}

/// 64-byte blocks on YMM registers with EVEX three-way xors.
#[inline]
pub(crate) fn update_vpclmul_avx512_ymm_safe(crc: u32, data: &[u8], keys: &ClmulKeys) -> u32 {
  // SAFETY: all callers gate on `VPCLMUL_ZMM_READY` before reaching this
  // kernel.
  unsafe { update_vpclmul_avx512_ymm(crc, data, keys) }
}

/// 128-byte blocks on ZMM registers.
#[inline]
pub(crate) fn update_vpclmul_avx512_zmm_safe(crc: u32, data: &[u8], keys: &ClmulKeys) -> u32 {
  // SAFETY: all callers gate on `VPCLMUL_ZMM_READY` before reaching this
  // kernel.
  unsafe { update_vpclmul_avx512_zmm(crc, data, keys) }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
