//! Kernel variants in probe order.

use platform::caps::x86;
use platform::Caps;

/// A carry-less-multiply kernel shape selected for the running CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
  /// 128-bit folding over four SSE lanes.
  Pclmul,
  /// 256-bit folding with AVX2 register moves.
  VpclmulAvx2,
  /// 256-bit folding with AVX-512VL ternary logic.
  VpclmulAvx512Ymm,
  /// 512-bit folding over two ZMM accumulators.
  VpclmulAvx512Zmm,
}

impl Variant {
  /// Kernel name reported through engine introspection.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Variant::Pclmul => "pclmul",
      Variant::VpclmulAvx2 => "vpclmul-avx2",
      Variant::VpclmulAvx512Ymm => "vpclmul-avx512-ymm",
      Variant::VpclmulAvx512Zmm => "vpclmul-avx512-zmm",
    }
  }
}

/// Picks the widest variant `caps` can run.
///
/// Pure over its argument: equal capability sets always select the same
/// variant. The caller gates on [`x86::PCLMUL_READY`] before probing; with
/// nothing beyond that the answer is [`Variant::Pclmul`].
#[must_use]
pub fn probe(caps: Caps) -> Variant {
  if caps.has(x86::VPCLMUL_ZMM_READY) {
    if caps.has(x86::PREFER_YMM) {
      return Variant::VpclmulAvx512Ymm;
    }
    return Variant::VpclmulAvx512Zmm;
  }
  if caps.has(x86::VPCLMUL_YMM_READY) {
    return Variant::VpclmulAvx2;
  }
  Variant::Pclmul
}
