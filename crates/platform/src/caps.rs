//! CPU capability bitset.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// Set of CPU capabilities relevant to carryless-multiply CRC kernels.
///
/// Each bit answers one question kernel selection asks: is an instruction
/// subset present, has the OS enabled the matching register state, or does
/// this core prefer narrower vectors. A value is an immutable snapshot;
/// [`caps`](crate::caps) hands out copies of the cached probe result.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Caps(u64);

impl Caps {
  /// Empty set. Portable kernels only.
  pub const NONE: Caps = Caps(0);

  const fn bit(bit: u32) -> Caps {
    Caps(1 << bit)
  }

  /// Returns `true` if every capability in `mask` is present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, mask: Caps) -> bool {
    self.0 & mask.0 == mask.0
  }

  /// Set union.
  #[must_use]
  pub const fn union(self, other: Caps) -> Caps {
    Caps(self.0 | other.0)
  }

  /// Set intersection.
  #[must_use]
  pub const fn intersection(self, other: Caps) -> Caps {
    Caps(self.0 & other.0)
  }

  /// Returns `true` if no capability is present.
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  pub(crate) const fn to_bits(self) -> u64 {
    self.0
  }

  pub(crate) const fn from_bits(bits: u64) -> Caps {
    Caps(bits)
  }
}

impl BitOr for Caps {
  type Output = Caps;

  #[inline]
  fn bitor(self, rhs: Caps) -> Caps {
    self.union(rhs)
  }
}

impl BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Caps) {
    self.0 |= rhs.0;
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Caps(")?;
    let mut first = true;
    for &(cap, name) in NAMED {
      if self.has(cap) {
        if !first {
          write!(f, "+")?;
        }
        write!(f, "{name}")?;
        first = false;
      }
    }
    if first {
      write!(f, "none")?;
    }
    write!(f, ")")
  }
}

/// Bit names for `Debug` output.
const NAMED: &[(Caps, &str)] = &[
  (x86::PCLMULQDQ, "pclmulqdq"),
  (x86::AVX, "avx"),
  (x86::AVX2, "avx2"),
  (x86::VPCLMULQDQ, "vpclmulqdq"),
  (x86::AVX512F, "avx512f"),
  (x86::AVX512VL, "avx512vl"),
  (x86::OS_YMM, "os-ymm"),
  (x86::OS_ZMM, "os-zmm"),
  (x86::PREFER_YMM, "prefer-ymm"),
];

/// x86-64 capability bits and the readiness masks built from them.
pub mod x86 {
  use super::Caps;

  /// Carryless multiply on XMM registers.
  pub const PCLMULQDQ: Caps = Caps::bit(0);
  /// VEX encoding and 256-bit register state.
  pub const AVX: Caps = Caps::bit(1);
  /// 256-bit integer operations.
  pub const AVX2: Caps = Caps::bit(2);
  /// Carryless multiply on YMM/ZMM registers.
  pub const VPCLMULQDQ: Caps = Caps::bit(3);
  /// AVX-512 foundation.
  pub const AVX512F: Caps = Caps::bit(4);
  /// EVEX encodings on 128/256-bit registers.
  pub const AVX512VL: Caps = Caps::bit(5);
  /// OS saves YMM state across context switches (XCR0 bits 1-2).
  pub const OS_YMM: Caps = Caps::bit(6);
  /// OS saves ZMM and opmask state across context switches (XCR0 bits 5-7).
  pub const OS_ZMM: Caps = Caps::bit(7);
  /// Core pays warmup or licence penalties for 512-bit operation; hold
  /// AVX-512 kernels to 256-bit registers.
  pub const PREFER_YMM: Caps = Caps::bit(8);

  /// 128-bit folding kernel requirements.
  pub const PCLMUL_READY: Caps = PCLMULQDQ;

  /// 256-bit folding on the AVX2 register file, including the 128-bit
  /// reduction tail and OS-enabled YMM state.
  pub const VPCLMUL_YMM_READY: Caps =
    Caps(PCLMUL_READY.0 | AVX.0 | AVX2.0 | VPCLMULQDQ.0 | OS_YMM.0);

  /// 512-bit folding: adds the AVX-512 subset the kernels encode against
  /// and OS-enabled ZMM state.
  pub const VPCLMUL_ZMM_READY: Caps =
    Caps(VPCLMUL_YMM_READY.0 | AVX512F.0 | AVX512VL.0 | OS_ZMM.0);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn has_requires_every_bit() {
    let set = x86::PCLMULQDQ | x86::AVX2;
    assert!(set.has(x86::PCLMULQDQ));
    assert!(set.has(x86::PCLMUL_READY));
    assert!(!set.has(x86::VPCLMUL_YMM_READY));
  }

  #[test]
  fn readiness_masks_nest() {
    assert!(x86::VPCLMUL_YMM_READY.has(x86::PCLMUL_READY));
    assert!(x86::VPCLMUL_ZMM_READY.has(x86::VPCLMUL_YMM_READY));
    assert!(!x86::VPCLMUL_YMM_READY.has(x86::OS_ZMM));
  }

  #[test]
  fn empty_set() {
    assert!(Caps::NONE.is_empty());
    assert!(Caps::NONE.has(Caps::NONE));
    assert!(!Caps::NONE.has(x86::PCLMULQDQ));
  }

  #[test]
  fn named_bits_are_distinct() {
    for (i, &(a, _)) in NAMED.iter().enumerate() {
      for &(b, _) in &NAMED[i + 1..] {
        assert!(a.intersection(b).is_empty());
      }
    }
  }

  #[cfg(feature = "std")]
  #[test]
  fn debug_lists_set_bits() {
    let set = x86::PCLMULQDQ | x86::OS_YMM;
    let text = std::format!("{set:?}");
    assert_eq!(text, "Caps(pclmulqdq+os-ymm)");
    assert_eq!(std::format!("{:?}", Caps::NONE), "Caps(none)");
  }
}
