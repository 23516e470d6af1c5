//! One-time CPU capability detection.
//!
//! Probing runs once per process and the result is cached; every later
//! [`caps`](crate::caps) call is a single atomic load. On x86-64 the probe
//! reads CPUID directly and XGETBV for OS register-state enablement, so it
//! behaves the same with and without `std`. Other architectures report
//! [`Caps::NONE`] and run on the portable kernels.

use crate::caps::Caps;

pub(crate) fn cached() -> Caps {
  // Miri cannot interpret CPUID; run everything on portable kernels.
  #[cfg(miri)]
  let caps = Caps::NONE;
  #[cfg(not(miri))]
  let caps = cache::get_or_init(detect_uncached);
  restrict(caps)
}

fn restrict(caps: Caps) -> Caps {
  #[cfg(any(test, feature = "testing"))]
  {
    restriction::apply(caps)
  }
  #[cfg(not(any(test, feature = "testing")))]
  {
    caps
  }
}

/// Probes the hardware directly, bypassing the cache and any restriction.
#[must_use]
pub fn detect_uncached() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }
  #[cfg(all(not(miri), target_arch = "x86_64"))]
  {
    probe::detect()
  }
  #[cfg(all(not(miri), not(target_arch = "x86_64")))]
  {
    Caps::NONE
  }
}

/// Drops every capability outside `allowed` for the rest of the process,
/// or until [`lift_caps_restriction`] runs.
///
/// Detection never invents capabilities, so the hook can only narrow the
/// probed set. It affects kernels selected after the call; slots that
/// already published a kernel keep it.
#[cfg(any(test, feature = "testing"))]
pub fn restrict_caps(allowed: Caps) {
  restriction::set(allowed);
}

/// Removes a restriction installed by [`restrict_caps`].
#[cfg(any(test, feature = "testing"))]
pub fn lift_caps_restriction() {
  restriction::clear();
}

#[cfg(any(test, feature = "testing"))]
mod restriction {
  use core::sync::atomic::{AtomicU64, Ordering};

  use crate::caps::Caps;

  static MASK: AtomicU64 = AtomicU64::new(!0);

  pub(super) fn apply(caps: Caps) -> Caps {
    caps.intersection(Caps::from_bits(MASK.load(Ordering::Relaxed)))
  }

  pub(super) fn set(allowed: Caps) {
    MASK.store(allowed.to_bits(), Ordering::Relaxed);
  }

  pub(super) fn clear() {
    MASK.store(!0, Ordering::Relaxed);
  }
}

#[cfg(all(not(miri), feature = "std"))]
mod cache {
  use std::sync::OnceLock;

  use crate::caps::Caps;

  static CACHED: OnceLock<Caps> = OnceLock::new();

  pub(super) fn get_or_init(probe: fn() -> Caps) -> Caps {
    *CACHED.get_or_init(probe)
  }
}

#[cfg(all(not(miri), not(feature = "std")))]
mod cache {
  use core::sync::atomic::{AtomicU64, Ordering};

  use crate::caps::Caps;

  // Bit 63 marks "probed"; the capability catalog stays well below it.
  const PROBED: u64 = 1 << 63;

  static CACHED: AtomicU64 = AtomicU64::new(0);

  pub(super) fn get_or_init(probe: fn() -> Caps) -> Caps {
    let cached = CACHED.load(Ordering::Relaxed);
    if cached & PROBED != 0 {
      return Caps::from_bits(cached & !PROBED);
    }
    // Detection is a pure function of the hardware; racing probes store
    // the same value.
    let fresh = probe();
    CACHED.store(fresh.to_bits() | PROBED, Ordering::Relaxed);
    fresh
  }
}

#[cfg(all(not(miri), target_arch = "x86_64"))]
mod probe {
  #![allow(unsafe_code)]

  use core::arch::x86_64::{__cpuid, __cpuid_count, _xgetbv};

  use crate::caps::{x86, Caps};

  // CPUID.1:ECX feature bits.
  const ECX1_PCLMULQDQ: u32 = 1 << 1;
  const ECX1_OSXSAVE: u32 = 1 << 27;
  const ECX1_AVX: u32 = 1 << 28;

  // CPUID.7.0:EBX / ECX feature bits.
  const EBX7_AVX2: u32 = 1 << 5;
  const EBX7_AVX512F: u32 = 1 << 16;
  const EBX7_AVX512VL: u32 = 1 << 31;
  const ECX7_VPCLMULQDQ: u32 = 1 << 10;

  // XCR0 state components.
  const XCR0_YMM: u64 = 0x06; // SSE + AVX state
  const XCR0_ZMM: u64 = 0xE6; // plus opmask, ZMM_Hi256, Hi16_ZMM

  pub(super) fn detect() -> Caps {
    let mut caps = compile_time();

    // SAFETY: CPUID is unconditionally available on x86-64.
    let leaf0 = unsafe { __cpuid(0) };
    // SAFETY: leaf 1 exists on every x86-64 part.
    let leaf1 = unsafe { __cpuid(1) };

    if leaf1.ecx & ECX1_PCLMULQDQ != 0 {
      caps |= x86::PCLMULQDQ;
    }
    if leaf1.ecx & ECX1_AVX != 0 {
      caps |= x86::AVX;
    }

    if leaf0.eax >= 7 {
      // SAFETY: leaf 7 existence checked against the max basic leaf.
      let leaf7 = unsafe { __cpuid_count(7, 0) };
      if leaf7.ebx & EBX7_AVX2 != 0 {
        caps |= x86::AVX2;
      }
      if leaf7.ebx & EBX7_AVX512F != 0 {
        caps |= x86::AVX512F;
      }
      if leaf7.ebx & EBX7_AVX512VL != 0 {
        caps |= x86::AVX512VL;
      }
      if leaf7.ecx & ECX7_VPCLMULQDQ != 0 {
        caps |= x86::VPCLMULQDQ;
      }
    }

    // Instruction support is not enough for the wide kernels; the OS must
    // opt into saving the wider register state.
    if leaf1.ecx & ECX1_OSXSAVE != 0 {
      // SAFETY: OSXSAVE confirms XGETBV executes without faulting.
      let xcr0 = unsafe { read_xcr0() };
      if xcr0 & XCR0_YMM == XCR0_YMM {
        caps |= x86::OS_YMM;
      }
      if xcr0 & XCR0_ZMM == XCR0_ZMM {
        caps |= x86::OS_ZMM;
      }
    }

    if caps.has(x86::VPCLMULQDQ) && crate::x86_64::CpuidIdentity::read().microarch().prefers_ymm()
    {
      caps |= x86::PREFER_YMM;
    }

    caps
  }

  /// Capabilities asserted at build time via `-C target-feature`. The
  /// runtime probe only ever adds to this floor.
  const fn compile_time() -> Caps {
    let mut caps = Caps::NONE;
    if cfg!(target_feature = "pclmulqdq") {
      caps = caps.union(x86::PCLMULQDQ);
    }
    if cfg!(target_feature = "avx") {
      caps = caps.union(x86::AVX);
    }
    if cfg!(target_feature = "avx2") {
      caps = caps.union(x86::AVX2);
    }
    if cfg!(target_feature = "vpclmulqdq") {
      caps = caps.union(x86::VPCLMULQDQ);
    }
    if cfg!(target_feature = "avx512f") {
      caps = caps.union(x86::AVX512F);
    }
    if cfg!(target_feature = "avx512vl") {
      caps = caps.union(x86::AVX512VL);
    }
    caps
  }

  #[target_feature(enable = "xsave")]
  unsafe fn read_xcr0() -> u64 {
    _xgetbv(0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::caps::x86;

  #[cfg(not(miri))]
  #[test]
  fn detection_is_deterministic() {
    assert_eq!(detect_uncached(), detect_uncached());
  }

  #[cfg(not(miri))]
  #[test]
  fn wide_readiness_implies_narrow() {
    let caps = detect_uncached();
    if caps.has(x86::VPCLMUL_ZMM_READY) {
      assert!(caps.has(x86::VPCLMUL_YMM_READY));
    }
    if caps.has(x86::VPCLMUL_YMM_READY) {
      assert!(caps.has(x86::PCLMUL_READY));
    }
  }

  #[test]
  fn restriction_narrows_then_lifts() {
    let full = cached();
    restrict_caps(Caps::NONE);
    assert!(cached().is_empty());
    restrict_caps(x86::PCLMUL_READY);
    assert_eq!(cached(), full.intersection(x86::PCLMUL_READY));
    lift_caps_restriction();
    assert_eq!(cached(), full);
  }
}
