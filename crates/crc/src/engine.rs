//! Per-family engines joining the key schedule, the portable tables and a
//! write-once kernel slot.
//!
//! `update` is the only hot path. Buffers at or above the fallback's
//! acceleration threshold go through the published kernel when vector
//! registers are free on this thread; everything else goes through the
//! tables. Both paths produce identical state for identical input, so the
//! routing decision is unobservable through results.

use backend::FallbackKind;

use crate::common::clmul::ClmulKeys;
use crate::common::portable;

/// Kernel signature shared by every accelerated path.
pub(crate) type KernelFn = fn(u32, &[u8], &ClmulKeys) -> u32;

backend::define_slot!(pub(crate) struct KernelSlot => KernelFn);

// ─────────────────────────────────────────────────────────────────────────────
// 32-bit Engine
// ─────────────────────────────────────────────────────────────────────────────

/// Engine for a 32-bit family.
pub(crate) struct Engine32 {
  keys: &'static ClmulKeys,
  tables: &'static [[u32; 256]; 8],
  fallback: FallbackKind,
  slot: KernelSlot,
}

impl Engine32 {
  pub(crate) const fn new(
    keys: &'static ClmulKeys,
    tables: &'static [[u32; 256]; 8],
    fallback: FallbackKind,
  ) -> Self {
    Self { keys, tables, fallback, slot: KernelSlot::new() }
  }

  /// Folds `data` into the raw shift-register state `crc`.
  pub(crate) fn update(&self, crc: u32, data: &[u8]) -> u32 {
    if data.len() >= self.fallback.accel_threshold() && backend::vreg::usable() {
      if let Some(kernel) = ensure_ready(&self.slot) {
        let _scope = backend::vreg::VregScope::enter();
        return kernel(crc, data, self.keys);
      }
    }
    match self.fallback {
      FallbackKind::Slice8 => portable::slice8_32(self.tables, crc, data),
      FallbackKind::Bytewise => portable::bytewise_32(&self.tables[0], crc, data),
    }
  }

  /// Name of the path `update` takes for large buffers.
  pub(crate) fn backend_name(&self) -> &'static str {
    let fallback = match self.fallback {
      FallbackKind::Slice8 => "portable/slice8",
      FallbackKind::Bytewise => "portable/bytewise",
    };
    let _ = ensure_ready(&self.slot);
    self.slot.installed_name(fallback)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// 16-bit Engine
// ─────────────────────────────────────────────────────────────────────────────

/// Engine for a 16-bit family, lifted into the 32-bit kernel domain.
pub(crate) struct Engine16 {
  keys: &'static ClmulKeys,
  table: &'static [u16; 256],
  slot: KernelSlot,
}

impl Engine16 {
  pub(crate) const fn new(keys: &'static ClmulKeys, table: &'static [u16; 256]) -> Self {
    Self { keys, table, slot: KernelSlot::new() }
  }

  /// Folds `data` into the raw shift-register state `crc`.
  pub(crate) fn update(&self, crc: u16, data: &[u8]) -> u16 {
    if data.len() >= FallbackKind::Bytewise.accel_threshold() && backend::vreg::usable() {
      if let Some(kernel) = ensure_ready(&self.slot) {
        let _scope = backend::vreg::VregScope::enter();
        // The lifted schedule keeps the state inside the low half, so the
        // truncation is exact.
        return kernel(u32::from(crc), data, self.keys) as u16;
      }
    }
    portable::bytewise_16(self.table, crc, data)
  }

  /// Name of the path `update` takes for large buffers.
  pub(crate) fn backend_name(&self) -> &'static str {
    let _ = ensure_ready(&self.slot);
    self.slot.installed_name("portable/bytewise")
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kernel Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the published kernel, running the probe and publishing on the
/// first call that finds hardware support. A slot that misses support stays
/// empty and is probed again on the next call, which matters only under
/// test-time capability restriction.
fn ensure_ready(slot: &KernelSlot) -> Option<KernelFn> {
  if let Some(kernel) = slot.try_get() {
    return Some(kernel);
  }
  if let Some((name, kernel)) = select_kernel() {
    slot.install(name, kernel);
    return slot.try_get();
  }
  None
}

#[cfg(target_arch = "x86_64")]
fn select_kernel() -> Option<(&'static str, KernelFn)> {
  use backend::Variant;
  use platform::caps::x86;

  let caps = platform::caps();
  if !caps.has(x86::PCLMUL_READY) {
    return None;
  }
  let variant = backend::probe(caps);
  let kernel: KernelFn = match variant {
    Variant::Pclmul => crate::x86_64::update_pclmul_safe,
    Variant::VpclmulAvx2 => crate::x86_64::update_vpclmul_avx2_safe,
    Variant::VpclmulAvx512Ymm => crate::x86_64::update_vpclmul_avx512_ymm_safe,
    Variant::VpclmulAvx512Zmm => crate::x86_64::update_vpclmul_avx512_zmm_safe,
  };
  Some((variant.name(), kernel))
}

#[cfg(not(target_arch = "x86_64"))]
fn select_kernel() -> Option<(&'static str, KernelFn)> {
  None
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
