//! Length thresholds below which folding kernels lose to table lookup.
//!
//! A folding kernel spends fixed cost on accumulator setup and final
//! reduction, so short inputs are cheaper on the portable tables. Where the
//! break-even sits depends on how strong the portable fallback is, which is
//! why the threshold is keyed on the fallback kind rather than being a
//! single constant.

/// Minimum input length routed to vector kernels when the fallback is
/// slice-by-8 table lookup.
pub const ACCEL_MIN_SLICE8: usize = 64;

/// Minimum input length routed to vector kernels when the fallback is a
/// single bytewise table.
pub const ACCEL_MIN_BYTEWISE: usize = 16;

/// The portable kernel an engine degrades to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackKind {
  /// Eight 256-entry tables, eight input bytes per step.
  Slice8,
  /// One 256-entry table, one input byte per step.
  Bytewise,
}

impl FallbackKind {
  /// Shortest input worth handing to a vector kernel over this fallback.
  #[inline]
  #[must_use]
  pub const fn accel_threshold(self) -> usize {
    match self {
      FallbackKind::Slice8 => ACCEL_MIN_SLICE8,
      FallbackKind::Bytewise => ACCEL_MIN_BYTEWISE,
    }
  }
}
