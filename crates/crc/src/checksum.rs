//! The checksum state machine every family implements.

use core::fmt::Debug;

/// Incremental checksum over a byte stream.
///
/// State carries across [`update`](Checksum::update) calls, and
/// [`finalize`](Checksum::finalize) borrows rather than consumes, so a
/// running value can be observed mid-stream. Feeding the same bytes in any
/// split produces the same result.
pub trait Checksum: Clone + Default {
  /// Width of [`Self::Output`] in bytes.
  const OUTPUT_SIZE: usize;

  /// The finalized checksum value.
  type Output: Copy + Eq + Debug;

  /// Fresh state with the family's initial value.
  fn new() -> Self;

  /// State primed with a previously finalized checksum, for resuming a
  /// stream that was checkpointed mid-way.
  fn with_initial(initial: Self::Output) -> Self;

  /// Absorbs `data` into the running state.
  fn update(&mut self, data: &[u8]);

  /// The checksum of everything absorbed so far.
  fn finalize(&self) -> Self::Output;

  /// Returns the state to what [`new`](Checksum::new) produces.
  fn reset(&mut self);

  /// Absorbs a sequence of buffers as if they were contiguous.
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// One-shot checksum of `data`.
  #[must_use]
  fn checksum(data: &[u8]) -> Self::Output {
    let mut state = Self::new();
    state.update(data);
    state.finalize()
  }
}
