//! Scoped tracking of vector-register use.
//!
//! Every vector kernel call runs inside a [`VregScope`]. The scope marks
//! the current thread, and [`usable`] reports whether a new kernel may
//! start, which is how re-entrant callers (a panic hook computing a
//! checksum, say) end up on the portable path instead of clobbering live
//! vector state. Scopes do not nest; entering twice without dropping is a
//! bug caught by a debug assertion.

use core::marker::PhantomData;

/// RAII marker for a running vector kernel on the current thread.
pub struct VregScope {
  // Scope state is per thread, so the guard must not move across threads.
  _not_send: PhantomData<*const ()>,
}

impl VregScope {
  /// Marks the current thread as running inside a vector kernel until the
  /// returned guard drops.
  #[must_use]
  pub fn enter() -> Self {
    depth::enter();
    VregScope { _not_send: PhantomData }
  }
}

impl Drop for VregScope {
  fn drop(&mut self) {
    depth::exit();
  }
}

/// True when the current context may run a vector kernel.
#[inline]
#[must_use]
pub fn usable() -> bool {
  depth::current() == 0
}

#[cfg(feature = "std")]
mod depth {
  use std::cell::Cell;

  std::thread_local! {
    static DEPTH: Cell<u32> = const { Cell::new(0) };
  }

  pub(super) fn current() -> u32 {
    DEPTH.with(Cell::get)
  }

  pub(super) fn enter() {
    DEPTH.with(|d| {
      let depth = d.get();
      debug_assert_eq!(depth, 0, "vector kernel scopes do not nest");
      d.set(depth + 1);
    });
  }

  pub(super) fn exit() {
    DEPTH.with(|d| {
      let depth = d.get();
      debug_assert!(depth > 0, "vector scope exited without a matching enter");
      d.set(depth.saturating_sub(1));
    });
  }
}

#[cfg(not(feature = "std"))]
mod depth {
  // Without thread-local storage there is no per-thread state to consult;
  // every context counts as usable and the guard is free.
  pub(super) fn current() -> u32 {
    0
  }

  pub(super) fn enter() {}

  pub(super) fn exit() {}
}
