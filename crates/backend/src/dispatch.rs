//! Write-once publication slots for selected kernels.

/// Defines a write-once slot type holding a kernel function pointer and the
/// name it was published under.
///
/// The slot starts empty. `install` publishes a kernel with a single
/// compare-exchange; the first install wins and every later one is
/// discarded, so readers never observe the slot changing. `try_get` is one
/// atomic load on the hot path.
///
/// ```
/// backend::define_slot!(struct Slot => fn(u32) -> u32);
///
/// static SLOT: Slot = Slot::new();
///
/// fn add_one(x: u32) -> u32 {
///   x + 1
/// }
///
/// assert!(SLOT.try_get().is_none());
/// SLOT.install("add-one", add_one);
/// assert_eq!(SLOT.try_get().map(|k| k(1)), Some(2));
/// assert_eq!(SLOT.installed_name("none"), "add-one");
/// ```
#[macro_export]
macro_rules! define_slot {
  ($vis:vis struct $name:ident => $fnty:ty) => {
    $vis struct $name {
      kernel: core::sync::atomic::AtomicPtr<()>,
      name_ptr: core::sync::atomic::AtomicPtr<u8>,
      name_len: core::sync::atomic::AtomicUsize,
    }

    impl $name {
      $vis const fn new() -> Self {
        Self {
          kernel: core::sync::atomic::AtomicPtr::new(core::ptr::null_mut()),
          name_ptr: core::sync::atomic::AtomicPtr::new(core::ptr::null_mut()),
          name_len: core::sync::atomic::AtomicUsize::new(0),
        }
      }

      /// Publishes `kernel` unless a kernel is already published.
      $vis fn install(&self, name: &'static str, kernel: $fnty) {
        use core::sync::atomic::Ordering;
        let raw = kernel as *mut ();
        let won = self
          .kernel
          .compare_exchange(core::ptr::null_mut(), raw, Ordering::AcqRel, Ordering::Acquire)
          .is_ok();
        // Only the winning install may publish its name; a racing loser
        // holds the name of a kernel that is not in the slot.
        if won {
          self.name_len.store(name.len(), Ordering::Relaxed);
          self.name_ptr.store(name.as_ptr().cast_mut(), Ordering::Release);
        }
      }

      /// Returns the published kernel, if any.
      #[inline]
      $vis fn try_get(&self) -> Option<$fnty> {
        let raw = self.kernel.load(core::sync::atomic::Ordering::Acquire);
        if raw.is_null() {
          return None;
        }
        // SAFETY: the only non-null store is `install`, which received a
        // function pointer of exactly this type.
        Some(unsafe { core::mem::transmute::<*mut (), $fnty>(raw) })
      }

      /// Returns the published kernel name, or `fallback` while the slot
      /// is empty.
      $vis fn installed_name(&self, fallback: &'static str) -> &'static str {
        use core::sync::atomic::Ordering;
        let ptr = self.name_ptr.load(Ordering::Acquire);
        if ptr.is_null() {
          return fallback;
        }
        let len = self.name_len.load(Ordering::Relaxed);
        // SAFETY: `install` stored the parts of a `&'static str`, with the
        // Release store on the pointer ordering the length before it.
        unsafe { core::str::from_utf8_unchecked(core::slice::from_raw_parts(ptr, len)) }
      }
    }
  };
}

#[cfg(test)]
mod tests {
  #![allow(unsafe_code)]

  crate::define_slot!(struct TestSlot => fn(u32) -> u32);

  fn double(x: u32) -> u32 {
    x.wrapping_mul(2)
  }

  fn triple(x: u32) -> u32 {
    x.wrapping_mul(3)
  }

  #[test]
  fn empty_slot_reports_fallback() {
    let slot = TestSlot::new();
    assert!(slot.try_get().is_none());
    assert_eq!(slot.installed_name("tables"), "tables");
  }

  #[test]
  fn first_install_wins() {
    let slot = TestSlot::new();
    slot.install("double", double);
    slot.install("triple", triple);
    assert_eq!(slot.try_get().map(|k| k(21)), Some(42));
    assert_eq!(slot.installed_name("tables"), "double");
  }

  #[cfg(feature = "std")]
  #[test]
  fn racing_installs_publish_one_kernel() {
    static SLOT: TestSlot = TestSlot::new();

    let handles: std::vec::Vec<_> = (0..8)
      .map(|i| {
        std::thread::spawn(move || {
          if i % 2 == 0 {
            SLOT.install("double", double);
          } else {
            SLOT.install("triple", triple);
          }
        })
      })
      .collect();
    for handle in handles {
      handle.join().unwrap();
    }

    let out = SLOT.try_get().map(|k| k(10));
    match SLOT.installed_name("none") {
      "double" => assert_eq!(out, Some(20)),
      "triple" => assert_eq!(out, Some(30)),
      other => panic!("unexpected kernel name {other}"),
    }
  }
}
