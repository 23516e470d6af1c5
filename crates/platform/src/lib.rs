//! CPU capability discovery for kernel selection.
//!
//! The crate answers one question: which vector instruction sets can this
//! process actually use right now? The answer folds together CPUID feature
//! flags, OS register-state enablement (XCR0), and build-time
//! `-C target-feature` assertions into a single [`Caps`] set.
//!
//! ```
//! use platform::{caps, Caps};
//!
//! let caps = caps();
//! if caps.has(platform::caps::x86::PCLMUL_READY) {
//!   // carry-less multiply kernels are safe to run
//! }
//! assert!(caps.has(Caps::NONE));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![deny(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;
#[cfg(target_arch = "x86_64")]
pub mod x86_64;

pub use caps::Caps;
pub use detect::detect_uncached;
#[cfg(any(test, feature = "testing"))]
pub use detect::{lift_caps_restriction, restrict_caps};

/// Returns the capabilities of the running CPU.
///
/// The first call probes the hardware; every later call is a single atomic
/// load of the cached result.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::cached()
}
