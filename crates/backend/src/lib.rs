//! Selection and publication machinery for runtime-dispatched kernels.
//!
//! [`probe`] maps a [`platform::Caps`] set onto the widest [`Variant`] it
//! can run, [`define_slot!`](crate::define_slot) stamps out the write-once
//! slot a selected kernel is published through, and [`vreg`] tracks when
//! the current context may touch vector registers at all.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![deny(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

pub mod dispatch;
pub mod policy;
pub mod variant;
pub mod vreg;

pub use policy::FallbackKind;
pub use variant::{probe, Variant};

#[cfg(feature = "testing")]
pub use platform::{lift_caps_restriction, restrict_caps};
