//! Hardware-accelerated CRC-32 and CRC-16 checksums.
//!
//! Four CRC families behind one streaming [`Checksum`] surface:
//!
//! | Type | Polynomial | Output | Use cases |
//! |------|------------|--------|-----------|
//! | [`Crc32`] | 0x04C11DB7 | `u32` | Ethernet, gzip, zip, PNG |
//! | [`Crc32C`] | 0x1EDC6F41 | `u32` | iSCSI, SCTP, ext4, Btrfs |
//! | [`Crc16Arc`] | 0x8005 | `u16` | ARC, LHA, Modbus |
//! | [`Crc16Kermit`] | 0x1021 | `u16` | Kermit, IrDA, X.25 |
//!
//! # Hardware Acceleration
//!
//! On x86_64 the first large update probes the CPU once and publishes the
//! widest usable carry-less-multiply kernel for the rest of the process:
//!
//! | Backend | Requires | Block |
//! |---------|----------|-------|
//! | `vpclmul-avx512-zmm` | VPCLMULQDQ, AVX-512 F+VL, OS ZMM state | 128 B |
//! | `vpclmul-avx512-ymm` | same, on cores preferring 256-bit ops | 64 B |
//! | `vpclmul-avx2` | VPCLMULQDQ, AVX2, OS YMM state | 64 B |
//! | `pclmul` | PCLMULQDQ | 64 B |
//!
//! Other platforms, short buffers and re-entrant callers take the
//! table-driven portable path. Results are bit-identical on every path.
//!
//! # Example
//!
//! ```rust
//! use crcfold::{Checksum, Crc32};
//!
//! // One-shot computation
//! assert_eq!(Crc32::checksum(b"123456789"), 0xCBF4_3926);
//!
//! // Streaming computation
//! let mut hasher = Crc32::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), 0xCBF4_3926);
//! ```
//!
//! # no_std Support
//!
//! Disable the `std` feature for embedded use:
//!
//! ```toml
//! [dependencies]
//! crcfold = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod checksum;
mod common;
mod engine;

// Internal macros must be declared before the modules that use them.
#[macro_use]
mod macros;

mod crc16;
mod crc32;

#[cfg(target_arch = "x86_64")]
mod x86_64;

pub use checksum::Checksum;
pub use crc16::{Crc16Arc, Crc16Kermit};
pub use crc32::{Crc32, Crc32C};
