//! Shared pieces of the checksum families: reference loops, table
//! generation, portable kernels, and the fold key schedules.

pub(crate) mod clmul;
pub(crate) mod portable;
pub(crate) mod reference;
pub(crate) mod tables;

/// Standard nine-byte input whose checksum is published for every CRC
/// parameterization.
#[cfg(test)]
pub(crate) const CHECK_INPUT: &[u8] = b"123456789";
