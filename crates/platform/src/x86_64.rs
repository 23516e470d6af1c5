//! x86-64 microarchitecture identification.
//!
//! `VPCLMULQDQ` presence alone does not settle the register width question.
//! Ice Lake pays a ZMM warmup plus licence-based downclocking that erase the
//! 512-bit advantage on checksum-sized buffers, while Sapphire Rapids and
//! AMD Zen 4/5 run full width without the penalty. This module reads the
//! CPUID vendor and family/model signature so detection can tag such cores
//! with [`PREFER_YMM`](crate::caps::x86::PREFER_YMM).

#![allow(unsafe_code)]

use core::arch::x86_64::__cpuid;

/// CPU vendor from CPUID leaf 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vendor {
  Intel,
  Amd,
  Other,
}

/// Cores with distinct 512-bit behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MicroArch {
  /// Intel Ice Lake, client and SP. First VPCLMULQDQ parts; ZMM warmup
  /// plus heavy licence downclocking.
  IceLake,
  /// Intel Sapphire Rapids.
  SapphireRapids,
  /// Intel Emerald Rapids.
  EmeraldRapids,
  /// Intel Granite Rapids.
  GraniteRapids,
  /// AMD Zen 4. AVX-512 double-pumped over 256-bit units, no warmup.
  Zen4,
  /// AMD Zen 5. Native 512-bit datapath on desktop and server parts.
  Zen5,
  /// Anything else, including pre-AVX-512 cores.
  Unknown,
}

impl MicroArch {
  /// Returns `true` if 512-bit operation tends to cost more than it pays
  /// on this core, so AVX-512 kernels should stay on 256-bit registers.
  #[must_use]
  pub const fn prefers_ymm(self) -> bool {
    matches!(self, MicroArch::IceLake)
  }
}

/// Raw CPUID identity: vendor plus decoded family/model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuidIdentity {
  pub vendor: Vendor,
  pub family: u32,
  pub model: u32,
}

impl CpuidIdentity {
  /// Reads vendor and family/model from CPUID leaves 0 and 1.
  #[must_use]
  pub fn read() -> Self {
    // SAFETY: CPUID is unconditionally available on x86-64.
    let leaf0 = unsafe { __cpuid(0) };
    let vendor = decode_vendor(leaf0.ebx, leaf0.edx, leaf0.ecx);

    // SAFETY: leaf 1 exists on every x86-64 part.
    let leaf1 = unsafe { __cpuid(1) };
    let (family, model) = decode_signature(leaf1.eax);

    Self { vendor, family, model }
  }

  /// Maps this identity onto a known core.
  #[must_use]
  pub fn microarch(self) -> MicroArch {
    match self.vendor {
      Vendor::Intel => intel_microarch(self.family, self.model),
      Vendor::Amd => amd_microarch(self.family, self.model),
      Vendor::Other => MicroArch::Unknown,
    }
  }
}

const fn decode_vendor(ebx: u32, edx: u32, ecx: u32) -> Vendor {
  // "GenuineIntel" is (ebx, edx, ecx) = ("Genu", "ineI", "ntel").
  if ebx == 0x756E_6547 && edx == 0x4965_6E69 && ecx == 0x6C65_746E {
    Vendor::Intel
  } else if ebx == 0x6874_7541 && edx == 0x6974_6E65 && ecx == 0x444D_4163 {
    // "AuthenticAMD"
    Vendor::Amd
  } else {
    Vendor::Other
  }
}

/// Decodes display family/model from the leaf 1 EAX signature.
const fn decode_signature(eax: u32) -> (u32, u32) {
  let base_family = (eax >> 8) & 0xF;
  let base_model = (eax >> 4) & 0xF;
  let ext_family = (eax >> 20) & 0xFF;
  let ext_model = (eax >> 16) & 0xF;

  let family = if base_family == 0xF { base_family + ext_family } else { base_family };
  let model = if base_family == 0xF || base_family == 0x6 {
    (ext_model << 4) | base_model
  } else {
    base_model
  };
  (family, model)
}

const fn intel_microarch(family: u32, model: u32) -> MicroArch {
  if family != 6 {
    return MicroArch::Unknown;
  }
  match model {
    // Ice Lake-SP/-D and the client parts.
    0x6A | 0x6C | 0x7D | 0x7E => MicroArch::IceLake,
    0x8F => MicroArch::SapphireRapids,
    0xCF => MicroArch::EmeraldRapids,
    0xAD | 0xAE => MicroArch::GraniteRapids,
    _ => MicroArch::Unknown,
  }
}

const fn amd_microarch(family: u32, model: u32) -> MicroArch {
  match family {
    // Family 19h spans Zen 3 and Zen 4; Zen 4 is the 0x10-0x1F server
    // range (Genoa) plus models from 0x60 up.
    0x19 => {
      if model >= 0x60 || (model >= 0x10 && model < 0x20) {
        MicroArch::Zen4
      } else {
        MicroArch::Unknown
      }
    }
    0x1A => MicroArch::Zen5,
    _ => MicroArch::Unknown,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn signature_decode_uses_extended_model_for_family_6() {
    // Ice Lake-SP: eax = 0x000606A6.
    let (family, model) = decode_signature(0x000606A6);
    assert_eq!(family, 6);
    assert_eq!(model, 0x6A);
    assert_eq!(intel_microarch(family, model), MicroArch::IceLake);
  }

  #[test]
  fn signature_decode_adds_extended_family() {
    // Zen 4 (Raphael): eax = 0x00A60F12.
    let (family, model) = decode_signature(0x00A60F12);
    assert_eq!(family, 0x19);
    assert_eq!(model, 0x61);
    assert_eq!(amd_microarch(family, model), MicroArch::Zen4);
  }

  #[test]
  fn genoa_counts_as_zen4() {
    assert_eq!(amd_microarch(0x19, 0x11), MicroArch::Zen4);
    assert_eq!(amd_microarch(0x19, 0x01), MicroArch::Unknown);
    assert_eq!(amd_microarch(0x1A, 0x44), MicroArch::Zen5);
  }

  #[test]
  fn only_ice_lake_prefers_narrow() {
    assert!(MicroArch::IceLake.prefers_ymm());
    assert!(!MicroArch::SapphireRapids.prefers_ymm());
    assert!(!MicroArch::GraniteRapids.prefers_ymm());
    assert!(!MicroArch::Zen4.prefers_ymm());
    assert!(!MicroArch::Zen5.prefers_ymm());
    assert!(!MicroArch::Unknown.prefers_ymm());
  }

  #[cfg(not(miri))]
  #[test]
  fn identity_read_is_stable() {
    assert_eq!(CpuidIdentity::read(), CpuidIdentity::read());
  }
}
