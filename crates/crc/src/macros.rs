//! Internal macros generating the per-family checksum types.
//!
//! The four families share one shape: a raw shift-register state, a static
//! engine, and the [`Checksum`](crate::Checksum) surface over them. These
//! macros keep the per-family modules down to their constants and docs.

/// Generates a 32-bit checksum type over an [`Engine32`](crate::engine::Engine32) static.
///
/// The generated families use the common `init = !0`, `xorout = !0`
/// convention, so the stored state is the raw shift register and
/// `finalize` applies the output xor.
macro_rules! define_crc32_type {
  (
    $(#[$outer:meta])*
    $vis:vis struct $name:ident {
      engine: $engine:expr,
    }
  ) => {
    $(#[$outer])*
    #[derive(Clone)]
    $vis struct $name {
      state: u32,
    }

    impl $name {
      /// Name of the path `update` takes for large buffers.
      #[must_use]
      pub fn backend_name() -> &'static str {
        $engine.backend_name()
      }
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        <Self as $crate::Checksum>::new()
      }
    }

    impl $crate::Checksum for $name {
      const OUTPUT_SIZE: usize = 4;
      type Output = u32;

      #[inline]
      fn new() -> Self {
        Self { state: !0 }
      }

      #[inline]
      fn with_initial(initial: u32) -> Self {
        Self { state: initial ^ !0 }
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        self.state = $engine.update(self.state, data);
      }

      #[inline]
      fn finalize(&self) -> u32 {
        self.state ^ !0
      }

      #[inline]
      fn reset(&mut self) {
        self.state = !0;
      }
    }
  };
}

/// Generates a 16-bit checksum type over an [`Engine16`](crate::engine::Engine16) static.
///
/// Both 16-bit families use `init = 0`, `xorout = 0`, so state and CRC value
/// coincide.
macro_rules! define_crc16_type {
  (
    $(#[$outer:meta])*
    $vis:vis struct $name:ident {
      engine: $engine:expr,
    }
  ) => {
    $(#[$outer])*
    #[derive(Clone)]
    $vis struct $name {
      state: u16,
    }

    impl $name {
      /// Name of the path `update` takes for large buffers.
      #[must_use]
      pub fn backend_name() -> &'static str {
        $engine.backend_name()
      }
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        <Self as $crate::Checksum>::new()
      }
    }

    impl $crate::Checksum for $name {
      const OUTPUT_SIZE: usize = 2;
      type Output = u16;

      #[inline]
      fn new() -> Self {
        Self { state: 0 }
      }

      #[inline]
      fn with_initial(initial: u16) -> Self {
        Self { state: initial }
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        self.state = $engine.update(self.state, data);
      }

      #[inline]
      fn finalize(&self) -> u16 {
        self.state
      }

      #[inline]
      fn reset(&mut self) {
        self.state = 0;
      }
    }
  };
}
