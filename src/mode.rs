//! Drawing modes for monochrome pixels
//!
//! Every drawing primitive takes a [`DrawMode`] saying what happens to the
//! addressed bits:
//!
//! | Mode   | Bit operation     |
//! |--------|-------------------|
//! | Set    | `byte \|= mask`   |
//! | Clear  | `byte &= !mask`   |
//! | Invert | `byte ^= mask`    |
//!
//! ## Example
//!
//! ```
//! use ssd1306_fb::DrawMode;
//!
//! let mut byte = 0b0000_1111;
//! DrawMode::Set.apply(&mut byte, 0b1000_0000);
//! DrawMode::Clear.apply(&mut byte, 0b0000_0001);
//! DrawMode::Invert.apply(&mut byte, 0b0000_0110);
//! assert_eq!(byte, 0b1000_1000);
//! ```

/// Bitwise operation applied to addressed pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// Turn pixels on
    #[default]
    Set,
    /// Turn pixels off
    Clear,
    /// Flip pixels
    Invert,
}

impl DrawMode {
    /// Apply this mode to the bits of `byte` selected by `mask`
    #[inline]
    pub fn apply(self, byte: &mut u8, mask: u8) {
        match self {
            Self::Set => *byte |= mask,
            Self::Clear => *byte &= !mask,
            Self::Invert => *byte ^= mask,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for DrawMode {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::Set,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::Clear,
        }
    }
}
