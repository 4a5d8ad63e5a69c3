//! SSD1306 OLED Display Driver
//!
//! A buffered driver for monochrome OLED panels built on the SSD1306
//! controller, up to 128x64 pixels.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support, SPI (4-wire) or I2C buses
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Off-chip framebuffer with fast horizontal and vertical runs
//! - Rotation support
//! - Contrast, inversion and hardware scrolling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1306_fb::{Builder, Dimensions, Display, DrawMode, Rotation, SpiInterface};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::with_reset(spi, dc, rst);
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate0).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.initialize(&mut delay, true);
//!
//! display.draw_fast_hline(10, 5, 20, DrawMode::Set);
//! display.draw_fast_vline(10, 5, 20, DrawMode::Set);
//! let _ = display.flush();
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// SSD1306 command definitions and builders
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Packed 1-bit framebuffer
pub mod framebuffer;
/// Hardware interface abstraction
pub mod interface;
/// Pixel drawing modes
pub mod mode;
/// Coordinate rotation utilities
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use command::ScrollDirection;
pub use config::{Builder, Config, Dimensions, MAX_HEIGHT, MAX_WIDTH, Rotation, SupplyMode};
pub use display::Display;
pub use error::{BuilderError, Error};
pub use framebuffer::{Framebuffer, MAX_BUFFER_SIZE};
pub use interface::{
    ALTERNATE_I2C_ADDRESS, BusKind, DEFAULT_DATA_CHUNK_SIZE, DEFAULT_I2C_ADDRESS,
    DisplayInterface, I2cInterface, InterfaceError, NoResetPin, SpiInterface,
};
pub use mode::DrawMode;
