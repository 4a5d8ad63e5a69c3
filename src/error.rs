//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus and pin errors
//!
//! Drawing never fails: coordinates and run lengths that fall outside the
//! panel are clipped or ignored. Only bus traffic can produce an [`Error`].
//!
//! ## Example
//!
//! ```
//! use ssd1306_fb::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Height must be a whole number of pages
//! let result = Dimensions::new(128, 60);
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum segment outputs (columns) driven by the SSD1306
pub const MAX_WIDTH: u8 = 128;

/// Maximum common outputs (rows) driven by the SSD1306
pub const MAX_HEIGHT: u8 = 64;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (bus or GPIO)
    ///
    /// Wraps the underlying error from the [`DisplayInterface`] implementation.
    /// The transfer is abandoned at the failing burst and not retried.
    Interface(I::Error),
    /// Scroll page range is reversed or extends past the last page
    InvalidScrollRange {
        /// First page of the scroll window
        start: u8,
        /// Last page of the scroll window
        stop: u8,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::InvalidScrollRange { start, stop } => {
                write!(f, "Invalid scroll range: pages {start}..={stop}")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width requested
        width: u8,
        /// Height requested
        height: u8,
    },
    /// Rotation outside 0..=3 quarter turns
    InvalidRotation(u8),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_WIDTH}x{MAX_HEIGHT}, height must be multiple of 8)"
            ),
            Self::InvalidRotation(value) => {
                write!(f, "Invalid rotation {value} (expected 0..=3)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
