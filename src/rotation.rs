//! Coordinate rotation utilities
//!
//! This module maps user-space coordinates to buffer-space coordinates for
//! each of the four [`Rotation`] modes. Buffer space is the controller's
//! native orientation: `W` columns by `H` rows, eight rows packed per byte.
//!
//! | Rotation  | Point             | Horizontal run          | Vertical run            |
//! |-----------|-------------------|-------------------------|-------------------------|
//! | Rotate0   | `(x, y)`          | row at `(x, y)`         | column at `(x, y)`      |
//! | Rotate90  | `(W-y-1, x)`      | column at `(W-y-1, x)`  | row at `(W-y-h, x)`     |
//! | Rotate180 | `(W-x-1, H-y-1)`  | row at `(W-x-w, H-y-1)` | column at `(W-x-1, H-y-h)` |
//! | Rotate270 | `(y, H-x-1)`      | column at `(y, H-x-w)`  | row at `(y, H-x-1)`     |
//!
//! Runs keep their length. When a rotation exchanges the axes a horizontal
//! run becomes a buffer column and a vertical run becomes a buffer row; the
//! start coordinate is shifted so the run still covers the same pixels when
//! it is drawn in the increasing direction.
//!
//! ## Example
//!
//! ```
//! use ssd1306_fb::{rotation::{transform_hline, transform_point, Run}, Rotation};
//!
//! // 128x64 panel turned upside down: the origin lands in the far corner
//! assert_eq!(transform_point(0, 0, 128, 64, Rotation::Rotate180), (127, 63));
//!
//! // A 10 pixel horizontal stroke on a quarter-turned panel is a buffer column
//! let run = transform_hline(0, 0, 10, 128, 64, Rotation::Rotate90);
//! assert_eq!(run, Run::Column { x: 127, y: 0, len: 10 });
//! ```

use crate::config::Rotation;

/// A run expressed in buffer space
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Run {
    /// Horizontal run along one buffer row
    Row {
        /// Leftmost column
        x: i32,
        /// Row
        y: i32,
        /// Number of pixels
        len: i32,
    },
    /// Vertical run down one buffer column
    Column {
        /// Column
        x: i32,
        /// Topmost row
        y: i32,
        /// Number of pixels
        len: i32,
    },
}

/// Map a user-space point to buffer space
///
/// `width` and `height` are the physical (unrotated) panel dimensions.
/// Arithmetic saturates, so callers clip to the panel before transforming.
pub fn transform_point(
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    rotation: Rotation,
) -> (i32, i32) {
    match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (width.saturating_sub(y).saturating_sub(1), x),
        Rotation::Rotate180 => (
            width.saturating_sub(x).saturating_sub(1),
            height.saturating_sub(y).saturating_sub(1),
        ),
        Rotation::Rotate270 => (y, height.saturating_sub(x).saturating_sub(1)),
    }
}

/// Map a user-space horizontal run starting at `(x, y)` to buffer space
pub fn transform_hline(
    x: i32,
    y: i32,
    len: i32,
    width: i32,
    height: i32,
    rotation: Rotation,
) -> Run {
    let (bx, by) = transform_point(x, y, width, height, rotation);
    match rotation {
        Rotation::Rotate0 => Run::Row { x: bx, y: by, len },
        Rotation::Rotate90 => Run::Column { x: bx, y: by, len },
        Rotation::Rotate180 => Run::Row {
            x: bx.saturating_sub(len.saturating_sub(1)),
            y: by,
            len,
        },
        Rotation::Rotate270 => Run::Column {
            x: bx,
            y: by.saturating_sub(len.saturating_sub(1)),
            len,
        },
    }
}

/// Map a user-space vertical run starting at `(x, y)` to buffer space
pub fn transform_vline(
    x: i32,
    y: i32,
    len: i32,
    width: i32,
    height: i32,
    rotation: Rotation,
) -> Run {
    let (bx, by) = transform_point(x, y, width, height, rotation);
    match rotation {
        Rotation::Rotate0 => Run::Column { x: bx, y: by, len },
        Rotation::Rotate90 => Run::Row {
            x: bx.saturating_sub(len.saturating_sub(1)),
            y: by,
            len,
        },
        Rotation::Rotate180 => Run::Column {
            x: bx,
            y: by.saturating_sub(len.saturating_sub(1)),
            len,
        },
        Rotation::Rotate270 => Run::Row { x: bx, y: by, len },
    }
}
