//! SSD1306 command definitions and command builders
//!
//! This module defines the opcodes used to control the SSD1306 OLED
//! controller, and builder functions that assemble complete command
//! sequences (initialization, scrolling, addressing) as fixed-size arrays.
//!
//! Every builder returns a fresh array. Nothing here is shared or mutated
//! between calls, so a sequence can be built, inspected and sent as one
//! command burst.
//!
//! ## Example
//!
//! ```
//! use ssd1306_fb::{command, SupplyMode};
//!
//! let init = command::init_sequence(64, SupplyMode::Internal);
//! assert_eq!(init[0], command::DISPLAY_OFF);
//! assert_eq!(init[init.len() - 1], command::DISPLAY_ON);
//!
//! assert_eq!(command::contrast(64, SupplyMode::External), 0x9F);
//! ```

use crate::config::SupplyMode;

// Fundamental commands

/// Set contrast control (0x81)
///
/// Requires 1 byte: contrast level 0x00..=0xFF.
pub const SET_CONTRAST: u8 = 0x81;

/// Resume display from RAM content (0xA4)
pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;

/// Normal display, RAM bit 1 = pixel on (0xA6)
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Inverted display, RAM bit 0 = pixel on (0xA7)
pub const INVERT_DISPLAY: u8 = 0xA7;

/// Display off, sleep mode (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

// Scrolling commands

/// Right horizontal scroll setup (0x26)
pub const RIGHT_HORIZONTAL_SCROLL: u8 = 0x26;

/// Left horizontal scroll setup (0x27)
pub const LEFT_HORIZONTAL_SCROLL: u8 = 0x27;

/// Vertical and right horizontal scroll setup (0x29)
pub const VERTICAL_AND_RIGHT_HORIZONTAL_SCROLL: u8 = 0x29;

/// Vertical and left horizontal scroll setup (0x2A)
pub const VERTICAL_AND_LEFT_HORIZONTAL_SCROLL: u8 = 0x2A;

/// Stop scrolling (0x2E)
///
/// RAM must be rewritten after scrolling is stopped.
pub const DEACTIVATE_SCROLL: u8 = 0x2E;

/// Start scrolling with the last configured parameters (0x2F)
pub const ACTIVATE_SCROLL: u8 = 0x2F;

/// Set vertical scroll area (0xA3)
///
/// Requires 2 bytes: [fixed top rows, scrolling rows]
pub const SET_VERTICAL_SCROLL_AREA: u8 = 0xA3;

// Addressing commands

/// Set memory addressing mode (0x20)
///
/// Requires 1 byte: 0x00 = horizontal, 0x01 = vertical, 0x02 = page.
pub const MEMORY_MODE: u8 = 0x20;

/// Set column address range (0x21)
///
/// Requires 2 bytes: [start column, end column]
pub const COLUMN_ADDR: u8 = 0x21;

/// Set page address range (0x22)
///
/// Requires 2 bytes: [start page, end page]
pub const PAGE_ADDR: u8 = 0x22;

// Hardware configuration commands

/// Set display start line, OR with line 0..=63 (0x40)
pub const SET_START_LINE: u8 = 0x40;

/// Segment re-map, OR with 1 to map column 127 to SEG0 (0xA0)
pub const SEG_REMAP: u8 = 0xA0;

/// Set multiplex ratio (0xA8)
///
/// Requires 1 byte: mux ratio - 1 (display height - 1).
pub const SET_MULTIPLEX: u8 = 0xA8;

/// COM output scan direction, remapped (0xC8)
pub const COM_SCAN_DEC: u8 = 0xC8;

/// Set display offset (0xD3)
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// Set COM pins hardware configuration (0xDA)
///
/// Requires 1 byte: 0x02 = sequential (32 rows), 0x12 = alternative (64 rows).
pub const SET_COM_PINS: u8 = 0xDA;

// Timing and driving scheme commands

/// Set display clock divide ratio / oscillator frequency (0xD5)
pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;

/// Set pre-charge period (0xD9)
pub const SET_PRECHARGE: u8 = 0xD9;

/// Set VCOMH deselect level (0xDB)
pub const SET_VCOM_DETECT: u8 = 0xDB;

// Charge pump

/// Charge pump setting (0x8D)
///
/// Requires 1 byte: 0x14 = enable (internal supply), 0x10 = disable.
pub const CHARGE_PUMP: u8 = 0x8D;

/// Length of the sequence produced by [`init_sequence`].
pub const INIT_SEQUENCE_LEN: usize = 26;

/// Length of the sequence produced by [`horizontal_scroll`].
pub const HORIZONTAL_SCROLL_LEN: usize = 8;

/// Length of the sequence produced by [`diagonal_scroll`].
pub const DIAGONAL_SCROLL_LEN: usize = 10;

/// Horizontal scroll direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Content moves to the right
    #[default]
    Right,
    /// Content moves to the left
    Left,
}

/// Contrast byte for a panel height and supply mode
///
/// Small 16-row panels get their own pair of values; every other height
/// shares the 32/64-row values.
///
/// ```
/// use ssd1306_fb::{command::contrast, SupplyMode};
///
/// assert_eq!(contrast(16, SupplyMode::External), 0x10);
/// assert_eq!(contrast(16, SupplyMode::Internal), 0xAF);
/// assert_eq!(contrast(64, SupplyMode::Internal), 0xCF);
/// ```
pub fn contrast(height: u8, supply: SupplyMode) -> u8 {
    match (height, supply) {
        (16, SupplyMode::External) => 0x10,
        (16, SupplyMode::Internal) => 0xAF,
        (_, SupplyMode::External) => 0x9F,
        (_, SupplyMode::Internal) => 0xCF,
    }
}

/// Build the power-on initialization sequence
///
/// The sequence turns the panel off, programs timing, multiplex ratio,
/// addressing mode (horizontal), segment/COM remapping, contrast and
/// supply-dependent analog settings, then turns the panel back on.
pub fn init_sequence(height: u8, supply: SupplyMode) -> [u8; INIT_SEQUENCE_LEN] {
    let internal = supply == SupplyMode::Internal;
    let charge_pump = if internal { 0x14 } else { 0x10 };
    let com_pins = if height > 32 { 0x12 } else { 0x02 };
    let precharge = if internal { 0xF1 } else { 0x22 };

    [
        DISPLAY_OFF,
        SET_DISPLAY_CLOCK_DIV,
        0x80,
        SET_MULTIPLEX,
        height.wrapping_sub(1),
        SET_DISPLAY_OFFSET,
        0x00,
        SET_START_LINE,
        CHARGE_PUMP,
        charge_pump,
        MEMORY_MODE,
        0x00,
        SEG_REMAP | 0x01,
        COM_SCAN_DEC,
        SET_COM_PINS,
        com_pins,
        SET_CONTRAST,
        contrast(height, supply),
        SET_PRECHARGE,
        precharge,
        SET_VCOM_DETECT,
        0x40,
        DISPLAY_ALL_ON_RESUME,
        NORMAL_DISPLAY,
        DEACTIVATE_SCROLL,
        DISPLAY_ON,
    ]
}

/// Build a continuous horizontal scroll over `start_page..=stop_page`
///
/// The sequence ends with [`ACTIVATE_SCROLL`].
pub fn horizontal_scroll(
    direction: ScrollDirection,
    start_page: u8,
    stop_page: u8,
) -> [u8; HORIZONTAL_SCROLL_LEN] {
    let opcode = match direction {
        ScrollDirection::Right => RIGHT_HORIZONTAL_SCROLL,
        ScrollDirection::Left => LEFT_HORIZONTAL_SCROLL,
    };
    // dummy, start, interval (5 frames), stop, dummy 0x00, dummy 0xFF
    [
        opcode,
        0x00,
        start_page,
        0x00,
        stop_page,
        0x00,
        0xFF,
        ACTIVATE_SCROLL,
    ]
}

/// Build a diagonal (vertical + horizontal) scroll over `start_page..=stop_page`
///
/// The whole panel height is used as the vertical scroll area, with a
/// vertical offset of one row per step.
pub fn diagonal_scroll(
    direction: ScrollDirection,
    start_page: u8,
    stop_page: u8,
    height: u8,
) -> [u8; DIAGONAL_SCROLL_LEN] {
    let opcode = match direction {
        ScrollDirection::Right => VERTICAL_AND_RIGHT_HORIZONTAL_SCROLL,
        ScrollDirection::Left => VERTICAL_AND_LEFT_HORIZONTAL_SCROLL,
    };
    [
        SET_VERTICAL_SCROLL_AREA,
        0x00,
        height,
        opcode,
        0x00,
        start_page,
        0x00,
        stop_page,
        0x01,
        ACTIVATE_SCROLL,
    ]
}

/// Build the scroll deactivation command
pub fn stop_scroll() -> [u8; 1] {
    [DEACTIVATE_SCROLL]
}

/// Build a column address range command
pub fn column_address(start: u8, end: u8) -> [u8; 3] {
    [COLUMN_ADDR, start, end]
}

/// Build a page address range command
pub fn page_address(start: u8, end: u8) -> [u8; 3] {
    [PAGE_ADDR, start, end]
}

/// Build a contrast command
pub fn set_contrast(value: u8) -> [u8; 2] {
    [SET_CONTRAST, value]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contrast_table() {
        assert_eq!(contrast(16, SupplyMode::External), 0x10);
        assert_eq!(contrast(16, SupplyMode::Internal), 0xAF);
        assert_eq!(contrast(64, SupplyMode::External), 0x9F);
        assert_eq!(contrast(64, SupplyMode::Internal), 0xCF);
        assert_eq!(contrast(32, SupplyMode::External), 0x9F);
        assert_eq!(contrast(32, SupplyMode::Internal), 0xCF);
    }

    #[test]
    fn test_init_sequence_internal_64() {
        let seq = init_sequence(64, SupplyMode::Internal);
        assert_eq!(
            seq,
            [
                0xAE, 0xD5, 0x80, 0xA8, 0x3F, 0xD3, 0x00, 0x40, 0x8D, 0x14, 0x20, 0x00, 0xA1,
                0xC8, 0xDA, 0x12, 0x81, 0xCF, 0xD9, 0xF1, 0xDB, 0x40, 0xA4, 0xA6, 0x2E, 0xAF,
            ]
        );
    }

    #[test]
    fn test_init_sequence_external_32() {
        let seq = init_sequence(32, SupplyMode::External);
        // multiplex
        assert_eq!(&seq[3..5], &[SET_MULTIPLEX, 31]);
        // charge pump disabled
        assert_eq!(&seq[8..10], &[CHARGE_PUMP, 0x10]);
        // sequential COM pins
        assert_eq!(&seq[14..16], &[SET_COM_PINS, 0x02]);
        assert_eq!(&seq[16..18], &[SET_CONTRAST, 0x9F]);
        assert_eq!(&seq[18..20], &[SET_PRECHARGE, 0x22]);
    }

    #[test]
    fn test_init_sequence_keeps_opcodes_in_place() {
        for height in [16, 32, 64] {
            for supply in [SupplyMode::Internal, SupplyMode::External] {
                let seq = init_sequence(height, supply);
                assert_eq!(seq[10], MEMORY_MODE);
                assert_eq!(seq[16], SET_CONTRAST);
                assert_eq!(seq[17], contrast(height, supply));
                assert_eq!(seq[20], SET_VCOM_DETECT);
            }
        }
    }

    #[test]
    fn test_horizontal_scroll() {
        assert_eq!(
            horizontal_scroll(ScrollDirection::Right, 0, 7),
            [0x26, 0x00, 0x00, 0x00, 0x07, 0x00, 0xFF, 0x2F]
        );
        assert_eq!(
            horizontal_scroll(ScrollDirection::Left, 2, 3),
            [0x27, 0x00, 0x02, 0x00, 0x03, 0x00, 0xFF, 0x2F]
        );
    }

    #[test]
    fn test_diagonal_scroll() {
        assert_eq!(
            diagonal_scroll(ScrollDirection::Right, 0, 7, 64),
            [0xA3, 0x00, 0x40, 0x29, 0x00, 0x00, 0x00, 0x07, 0x01, 0x2F]
        );
        assert_eq!(
            diagonal_scroll(ScrollDirection::Left, 1, 2, 32),
            [0xA3, 0x00, 0x20, 0x2A, 0x00, 0x01, 0x00, 0x02, 0x01, 0x2F]
        );
    }

    #[test]
    fn test_addressing_and_stop() {
        assert_eq!(stop_scroll(), [0x2E]);
        assert_eq!(column_address(0, 127), [0x21, 0, 127]);
        assert_eq!(page_address(0, 7), [0x22, 0, 7]);
        assert_eq!(set_contrast(0), [0x81, 0]);
    }
}
