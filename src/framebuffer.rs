//! Packed 1-bit framebuffer in controller layout
//!
//! Pixels are stored the way the SSD1306 expects them in horizontal
//! addressing mode: each byte holds eight vertically stacked pixels of one
//! column, least significant bit on top. Pixel `(x, y)` lives in byte
//! `x + (y / 8) * width`, bit `y & 7`.
//!
//! All coordinates here are buffer space (no rotation). Anything outside the
//! panel is clipped; runs that clip to nothing are ignored.

use crate::config::Dimensions;
use crate::error::{MAX_HEIGHT, MAX_WIDTH};
use crate::mode::DrawMode;

/// Bytes needed for the largest supported panel
pub const MAX_BUFFER_SIZE: usize = MAX_WIDTH as usize * MAX_HEIGHT as usize / 8;

/// Masks covering the top `n` bits of a byte (bits `8-n..8`)
const HEAD_MASKS: [u8; 8] = [0x00, 0x80, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC, 0xFE];

/// Masks covering the bottom `n` bits of a byte (bits `0..n`)
const TAIL_MASKS: [u8; 8] = [0x00, 0x01, 0x03, 0x07, 0x0F, 0x1F, 0x3F, 0x7F];

/// Off-chip copy of the display RAM
#[derive(Clone)]
pub struct Framebuffer {
    buffer: [u8; MAX_BUFFER_SIZE],
    dimensions: Dimensions,
}

impl Framebuffer {
    /// Create a zero-filled framebuffer for `dimensions`
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            buffer: [0; MAX_BUFFER_SIZE],
            dimensions,
        }
    }

    /// Panel dimensions this buffer was sized for
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Packed pixel bytes in transfer order
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.dimensions.buffer_size()]
    }

    fn width(&self) -> i32 {
        self.dimensions.width as i32
    }

    fn height(&self) -> i32 {
        self.dimensions.height as i32
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width()).contains(&x) && (0..self.height()).contains(&y)
    }

    fn index(&self, x: i32, y: i32) -> usize {
        x as usize + (y as usize / 8) * self.dimensions.width as usize
    }

    /// Zero every pixel
    pub fn clear(&mut self) {
        let size = self.dimensions.buffer_size();
        self.buffer[..size].fill(0);
    }

    /// Read one pixel, `None` outside the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.buffer[self.index(x, y)] & (1 << (y & 7)) != 0)
    }

    /// Apply `mode` to one pixel
    pub fn set_pixel(&mut self, x: i32, y: i32, mode: DrawMode) {
        if !self.contains(x, y) {
            return;
        }
        let index = self.index(x, y);
        mode.apply(&mut self.buffer[index], 1 << (y & 7));
    }

    /// Apply `mode` to `len` pixels of row `y`, starting at column `x`
    ///
    /// One byte is touched per column, all with the same row mask.
    pub fn fill_row_run(&mut self, x: i32, y: i32, len: i32, mode: DrawMode) {
        if !(0..self.height()).contains(&y) {
            return;
        }

        let (mut x, mut len) = (x, len);
        if x < 0 {
            len = len.saturating_add(x);
            x = 0;
        }
        if x.saturating_add(len) > self.width() {
            len = self.width() - x;
        }
        if len <= 0 {
            return;
        }

        let start = self.index(x, y);
        let row = &mut self.buffer[start..start + len as usize];
        let mask = 1u8 << (y & 7);
        match mode {
            DrawMode::Set => row.iter_mut().for_each(|byte| *byte |= mask),
            DrawMode::Clear => row.iter_mut().for_each(|byte| *byte &= !mask),
            DrawMode::Invert => row.iter_mut().for_each(|byte| *byte ^= mask),
        }
    }

    /// Apply `mode` to `len` pixels of column `x`, starting at row `y`
    ///
    /// The run is split into a partial head byte up to the next page
    /// boundary, whole-page body bytes, and a partial tail byte.
    pub fn fill_column_run(&mut self, x: i32, y: i32, len: i32, mode: DrawMode) {
        if !(0..self.width()).contains(&x) {
            return;
        }

        let (mut y, mut len) = (y, len);
        if y < 0 {
            len = len.saturating_add(y);
            y = 0;
        }
        if y.saturating_add(len) > self.height() {
            len = self.height() - y;
        }
        if len <= 0 {
            return;
        }

        let stride = self.dimensions.width as usize;
        let mut index = self.index(x, y);
        let mut remaining = len as usize;

        let offset = (y & 7) as usize;
        if offset != 0 {
            let span = 8 - offset;
            let mut mask = HEAD_MASKS[span];
            if remaining < span {
                mask &= 0xFF >> (span - remaining);
            }
            mode.apply(&mut self.buffer[index], mask);
            if remaining <= span {
                return;
            }
            remaining -= span;
            index += stride;
        }

        let pages = remaining / 8;
        if pages > 0 {
            let body = self.buffer[index..].iter_mut().step_by(stride).take(pages);
            match mode {
                DrawMode::Set => body.for_each(|byte| *byte = 0xFF),
                DrawMode::Clear => body.for_each(|byte| *byte = 0x00),
                DrawMode::Invert => body.for_each(|byte| *byte = !*byte),
            }
            index += pages * stride;
            remaining -= pages * 8;
        }

        if remaining > 0 {
            mode.apply(&mut self.buffer[index], TAIL_MASKS[remaining]);
        }
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("dimensions", &self.dimensions)
            .field("len", &self.dimensions.buffer_size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [DrawMode; 3] = [DrawMode::Set, DrawMode::Clear, DrawMode::Invert];

    fn framebuffer(width: u8, height: u8) -> Framebuffer {
        Framebuffer::new(Dimensions::new(width, height).unwrap())
    }

    /// Deterministic non-trivial starting pattern
    fn seeded(width: u8, height: u8) -> Framebuffer {
        let mut fb = framebuffer(width, height);
        let size = fb.dimensions().buffer_size();
        for (i, byte) in fb.buffer[..size].iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(37) ^ 0x5A;
        }
        fb
    }

    #[test]
    fn test_new_is_zeroed() {
        let fb = framebuffer(128, 64);
        assert_eq!(fb.as_bytes().len(), 1024);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_buffer_length_tracks_dimensions() {
        assert_eq!(framebuffer(128, 32).as_bytes().len(), 512);
        assert_eq!(framebuffer(96, 16).as_bytes().len(), 192);
    }

    #[test]
    fn test_pixel_layout() {
        let mut fb = framebuffer(128, 64);
        fb.set_pixel(10, 13, DrawMode::Set);
        assert_eq!(fb.as_bytes()[10 + 128], 1 << 5);
        assert_eq!(fb.pixel(10, 13), Some(true));
        assert_eq!(fb.pixel(10, 12), Some(false));
    }

    #[test]
    fn test_pixel_modes_on_every_position() {
        let mut fb = framebuffer(32, 16);
        for y in 0..16 {
            for x in 0..32 {
                fb.set_pixel(x, y, DrawMode::Set);
                assert_eq!(fb.pixel(x, y), Some(true));
                fb.set_pixel(x, y, DrawMode::Invert);
                assert_eq!(fb.pixel(x, y), Some(false));
                fb.set_pixel(x, y, DrawMode::Invert);
                assert_eq!(fb.pixel(x, y), Some(true));
                fb.set_pixel(x, y, DrawMode::Clear);
                assert_eq!(fb.pixel(x, y), Some(false));
            }
        }
    }

    #[test]
    fn test_out_of_bounds_pixel_is_ignored() {
        let mut fb = framebuffer(128, 64);
        fb.set_pixel(-1, 0, DrawMode::Set);
        fb.set_pixel(128, 0, DrawMode::Set);
        fb.set_pixel(0, 64, DrawMode::Set);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.pixel(128, 0), None);
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let mut fb = seeded(128, 64);
        fb.clear();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_row_run_sets_one_bit_per_column() {
        let mut fb = framebuffer(128, 64);
        fb.fill_row_run(10, 5, 20, DrawMode::Set);
        for (i, &byte) in fb.as_bytes().iter().enumerate() {
            let expected = if (10..30).contains(&i) { 1 << 5 } else { 0 };
            assert_eq!(byte, expected, "byte {i}");
        }
    }

    #[test]
    fn test_row_run_clips() {
        let mut fb = framebuffer(128, 64);
        fb.fill_row_run(-5, 0, 8, DrawMode::Set);
        assert_eq!(&fb.as_bytes()[..4], &[1, 1, 1, 0]);

        fb.clear();
        fb.fill_row_run(125, 8, 10, DrawMode::Set);
        assert_eq!(&fb.as_bytes()[128 + 124..256], &[0, 1, 1, 1]);
    }

    #[test]
    fn test_row_run_degenerate_is_noop() {
        let mut fb = framebuffer(128, 64);
        fb.fill_row_run(-5, 0, 3, DrawMode::Set);
        fb.fill_row_run(0, 0, 0, DrawMode::Set);
        fb.fill_row_run(0, 0, -4, DrawMode::Set);
        fb.fill_row_run(200, 0, 5, DrawMode::Set);
        fb.fill_row_run(0, 64, 5, DrawMode::Set);
        fb.fill_row_run(0, -1, 5, DrawMode::Set);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_row_run_matches_pixels() {
        for mode in MODES {
            for (x, len) in [(0, 128), (3, 1), (100, 40), (-10, 20)] {
                let mut fast = seeded(128, 64);
                let mut slow = seeded(128, 64);
                fast.fill_row_run(x, 21, len, mode);
                for i in 0..len {
                    slow.set_pixel(x + i, 21, mode);
                }
                assert_eq!(fast.as_bytes(), slow.as_bytes(), "{mode:?} x={x} len={len}");
            }
        }
    }

    #[test]
    fn test_column_run_single_byte() {
        let mut fb = framebuffer(128, 64);
        fb.fill_column_run(0, 2, 3, DrawMode::Set);
        assert_eq!(fb.as_bytes()[0], 0b0001_1100);
    }

    #[test]
    fn test_column_run_full_page() {
        let mut fb = framebuffer(128, 64);
        fb.fill_column_run(7, 8, 8, DrawMode::Set);
        assert_eq!(fb.as_bytes()[7], 0);
        assert_eq!(fb.as_bytes()[7 + 128], 0xFF);
        assert_eq!(fb.as_bytes()[7 + 256], 0);
    }

    #[test]
    fn test_column_run_head_body_tail() {
        let mut fb = framebuffer(128, 64);
        // rows 5..=26: head 5..8, body 8..24, tail 24..27
        fb.fill_column_run(1, 5, 22, DrawMode::Set);
        assert_eq!(fb.as_bytes()[1], 0xE0);
        assert_eq!(fb.as_bytes()[1 + 128], 0xFF);
        assert_eq!(fb.as_bytes()[1 + 256], 0xFF);
        assert_eq!(fb.as_bytes()[1 + 384], 0x07);
        assert_eq!(fb.as_bytes()[1 + 512], 0x00);
    }

    #[test]
    fn test_column_run_matches_pixels_exhaustively() {
        for mode in MODES {
            for y in -3..40 {
                for len in -2..40 {
                    let mut fast = seeded(16, 32);
                    let mut slow = seeded(16, 32);
                    fast.fill_column_run(5, y, len, mode);
                    for i in 0..len {
                        slow.set_pixel(5, y + i, mode);
                    }
                    assert_eq!(
                        fast.as_bytes(),
                        slow.as_bytes(),
                        "{mode:?} y={y} len={len}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_column_run_off_buffer_is_noop() {
        let mut fb = framebuffer(128, 64);
        fb.fill_column_run(200, 0, 5, DrawMode::Set);
        fb.fill_column_run(-1, 0, 5, DrawMode::Set);
        fb.fill_column_run(0, 64, 5, DrawMode::Set);
        fb.fill_column_run(0, -10, 5, DrawMode::Set);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_column_run_invert_body_complements() {
        let mut fb = seeded(8, 24);
        let before = fb.as_bytes()[3 + 8];
        fb.fill_column_run(3, 8, 8, DrawMode::Invert);
        assert_eq!(fb.as_bytes()[3 + 8], !before);
    }
}
