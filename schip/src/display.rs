//! Monochrome framebuffer.
use std::fmt::{self, Write};

use crate::constants::*;

/// Display buffer that sprites are drawn to.
///
/// The buffer always holds the physical 128x64 grid. In low resolution mode
/// every logical pixel is drawn as a 2x2 block, which keeps the scroll
/// instructions meaningful in both modes.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Box<[bool; DISPLAY_BUFFER_SIZE]>,
    hires: bool,
}

/// Outcome of a sprite draw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrawResult {
    /// Value for the VF register.
    pub flag: u8,
    /// Number of sprite rows that were drawn, including clipped rows.
    pub rows: usize,
    /// Number of set sprite pixels that landed on set display pixels.
    pub collisions: usize,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            pixels: Box::new([false; DISPLAY_BUFFER_SIZE]),
            hires: false,
        }
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    #[inline(always)]
    pub fn is_hires(&self) -> bool {
        self.hires
    }

    /// Switch between the 64x32 and 128x64 modes.
    ///
    /// The buffer contents are kept.
    pub fn set_hires(&mut self, hires: bool) {
        self.hires = hires;
    }

    /// Logical width in the current resolution mode.
    #[inline(always)]
    pub fn width(&self) -> usize {
        if self.hires {
            HIRES_WIDTH
        } else {
            LORES_WIDTH
        }
    }

    /// Logical height in the current resolution mode.
    #[inline(always)]
    pub fn height(&self) -> usize {
        if self.hires {
            HIRES_HEIGHT
        } else {
            LORES_HEIGHT
        }
    }

    /// Logical pixel at the given coordinate. Coordinates wrap around the screen.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let (x, y) = (x % self.width(), y % self.height());
        if self.hires {
            self.pixels[x + y * HIRES_WIDTH]
        } else {
            self.pixels[x * 2 + y * 2 * HIRES_WIDTH]
        }
    }

    /// Row-major iterator over the logical pixel rows.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = bool> + '_> + '_ {
        (0..self.height()).map(move |y| (0..self.width()).map(move |x| self.pixel(x, y)))
    }

    /// Copy of the logical pixel grid, row-major.
    ///
    /// Intended for handing the frame over to a renderer that
    /// doesn't own the VM.
    pub fn snapshot(&self) -> Vec<bool> {
        self.rows().flatten().collect()
    }

    /// The full physical buffer, 128x64, row-major.
    pub fn physical(&self) -> &[bool; DISPLAY_BUFFER_SIZE] {
        &self.pixels
    }

    /// XOR a 8xN sprite onto the low resolution screen.
    ///
    /// The sprite wraps around both edges of the screen.
    pub fn draw_lores(&mut self, x: usize, y: usize, sprite: &[u8]) -> DrawResult {
        let (x, y) = (x % LORES_WIDTH, y % LORES_HEIGHT);
        let mut result = DrawResult {
            rows: sprite.len(),
            ..Default::default()
        };

        for (r, row) in sprite.iter().enumerate() {
            for c in 0..8 {
                if (row >> (7 - c)) & 1 == 0 {
                    continue;
                }

                let px = ((x + c) % LORES_WIDTH) * 2;
                let py = ((y + r) % LORES_HEIGHT) * 2;
                let d = px + py * HIRES_WIDTH;

                if self.pixels[d] {
                    result.collisions += 1;
                }

                for offset in [0, 1, HIRES_WIDTH, HIRES_WIDTH + 1] {
                    self.pixels[d + offset] ^= true;
                }
            }
        }

        result.flag = (result.collisions > 0) as u8;
        result
    }

    /// XOR a sprite onto the high resolution screen.
    ///
    /// When `wide` is set the sprite is 16x16, stored as two bytes per row,
    /// otherwise it's 8 pixels wide with one byte per row.
    ///
    /// Columns wrap around the right edge, but rows past the bottom edge are
    /// clipped. The flag counts the rows that either collided or were clipped.
    pub fn draw_hires(&mut self, x: usize, y: usize, sprite: &[u8], wide: bool) -> DrawResult {
        let (x, y) = (x % HIRES_WIDTH, y % HIRES_HEIGHT);
        let bytes_per_row = if wide { 2 } else { 1 };
        let mut result = DrawResult::default();
        let mut row_hits = 0_usize;

        for (r, row) in sprite.chunks(bytes_per_row).enumerate() {
            result.rows += 1;

            let py = y + r;
            if py >= HIRES_HEIGHT {
                row_hits += 1;
                continue;
            }

            let bits = if wide {
                u16::from_be_bytes([row[0], row.get(1).copied().unwrap_or(0)])
            } else {
                (row[0] as u16) << 8
            };

            let mut collided = false;
            for c in 0..bytes_per_row * 8 {
                if (bits >> (15 - c)) & 1 == 0 {
                    continue;
                }

                let d = (x + c) % HIRES_WIDTH + py * HIRES_WIDTH;
                if self.pixels[d] {
                    collided = true;
                    result.collisions += 1;
                }
                self.pixels[d] ^= true;
            }

            if collided {
                row_hits += 1;
            }
        }

        result.flag = row_hits.min(u8::MAX as usize) as u8;
        result
    }

    /// Scroll the buffer down by `n` physical rows.
    pub fn scroll_down(&mut self, n: usize) {
        let n = n.min(HIRES_HEIGHT);
        let shifted = n * HIRES_WIDTH;
        self.pixels.copy_within(0..DISPLAY_BUFFER_SIZE - shifted, shifted);
        self.pixels[..shifted].fill(false);
    }

    /// Scroll the buffer right by 4 physical columns.
    pub fn scroll_right(&mut self) {
        for row in self.pixels.chunks_exact_mut(HIRES_WIDTH) {
            row.copy_within(0..HIRES_WIDTH - SCROLL_COLUMNS, SCROLL_COLUMNS);
            row[..SCROLL_COLUMNS].fill(false);
        }
    }

    /// Scroll the buffer left by 4 physical columns.
    pub fn scroll_left(&mut self) {
        for row in self.pixels.chunks_exact_mut(HIRES_WIDTH) {
            row.copy_within(SCROLL_COLUMNS.., 0);
            row[HIRES_WIDTH - SCROLL_COLUMNS..].fill(false);
        }
    }

    /// Render the logical screen as text, `#` for set pixels and `.` for clear.
    pub fn dump(&self) -> Result<String, fmt::Error> {
        let mut buf = String::with_capacity((self.width() + 1) * self.height());

        for row in self.rows() {
            for px in row {
                buf.write_char(if px { '#' } else { '.' })?;
            }
            writeln!(buf)?;
        }

        Ok(buf)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lores_draw_is_2x2() {
        let mut fb = Framebuffer::new();
        let result = fb.draw_lores(1, 1, &[0b1000_0000]);

        assert_eq!(result.flag, 0);
        assert!(fb.pixel(1, 1));
        assert!(!fb.pixel(0, 1));
        let physical = fb.physical();
        assert!(physical[2 + 2 * HIRES_WIDTH]);
        assert!(physical[3 + 2 * HIRES_WIDTH]);
        assert!(physical[2 + 3 * HIRES_WIDTH]);
        assert!(physical[3 + 3 * HIRES_WIDTH]);
        assert_eq!(physical.iter().filter(|px| **px).count(), 4);
    }

    #[test]
    fn test_lores_wraps() {
        let mut fb = Framebuffer::new();
        // Origin itself wraps, then the sprite wraps across the corner.
        fb.draw_lores(LORES_WIDTH + 62, 31, &[0b1110_0000, 0b1000_0000]);

        assert!(fb.pixel(62, 31));
        assert!(fb.pixel(63, 31));
        assert!(fb.pixel(0, 31));
        assert!(fb.pixel(62, 0));
        assert!(!fb.pixel(63, 0));
    }

    /// Drawing the same sprite twice restores the screen.
    #[test]
    fn test_double_xor() {
        let mut fb = Framebuffer::new();
        fb.draw_lores(0, 0, &[0xFF]);
        let before = fb.clone();

        let first = fb.draw_lores(10, 5, &[0b1010_1010, 0b0101_0101]);
        assert_eq!(first.flag, 0);
        let second = fb.draw_lores(10, 5, &[0b1010_1010, 0b0101_0101]);
        assert_eq!(second.flag, 1);
        assert_eq!(second.collisions, 8);
        assert!(fb == before);
    }

    #[test]
    fn test_hires_wide_sprite() {
        let mut fb = Framebuffer::new();
        fb.set_hires(true);
        let sprite = [0xFF_u8; 32];
        let result = fb.draw_hires(120, 0, &sprite, true);

        assert_eq!(result.rows, 16);
        assert_eq!(result.flag, 0);
        // Wrapped horizontally.
        assert!(fb.pixel(127, 15));
        assert!(fb.pixel(7, 15));
        assert!(!fb.pixel(8, 15));
        assert!(!fb.pixel(0, 16));
    }

    #[test]
    fn test_hires_counts_rows() {
        let mut fb = Framebuffer::new();
        fb.set_hires(true);
        fb.draw_hires(0, 60, &[0x80, 0x80], false);

        // Two rows collide, two rows are clipped below the bottom edge.
        let result = fb.draw_hires(0, 60, &[0x80, 0x80, 0x00, 0x80, 0x80, 0x80], false);
        assert_eq!(result.rows, 6);
        assert_eq!(result.collisions, 2);
        assert_eq!(result.flag, 4);
        assert!(!fb.pixel(0, 60));
        assert!(!fb.pixel(0, 61));
        assert!(fb.pixel(0, 63));
        assert!(!fb.pixel(0, 0));
    }

    #[test]
    fn test_scroll_down() {
        let mut fb = Framebuffer::new();
        fb.set_hires(true);
        fb.draw_hires(5, 0, &[0x80], false);
        fb.draw_hires(5, 63, &[0x80], false);

        fb.scroll_down(3);
        assert!(!fb.pixel(5, 0));
        assert!(fb.pixel(5, 3));
        // Bottom row was pushed off screen.
        assert_eq!(fb.physical().iter().filter(|px| **px).count(), 1);

        fb.scroll_down(100);
        assert!(fb.physical().iter().all(|px| !px));
    }

    #[test]
    fn test_scroll_sideways() {
        let mut fb = Framebuffer::new();
        fb.set_hires(true);
        fb.draw_hires(0, 0, &[0x80], false);
        fb.draw_hires(127, 1, &[0x80], false);

        fb.scroll_right();
        assert!(fb.pixel(4, 0));
        assert!(!fb.pixel(0, 0));
        assert!(!fb.pixel(127, 1));
        assert!(!fb.pixel(3, 1));

        fb.scroll_left();
        assert!(fb.pixel(0, 0));
        assert!(!fb.pixel(124, 0));
        assert_eq!(fb.physical().iter().filter(|px| **px).count(), 1);
    }

    #[test]
    fn test_dump() {
        let mut fb = Framebuffer::new();
        fb.draw_lores(0, 0, &[0b1100_0000]);
        let text = fb.dump().unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(first.len(), LORES_WIDTH);
        assert!(first.starts_with("##."));
        assert_eq!(text.lines().count(), LORES_HEIGHT);
        assert_eq!(fb.snapshot().len(), LORES_WIDTH * LORES_HEIGHT);
    }
}
