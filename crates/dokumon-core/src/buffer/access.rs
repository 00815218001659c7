//! Pixel access functions

use super::{PixelBuffer, PixelBufferMut};
use crate::color;
use crate::error::{Error, Result};

impl PixelBuffer {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; an `x >= width` reads into the next row.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// Get a pixel with edge-replicate boundary handling.
    ///
    /// Out-of-range coordinates are clamped to the nearest valid pixel, so
    /// neighborhoods near the border never read outside the image.
    #[inline]
    pub fn get_pixel_clamped(&self, x: i64, y: i64) -> u32 {
        let sx = x.clamp(0, self.width() as i64 - 1) as u32;
        let sy = y.clamp(0, self.height() as i64 - 1) as u32;
        self.get_pixel_unchecked(sx, sy)
    }

    /// Get RGB values at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Get RGBA values at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgba)
    }
}

impl PixelBufferMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.inner.data[y as usize * self.inner.width as usize + x as usize])
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index lies outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let w = self.inner.width as usize;
        self.inner.data[y as usize * w + x as usize] = val;
    }

    /// Set RGBA values at (x, y).
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }

    /// Set opaque RGB values at (x, y).
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_pixel_bounds() {
        let buf = PixelBuffer::new_filled(3, 2, 7).unwrap();
        assert_eq!(buf.get_pixel(2, 1), Some(7));
        assert_eq!(buf.get_pixel(3, 0), None);
        assert_eq!(buf.get_pixel(0, 2), None);
    }

    #[test]
    fn test_get_pixel_clamped_replicates_edges() {
        let mut buf = PixelBufferMut::new(3, 3).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                buf.set_pixel(x, y, y * 3 + x).unwrap();
            }
        }
        let buf: PixelBuffer = buf.into();
        assert_eq!(buf.get_pixel_clamped(-1, -1), 0);
        assert_eq!(buf.get_pixel_clamped(5, 0), 2);
        assert_eq!(buf.get_pixel_clamped(1, 9), 7);
        assert_eq!(buf.get_pixel_clamped(3, 3), 8);
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut buf = PixelBufferMut::new(2, 2).unwrap();
        assert!(matches!(
            buf.set_pixel(2, 0, 1),
            Err(Error::IndexOutOfBounds { x: 2, y: 0, .. })
        ));
        buf.set_rgba(1, 1, 1, 2, 3, 4).unwrap();
        assert_eq!(buf.get_pixel(1, 1), Some(0x0102_0304));
    }
}
