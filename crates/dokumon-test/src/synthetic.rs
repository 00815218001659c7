//! Synthetic test images
//!
//! Deterministic generators standing in for camera captures, so the
//! regression tests need no image fixtures. Every generator panics if
//! either dimension is 0.

use dokumon_core::{PixelBuffer, PixelBufferMut, color};

/// Every pixel set to `pixel`.
pub fn uniform(width: u32, height: u32, pixel: u32) -> PixelBuffer {
    PixelBuffer::new_filled(width, height, pixel).expect("non-zero dimensions")
}

/// Opaque gray ramp running left (0) to right (255).
pub fn gray_gradient(width: u32, height: u32) -> PixelBuffer {
    build(width, height, |x, _| {
        let v = if width > 1 {
            (x * 255 / (width - 1)) as u8
        } else {
            0
        };
        color::compose_rgb(v, v, v)
    })
}

/// Opaque color ramp: red follows x, green follows y, blue follows both.
pub fn color_ramp(width: u32, height: u32) -> PixelBuffer {
    build(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        let b = ((x + y) * 255 / (width + height)) as u8;
        color::compose_rgb(r, g, b)
    })
}

/// Checkerboard of `cell`-sized squares alternating `a` and `b`.
pub fn checkerboard(width: u32, height: u32, cell: u32, a: u32, b: u32) -> PixelBuffer {
    let cell = cell.max(1);
    build(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { a } else { b }
    })
}

/// Deterministic pseudo-random RGBA noise.
///
/// Uses a linear congruential generator (Numerical Recipes constants), so
/// the same seed always yields the same image.
pub fn noise(width: u32, height: u32, seed: u64, opaque: bool) -> PixelBuffer {
    let mut state = seed;
    let mut pix = PixelBufferMut::new(width, height).expect("non-zero dimensions");
    for p in pix.pixels_mut() {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let bits = (state >> 32) as u32;
        *p = if opaque { bits | 0xff } else { bits };
    }
    pix.into()
}

fn build(width: u32, height: u32, f: impl Fn(u32, u32) -> u32) -> PixelBuffer {
    let mut pix = PixelBufferMut::new(width, height).expect("non-zero dimensions");
    for y in 0..height {
        for x in 0..width {
            pix.set_pixel_unchecked(x, y, f(x, y));
        }
    }
    pix.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_gradient_endpoints() {
        let pix = gray_gradient(5, 2);
        assert_eq!(pix.get_rgba(0, 1), Some((0, 0, 0, 255)));
        assert_eq!(pix.get_rgba(4, 0), Some((255, 255, 255, 255)));
    }

    #[test]
    fn test_checkerboard_cells() {
        let pix = checkerboard(4, 4, 2, 1, 2);
        assert_eq!(pix.get_pixel(0, 0), Some(1));
        assert_eq!(pix.get_pixel(2, 0), Some(2));
        assert_eq!(pix.get_pixel(2, 2), Some(1));
    }

    #[test]
    fn test_noise_is_deterministic() {
        assert_eq!(noise(8, 8, 42, true), noise(8, 8, 42, true));
        assert_ne!(noise(8, 8, 42, true), noise(8, 8, 43, true));
        assert!(
            noise(8, 8, 7, true)
                .pixels()
                .iter()
                .all(|&p| color::alpha(p) == 255)
        );
    }
}
