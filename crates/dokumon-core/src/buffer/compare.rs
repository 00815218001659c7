//! Buffer comparison
//!
//! Per-channel difference measures used to check transform outputs against
//! expected images, with or without a rounding tolerance.

use super::PixelBuffer;
use crate::color;
use crate::error::{Error, Result};

/// Result of comparing two buffers channel by channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDiffResult {
    /// Number of pixels with any channel differing by more than the tolerance
    pub n_diff: u64,
    /// Largest absolute difference seen on any channel
    pub max_diff: u8,
}

impl PixelBuffer {
    /// Compare against `other` channel by channel.
    ///
    /// A pixel counts as different when any of its four channels differs by
    /// more than `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn count_pixel_diffs(&self, other: &PixelBuffer, tolerance: u8) -> Result<PixelDiffResult> {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (other.width(), other.height()),
            });
        }

        let mut n_diff = 0u64;
        let mut max_diff = 0u8;
        for (&p1, &p2) in self.pixels().iter().zip(other.pixels()) {
            let d = max_channel_diff(p1, p2);
            max_diff = max_diff.max(d);
            if d > tolerance {
                n_diff += 1;
            }
        }
        Ok(PixelDiffResult { n_diff, max_diff })
    }

    /// Check whether all four channels match within `tolerance` everywhere.
    pub fn equals_with_tolerance(&self, other: &PixelBuffer, tolerance: u8) -> bool {
        self.count_pixel_diffs(other, tolerance)
            .is_ok_and(|r| r.n_diff == 0)
    }
}

/// Largest absolute per-channel difference between two pixels.
#[inline]
pub fn max_channel_diff(p1: u32, p2: u32) -> u8 {
    let (r1, g1, b1, a1) = color::extract_rgba(p1);
    let (r2, g2, b2, a2) = color::extract_rgba(p2);
    r1.abs_diff(r2)
        .max(g1.abs_diff(g2))
        .max(b1.abs_diff(b2))
        .max(a1.abs_diff(a2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::compose_rgba;

    #[test]
    fn test_max_channel_diff() {
        assert_eq!(
            max_channel_diff(compose_rgba(10, 20, 30, 40), compose_rgba(12, 15, 30, 40)),
            5
        );
        assert_eq!(max_channel_diff(0, 0), 0);
    }

    #[test]
    fn test_count_pixel_diffs() {
        let a = PixelBuffer::from_pixels(2, 1, vec![compose_rgba(0, 0, 0, 255); 2]).unwrap();
        let b = PixelBuffer::from_pixels(
            2,
            1,
            vec![compose_rgba(1, 0, 0, 255), compose_rgba(9, 0, 0, 255)],
        )
        .unwrap();
        let r = a.count_pixel_diffs(&b, 1).unwrap();
        assert_eq!(r.n_diff, 1);
        assert_eq!(r.max_diff, 9);
        assert!(!a.equals_with_tolerance(&b, 1));
        assert!(a.equals_with_tolerance(&b, 9));
    }

    #[test]
    fn test_count_pixel_diffs_size_mismatch() {
        let a = PixelBuffer::new(2, 2).unwrap();
        let b = PixelBuffer::new(2, 3).unwrap();
        assert!(matches!(
            a.count_pixel_diffs(&b, 0),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(!a.equals_with_tolerance(&b, 255));
    }
}
