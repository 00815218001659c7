//! 4x5 color matrices
//!
//! A color matrix maps a pixel's `(R, G, B, A, 1)` vector to a new
//! `(R, G, B, A)`. Rows are the output channels in R, G, B, A order; the
//! fifth column is an additive bias expressed in channel units (0..255).
//!
//! ```text
//! R' = m[0]*R  + m[1]*G  + m[2]*B  + m[3]*A  + m[4]
//! G' = m[5]*R  + m[6]*G  + m[7]*B  + m[8]*A  + m[9]
//! B' = m[10]*R + m[11]*G + m[12]*B + m[13]*A + m[14]
//! A' = m[15]*R + m[16]*G + m[17]*B + m[18]*A + m[19]
//! ```

use crate::{ColorError, ColorResult};
use dokumon_core::color;

/// Luminance weight of the red channel used for desaturation
pub const LUMA_R: f32 = 0.213;
/// Luminance weight of the green channel used for desaturation
pub const LUMA_G: f32 = 0.715;
/// Luminance weight of the blue channel used for desaturation
pub const LUMA_B: f32 = 0.072;

/// Luminance at or above which the binary threshold yields white
pub const BINARY_THRESHOLD: u8 = 128;

/// Number of coefficients in a color matrix
pub const MATRIX_LEN: usize = 20;

/// A 4x5 affine color transform, stored row-major.
///
/// Binarization is not a single matrix: use [`ColorFilter::Binary`] or pass
/// [`grayscale`](Self::grayscale) and [`threshold`](Self::threshold) to
/// [`remap_stages`] so the luminance is quantized before thresholding. A
/// concatenated matrix lets fractional luminance through the x255 scale and
/// is not guaranteed to produce pure black and white.
///
/// [`ColorFilter::Binary`]: crate::ColorFilter::Binary
/// [`remap_stages`]: crate::remap_stages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    m: [f32; MATRIX_LEN],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorMatrix {
    /// Create a matrix from its 20 row-major coefficients.
    pub const fn new(m: [f32; MATRIX_LEN]) -> Self {
        Self { m }
    }

    /// Create a matrix from a slice of 20 row-major coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidMatrix`] if the slice does not hold
    /// exactly 20 values.
    pub fn from_slice(values: &[f32]) -> ColorResult<Self> {
        let m: [f32; MATRIX_LEN] = values.try_into().map_err(|_| {
            ColorError::InvalidMatrix(format!(
                "expected {} coefficients, got {}",
                MATRIX_LEN,
                values.len()
            ))
        })?;
        Ok(Self { m })
    }

    /// The identity transform.
    pub const fn identity() -> Self {
        Self::new([
            1.0, 0.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Scale each channel independently.
    pub const fn scale(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new([
            r, 0.0, 0.0, 0.0, 0.0, //
            0.0, g, 0.0, 0.0, 0.0, //
            0.0, 0.0, b, 0.0, 0.0, //
            0.0, 0.0, 0.0, a, 0.0,
        ])
    }

    /// Luminance-preserving saturation adjustment.
    ///
    /// `sat = 1` is the identity and `sat = 0` maps every color to its
    /// luminance. Alpha is left untouched.
    pub fn saturation(sat: f32) -> Self {
        let inv = 1.0 - sat;
        let r = LUMA_R * inv;
        let g = LUMA_G * inv;
        let b = LUMA_B * inv;
        Self::new([
            r + sat, g, b, 0.0, 0.0, //
            r, g + sat, b, 0.0, 0.0, //
            r, g, b + sat, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Desaturate to luminance (saturation 0).
    pub fn grayscale() -> Self {
        Self::saturation(0.0)
    }

    /// Hard threshold for already-desaturated pixels.
    ///
    /// Each color row scales its own channel by 255 and subtracts
    /// `255 * 127`, so a gray level `v` maps to `255 * (v - 127)`: levels
    /// below 128 clamp to 0 and levels from 128 up clamp to 255. The color
    /// rows ignore alpha, so every pixel polarizes whatever its opacity.
    pub fn threshold() -> Self {
        let m = 255.0;
        let t = -255.0 * (BINARY_THRESHOLD - 1) as f32;
        Self::new([
            m, 0.0, 0.0, 0.0, t, //
            0.0, m, 0.0, 0.0, t, //
            0.0, 0.0, m, 0.0, t, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Compose two matrices: the result applies `second` first, then `first`.
    pub fn concat(first: &ColorMatrix, second: &ColorMatrix) -> Self {
        let a = &first.m;
        let b = &second.m;
        let mut out = [0.0f32; MATRIX_LEN];
        for row in 0..4 {
            let j = row * 5;
            for i in 0..4 {
                out[j + i] =
                    a[j] * b[i] + a[j + 1] * b[i + 5] + a[j + 2] * b[i + 10] + a[j + 3] * b[i + 15];
            }
            out[j + 4] = a[j] * b[4]
                + a[j + 1] * b[9]
                + a[j + 2] * b[14]
                + a[j + 3] * b[19]
                + a[j + 4];
        }
        Self { m: out }
    }

    /// Return a matrix that applies `self` and then `next`.
    pub fn post_concat(&self, next: &ColorMatrix) -> Self {
        Self::concat(next, self)
    }

    /// Return a matrix that applies `prev` and then `self`.
    pub fn pre_concat(&self, prev: &ColorMatrix) -> Self {
        Self::concat(self, prev)
    }

    /// Get the coefficient at output channel `row` (0..4) and input `col` (0..5).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        (row < 4 && col < 5).then(|| self.m[row * 5 + col])
    }

    /// All 20 coefficients, row-major.
    #[inline]
    pub fn coefficients(&self) -> &[f32; MATRIX_LEN] {
        &self.m
    }

    /// Whether the alpha row is `[0, 0, 0, 1, 0]`.
    pub fn preserves_alpha(&self) -> bool {
        self.m[15..20] == [0.0, 0.0, 0.0, 1.0, 0.0]
    }

    /// Apply to one set of channel values.
    ///
    /// Each output channel is rounded to the nearest integer and clamped to
    /// `[0, 255]`.
    pub fn apply_rgba(&self, r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
        let v = [r as f32, g as f32, b as f32, a as f32];
        let m = &self.m;
        let channel = |row: usize| {
            let j = row * 5;
            color::clamp_channel(
                m[j] * v[0] + m[j + 1] * v[1] + m[j + 2] * v[2] + m[j + 3] * v[3] + m[j + 4],
            )
        };
        (channel(0), channel(1), channel(2), channel(3))
    }

    /// Apply to a packed `0xRRGGBBAA` pixel.
    #[inline]
    pub fn apply_pixel(&self, pixel: u32) -> u32 {
        let (r, g, b, a) = color::extract_rgba(pixel);
        let (r, g, b, a) = self.apply_rgba(r, g, b, a);
        color::compose_rgba(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_length() {
        assert!(ColorMatrix::from_slice(&[0.0; 20]).is_ok());
        assert!(matches!(
            ColorMatrix::from_slice(&[0.0; 19]),
            Err(ColorError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn test_identity_apply() {
        let m = ColorMatrix::identity();
        assert_eq!(m.apply_rgba(12, 34, 56, 78), (12, 34, 56, 78));
        assert!(m.preserves_alpha());
    }

    #[test]
    fn test_saturation_one_is_identity() {
        let m = ColorMatrix::saturation(1.0);
        assert_eq!(m, ColorMatrix::identity());
    }

    #[test]
    fn test_grayscale_weights() {
        let m = ColorMatrix::grayscale();
        for row in 0..3 {
            assert_eq!(m.get(row, 0), Some(LUMA_R));
            assert_eq!(m.get(row, 1), Some(LUMA_G));
            assert_eq!(m.get(row, 2), Some(LUMA_B));
            assert_eq!(m.get(row, 4), Some(0.0));
        }
        assert!(m.preserves_alpha());
        assert_eq!(m.get(4, 0), None);
        assert_eq!(m.get(0, 5), None);
    }

    #[test]
    fn test_grayscale_pure_colors() {
        let m = ColorMatrix::grayscale();
        assert_eq!(m.apply_rgba(255, 0, 0, 255), (54, 54, 54, 255));
        assert_eq!(m.apply_rgba(0, 255, 0, 255), (182, 182, 182, 255));
        assert_eq!(m.apply_rgba(0, 0, 255, 255), (18, 18, 18, 255));
        assert_eq!(m.apply_rgba(255, 255, 255, 17), (255, 255, 255, 17));
    }

    #[test]
    fn test_threshold_boundary() {
        let m = ColorMatrix::threshold();
        assert_eq!(m.apply_rgba(127, 127, 127, 255), (0, 0, 0, 255));
        assert_eq!(m.apply_rgba(128, 128, 128, 255), (255, 255, 255, 255));
        assert_eq!(m.apply_rgba(0, 0, 0, 255), (0, 0, 0, 255));
        assert_eq!(m.apply_rgba(255, 255, 255, 255), (255, 255, 255, 255));
    }

    #[test]
    fn test_threshold_ignores_alpha() {
        let m = ColorMatrix::threshold();
        for a in [0u8, 1, 100, 254] {
            assert_eq!(m.apply_rgba(127, 127, 127, a), (0, 0, 0, a));
            assert_eq!(m.apply_rgba(128, 128, 128, a), (255, 255, 255, a));
        }
        assert!(m.preserves_alpha());
    }

    #[test]
    fn test_concat_with_identity() {
        let g = ColorMatrix::grayscale();
        let id = ColorMatrix::identity();
        assert_eq!(ColorMatrix::concat(&g, &id), g);
        assert_eq!(ColorMatrix::concat(&id, &g), g);
    }

    #[test]
    fn test_concat_order() {
        // Scale red by 0.5 then add 10 to red vs the other way round
        let half = ColorMatrix::scale(0.5, 1.0, 1.0, 1.0);
        let mut add = ColorMatrix::identity().m;
        add[4] = 10.0;
        let add = ColorMatrix::new(add);

        let half_then_add = half.post_concat(&add);
        let add_then_half = add.post_concat(&half);
        assert_eq!(half_then_add.apply_rgba(100, 0, 0, 255).0, 60);
        assert_eq!(add_then_half.apply_rgba(100, 0, 0, 255).0, 55);
        assert_eq!(add.pre_concat(&half), half_then_add);
    }

    #[test]
    fn test_composed_binary_on_neutral_grays() {
        let composed = ColorMatrix::grayscale().post_concat(&ColorMatrix::threshold());
        for v in [0u8, 64, 127] {
            assert_eq!(composed.apply_rgba(v, v, v, 255), (0, 0, 0, 255));
        }
        for v in [128u8, 200, 255] {
            assert_eq!(composed.apply_rgba(v, v, v, 255), (255, 255, 255, 255));
        }
    }
}
