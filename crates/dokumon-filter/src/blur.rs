//! Gaussian blur parameterized by a radius
//!
//! The weight profile follows the usual mobile blur intrinsic: a Gaussian
//! with `sigma = 0.4 * radius + 0.6`, sampled at integer offsets
//! `-ceil(radius) ..= ceil(radius)` and normalized to sum to 1.
//!
//! [`blur`] runs two 1-D passes (horizontal, then vertical) and keeps the
//! intermediate plane in floating point, so it agrees with the direct 2-D
//! weighted average of [`blur_direct`] to within one level of rounding.

use dokumon_core::{PixelBuffer, color, rows};
use log::debug;

/// Largest radius honored; larger values are clamped to it.
pub const MAX_BLUR_RADIUS: f32 = 25.0;

/// Standard deviation of the Gaussian used for `radius`.
#[inline]
pub fn gaussian_sigma(radius: f32) -> f32 {
    0.4 * radius + 0.6
}

/// 1-D weights for `radius`, centered, summing to 1.
///
/// The returned vector has `2 * ceil(radius) + 1` entries. A radius that
/// is not positive yields the single weight `[1.0]`.
pub fn gaussian_weights(radius: f32) -> Vec<f32> {
    let Some(radius) = effective_radius(radius) else {
        return vec![1.0];
    };
    let sigma = gaussian_sigma(radius);
    let coeff = -1.0 / (2.0 * sigma * sigma);
    let half = radius.ceil() as i32;

    let mut weights: Vec<f32> = (-half..=half)
        .map(|i| {
            let r = i as f32;
            (r * r * coeff).exp()
        })
        .collect();
    let total: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

/// Radius actually used, or `None` for a no-op.
fn effective_radius(radius: f32) -> Option<f32> {
    if radius.is_nan() || radius <= 0.0 {
        return None;
    }
    Some(radius.min(MAX_BLUR_RADIUS))
}

/// Blur an image with a Gaussian of the given radius.
///
/// R, G and B are smoothed with edge-replicate borders; alpha is copied
/// from the input. A radius `<= 0` (or NaN) returns an unchanged copy.
pub fn blur(pix: &PixelBuffer, radius: f32) -> PixelBuffer {
    let Some(r) = effective_radius(radius) else {
        debug!("blur: radius {radius} is not positive, returning copy");
        return pix.deep_clone();
    };
    if r < radius {
        debug!("blur: radius {radius} clamped to {r}");
    }

    let weights = gaussian_weights(r);
    let half = (weights.len() / 2) as i64;
    let w = pix.width() as usize;
    let h = pix.height() as usize;
    debug!("blur: {w}x{h}, radius {r}, {} taps", weights.len());

    // Horizontal pass into a float RGB plane
    let mut plane = vec![[0.0f32; 3]; w * h];
    rows::for_each_row_mut(&mut plane, w, |y, row| {
        for (x, dst) in row.iter_mut().enumerate() {
            let mut sum = [0.0f32; 3];
            for (k, &wk) in weights.iter().enumerate() {
                let sx = x as i64 + k as i64 - half;
                let (r, g, b) = color::extract_rgb(pix.get_pixel_clamped(sx, y as i64));
                sum[0] += r as f32 * wk;
                sum[1] += g as f32 * wk;
                sum[2] += b as f32 * wk;
            }
            *dst = sum;
        }
    });

    // Vertical pass over the float plane
    let plane = &plane;
    let mut out = pix.create_template();
    out.for_each_row_mut(|y, row| {
        for (x, dst) in row.iter_mut().enumerate() {
            let mut sum = [0.0f32; 3];
            for (k, &wk) in weights.iter().enumerate() {
                let sy = (y as i64 + k as i64 - half).clamp(0, h as i64 - 1) as usize;
                let src = plane[sy * w + x];
                sum[0] += src[0] * wk;
                sum[1] += src[1] * wk;
                sum[2] += src[2] * wk;
            }
            let a = color::alpha(pix.get_pixel_unchecked(x as u32, y));
            *dst = color::compose_rgba(
                color::clamp_channel(sum[0]),
                color::clamp_channel(sum[1]),
                color::clamp_channel(sum[2]),
                a,
            );
        }
    });
    out.into()
}

/// Blur in a single 2-D pass using the outer product of
/// [`gaussian_weights`].
///
/// Same contract as [`blur`]; slower, but a direct weighted average.
pub fn blur_direct(pix: &PixelBuffer, radius: f32) -> PixelBuffer {
    let Some(r) = effective_radius(radius) else {
        return pix.deep_clone();
    };
    let weights = gaussian_weights(r);
    let half = (weights.len() / 2) as i64;
    debug!(
        "blur_direct: {}x{}, radius {r}, {}x{} kernel",
        pix.width(),
        pix.height(),
        weights.len(),
        weights.len()
    );

    let mut out = pix.create_template();
    out.for_each_row_mut(|y, row| {
        for (x, dst) in row.iter_mut().enumerate() {
            let mut sum = [0.0f32; 3];
            for (ky, &wy) in weights.iter().enumerate() {
                let sy = y as i64 + ky as i64 - half;
                for (kx, &wx) in weights.iter().enumerate() {
                    let sx = x as i64 + kx as i64 - half;
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_clamped(sx, sy));
                    let wk = wx * wy;
                    sum[0] += r as f32 * wk;
                    sum[1] += g as f32 * wk;
                    sum[2] += b as f32 * wk;
                }
            }
            let a = color::alpha(pix.get_pixel_unchecked(x as u32, y));
            *dst = color::compose_rgba(
                color::clamp_channel(sum[0]),
                color::clamp_channel(sum[1]),
                color::clamp_channel(sum[2]),
                a,
            );
        }
    });
    out.into()
}
