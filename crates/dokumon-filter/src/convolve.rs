//! 3x3 convolution
//!
//! Uses replicate (clamp) border handling: pixels outside the image boundary
//! are treated as having the same value as the nearest edge pixel, so
//! smoothing does not darken the borders.

use crate::kernel::{Kernel3, KernelType};
use dokumon_core::{PixelBuffer, color};
use log::debug;

/// Convolve the RGB channels of an image with a 3x3 kernel.
///
/// A kernel whose coefficients sum to neither 0 nor 1 is normalized first
/// (see [`Kernel3::normalized`]). Each channel sum is rounded to the nearest
/// integer and clamped to `[0, 255]`. Alpha is copied from the input.
pub fn convolve_3x3(pix: &PixelBuffer, kernel: &Kernel3) -> PixelBuffer {
    let k = kernel.normalized();
    debug!(
        "convolve_3x3: {}x{}, kernel sum {} -> {}",
        pix.width(),
        pix.height(),
        kernel.sum(),
        k.sum()
    );

    let weights = k.data();
    let mut out = pix.create_template();
    out.for_each_row_mut(|y, row| {
        for (x, dst) in row.iter_mut().enumerate() {
            let mut sum_r = 0.0f32;
            let mut sum_g = 0.0f32;
            let mut sum_b = 0.0f32;

            for ky in 0..3 {
                for kx in 0..3 {
                    let sx = x as i64 + kx as i64 - 1;
                    let sy = y as i64 + ky as i64 - 1;
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_clamped(sx, sy));
                    let kv = weights[ky * 3 + kx];

                    sum_r += r as f32 * kv;
                    sum_g += g as f32 * kv;
                    sum_b += b as f32 * kv;
                }
            }

            let a = color::alpha(pix.get_pixel_unchecked(x as u32, y));
            *dst = color::compose_rgba(
                color::clamp_channel(sum_r),
                color::clamp_channel(sum_g),
                color::clamp_channel(sum_b),
                a,
            );
        }
    });
    out.into()
}

/// Convolve with a named kernel.
pub fn convolve_kernel(pix: &PixelBuffer, kernel_type: KernelType) -> PixelBuffer {
    debug!("convolve kernel: {kernel_type}");
    convolve_3x3(pix, &kernel_type.kernel())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dokumon_core::PixelBufferMut;

    fn create_test_color_image() -> PixelBuffer {
        let mut pix = PixelBufferMut::new(5, 5).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                let r = (x * 50) as u8;
                let g = (y * 50) as u8;
                let b = 128;
                let a = (200 + x * 10) as u8;
                pix.set_rgba(x, y, r, g, b, a).unwrap();
            }
        }
        pix.into()
    }

    #[test]
    fn test_convolve_identity() {
        let pix = create_test_color_image();
        let result = convolve_3x3(&pix, &Kernel3::identity());
        assert_eq!(result, pix);
    }

    #[test]
    fn test_convolve_preserves_alpha() {
        let pix = create_test_color_image();
        for kt in [KernelType::Blur, KernelType::Edge] {
            let result = convolve_kernel(&pix, kt);
            for y in 0..5 {
                for x in 0..5 {
                    assert_eq!(
                        color::alpha(result.get_pixel_unchecked(x, y)),
                        color::alpha(pix.get_pixel_unchecked(x, y))
                    );
                }
            }
        }
    }

    #[test]
    fn test_blur_kernel_known_values() {
        // Horizontal ramp in red: 0, 50, 100, 150, 200
        let pix = create_test_color_image();
        let result = convolve_kernel(&pix, KernelType::Blur);

        // Interior: (50 + 150 + 4*100 + 100 + 100) / 8 = 100
        assert_eq!(result.get_rgb(2, 2).map(|c| c.0), Some(100));
        // Left edge replicates column 0: (0 + 50 + 4*0 + 0 + 0) / 8 = 6.25
        assert_eq!(result.get_rgb(0, 2).map(|c| c.0), Some(6));
        // Blue is constant and must stay constant, including corners
        assert_eq!(result.get_rgb(0, 0).map(|c| c.2), Some(128));
        assert_eq!(result.get_rgb(4, 4).map(|c| c.2), Some(128));
    }

    #[test]
    fn test_edge_kernel_clamps_negative() {
        // A single bright pixel surrounded by black
        let mut pix = PixelBufferMut::new(3, 3).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                pix.set_rgb(x, y, 0, 0, 0).unwrap();
            }
        }
        pix.set_rgb(1, 1, 20, 20, 20).unwrap();
        let pix: PixelBuffer = pix.into();

        let result = convolve_kernel(&pix, KernelType::Edge);
        assert_eq!(result.get_rgb(1, 1), Some((160, 160, 160)));
        assert_eq!(result.get_rgb(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_single_pixel() {
        let pix = PixelBuffer::new_filled(1, 1, color::compose_rgba(10, 20, 30, 40)).unwrap();
        let blurred = convolve_kernel(&pix, KernelType::Blur);
        assert_eq!(blurred, pix);
        let edges = convolve_kernel(&pix, KernelType::Edge);
        assert_eq!(edges.get_rgba(0, 0), Some((0, 0, 0, 40)));
    }

    #[test]
    fn test_unnormalized_kernel_is_normalized() {
        let pix = PixelBuffer::new_filled(4, 4, color::compose_rgb(90, 90, 90)).unwrap();
        let k = Kernel3::from_slice(&[1.0; 9]).unwrap();
        let result = convolve_3x3(&pix, &k);
        assert_eq!(result, pix);
    }
}
