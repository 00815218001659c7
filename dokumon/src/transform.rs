//! Single-operation selector

use dokumon_color::{ColorFilter, apply_color_filter};
use dokumon_core::PixelBuffer;
use dokumon_filter::{KernelType, blur, convolve_kernel};
use std::fmt;

/// One image transform.
///
/// Each variant maps to a pure function over [`PixelBuffer`]; applying it
/// never touches the input and always yields a buffer of the same size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transform {
    /// Per-pixel color remap
    Color(ColorFilter),
    /// 3x3 convolution with a named kernel
    Convolve(KernelType),
    /// Separable Gaussian blur
    Blur {
        /// Blur radius in pixels, clamped to `MAX_BLUR_RADIUS`
        radius: f32,
    },
    /// Unchanged copy
    #[default]
    Identity,
}

impl Transform {
    /// Apply the transform, returning a new buffer.
    pub fn apply(&self, pix: &PixelBuffer) -> PixelBuffer {
        match *self {
            Transform::Color(filter) => apply_color_filter(pix, filter),
            Transform::Convolve(kernel_type) => convolve_kernel(pix, kernel_type),
            Transform::Blur { radius } => blur(pix, radius),
            Transform::Identity => pix.deep_clone(),
        }
    }
}

impl From<ColorFilter> for Transform {
    fn from(filter: ColorFilter) -> Self {
        Transform::Color(filter)
    }
}

impl From<KernelType> for Transform {
    fn from(kernel_type: KernelType) -> Self {
        Transform::Convolve(kernel_type)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Color(filter) => write!(f, "color({filter})"),
            Transform::Convolve(kernel_type) => write!(f, "convolve({kernel_type})"),
            Transform::Blur { radius } => write!(f, "blur({radius})"),
            Transform::Identity => f.write_str("identity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dokumon_core::color;

    #[test]
    fn test_identity_copies() {
        let pix = PixelBuffer::new_filled(3, 2, color::compose_rgba(1, 2, 3, 4)).unwrap();
        let out = Transform::Identity.apply(&pix);
        assert_eq!(out, pix);
        assert_eq!(pix.ref_count(), 1);
    }

    #[test]
    fn test_dispatch() {
        let pix = PixelBuffer::new_filled(4, 4, color::compose_rgb(127, 127, 127)).unwrap();
        let out = Transform::Color(ColorFilter::Binary).apply(&pix);
        assert_eq!(out.get_rgba(1, 1), Some((0, 0, 0, 255)));

        let out = Transform::Convolve(KernelType::Edge).apply(&pix);
        assert_eq!(out.get_rgba(2, 2), Some((0, 0, 0, 255)));

        let out = Transform::Blur { radius: 3.0 }.apply(&pix);
        assert_eq!(out, pix);
    }

    #[test]
    fn test_from_and_display() {
        assert_eq!(
            Transform::from(ColorFilter::Grayscale),
            Transform::Color(ColorFilter::Grayscale)
        );
        assert_eq!(
            Transform::from(KernelType::Blur),
            Transform::Convolve(KernelType::Blur)
        );
        assert_eq!(Transform::Blur { radius: 2.5 }.to_string(), "blur(2.5)");
        assert_eq!(Transform::Identity.to_string(), "identity");
    }
}
