//! Convolution kernels
//!
//! A [`Kernel3`] is a 3x3 weight grid stored row-major, centered on the
//! middle element. [`KernelType`] is the closed set of named kernels the
//! capture app selects from.

use crate::{FilterError, FilterResult};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// A 3x3 convolution kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3 {
    /// Kernel data (row-major order)
    data: [f32; 9],
}

impl Default for Kernel3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Kernel3 {
    /// Create a kernel from nine row-major coefficients.
    pub const fn new(data: [f32; 9]) -> Self {
        Self { data }
    }

    /// Create a kernel from a slice of values.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] unless the slice holds exactly
    /// nine values.
    pub fn from_slice(data: &[f32]) -> FilterResult<Self> {
        let data: [f32; 9] = data.try_into().map_err(|_| {
            FilterError::InvalidKernel(format!("expected 9 coefficients, got {}", data.len()))
        })?;
        Ok(Self { data })
    }

    /// Center 1, everything else 0.
    pub const fn identity() -> Self {
        Self::new([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0])
    }

    /// Smoothing kernel: center 4, edge neighbors 1, corners 0 (sum 8).
    pub const fn blur() -> Self {
        Self::new([0.0, 1.0, 0.0, 1.0, 4.0, 1.0, 0.0, 1.0, 0.0])
    }

    /// High-pass kernel: center 8, all neighbors -1 (sum 0).
    pub const fn edge_detect() -> Self {
        Self::new([-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0])
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32; 9] {
        &self.data
    }

    /// Get a value at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        (x < 3 && y < 3).then(|| self.data[y * 3 + x])
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Return the kernel scaled so that its values sum to 1.
    ///
    /// Kernels summing to 0 (high-pass) or already summing to 1 are
    /// returned unchanged.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum == 0.0 || sum == 1.0 {
            return *self;
        }
        let mut data = self.data;
        for v in &mut data {
            *v /= sum;
        }
        Self { data }
    }
}

/// Named convolution kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KernelType {
    /// [`Kernel3::blur`]
    Blur,
    /// [`Kernel3::edge_detect`]
    Edge,
    /// [`Kernel3::identity`]
    #[default]
    Identity,
}

impl KernelType {
    /// Integer code used by the capture app for [`KernelType::Blur`]
    pub const BLUR_CODE: i32 = 0;
    /// Integer code used by the capture app for [`KernelType::Edge`]
    pub const EDGE_CODE: i32 = 1;

    /// Map an integer selector to a kernel type.
    ///
    /// Unknown codes select [`KernelType::Identity`].
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::BLUR_CODE => Self::Blur,
            Self::EDGE_CODE => Self::Edge,
            other => {
                debug!("kernel code {other} not recognized, using identity");
                Self::Identity
            }
        }
    }

    /// Map a selector name (`"blur"`, `"edge"`) to a kernel type.
    ///
    /// Unknown names select [`KernelType::Identity`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "blur" => Self::Blur,
            "edge" | "edge_detect" => Self::Edge,
            other => {
                debug!("kernel name {other:?} not recognized, using identity");
                Self::Identity
            }
        }
    }

    /// Selector name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::Edge => "edge",
            Self::Identity => "identity",
        }
    }

    /// The coefficients for this kernel type.
    pub fn kernel(self) -> Kernel3 {
        match self {
            Self::Blur => Kernel3::blur(),
            Self::Edge => Kernel3::edge_detect(),
            Self::Identity => Kernel3::identity(),
        }
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice() {
        let k = Kernel3::from_slice(&[1.0; 9]).unwrap();
        assert_eq!(k.sum(), 9.0);
        assert!(matches!(
            Kernel3::from_slice(&[1.0; 8]),
            Err(FilterError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_get() {
        let k = Kernel3::edge_detect();
        assert_eq!(k.get(1, 1), Some(8.0));
        assert_eq!(k.get(0, 2), Some(-1.0));
        assert_eq!(k.get(3, 0), None);
    }

    #[test]
    fn test_named_sums() {
        assert_eq!(Kernel3::blur().sum(), 8.0);
        assert_eq!(Kernel3::edge_detect().sum(), 0.0);
        assert_eq!(Kernel3::identity().sum(), 1.0);
    }

    #[test]
    fn test_normalized() {
        let k = Kernel3::blur().normalized();
        assert_eq!(k.sum(), 1.0);
        assert_eq!(k.get(1, 1), Some(0.5));
        assert_eq!(k.get(1, 0), Some(0.125));

        assert_eq!(Kernel3::edge_detect().normalized(), Kernel3::edge_detect());
        assert_eq!(Kernel3::identity().normalized(), Kernel3::identity());
    }

    #[test]
    fn test_kernel_type_selectors() {
        assert_eq!(KernelType::from_code(0), KernelType::Blur);
        assert_eq!(KernelType::from_code(1), KernelType::Edge);
        assert_eq!(KernelType::from_code(7), KernelType::Identity);
        assert_eq!(KernelType::from_name("EDGE"), KernelType::Edge);
        assert_eq!("sharpen".parse::<KernelType>(), Ok(KernelType::Identity));
        assert_eq!(KernelType::Identity.kernel(), Kernel3::default());
        assert_eq!(KernelType::Blur.to_string(), "blur");
    }
}
