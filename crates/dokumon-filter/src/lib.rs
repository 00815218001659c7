//! dokumon-filter - Neighborhood filters
//!
//! This crate provides the convolution side of the transform engine:
//!
//! - 3x3 convolution with edge-replicate borders ([`convolve`])
//! - Named kernels: smoothing blur, edge detect, identity ([`kernel`])
//! - Radius-driven Gaussian blur as two separable passes ([`blur`])
//!
//! All filters process R, G and B and copy alpha from the input.

pub mod blur;
pub mod convolve;
mod error;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel3, KernelType};

pub use blur::{MAX_BLUR_RADIUS, blur, blur_direct, gaussian_sigma, gaussian_weights};
pub use convolve::{convolve_3x3, convolve_kernel};
