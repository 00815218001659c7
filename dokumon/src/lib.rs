//! Dokumon - Image transform engine for document capture
//!
//! Turns a camera frame into something that reads well as a scanned page.
//! Every transform takes a [`PixelBuffer`] and returns a new one of the same
//! size; inputs are never modified.
//!
//! - Color remapping: grayscale and black/white binarization ([`remap`])
//! - 3x3 convolution: smoothing blur and edge detection ([`filter`])
//! - Radius-driven Gaussian blur ([`filter::blur`])
//! - PNG/JPEG decode and encode ([`io`])
//!
//! # Example
//!
//! ```
//! use dokumon::{Pipeline, PixelBuffer, color};
//!
//! let frame = PixelBuffer::new_filled(64, 48, color::compose_rgb(200, 180, 90)).unwrap();
//! let page = Pipeline::document_scan().apply(&frame);
//! assert_eq!(page.width(), 64);
//! assert_eq!(page.get_rgba(10, 10), Some((255, 255, 255, 255)));
//! ```

mod pipeline;
mod transform;

// Re-export core types (primary data structures used everywhere)
pub use dokumon_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use dokumon_color as remap;
pub use dokumon_filter as filter;
pub use dokumon_io as io;

pub use dokumon_color::ColorFilter;
pub use dokumon_filter::KernelType;
pub use pipeline::Pipeline;
pub use transform::Transform;
