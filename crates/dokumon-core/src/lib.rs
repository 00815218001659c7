//! Dokumon Core - Pixel buffer types for the image transform engine
//!
//! This crate provides the data structures shared by every transform:
//!
//! - [`PixelBuffer`] / [`PixelBufferMut`] - RGBA image container (immutable / mutable)
//! - [`color`] - Packing helpers for 32-bit RGBA pixels
//! - [`rows`] - Row-wise output iteration, optionally parallel
//!
//! Buffers are created by a capture collaborator (camera, decoder) or as the
//! output of a transform. Once frozen into a [`PixelBuffer`] they are never
//! modified; every transform allocates a new buffer of the same size.

pub mod buffer;
pub mod error;

pub use buffer::compare::PixelDiffResult;
pub use buffer::rows;
pub use buffer::{PixelBuffer, PixelBufferMut};
pub use error::{Error, Result};

/// Helper functions for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// Pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose an opaque 32-bit pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Round a float channel value and clamp it into `[0, 255]`.
    ///
    /// NaN maps to 0.
    #[inline]
    pub fn clamp_channel(value: f32) -> u8 {
        if value.is_nan() {
            return 0;
        }
        value.round().clamp(0.0, 255.0) as u8
    }

}
