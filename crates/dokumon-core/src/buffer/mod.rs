//! PixelBuffer - The RGBA image container
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major, top-left origin, one `u32` per pixel
//! - Each pixel is packed as `0xRRGGBBAA` (see [`crate::color`])
//! - There is no row padding: row `y` occupies `data[y*w .. (y+1)*w]`
//!
//! # Ownership model
//!
//! `PixelBuffer` uses `Arc` for cheap cloning (shared ownership) and is
//! never mutated. Transforms build their output in a [`PixelBufferMut`]
//! and freeze it with `Into<PixelBuffer>`.

mod access;
pub mod compare;
pub mod rows;

use crate::color;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal buffer data
#[derive(Debug, PartialEq, Eq)]
struct BufferData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Packed RGBA pixels, `width * height` of them
    data: Vec<u32>,
}

impl BufferData {
    fn check_dimensions(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(width as usize * height as usize)
    }
}

/// Immutable RGBA image
///
/// # Examples
///
/// ```
/// use dokumon_core::{PixelBuffer, color};
///
/// let buf = PixelBuffer::new_filled(4, 3, color::compose_rgb(10, 20, 30)).unwrap();
/// assert_eq!(buf.width(), 4);
/// assert_eq!(buf.height(), 3);
/// assert_eq!(buf.get_rgba(3, 2), Some((10, 20, 30, 255)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    inner: Arc<BufferData>,
}

impl PixelBuffer {
    /// Create a new buffer with every pixel set to transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a new buffer with every pixel set to `pixel`.
    pub fn new_filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        let len = BufferData::check_dimensions(width, height)?;
        Ok(Self::from_data(width, height, vec![pixel; len]))
    }

    /// Wrap packed `0xRRGGBBAA` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuffer`] if `pixels.len() != width * height`
    /// and [`Error::InvalidDimension`] if either dimension is 0.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        let expected = BufferData::check_dimensions(width, height)?;
        if pixels.len() != expected {
            return Err(Error::InvalidBuffer {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::from_data(width, height, pixels))
    }

    /// Build a buffer from interleaved RGBA8 bytes, as handed over by a
    /// camera or bitmap collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuffer`] if `bytes.len() != width * height * 4`.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let npix = BufferData::check_dimensions(width, height)?;
        let expected = npix * 4;
        if bytes.len() != expected {
            return Err(Error::InvalidBuffer {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(4)
            .map(|p| color::compose_rgba(p[0], p[1], p[2], p[3]))
            .collect();
        Ok(Self::from_data(width, height, data))
    }

    fn from_data(width: u32, height: u32, data: Vec<u32>) -> Self {
        PixelBuffer {
            inner: Arc::new(BufferData {
                width,
                height,
                data,
            }),
        }
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.inner.data
    }

    /// The pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Serialize to interleaved RGBA8 bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.inner.data.len() * 4);
        for &pixel in &self.inner.data {
            let (r, g, b, a) = color::extract_rgba(pixel);
            bytes.extend_from_slice(&[r, g, b, a]);
        }
        bytes
    }

    /// Check whether two buffers have the same width and height.
    pub fn sizes_equal(&self, other: &PixelBuffer) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Get the number of strong references to the pixel storage.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a copy with independent storage.
    ///
    /// Unlike `clone()`, which shares data via `Arc`, the result owns a new
    /// allocation.
    pub fn deep_clone(&self) -> Self {
        Self::from_data(
            self.inner.width,
            self.inner.height,
            self.inner.data.clone(),
        )
    }

    /// Create a zeroed mutable buffer with the same dimensions.
    pub fn create_template(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: BufferData {
                width: self.inner.width,
                height: self.inner.height,
                data: vec![0; self.inner.data.len()],
            },
        }
    }

    /// Try to get mutable access to the pixel data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixelBufferMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixelBufferMut { inner: data }),
            Err(arc) => Err(PixelBuffer { inner: arc }),
        }
    }

    /// Create a mutable copy of this buffer.
    pub fn to_mut(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: BufferData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable RGBA image
///
/// Exclusive owner of its pixels. Convert back to an immutable
/// [`PixelBuffer`] using `Into<PixelBuffer>`.
#[derive(Debug)]
pub struct PixelBufferMut {
    inner: BufferData,
}

impl PixelBufferMut {
    /// Create a new zeroed mutable buffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = BufferData::check_dimensions(width, height)?;
        Ok(PixelBufferMut {
            inner: BufferData {
                width,
                height,
                data: vec![0; len],
            },
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.inner.data
    }

    /// Mutable access to all pixels.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Mutable access to row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Fill every output row with `f(y, row)`.
    ///
    /// Rows are disjoint, so with the `parallel` feature they are handed to
    /// rayon workers; otherwise they are visited in order.
    pub fn for_each_row_mut<F>(&mut self, f: F)
    where
        F: Fn(u32, &mut [u32]) + Sync + Send,
    {
        let w = self.inner.width as usize;
        rows::for_each_row_mut(&mut self.inner.data, w, |y, row| f(y as u32, row));
    }
}

impl From<PixelBufferMut> for PixelBuffer {
    fn from(buf: PixelBufferMut) -> Self {
        PixelBuffer {
            inner: Arc::new(buf.inner),
        }
    }
}
