//! Color remapping
//!
//! Applies a [`ColorMatrix`] to every pixel of a buffer. The named filters
//! used by the capture app are exposed through the closed [`ColorFilter`]
//! selector, with an explicit `Identity` variant for anything unrecognized.

use crate::matrix::ColorMatrix;
use dokumon_core::{PixelBuffer, PixelBufferMut};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Named color filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorFilter {
    /// Desaturate to luminance
    Grayscale,
    /// Desaturate, then threshold luminance at 128 to pure black or white
    Binary,
    /// Pass pixels through unchanged
    #[default]
    Identity,
}

impl ColorFilter {
    /// Integer code used by the capture app for [`ColorFilter::Grayscale`]
    pub const GRAYSCALE_CODE: i32 = 0;
    /// Integer code used by the capture app for [`ColorFilter::Binary`]
    pub const BINARY_CODE: i32 = 1;

    /// Map an integer selector to a filter.
    ///
    /// Unknown codes select [`ColorFilter::Identity`].
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::GRAYSCALE_CODE => Self::Grayscale,
            Self::BINARY_CODE => Self::Binary,
            other => {
                debug!("color filter code {other} not recognized, using identity");
                Self::Identity
            }
        }
    }

    /// Map a selector name (`"grayscale"`, `"binary"`) to a filter.
    ///
    /// Matching ignores ASCII case; unknown names select
    /// [`ColorFilter::Identity`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "grayscale" | "gray" => Self::Grayscale,
            "binary" => Self::Binary,
            other => {
                debug!("color filter name {other:?} not recognized, using identity");
                Self::Identity
            }
        }
    }

    /// Selector name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Binary => "binary",
            Self::Identity => "identity",
        }
    }

    /// The matrices this filter applies, in order.
    ///
    /// Binary is the grayscale matrix followed by the threshold matrix, so
    /// the threshold sees luminance rather than raw RGB. An empty list means
    /// the identity.
    pub fn stages(self) -> Vec<ColorMatrix> {
        match self {
            Self::Grayscale => vec![ColorMatrix::grayscale()],
            Self::Binary => vec![ColorMatrix::grayscale(), ColorMatrix::threshold()],
            Self::Identity => Vec::new(),
        }
    }
}

impl fmt::Display for ColorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Apply one color matrix to every pixel.
///
/// The output has the same dimensions and new storage; the input is not
/// touched.
pub fn remap(pix: &PixelBuffer, matrix: &ColorMatrix) -> PixelBuffer {
    remap_stages(pix, std::slice::from_ref(matrix))
}

/// Apply a sequence of color matrices to every pixel.
///
/// Each stage rounds and clamps its result to 8-bit channels before the
/// next stage runs, exactly as chaining [`remap`] calls would, but without
/// allocating intermediate buffers.
pub fn remap_stages(pix: &PixelBuffer, stages: &[ColorMatrix]) -> PixelBuffer {
    debug!(
        "remap: {}x{} with {} stage(s)",
        pix.width(),
        pix.height(),
        stages.len()
    );

    let mut out: PixelBufferMut = pix.create_template();
    let w = pix.width() as usize;
    out.for_each_row_mut(|y, row| {
        let src = pix.row(y);
        for (dst, &pixel) in row[..w].iter_mut().zip(src) {
            *dst = stages.iter().fold(pixel, |p, m| m.apply_pixel(p));
        }
    });
    out.into()
}

/// Apply a named color filter.
pub fn apply_color_filter(pix: &PixelBuffer, filter: ColorFilter) -> PixelBuffer {
    debug!("color filter: {filter}");
    remap_stages(pix, &filter.stages())
}
