//! Ordered chains of transforms

use crate::transform::Transform;
use dokumon_color::ColorFilter;
use dokumon_core::PixelBuffer;
use dokumon_filter::KernelType;
use log::debug;

/// An ordered list of [`Transform`]s applied one after another.
///
/// Each stage allocates its own output; the input buffer is never modified.
/// An empty pipeline returns a copy of its input.
///
/// # Example
///
/// ```
/// use dokumon::{ColorFilter, KernelType, Pipeline, PixelBuffer, Transform};
///
/// let pipeline = Pipeline::new()
///     .then(ColorFilter::Grayscale)
///     .then(KernelType::Blur)
///     .then(Transform::Blur { radius: 2.0 });
/// assert_eq!(pipeline.len(), 3);
///
/// let pix = PixelBuffer::new(8, 8).unwrap();
/// assert!(pipeline.apply(&pix).sizes_equal(&pix));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pipeline {
    transforms: Vec<Transform>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The capture app's default page processing: binarize, then soften
    /// the black/white edges with the 3x3 blur kernel.
    pub fn document_scan() -> Self {
        Self::new()
            .then(ColorFilter::Binary)
            .then(KernelType::Blur)
    }

    /// Append a transform.
    pub fn then(mut self, transform: impl Into<Transform>) -> Self {
        self.transforms.push(transform.into());
        self
    }

    /// Run every stage in order.
    pub fn apply(&self, pix: &PixelBuffer) -> PixelBuffer {
        debug!(
            "pipeline: {}x{}, {} stages",
            pix.width(),
            pix.height(),
            self.transforms.len()
        );
        let Some((first, rest)) = self.transforms.split_first() else {
            return pix.deep_clone();
        };
        rest.iter()
            .fold(first.apply(pix), |acc, transform| transform.apply(&acc))
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// True when there are no stages.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// The stages in application order.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }
}

impl FromIterator<Transform> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self {
            transforms: iter.into_iter().collect(),
        }
    }
}
