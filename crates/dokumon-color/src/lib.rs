//! Dokumon Color - Per-pixel color remapping
//!
//! This crate provides the color side of the transform engine:
//!
//! - **Color matrices** ([`matrix`]): 4x5 affine transforms over `(R, G, B, A, 1)`,
//!   saturation, threshold and composition
//! - **Remapping** ([`remap`]): apply a matrix, or a named [`ColorFilter`], to
//!   every pixel of a buffer

pub mod error;
pub mod matrix;
pub mod remap;

// Re-export core types
pub use dokumon_core;

pub use error::{ColorError, ColorResult};
pub use matrix::{BINARY_THRESHOLD, ColorMatrix, LUMA_B, LUMA_G, LUMA_R};
pub use remap::{ColorFilter, apply_color_filter, remap, remap_stages};
