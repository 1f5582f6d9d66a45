//! Image types and operations.
//!
//! This module provides the Image type, its pixel buffers and sampling grid,
//! and arithmetic/comparison operators on images.

pub mod image;
pub mod grid;
pub mod pixel;
pub mod ops;

pub use image::Image;
pub use grid::{GridMapping, ImageGrid};
pub use pixel::{PixelBuffer, PixelType, PixelValue};
pub use ops::{ArithmeticOp, CompareOp, ImageStatistics};
