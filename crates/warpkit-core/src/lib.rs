//! N-dimensional image resampling through composable spatial transforms.
//!
//! The crate is organised bottom-up:
//!
//! * [`spatial`] - points, vectors, spacing and direction matrices
//! * [`image`] - typed pixel buffers on a physical grid
//! * [`transform`] - the [`Transform`](transform::Transform) trait and its
//!   identity, translation, scale, affine, rigid, composite and
//!   displacement-field implementations
//! * [`interpolation`] - nearest, linear, cubic B-spline and Lanczos sampling
//! * [`filter`] - resampling and output-grid derivation
//!
//! Transforms map output (fixed) physical points to source (moving)
//! physical points, and resampling pulls every output pixel from the source.

pub mod error;
pub mod spatial;
pub mod image;
pub mod transform;
pub mod interpolation;
pub mod filter;

pub use error::{Error, Result};
pub use image::{Image, ImageGrid, PixelType};
pub use spatial::{Point, Vector, Spacing, Direction};
pub use transform::{CompositeTransform, Transform};
pub use interpolation::InterpolatorKind;
pub use filter::{derive_output_grid, resample, ResampleImageFilter};
