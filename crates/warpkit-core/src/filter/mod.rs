//! Image filters.
//!
//! Resampling through a transform, and derivation of output grids that
//! contain a transformed image.

pub mod cancellation;
pub mod grid_derivation;
pub mod resample;

pub use cancellation::CancellationToken;
pub use grid_derivation::{derive_output_grid, GridDerivationOptions};
pub use resample::{resample, ResampleImageFilter, ResampleSettings};
