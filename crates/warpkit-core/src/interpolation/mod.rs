//! Interpolation types and operations.
//!
//! This module provides interpolation traits and implementations
//! for sampling values at continuous coordinates.

pub mod trait_;
pub mod sample_grid;
pub mod linear;
pub mod nearest;
pub mod bspline;
pub mod windowed_sinc;

pub use trait_::{Interpolator, InterpolatorKind};
pub use sample_grid::SampleGrid;
pub use linear::LinearInterpolator;
pub use nearest::NearestNeighborInterpolator;
pub use bspline::BSplineInterpolator;
pub use windowed_sinc::LanczosInterpolator;
