//! Spatial types for representing points, vectors, spacing, and direction matrices.
//!
//! All types are based on nalgebra for efficient linear algebra operations.

pub mod point;
pub mod vector;
pub mod spacing;
pub mod direction;

pub use point::Point;
pub use vector::Vector;
pub use spacing::Spacing;
pub use direction::Direction;

/// A position in an image's index space (fractional voxel coordinates).
pub type ContinuousIndex<const D: usize> = Point<D>;
