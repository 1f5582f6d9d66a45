//! Transform trait for spatial coordinate transformations.
//!
//! This module defines the core Transform trait that all spatial transforms
//! must implement, and the tag identifying each transform kind.

use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::spatial::Point;
use super::descriptor::TransformDescriptor;

/// Identifies a transform variant, e.g. in serialized descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    Identity,
    Translation,
    Scale,
    Affine,
    Rigid,
    DisplacementField,
    Composite,
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransformKind::Identity => "Identity",
            TransformKind::Translation => "Translation",
            TransformKind::Scale => "Scale",
            TransformKind::Affine => "Affine",
            TransformKind::Rigid => "Rigid",
            TransformKind::DisplacementField => "DisplacementField",
            TransformKind::Composite => "Composite",
        };
        f.write_str(name)
    }
}

/// Transform trait for spatial coordinate transformations.
///
/// A transform maps points from its output domain (the fixed/virtual space,
/// e.g. the grid being resampled onto) to its input domain (the moving space,
/// e.g. the image being sampled).
///
/// Parameters are split the way registration frameworks expect:
/// * `parameters` are mutable (offsets, matrix entries, angles);
/// * `fixed_parameters` are set at construction (centers, field geometry)
///   and never change afterwards.
///
/// # Type Parameters
/// * `D` - The spatial dimensionality, fixed at compile time
pub trait Transform<const D: usize>: std::fmt::Debug + Send + Sync {
    /// The variant tag.
    fn kind(&self) -> TransformKind;

    /// Map a single point.
    fn transform_point(&self, point: &Point<D>) -> Point<D>;

    /// Map a batch of points.
    fn transform_points(&self, points: &[Point<D>]) -> Vec<Point<D>> {
        points.iter().map(|p| self.transform_point(p)).collect()
    }

    /// The algebraic inverse, or `NotInvertible`.
    fn inverse(&self) -> Result<Box<dyn Transform<D>>>;

    /// Current mutable parameters.
    fn parameters(&self) -> Vec<f64>;

    /// Replace the mutable parameters; `DimensionMismatch` on wrong length.
    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()>;

    /// Construction-time parameters.
    fn fixed_parameters(&self) -> Vec<f64>;

    fn number_of_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// True when the mapping is affine, so it preserves convexity and a
    /// bounding box is mapped onto the hull of its mapped corners.
    fn is_linear(&self) -> bool;

    /// Clone into a new box.
    fn clone_box(&self) -> Box<dyn Transform<D>>;

    /// Serializable description of this transform.
    fn to_descriptor(&self) -> TransformDescriptor {
        TransformDescriptor::new(self.kind(), D, self.parameters(), self.fixed_parameters())
    }
}

impl<const D: usize> Clone for Box<dyn Transform<D>> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
