//! Identity transform.

use crate::error::{Error, Result};
use crate::spatial::Point;
use super::trait_::{Transform, TransformKind};

/// Maps every point to itself. Has no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdentityTransform<const D: usize>;

impl<const D: usize> IdentityTransform<D> {
    pub fn new() -> Self {
        Self
    }
}

impl<const D: usize> Transform<D> for IdentityTransform<D> {
    fn kind(&self) -> TransformKind {
        TransformKind::Identity
    }

    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        *point
    }

    fn inverse(&self) -> Result<Box<dyn Transform<D>>> {
        Ok(Box::new(*self))
    }

    fn parameters(&self) -> Vec<f64> {
        Vec::new()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        Error::check_len("identity parameters", 0, parameters.len())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        Vec::new()
    }

    fn is_linear(&self) -> bool {
        true
    }

    fn clone_box(&self) -> Box<dyn Transform<D>> {
        Box::new(*self)
    }
}
