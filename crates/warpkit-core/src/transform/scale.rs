//! Scale transform implementation.
//!
//! This module provides a scale transform (scaling around a center).

use crate::error::{Error, Result};
use crate::spatial::{Point, Vector};
use super::trait_::{Transform, TransformKind};

/// Scale Transform.
///
/// Represents a scaling transformation with a fixed center:
/// T(x) = S * (x - c) + c
///
/// where:
/// * S is a D-dimensional scale vector (diagonal matrix)
/// * c is a D-dimensional fixed center of scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform<const D: usize> {
    factors: Vector<D>,
    center: Point<D>,
}

impl<const D: usize> ScaleTransform<D> {
    /// Create a new scale transform.
    ///
    /// # Arguments
    /// * `factors` - Per-axis scale factors
    /// * `center` - The fixed center
    pub fn new(factors: Vector<D>, center: Point<D>) -> Self {
        Self { factors, center }
    }

    /// Create an identity scale transform (scale = 1.0).
    ///
    /// # Arguments
    /// * `center` - Optional center of scaling. If None, uses origin (0,0...0).
    pub fn identity(center: Option<Point<D>>) -> Self {
        Self::new(Vector::new([1.0; D]), center.unwrap_or_default())
    }

    /// Get the scale factors.
    pub fn factors(&self) -> &Vector<D> {
        &self.factors
    }

    /// Get the center of scaling.
    pub fn center(&self) -> &Point<D> {
        &self.center
    }
}

impl<const D: usize> Transform<D> for ScaleTransform<D> {
    fn kind(&self) -> TransformKind {
        TransformKind::Scale
    }

    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        self.center + (*point - self.center).component_mul(&self.factors)
    }

    fn inverse(&self) -> Result<Box<dyn Transform<D>>> {
        if let Some(axis) = (0..D).find(|&i| self.factors[i] == 0.0) {
            return Err(Error::not_invertible(format!(
                "scale factor along axis {} is zero",
                axis
            )));
        }
        let reciprocal = Vector(self.factors.0.map(|s| 1.0 / s));
        Ok(Box::new(Self::new(reciprocal, self.center)))
    }

    fn parameters(&self) -> Vec<f64> {
        self.factors.to_vec()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        Error::check_len("scale parameters", D, parameters.len())?;
        self.factors = Vector::from_slice(parameters)?;
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        self.center.to_vec()
    }

    fn is_linear(&self) -> bool {
        true
    }

    fn clone_box(&self) -> Box<dyn Transform<D>> {
        Box::new(*self)
    }
}
