//! Affine transform implementation.
//!
//! This module provides an affine transform (linear transformation + translation).

use nalgebra::SMatrix;
use crate::error::{Error, Result};
use crate::spatial::{Direction, Point, Vector};
use super::trait_::{Transform, TransformKind};

/// Affine Transform (Linear transformation + Translation).
///
/// Represents a general affine transformation with a fixed center:
/// T(x) = A(x - c) + c + t
///
/// where:
/// * A is a D×D matrix (linear transformation: rotation, scale, shear)
/// * t is a D-dimensional translation vector
/// * c is a D-dimensional fixed center of rotation/scaling
///
/// Parameters are the D·D entries of A in row-major order followed by the D
/// entries of t. The fixed parameters are the D entries of c.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform<const D: usize> {
    matrix: SMatrix<f64, D, D>,
    translation: Vector<D>,
    center: Point<D>,
}

impl<const D: usize> AffineTransform<D> {
    /// Create a new affine transform.
    ///
    /// # Arguments
    /// * `matrix` - The linear part A
    /// * `translation` - The translation t
    /// * `center` - The fixed center c
    pub fn new(matrix: SMatrix<f64, D, D>, translation: Vector<D>, center: Point<D>) -> Self {
        Self {
            matrix,
            translation,
            center,
        }
    }

    /// Create an identity affine transform.
    ///
    /// # Arguments
    /// * `center` - Optional center of rotation. If None, uses origin (0,0...0).
    pub fn identity(center: Option<Point<D>>) -> Self {
        Self::new(SMatrix::identity(), Vector::zeros(), center.unwrap_or_default())
    }

    /// Build from a row-major matrix slice and a translation slice.
    pub fn from_slices(matrix: &[f64], translation: &[f64], center: Point<D>) -> Result<Self> {
        Error::check_len("affine matrix", D * D, matrix.len())?;
        Ok(Self::new(
            SMatrix::from_row_slice(matrix),
            Vector::from_slice(translation)?,
            center,
        ))
    }

    /// Get the transformation matrix.
    pub fn matrix(&self) -> &SMatrix<f64, D, D> {
        &self.matrix
    }

    /// Get the translation vector.
    pub fn translation(&self) -> &Vector<D> {
        &self.translation
    }

    /// Get the center of rotation.
    pub fn center(&self) -> &Point<D> {
        &self.center
    }

    /// The constant term of the equivalent center-free form `A x + offset`.
    pub fn offset(&self) -> Vector<D> {
        let c = self.center.0.coords;
        Vector(c + self.translation.0 - self.matrix * c)
    }
}

impl<const D: usize> Transform<D> for AffineTransform<D> {
    fn kind(&self) -> TransformKind {
        TransformKind::Affine
    }

    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        let local = point.0 - self.center.0;
        Point(self.center.0 + self.matrix * local + self.translation.0)
    }

    fn inverse(&self) -> Result<Box<dyn Transform<D>>> {
        // x = A⁻¹(y - c) + c - A⁻¹t keeps the same center
        if Direction(self.matrix).determinant().abs() < 1e-12 {
            return Err(Error::not_invertible("affine matrix is singular"));
        }
        let inverse = self
            .matrix
            .try_inverse()
            .ok_or_else(|| Error::not_invertible("affine matrix is singular"))?;
        let translation = Vector(-(inverse * self.translation.0));
        Ok(Box::new(Self::new(inverse, translation, self.center)))
    }

    fn parameters(&self) -> Vec<f64> {
        let mut parameters = Direction(self.matrix).to_row_vec();
        parameters.extend(self.translation.to_vec());
        parameters
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        Error::check_len("affine parameters", D * D + D, parameters.len())?;
        let (matrix, translation) = parameters.split_at(D * D);
        self.matrix = SMatrix::from_row_slice(matrix);
        self.translation = Vector::from_slice(translation)?;
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
