//! Translation transform implementation.
//!
//! This module provides a simple translation transform.

use crate::error::{Error, Result};
use crate::spatial::{Point, Vector};
use super::trait_::{Transform, TransformKind};

/// Simple Translation Transform.
///
/// Translates points by a fixed offset vector: `T(p) = p + offset`.
/// Parameters are the D offset components; there are no fixed parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationTransform<const D: usize> {
    offset: Vector<D>,
}

impl<const D: usize> TranslationTransform<D> {
    /// Create a new translation transform.
    ///
    /// # Arguments
    /// * `offset` - The translation vector
    pub fn new(offset: Vector<D>) -> Self {
        Self { offset }
    }

    /// Get the translation vector.
    pub fn offset(&self) -> &Vector<D> {
        &self.offset
    }

    pub fn set_offset(&mut self, offset: Vector<D>) {
        self.offset = offset;
    }
}

impl<const D: usize> Transform<D> for TranslationTransform<D> {
    fn kind(&self) -> TransformKind {
        TransformKind::Translation
    }

    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        *point + self.offset
    }

    fn inverse(&self) -> Result<Box<dyn Transform<D>>> {
        Ok(Box::new(Self::new(-self.offset)))
    }

    fn parameters(&self) -> Vec<f64> {
        self.offset.to_vec()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        Error::check_len("translation parameters", D, parameters.len())?;
        self.offset = Vector::from_slice(parameters)?;
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_transform() {
        let transform = TranslationTransform::<3>::new(Vector::new([1.0, 2.0, 3.0]));

        let points = [Point::new([0.0, 0.0, 0.0]), Point::new([1.0, 1.0, 1.0])];
        let transformed = transform.transform_points(&points);

        assert_eq!(transformed[0], Point::new([1.0, 2.0, 3.0]));
        assert_eq!(transformed[1], Point::new([2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_translation_inverse() {
        let transform = TranslationTransform::<2>::new(Vector::new([3.0, 4.0]));
        let inverse = transform.inverse().unwrap();
        assert_eq!(inverse.parameters(), vec![-3.0, -4.0]);

        let p = Point::new([0.25, -7.0]);
        let back = inverse.transform_point(&transform.transform_point(&p));
        assert!(back.max_abs_diff(&p) < 1e-12);
    }

    #[test]
    fn test_set_parameters() {
        let mut transform = TranslationTransform::<2>::new(Vector::zeros());
        transform.set_parameters(&[1.0, 2.0]).unwrap();
        assert_eq!(transform.offset(), &Vector::new([1.0, 2.0]));

        let err = transform.set_parameters(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch(_)));
    }
}
