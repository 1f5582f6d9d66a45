//! Vector type for representing spatial displacements and directions.

use nalgebra::SVector;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// A vector in D-dimensional space.
///
/// Vectors represent displacements, offsets, spacing and other vector
/// quantities.
///
/// This is a thin wrapper around nalgebra's SVector to provide
/// domain-specific functionality while maintaining all nalgebra operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector<const D: usize>(pub SVector<f64, D>);

impl<const D: usize> Vector<D> {
    /// Create a new vector from components.
    pub fn new(components: [f64; D]) -> Self {
        Self(SVector::from(components))
    }

    /// Create a zero vector.
    pub fn zeros() -> Self {
        Self(SVector::zeros())
    }

    /// Create a vector from a slice, failing when its length is not `D`.
    pub fn from_slice(components: &[f64]) -> Result<Self> {
        Error::check_len("Vector", D, components.len())?;
        Ok(Self(SVector::from_column_slice(components)))
    }

    /// Convert vector to a vector of components.
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.iter().copied().collect()
    }

    /// Element-wise product.
    pub fn component_mul(&self, other: &Self) -> Self {
        Self(self.0.component_mul(&other.0))
    }
}

impl<const D: usize> std::ops::Index<usize> for Vector<D> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<const D: usize> std::ops::IndexMut<usize> for Vector<D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl<const D: usize> std::ops::Add for Vector<D> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self(self.0 + other.0)
    }
}

impl<const D: usize> std::ops::Sub for Vector<D> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self(self.0 - other.0)
    }
}

impl<const D: usize> std::ops::Mul<f64> for Vector<D> {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Self(self.0 * scalar)
    }
}

impl<const D: usize> std::ops::Div<f64> for Vector<D> {
    type Output = Self;

    fn div(self, scalar: f64) -> Self::Output {
        Self(self.0 / scalar)
    }
}

impl<const D: usize> std::ops::Neg for Vector<D> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Vector3 = Vector<3>;

    #[test]
    fn test_vector_from_slice() {
        let v = Vector3::from_slice(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v, Vector3::new([1.0, 2.0, 3.0]));
        assert!(Vector3::from_slice(&[1.0]).is_err());
    }

    #[test]
    fn test_vector_arithmetic() {
        let v1 = Vector3::new([1.0, 2.0, 3.0]);
        let v2 = Vector3::new([4.0, 5.0, 6.0]);

        assert_eq!(v1 + v2, Vector3::new([5.0, 7.0, 9.0]));
        assert_eq!(v2 - v1, Vector3::new([3.0, 3.0, 3.0]));
        assert_eq!(v1 * 2.0, Vector3::new([2.0, 4.0, 6.0]));
        assert_eq!(v2 / 2.0, Vector3::new([2.0, 2.5, 3.0]));
        assert_eq!(-v1, Vector3::new([-1.0, -2.0, -3.0]));
    }

    #[test]
    fn test_component_ops() {
        let v1 = Vector3::new([1.0, 2.0, 3.0]);
        let v2 = Vector3::new([2.0, 4.0, 6.0]);
        assert_eq!(v1.component_mul(&v2), Vector3::new([2.0, 8.0, 18.0]));
    }
}
