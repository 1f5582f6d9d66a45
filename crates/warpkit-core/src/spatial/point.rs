//! Point type for representing spatial coordinates.
//!
//! Points represent positions in physical space, and (as continuous indices)
//! positions in an image's index space.

use nalgebra::Point as NaPoint;
use serde::{Deserialize, Serialize};
use super::Vector;
use crate::error::{Error, Result};

/// A point in D-dimensional space.
///
/// Used for image origins, physical coordinates and continuous indices.
///
/// This is a thin wrapper around nalgebra's Point to provide
/// domain-specific functionality while maintaining all nalgebra operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point<const D: usize>(pub NaPoint<f64, D>);

impl<const D: usize> Point<D> {
    /// Create a new point from coordinates.
    pub fn new(coords: [f64; D]) -> Self {
        Self(NaPoint::from(coords))
    }

    /// Create a point at the origin (all coordinates zero).
    pub fn origin() -> Self {
        Self(NaPoint::origin())
    }

    /// Create a point from a slice, failing when its length is not `D`.
    pub fn from_slice(coords: &[f64]) -> Result<Self> {
        Error::check_len("Point", D, coords.len())?;
        let mut point = Self::origin();
        for (i, c) in coords.iter().enumerate() {
            point.0.coords[i] = *c;
        }
        Ok(point)
    }

    /// Convert point to a vector of coordinates.
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.coords.iter().copied().collect()
    }

    /// Largest per-axis absolute difference to another point.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        (0..D)
            .map(|i| (self[i] - other[i]).abs())
            .fold(0.0, f64::max)
    }
}

impl<const D: usize> Default for Point<D> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<const D: usize> std::ops::Index<usize> for Point<D> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0.coords[index]
    }
}

impl<const D: usize> std::ops::IndexMut<usize> for Point<D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0.coords[index]
    }
}

impl<const D: usize> std::ops::Sub for Point<D> {
    type Output = Vector<D>;

    fn sub(self, other: Self) -> Self::Output {
        Vector(self.0.coords - other.0.coords)
    }
}

impl<const D: usize> std::ops::Add<Vector<D>> for Point<D> {
    type Output = Self;

    fn add(self, vector: Vector<D>) -> Self::Output {
        Self(self.0 + vector.0)
    }
}

impl<const D: usize> std::ops::Sub<Vector<D>> for Point<D> {
    type Output = Self;

    fn sub(self, vector: Vector<D>) -> Self::Output {
        Self(self.0 - vector.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Point3 = Point<3>;
    type Vector3 = Vector<3>;

    #[test]
    fn test_point_creation() {
        let p = Point3::new([1.0, 2.0, 3.0]);
        assert_eq!(p[0], 1.0);
        assert_eq!(p[1], 2.0);
        assert_eq!(p[2], 3.0);
    }

    #[test]
    fn test_point_from_slice() {
        let p = Point3::from_slice(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(p, Point3::new([1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_point_from_slice_wrong_length() {
        let err = Point3::from_slice(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch(_)));
    }

    #[test]
    fn test_point_subtraction() {
        let p1 = Point3::new([5.0, 5.0, 5.0]);
        let p2 = Point3::new([2.0, 3.0, 4.0]);
        assert_eq!(p1 - p2, Vector3::new([3.0, 2.0, 1.0]));
    }

    #[test]
    fn test_point_vector_arithmetic() {
        let p = Point3::new([1.0, 2.0, 3.0]);
        let v = Vector3::new([4.0, 5.0, 6.0]);
        assert_eq!(p + v, Point3::new([5.0, 7.0, 9.0]));
        assert_eq!((p + v) - v, p);
    }

    #[test]
    fn test_max_abs_diff() {
        let a = Point::<2>::new([0.0, 1.0]);
        let b = Point::<2>::new([0.5, -1.0]);
        assert_eq!(a.max_abs_diff(&b), 2.0);
    }
}
