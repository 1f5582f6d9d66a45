//! Direction type for representing image orientation.
//!
//! Direction matrices represent orientation of image axes in physical space.

use nalgebra::SMatrix;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// Direction matrix representing image orientation.
///
/// The direction matrix is a D×D matrix where each column represents
/// direction of the corresponding image axis in physical space.
/// Column i represents the direction of the i-th image axis.
///
/// This is a thin wrapper around nalgebra's SMatrix to provide
/// domain-specific functionality while maintaining all nalgebra operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction<const D: usize>(pub SMatrix<f64, D, D>);

impl<const D: usize> Direction<D> {
    /// Create an identity direction matrix (no rotation).
    pub fn identity() -> Self {
        Self(SMatrix::identity())
    }

    /// Create a zero matrix.
    pub fn zeros() -> Self {
        Self(SMatrix::zeros())
    }

    /// Build from D·D values in row-major order.
    pub fn from_row_slice(values: &[f64]) -> Result<Self> {
        Error::check_len("Direction", D * D, values.len())?;
        Ok(Self(SMatrix::from_row_slice(values)))
    }

    /// Flatten to D·D values in row-major order.
    pub fn to_row_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(D * D);
        for r in 0..D {
            for c in 0..D {
                out.push(self.0[(r, c)]);
            }
        }
        out
    }

    /// Compute the determinant of the direction matrix.
    ///
    /// Uses cofactor expansion for D=2,3 and Gaussian elimination with
    /// partial pivoting otherwise.
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        match D {
            1 => m[(0, 0)],
            2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
            3 => {
                m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
                    - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
                    + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
            }
            _ => {
                let mut m = self.0;
                let mut det = 1.0;
                for i in 0..D {
                    let mut pivot_idx = i;
                    let mut pivot_val = m[(i, i)].abs();
                    for k in (i + 1)..D {
                        if m[(k, i)].abs() > pivot_val {
                            pivot_val = m[(k, i)].abs();
                            pivot_idx = k;
                        }
                    }
                    if pivot_val < 1e-12 {
                        return 0.0;
                    }
                    if pivot_idx != i {
                        m.swap_rows(i, pivot_idx);
                        det = -det;
                    }
                    det *= m[(i, i)];
                    for j in (i + 1)..D {
                        let factor = m[(j, i)] / m[(i, i)];
                        for k in i..D {
                            m[(j, k)] -= factor * m[(i, k)];
                        }
                    }
                }
                det
            }
        }
    }

    /// Try to compute the inverse of the direction matrix.
    pub fn try_inverse(&self) -> Option<Self> {
        self.0.try_inverse().map(Self)
    }

    /// Largest element-wise absolute difference to another matrix.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        (self.0 - other.0).iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}

impl<const D: usize> Default for Direction<D> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const D: usize> std::ops::Index<(usize, usize)> for Direction<D> {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Direction3 = Direction<3>;

    #[test]
    fn test_direction_identity() {
        let d = Direction3::identity();
        assert_eq!(d[(0, 0)], 1.0);
        assert_eq!(d[(1, 1)], 1.0);
        assert_eq!(d[(2, 2)], 1.0);
        assert_eq!(d[(0, 1)], 0.0);
    }

    #[test]
    fn test_row_slice_roundtrip() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let d = Direction::<2>::from_row_slice(&values).unwrap();
        assert_eq!(d[(0, 1)], 2.0);
        assert_eq!(d[(1, 0)], 3.0);
        assert_eq!(d.to_row_vec(), values.to_vec());
        assert!(Direction::<2>::from_row_slice(&values[..3]).is_err());
    }

    #[test]
    fn test_rotation_determinant() {
        // 90 degrees around Z
        let rot = Direction3::from_row_slice(&[
            0.0, -1.0, 0.0,
            1.0, 0.0, 0.0,
            0.0, 0.0, 1.0,
        ])
        .unwrap();
        assert!((rot.determinant() - 1.0).abs() < 1e-12);
        assert!((Direction::<4>::identity().determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_singular_has_no_inverse() {
        assert!(Direction::<2>::zeros().try_inverse().is_none());
        assert!(Direction::<2>::identity().try_inverse().is_some());
    }
}
