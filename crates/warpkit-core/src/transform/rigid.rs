//! Rigid transform implementation.
//!
//! This module provides a rigid transform (rotation + translation).

use nalgebra::SMatrix;
use crate::error::{Error, Result};
use crate::spatial::{Point, Vector};
use super::trait_::{Transform, TransformKind};

/// Rigid Transform (Rotation + Translation).
///
/// Supports 2D (1 angle) and 3D (3 Euler angles: ZYX convention).
/// Includes a fixed center of rotation: T(x) = R(x - c) + c + t
///
/// Parameters are the angles (radians) followed by the translation:
/// `[θ, tx, ty]` in 2D and `[αx, αy, αz, tx, ty, tz]` in 3D, with
/// `R = Rz(αz) · Ry(αy) · Rx(αx)`. The fixed parameters are the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform<const D: usize> {
    angles: [f64; 3],
    translation: Vector<D>,
    center: Point<D>,
    rotation: SMatrix<f64, D, D>,
}

impl<const D: usize> RigidTransform<D> {
    /// Number of rotation angles for this dimension.
    pub const fn angle_count() -> usize {
        if D == 3 {
            3
        } else {
            1
        }
    }

    /// Create a new rigid transform.
    ///
    /// # Arguments
    /// * `angles` - One angle in radians for 2D, three Euler angles for 3D
    /// * `translation` - The translation vector
    /// * `center` - The fixed center of rotation
    ///
    /// Fails with `DimensionMismatch` for dimensions other than 2 and 3, or
    /// a wrong number of angles.
    pub fn new(angles: &[f64], translation: Vector<D>, center: Point<D>) -> Result<Self> {
        if D != 2 && D != 3 {
            return Err(Error::dimension_mismatch(format!(
                "rigid transforms exist in 2D and 3D, not {}D",
                D
            )));
        }
        Error::check_len("rigid angles", Self::angle_count(), angles.len())?;
        let mut stored = [0.0; 3];
        stored[..angles.len()].copy_from_slice(angles);
        Ok(Self {
            angles: stored,
            translation,
            center,
            rotation: rotation_matrix(&stored),
        })
    }

    /// Create an identity rigid transform (no rotation, no translation).
    ///
    /// # Arguments
    /// * `center` - Optional center of rotation. If None, uses origin (0,0...0).
    pub fn identity(center: Option<Point<D>>) -> Result<Self> {
        Self::new(&[0.0; 3][..Self::angle_count()], Vector::zeros(), center.unwrap_or_default())
    }

    /// Get the rotation angles.
    pub fn angles(&self) -> &[f64] {
        &self.angles[..Self::angle_count()]
    }

    /// Get the translation vector.
    pub fn translation(&self) -> &Vector<D> {
        &self.translation
    }

    /// Get the center of rotation.
    pub fn center(&self) -> &Point<D> {
        &self.center
    }

    /// Get the rotation matrix.
    pub fn rotation_matrix(&self) -> &SMatrix<f64, D, D> {
        &self.rotation
    }
}

/// Build the rotation matrix from Euler angles.
fn rotation_matrix<const D: usize>(angles: &[f64; 3]) -> SMatrix<f64, D, D> {
    let mut r = SMatrix::<f64, D, D>::identity();
    if D == 2 {
        let (s, c) = angles[0].sin_cos();
        r[(0, 0)] = c;
        r[(0, 1)] = -s;
        r[(1, 0)] = s;
        r[(1, 1)] = c;
    } else if D == 3 {
        let (sx, cx) = angles[0].sin_cos();
        let (sy, cy) = angles[1].sin_cos();
        let (sz, cz) = angles[2].sin_cos();

        r[(0, 0)] = cz * cy;
        r[(0, 1)] = cz * sy * sx - sz * cx;
        r[(0, 2)] = cz * sy * cx + sz * sx;

        r[(1, 0)] = sz * cy;
        r[(1, 1)] = sz * sy * sx + cz * cx;
        r[(1, 2)] = sz * sy * cx - cz * sx;

        r[(2, 0)] = -sy;
        r[(2, 1)] = cy * sx;
        r[(2, 2)] = cy * cx;
    }
    r
}

/// Recover Euler angles from a rotation matrix.
///
/// In 3D this inverts `R = Rz·Ry·Rx`; at gimbal lock (|cos αy| ≈ 0) the
/// x angle is pinned to zero and the remaining freedom goes into αz.
fn euler_angles<const D: usize>(r: &SMatrix<f64, D, D>) -> [f64; 3] {
    if D == 2 {
        return [r[(1, 0)].atan2(r[(0, 0)]), 0.0, 0.0];
    }
    let beta = (-r[(2, 0)]).clamp(-1.0, 1.0).asin();
    if beta.cos().abs() > 1e-9 {
        let alpha = r[(2, 1)].atan2(r[(2, 2)]);
        let gamma = r[(1, 0)].atan2(r[(0, 0)]);
        [alpha, beta, gamma]
    } else {
        let gamma = (-r[(0, 1)]).atan2(r[(1, 1)]);
        [0.0, beta, gamma]
    }
}

impl<const D: usize> Transform<D> for RigidTransform<D> {
    fn kind(&self) -> TransformKind {
        TransformKind::Rigid
    }

    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        let local = point.0 - self.center.0;
        Point(self.center.0 + self.rotation * local + self.translation.0)
    }

    fn inverse(&self) -> Result<Box<dyn Transform<D>>> {
        // x = Rᵀ(y - c) + c - Rᵀt
        let rotation = self.rotation.transpose();
        let angles = euler_angles(&rotation);
        let translation = Vector(-(rotation * self.translation.0));
        Ok(Box::new(Self {
            angles,
            translation,
            center: self.center,
            rotation,
        }))
    }

    fn parameters(&self) -> Vec<f64> {
        let mut parameters = self.angles().to_vec();
        parameters.extend(self.translation.to_vec());
        parameters
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        let n = Self::angle_count();
        Error::check_len("rigid parameters", n + D, parameters.len())?;
        let (angles, translation) = parameters.split_at(n);
        *self = Self::new(angles, Vector::from_slice(translation)?, self.center)?;
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
