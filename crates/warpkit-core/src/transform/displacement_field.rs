//! Displacement field transform implementation.
//!
//! This module provides a dense displacement field transform where each
//! voxel has its own displacement vector. This is used for deformable
//! (non-rigid) registration.

use crate::error::{Error, Result};
use crate::image::{GridMapping, Image, ImageGrid, PixelBuffer, PixelType};
use crate::interpolation::{Interpolator, LinearInterpolator, SampleGrid};
use crate::spatial::{Point, Vector};
use super::trait_::{Transform, TransformKind};

/// Dense displacement field transform.
///
/// Each grid point of the field stores a physical displacement vector `u`,
/// and `T(p) = p + u(p)` with `u` linearly interpolated between grid points.
/// Outside the field's sampling extent the displacement is zero.
///
/// Parameters are the displacements, D interleaved components per grid
/// point with axis 0 fastest. Fixed parameters describe the field geometry:
/// `size`, `origin`, `spacing`, then the row-major `direction`.
///
/// There is no closed-form inverse, so [`inverse`](Transform::inverse)
/// always fails with `NotInvertible`.
#[derive(Debug, Clone)]
pub struct DisplacementFieldTransform<const D: usize> {
    grid: ImageGrid<D>,
    mapping: GridMapping<D>,
    samples: SampleGrid<D>,
}

impl<const D: usize> DisplacementFieldTransform<D> {
    /// Create a transform from a vector image with D components per pixel.
    pub fn new(field: &Image<D>) -> Result<Self> {
        if field.components() != D {
            return Err(Error::dimension_mismatch(format!(
                "a {}D displacement field needs {} components per pixel, got {}",
                D,
                D,
                field.components()
            )));
        }
        Self::from_displacements(*field.grid(), field.buffer().to_f64_vec())
    }

    /// Create a transform from raw interleaved displacements on `grid`.
    pub fn from_displacements(grid: ImageGrid<D>, displacements: Vec<f64>) -> Result<Self> {
        Error::check_len("displacement field", grid.sample_count(D)?, displacements.len())?;
        check_finite(&displacements)?;
        Ok(Self {
            mapping: grid.mapping()?,
            samples: SampleGrid::new(grid.size(), D, displacements),
            grid,
        })
    }

    /// Create a zero displacement field for the given grid.
    pub fn zeros(grid: ImageGrid<D>) -> Result<Self> {
        Self::from_displacements(grid, vec![0.0; grid.sample_count(D)?])
    }

    /// Rebuild an all-zero field from its fixed parameters.
    pub fn from_fixed_parameters(fixed: &[f64]) -> Result<Self> {
        Error::check_len("displacement field fixed parameters", 3 * D + D * D, fixed.len())?;
        let (size, rest) = fixed.split_at(D);
        let (origin, rest) = rest.split_at(D);
        let (spacing, direction) = rest.split_at(D);

        if size.iter().any(|s| *s < 1.0 || s.fract() != 0.0) {
            return Err(Error::invalid_parameters(format!(
                "field size must be positive integers, got {:?}",
                size
            )));
        }
        let size: Vec<usize> = size.iter().map(|s| *s as usize).collect();
        Self::zeros(ImageGrid::from_slices(&size, origin, spacing, direction)?)
    }

    /// The field's geometry.
    pub fn grid(&self) -> &ImageGrid<D> {
        &self.grid
    }

    /// Interpolated displacement at a physical point.
    pub fn displacement_at(&self, point: &Point<D>) -> Vector<D> {
        let index = self.mapping.physical_to_index(point);
        if !self.samples.contains(&index) {
            return Vector::zeros();
        }
        let mut displacement = [0.0; D];
        LinearInterpolator.evaluate(&self.samples, &index, &mut displacement);
        Vector::new(displacement)
    }

    /// The field as a `Float64` vector image.
    pub fn to_image(&self) -> Result<Image<D>> {
        Image::new(
            self.grid,
            D,
            PixelBuffer::from_f64(PixelType::Float64, self.samples.data()),
        )
    }
}

fn check_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(Error::invalid_parameters(format!(
            "displacement {} is not finite",
            i
        ))),
        None => Ok(()),
    }
}

impl<const D: usize> Transform<D> for DisplacementFieldTransform<D> {
    fn kind(&self) -> TransformKind {
        TransformKind::DisplacementField
    }

    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        *point + self.displacement_at(point)
    }

    fn inverse(&self) -> Result<Box<dyn Transform<D>>> {
        Err(Error::not_invertible(
            "displacement fields have no closed-form inverse",
        ))
    }

    fn parameters(&self) -> Vec<f64> {
        self.samples.data().to_vec()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        Error::check_len("displacement field", self.samples.data().len(), parameters.len())?;
        check_finite(parameters)?;
        self.samples.data_mut().copy_from_slice(parameters);
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        let mut fixed: Vec<f64> = self.grid.size().iter().map(|s| *s as f64).collect();
        fixed.extend(self.grid.origin().to_vec());
        fixed.extend(self.grid.spacing().to_vec());
        fixed.extend(self.grid.direction().to_row_vec());
        fixed
    }

    fn is_linear(&self) -> bool {
        false
    }

    fn clone_box(&self) -> Box<dyn Transform<D>> {
        Box::new(self.clone())
    }
}
