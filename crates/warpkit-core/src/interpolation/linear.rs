//! Linear interpolation implementation.
//!
//! This module provides multilinear interpolation (bilinear for 2D,
//! trilinear for 3D) for any dimension.

use crate::spatial::ContinuousIndex;
use super::sample_grid::SampleGrid;
use super::trait_::{Interpolator, InterpolatorKind};

/// Linear Interpolator.
///
/// Blends the 2^D samples surrounding the index. Neighbours past the border
/// are clamped, so values between the last sample and the half-voxel edge
/// of the extent repeat the border sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolator;

impl<const D: usize> Interpolator<D> for LinearInterpolator {
    fn kind(&self) -> InterpolatorKind {
        InterpolatorKind::Linear
    }

    fn evaluate(&self, samples: &SampleGrid<D>, index: &ContinuousIndex<D>, out: &mut [f64]) {
        let mut offsets = [[0usize; 2]; D];
        let mut weights = [[0.0f64; 2]; D];
        for axis in 0..D {
            let floor = index[axis].floor();
            let t = index[axis] - floor;
            let base = floor as isize;
            offsets[axis] = [
                samples.clamped_offset(axis, base),
                samples.clamped_offset(axis, base + 1),
            ];
            weights[axis] = [1.0 - t, t];
        }
        samples.accumulate(&offsets, &weights, out);
    }
}
