//! Nearest neighbor interpolation implementation.

use crate::spatial::ContinuousIndex;
use super::sample_grid::SampleGrid;
use super::trait_::{Interpolator, InterpolatorKind};

/// Nearest Neighbor Interpolator.
///
/// Returns the value of the nearest sample, rounding halves up. Indices
/// outside the grid are clamped to the border.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborInterpolator;

impl<const D: usize> Interpolator<D> for NearestNeighborInterpolator {
    fn kind(&self) -> InterpolatorKind {
        InterpolatorKind::NearestNeighbor
    }

    fn evaluate(&self, samples: &SampleGrid<D>, index: &ContinuousIndex<D>, out: &mut [f64]) {
        let mut offset = 0usize;
        for axis in 0..D {
            let nearest = (index[axis] + 0.5).floor() as isize;
            offset += samples.clamped_offset(axis, nearest);
        }
        let components = samples.components();
        out.copy_from_slice(&samples.data()[offset..offset + components]);
    }
}
