//! Windowed sinc interpolation.

use std::f64::consts::PI;
use crate::spatial::ContinuousIndex;
use super::sample_grid::SampleGrid;
use super::trait_::{Interpolator, InterpolatorKind};

/// Kernel radius in samples.
const RADIUS: usize = 3;
const TAPS: usize = 2 * RADIUS;

/// Kernel values below this are the rounding residue of `sin(kπ)`.
const ZERO_SNAP: f64 = 1e-15;

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Lanczos kernel `sinc(x) · sinc(x / a)` on `|x| < a`, exactly zero at
/// nonzero integers.
fn lanczos(x: f64) -> f64 {
    let a = RADIUS as f64;
    if x.abs() >= a {
        return 0.0;
    }
    let w = sinc(x) * sinc(x / a);
    if w.abs() < ZERO_SNAP {
        0.0
    } else {
        w
    }
}

/// Lanczos windowed sinc interpolator.
///
/// Uses the 6 nearest samples per axis. Weights are renormalized to sum to
/// one so flat regions stay flat; border samples are clamped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosInterpolator;

impl<const D: usize> Interpolator<D> for LanczosInterpolator {
    fn kind(&self) -> InterpolatorKind {
        InterpolatorKind::LanczosWindowedSinc
    }

    fn evaluate(&self, samples: &SampleGrid<D>, index: &ContinuousIndex<D>, out: &mut [f64]) {
        let mut offsets = [[0usize; TAPS]; D];
        let mut weights = [[0.0f64; TAPS]; D];
        for axis in 0..D {
            let c = index[axis];
            let first = c.floor() as isize - RADIUS as isize + 1;
            let mut total = 0.0;
            for k in 0..TAPS {
                let position = first + k as isize;
                let w = lanczos(c - position as f64);
                offsets[axis][k] = samples.clamped_offset(axis, position);
                weights[axis][k] = w;
                total += w;
            }
            if total != 0.0 {
                weights[axis].iter_mut().for_each(|w| *w /= total);
            }
        }
        samples.accumulate(&offsets, &weights, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Point;

    #[test]
    fn test_kernel() {
        assert_eq!(lanczos(0.0), 1.0);
        for k in [1.0, 2.0, -1.0, -2.0, 3.0] {
            assert_eq!(lanczos(k), 0.0);
        }
        assert!(lanczos(0.5) > 0.5);
    }

    #[test]
    fn test_exact_at_samples() {
        let samples = SampleGrid::<2>::new([4, 4], 1, (0..16).map(|v| v as f64 * 1.5).collect());
        let mut out = [0.0];
        LanczosInterpolator.evaluate(&samples, &Point::new([2.0, 1.0]), &mut out);
        // only the center tap has weight, so the sample is returned untouched
        assert_eq!(out[0], 9.0);
    }

    #[test]
    fn test_constant_preserved() {
        let samples = SampleGrid::<3>::new([3, 3, 3], 1, vec![2.5; 27]);
        let mut out = [0.0];
        LanczosInterpolator.evaluate(&samples, &Point::new([0.3, 1.7, -0.4]), &mut out);
        assert!((out[0] - 2.5).abs() < 1e-9);
    }
}
