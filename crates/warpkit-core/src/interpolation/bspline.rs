//! B-Spline interpolation implementation.
//!
//! This module provides cubic B-Spline interpolation for smooth sampling
//! of image values at continuous coordinates. Samples are first turned into
//! spline coefficients with a separable recursive prefilter, so the spline
//! passes through the original samples.

use crate::image::Image;
use crate::spatial::ContinuousIndex;
use super::sample_grid::SampleGrid;
use super::trait_::{Interpolator, InterpolatorKind};

/// Pole of the cubic B-spline prefilter, √3 - 2.
const POLE: f64 = -0.267_949_192_431_122_7;

/// Accuracy of the truncated causal initialization.
const TOLERANCE: f64 = 1e-10;

/// Cubic B-Spline basis function.
///
/// The cubic B-Spline kernel is defined as:
/// - (2/3) - |x|^2 + (1/2)|x|^3    for |x| < 1
/// - (1/6)(2 - |x|)^3              for 1 <= |x| < 2
/// - 0                             otherwise
fn cubic_bspline(x: f64) -> f64 {
    let abs_x = x.abs();
    if abs_x < 1.0 {
        (2.0 / 3.0) - abs_x.powi(2) + 0.5 * abs_x.powi(3)
    } else if abs_x < 2.0 {
        let two_minus_x = 2.0 - abs_x;
        (1.0 / 6.0) * two_minus_x.powi(3)
    } else {
        0.0
    }
}

/// Reflect a position into `0..n` with mirror (whole-sample) symmetry.
fn mirror(position: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * n as isize - 2;
    let p = position.rem_euclid(period);
    if p >= n as isize {
        (period - p) as usize
    } else {
        p as usize
    }
}

/// Convert one line of samples into cubic spline coefficients in place.
fn prefilter_line(line: &mut [f64]) {
    let n = line.len();
    if n < 2 {
        return;
    }
    let z = POLE;
    let gain = (1.0 - z) * (1.0 - 1.0 / z);
    line.iter_mut().for_each(|v| *v *= gain);

    line[0] = initial_causal_coefficient(line, z);
    for k in 1..n {
        line[k] += z * line[k - 1];
    }

    line[n - 1] = (z / (z * z - 1.0)) * (line[n - 1] + z * line[n - 2]);
    for k in (0..n - 1).rev() {
        line[k] = z * (line[k + 1] - line[k]);
    }
}

fn initial_causal_coefficient(line: &[f64], z: f64) -> f64 {
    let n = line.len();
    let horizon = (TOLERANCE.ln() / z.abs().ln()).ceil() as usize;
    if horizon < n {
        let mut zn = z;
        let mut sum = line[0];
        for &v in &line[1..horizon] {
            sum += zn * v;
            zn *= z;
        }
        sum
    } else {
        let iz = 1.0 / z;
        let mut zn = z;
        let mut z2n = z.powi(n as i32 - 1);
        let mut sum = line[0] + z2n * line[n - 1];
        z2n *= z2n * iz;
        for &v in &line[1..n - 1] {
            sum += (zn + z2n) * v;
            zn *= z;
            z2n *= iz;
        }
        sum / (1.0 - zn * zn)
    }
}

/// Cubic B-Spline interpolator.
///
/// Provides smooth interpolation using cubic B-Spline basis functions over
/// the 4^D neighbouring coefficients, with mirror boundary conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BSplineInterpolator;

impl BSplineInterpolator {
    /// Create a new B-Spline interpolator.
    pub fn new() -> Self {
        Self
    }
}

impl<const D: usize> Interpolator<D> for BSplineInterpolator {
    fn kind(&self) -> InterpolatorKind {
        InterpolatorKind::BSpline
    }

    fn prepare(&self, image: &Image<D>) -> SampleGrid<D> {
        let mut grid = SampleGrid::from_image(image);
        let size = grid.size();
        let strides = grid.strides();
        let components = grid.components();
        let pixels: usize = size.iter().product();
        let data = grid.data_mut();

        for axis in 0..D {
            let n = size[axis];
            if n < 2 {
                continue;
            }
            let pixel_stride = strides[axis] / components;
            let mut line = vec![0.0; n];
            // a line starts at every pixel whose coordinate along `axis` is 0
            for start in (0..pixels).filter(|p| (p / pixel_stride) % n == 0) {
                for c in 0..components {
                    let base = start * components + c;
                    for (k, v) in line.iter_mut().enumerate() {
                        *v = data[base + k * strides[axis]];
                    }
                    prefilter_line(&mut line);
                    for (k, v) in line.iter().enumerate() {
                        data[base + k * strides[axis]] = *v;
                    }
                }
            }
        }
        grid
    }

    fn evaluate(&self, samples: &SampleGrid<D>, index: &ContinuousIndex<D>, out: &mut [f64]) {
        let size = samples.size();
        let strides = samples.strides();
        let mut offsets = [[0usize; 4]; D];
        let mut weights = [[0.0f64; 4]; D];
        for axis in 0..D {
            let c = index[axis];
            let first = c.floor() as isize - 1;
            for k in 0..4 {
                let position = first + k as isize;
                offsets[axis][k] = mirror(position, size[axis]) * strides[axis];
                weights[axis][k] = cubic_bspline(c - position as f64);
            }
        }
        samples.accumulate(&offsets, &weights, out);
    }
}
