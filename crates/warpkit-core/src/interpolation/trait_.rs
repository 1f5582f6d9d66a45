//! Interpolator trait for sampling values at continuous coordinates.
//!
//! This module defines the core Interpolator trait that all interpolation
//! methods must implement, and the selector used in resampling settings.

use serde::{Deserialize, Serialize};
use crate::image::Image;
use crate::spatial::ContinuousIndex;
use super::sample_grid::SampleGrid;
use super::{
    BSplineInterpolator, LanczosInterpolator, LinearInterpolator, NearestNeighborInterpolator,
};

/// Interpolator trait for sampling values at continuous coordinates.
///
/// Interpolators are used to sample image values at non-integer coordinates,
/// which is essential for image registration and resampling.
///
/// Sampling happens in two steps: [`prepare`](Self::prepare) converts the
/// source image once (possibly prefiltering it), then
/// [`evaluate`](Self::evaluate) is called per output pixel from any number
/// of threads.
///
/// # Type Parameters
/// * `D` - The spatial dimensionality
pub trait Interpolator<const D: usize>: std::fmt::Debug + Send + Sync {
    /// The selector naming this interpolator.
    fn kind(&self) -> InterpolatorKind;

    /// Convert the source image into the sample representation `evaluate` reads.
    fn prepare(&self, image: &Image<D>) -> SampleGrid<D> {
        SampleGrid::from_image(image)
    }

    /// Interpolate all components at `index` into `out`.
    ///
    /// # Arguments
    /// * `samples` - Output of [`prepare`](Self::prepare)
    /// * `index` - Continuous index, inside `samples`' sampling extent
    /// * `out` - One slot per component
    fn evaluate(&self, samples: &SampleGrid<D>, index: &ContinuousIndex<D>, out: &mut [f64]);
}

/// Available interpolation methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterpolatorKind {
    /// Value of the closest sample; preserves label values.
    NearestNeighbor,
    /// Multilinear blend of the 2^D surrounding samples.
    #[default]
    Linear,
    /// Cubic B-spline on prefiltered coefficients.
    BSpline,
    /// Lanczos windowed sinc with a radius of 3 samples.
    LanczosWindowedSinc,
}

impl InterpolatorKind {
    /// Build the interpolator this selector names.
    pub fn build<const D: usize>(&self) -> Box<dyn Interpolator<D>> {
        match self {
            InterpolatorKind::NearestNeighbor => Box::new(NearestNeighborInterpolator),
            InterpolatorKind::Linear => Box::new(LinearInterpolator),
            InterpolatorKind::BSpline => Box::new(BSplineInterpolator),
            InterpolatorKind::LanczosWindowedSinc => Box::new(LanczosInterpolator),
        }
    }
}

impl std::fmt::Display for InterpolatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InterpolatorKind::NearestNeighbor => "nearest",
            InterpolatorKind::Linear => "linear",
            InterpolatorKind::BSpline => "bspline",
            InterpolatorKind::LanczosWindowedSinc => "lanczos",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for InterpolatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" | "nearestneighbor" | "nearest-neighbor" => Ok(InterpolatorKind::NearestNeighbor),
            "linear" => Ok(InterpolatorKind::Linear),
            "bspline" | "b-spline" => Ok(InterpolatorKind::BSpline),
            "lanczos" | "sinc" => Ok(InterpolatorKind::LanczosWindowedSinc),
            other => Err(format!("unknown interpolator '{}'", other)),
        }
    }
}
