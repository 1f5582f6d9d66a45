//! Output-grid derivation.
//!
//! Finds a grid that contains the whole source image after it has been
//! moved by a transform, so resampling onto it crops nothing.

use crate::error::{Error, Result};
use crate::image::ImageGrid;
use crate::spatial::{ContinuousIndex, Direction, Point, Spacing, Vector};
use crate::transform::Transform;

/// Overrides for the derived grid. Unset fields are taken from the source.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridDerivationOptions<const D: usize> {
    pub spacing: Option<Spacing<D>>,
    pub direction: Option<Direction<D>>,
}

impl<const D: usize> GridDerivationOptions<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing(mut self, spacing: Spacing<D>) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_direction(mut self, direction: Direction<D>) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Derive an output grid containing `source` as seen through `transform`.
///
/// `transform` is the resampling transform (output → source), so the source
/// extent is carried into output space by its inverse. When that inverse is
/// linear only the 2^D bounding-box corners are mapped; otherwise every
/// voxel center plus the half-voxel border is mapped.
///
/// The extent is measured in the output direction's frame. The grid starts
/// half a spacing inside the minimum corner and has
/// `ceil((max - min) / spacing)` (at least 1) points per axis.
///
/// # Errors
/// * `NotInvertible` - the transform has no inverse
/// * `InvalidGrid` - bad spacing or direction overrides, or a non-finite
///   transformed extent
pub fn derive_output_grid<const D: usize>(
    source: &ImageGrid<D>,
    transform: &dyn Transform<D>,
    options: &GridDerivationOptions<D>,
) -> Result<ImageGrid<D>> {
    let inverse = transform.inverse()?;
    let mapping = source.mapping()?;
    let spacing = options.spacing.unwrap_or(*source.spacing());
    spacing.validate()?;
    let direction = options.direction.unwrap_or(*source.direction());
    let frame = direction
        .try_inverse()
        .ok_or_else(|| Error::invalid_grid("output direction matrix is singular"))?;

    let mut lo = [f64::INFINITY; D];
    let mut hi = [f64::NEG_INFINITY; D];
    let mut include = |index: ContinuousIndex<D>| {
        let p = inverse.transform_point(&mapping.index_to_physical(&index));
        let local = frame.0 * p.0.coords;
        for axis in 0..D {
            lo[axis] = lo[axis].min(local[axis]);
            hi[axis] = hi[axis].max(local[axis]);
        }
    };
    if inverse.is_linear() {
        source.bounding_box_corners().into_iter().for_each(&mut include);
    } else {
        tracing::debug!("Non-linear inverse, mapping all {} voxels", source.number_of_pixels());
        dense_lattice(source).for_each(&mut include);
    }
    if (0..D).any(|axis| !lo[axis].is_finite() || !hi[axis].is_finite()) {
        return Err(Error::invalid_grid("transformed source extent is not finite"));
    }

    let mut size = [1usize; D];
    let mut first_center = Vector::<D>::zeros();
    for axis in 0..D {
        let extent = hi[axis] - lo[axis];
        if extent < spacing[axis] {
            tracing::warn!(
                "Transformed extent {:.3} along axis {} is below one spacing ({}); using a single slice",
                extent, axis, spacing[axis]
            );
        }
        let cells = (extent / spacing[axis] - 1e-9).ceil().max(1.0);
        size[axis] = cells as usize;
        first_center[axis] = lo[axis] + spacing[axis] / 2.0;
    }
    let origin = Point(nalgebra::Point::from(direction.0 * first_center.0));

    tracing::debug!("Derived output grid {:?} at {:?}", size, origin.to_vec());
    ImageGrid::new(size, origin, spacing, direction)
}

/// Every voxel center plus the half-voxel border positions on each axis,
/// axis 0 fastest, generated lazily.
///
/// Step `k` on an axis of size `n` is position `-0.5` for `k = 0`, voxel
/// center `k - 1` for `1 <= k <= n` and `n - 0.5` for `k = n + 1`.
fn dense_lattice<const D: usize>(grid: &ImageGrid<D>) -> impl Iterator<Item = ContinuousIndex<D>> {
    let size = grid.size();
    let position = move |axis: usize, step: usize| -> f64 {
        if step == 0 {
            -0.5
        } else if step > size[axis] {
            size[axis] as f64 - 0.5
        } else {
            (step - 1) as f64
        }
    };

    let mut steps = Some([0usize; D]);
    std::iter::from_fn(move || {
        let current = steps?;
        let mut index = ContinuousIndex::<D>::origin();
        for axis in 0..D {
            index[axis] = position(axis, current[axis]);
        }

        // odometer increment; exhausted once the last axis wraps
        let mut next = current;
        steps = None;
        for axis in 0..D {
            if next[axis] <= size[axis] {
                next[axis] += 1;
                steps = Some(next);
                break;
            }
            next[axis] = 0;
        }
        Some(index)
    })
}
