//! Regular sampling grids in physical space.
//!
//! An [`ImageGrid`] is everything about an image except its pixels: size,
//! origin, spacing and direction. It is also the output descriptor handed to
//! the resampler.

use nalgebra::SMatrix;
use crate::error::{Error, Result};
use crate::spatial::{ContinuousIndex, Direction, Point, Spacing, Vector};

/// Largest sample count a buffer of `f64` samples can hold.
const MAX_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Size, origin, spacing and direction of a regular grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGrid<const D: usize> {
    size: [usize; D],
    origin: Point<D>,
    spacing: Spacing<D>,
    direction: Direction<D>,
}

impl<const D: usize> ImageGrid<D> {
    /// Create a grid, failing with `InvalidGrid` on zero sizes, non-positive
    /// spacing or a singular direction matrix.
    pub fn new(
        size: [usize; D],
        origin: Point<D>,
        spacing: Spacing<D>,
        direction: Direction<D>,
    ) -> Result<Self> {
        let grid = Self {
            size,
            origin,
            spacing,
            direction,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Grid with zero origin, unit spacing and identity direction.
    pub fn unit(size: [usize; D]) -> Result<Self> {
        Self::new(size, Point::origin(), Spacing::uniform(1.0), Direction::identity())
    }

    /// Build a grid from untyped slices, as supplied by file readers.
    ///
    /// `direction` is row-major D·D. Every length mismatch is an
    /// `InvalidGrid` error.
    pub fn from_slices(
        size: &[usize],
        origin: &[f64],
        spacing: &[f64],
        direction: &[f64],
    ) -> Result<Self> {
        let check = |what: &str, expected: usize, actual: usize| {
            if expected == actual {
                Ok(())
            } else {
                Err(Error::invalid_grid(format!(
                    "{} has {} entries, expected {}",
                    what, actual, expected
                )))
            }
        };
        check("size", D, size.len())?;
        check("origin", D, origin.len())?;
        check("spacing", D, spacing.len())?;
        check("direction", D * D, direction.len())?;

        let mut grid_size = [0usize; D];
        grid_size.copy_from_slice(size);
        Self::new(
            grid_size,
            Point::from_slice(origin)?,
            Vector::from_slice(spacing)?,
            Direction::from_row_slice(direction)?,
        )
    }

    /// Check the grid invariants.
    pub fn validate(&self) -> Result<()> {
        if let Some(axis) = self.size.iter().position(|&s| s == 0) {
            return Err(Error::invalid_grid(format!(
                "size[{}] must be positive, got size {:?}",
                axis, self.size
            )));
        }
        self.spacing.validate()?;
        if (0..D).any(|i| !self.origin[i].is_finite()) {
            return Err(Error::invalid_grid("origin must be finite"));
        }
        if self.direction.determinant().abs() < 1e-12 {
            return Err(Error::invalid_grid("direction matrix is singular"));
        }
        self.sample_count(1)?;
        Ok(())
    }

    pub fn size(&self) -> [usize; D] {
        self.size
    }

    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    pub fn spacing(&self) -> &Spacing<D> {
        &self.spacing
    }

    pub fn direction(&self) -> &Direction<D> {
        &self.direction
    }

    /// Total number of grid points.
    pub fn number_of_pixels(&self) -> usize {
        self.size.iter().product()
    }

    /// Number of samples for `components` values per grid point, or
    /// `InvalidGrid` when no buffer could hold that many.
    pub fn sample_count(&self, components: usize) -> Result<usize> {
        self.size
            .iter()
            .try_fold(components, |count, &s| count.checked_mul(s))
            .filter(|&count| count <= MAX_SAMPLES)
            .ok_or_else(|| {
                Error::invalid_grid(format!(
                    "grid {:?} with {} component(s) is too large to address",
                    self.size, components
                ))
            })
    }

    /// Same grid with a different size.
    pub fn with_size(mut self, size: [usize; D]) -> Result<Self> {
        self.size = size;
        self.validate()?;
        Ok(self)
    }

    /// Same grid with a different origin.
    pub fn with_origin(mut self, origin: Point<D>) -> Result<Self> {
        self.origin = origin;
        self.validate()?;
        Ok(self)
    }

    /// Same grid with a different spacing.
    pub fn with_spacing(mut self, spacing: Spacing<D>) -> Result<Self> {
        self.spacing = spacing;
        self.validate()?;
        Ok(self)
    }

    /// Same grid with a different direction.
    pub fn with_direction(mut self, direction: Direction<D>) -> Result<Self> {
        self.direction = direction;
        self.validate()?;
        Ok(self)
    }

    /// Precomputed index/physical mapping for this grid.
    pub fn mapping(&self) -> Result<GridMapping<D>> {
        GridMapping::new(self)
    }

    /// Check whether another grid describes the same physical space.
    pub fn is_same_physical_space(&self, other: &Self, tolerance: f64) -> bool {
        self.size == other.size
            && self.origin.max_abs_diff(&other.origin) <= tolerance
            && (self.spacing - other.spacing).0.amax() <= tolerance
            && self.direction.max_abs_diff(&other.direction) <= tolerance
    }

    /// The 2^D corners of the grid's bounding box, in continuous index space.
    ///
    /// The box spans half a voxel beyond the first and last voxel centers.
    pub fn bounding_box_corners(&self) -> Vec<ContinuousIndex<D>> {
        (0..(1usize << D))
            .map(|mask| {
                let mut corner = ContinuousIndex::origin();
                for axis in 0..D {
                    corner[axis] = if mask & (1 << axis) == 0 {
                        -0.5
                    } else {
                        self.size[axis] as f64 - 0.5
                    };
                }
                corner
            })
            .collect()
    }

    /// Multi-index of a flat pixel offset (axis 0 fastest).
    pub fn unravel(&self, mut linear: usize) -> [usize; D] {
        let mut index = [0usize; D];
        for axis in 0..D {
            index[axis] = linear % self.size[axis];
            linear /= self.size[axis];
        }
        index
    }

    /// Flat pixel offset of a multi-index, or `None` when outside the grid.
    pub fn ravel(&self, index: &[usize; D]) -> Option<usize> {
        let mut linear = 0usize;
        let mut stride = 1usize;
        for axis in 0..D {
            if index[axis] >= self.size[axis] {
                return None;
            }
            linear += index[axis] * stride;
            stride *= self.size[axis];
        }
        Some(linear)
    }
}

/// Affine maps between a grid's index space and physical space.
///
/// `physical = origin + M · index` with `M = Direction · diag(Spacing)`,
/// and `index = M⁻¹ · (physical - origin)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapping<const D: usize> {
    origin: Point<D>,
    index_to_physical: SMatrix<f64, D, D>,
    physical_to_index: SMatrix<f64, D, D>,
}

impl<const D: usize> GridMapping<D> {
    fn new(grid: &ImageGrid<D>) -> Result<Self> {
        let scale = SMatrix::<f64, D, D>::from_diagonal(&grid.spacing.0);
        let index_to_physical = grid.direction.0 * scale;
        let physical_to_index = index_to_physical
            .try_inverse()
            .ok_or_else(|| Error::invalid_grid("index-to-physical matrix is singular"))?;
        Ok(Self {
            origin: grid.origin,
            index_to_physical,
            physical_to_index,
        })
    }

    /// Map a continuous index to a physical point.
    #[inline]
    pub fn index_to_physical(&self, index: &ContinuousIndex<D>) -> Point<D> {
        Point(self.origin.0 + self.index_to_physical * index.0.coords)
    }

    /// Map a physical point to a continuous index.
    #[inline]
    pub fn physical_to_index(&self, point: &Point<D>) -> ContinuousIndex<D> {
        Point(nalgebra::Point::from(
            self.physical_to_index * (point.0 - self.origin.0),
        ))
    }

    /// Physical point of an integer index.
    #[inline]
    pub fn discrete_index_to_physical(&self, index: &[usize; D]) -> Point<D> {
        let mut c = ContinuousIndex::<D>::origin();
        for axis in 0..D {
            c[axis] = index[axis] as f64;
        }
        self.index_to_physical(&c)
    }
}
