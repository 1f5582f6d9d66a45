//! Image type with physical metadata and coordinate transformations.
//!
//! An [`Image`] couples a typed pixel buffer with the [`ImageGrid`] that
//! places its samples in physical space.

use crate::error::{Error, Result};
use crate::spatial::{ContinuousIndex, Direction, Point, Spacing};
use super::grid::{GridMapping, ImageGrid};
use super::pixel::{PixelBuffer, PixelType, PixelValue};

/// N-dimensional image with physical metadata.
///
/// # Coordinate Systems
/// * **Index Space**: Discrete pixel/voxel indices, axis 0 varies fastest
///   in memory.
/// * **Physical Space**: Continuous coordinates in mm or other units,
///   `physical = origin + direction · (spacing ⊙ index)`.
///
/// Each pixel holds `components` samples (1 for scalar images); the buffer
/// always contains `number_of_pixels() * components()` samples.
///
/// # Examples
/// ```rust
/// use warpkit_core::Image;
///
/// let image = Image::<2>::from_vec([3, 2], vec![0u8, 1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(image.pixel(&[2, 1]).unwrap(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image<const D: usize> {
    grid: ImageGrid<D>,
    mapping: GridMapping<D>,
    components: usize,
    buffer: PixelBuffer,
}

impl<const D: usize> Image<D> {
    /// Create an image on `grid` from an existing buffer.
    pub fn new(grid: ImageGrid<D>, components: usize, buffer: PixelBuffer) -> Result<Self> {
        grid.validate()?;
        if components == 0 {
            return Err(Error::pixel_type_mismatch("an image needs at least one component per pixel"));
        }
        let expected = grid.sample_count(components)?;
        if buffer.len() != expected {
            return Err(Error::invalid_grid(format!(
                "buffer holds {} samples, grid {:?} with {} component(s) needs {}",
                buffer.len(),
                grid.size(),
                components,
                expected
            )));
        }
        Ok(Self {
            mapping: grid.mapping()?,
            grid,
            components,
            buffer,
        })
    }

    /// Scalar image with unit geometry from a typed vector.
    pub fn from_vec<T: PixelValue>(size: [usize; D], data: Vec<T>) -> Result<Self> {
        Self::new(ImageGrid::unit(size)?, 1, T::into_buffer(data))
    }

    /// Vector-pixel image with unit geometry; components are interleaved.
    pub fn from_vec_with_components<T: PixelValue>(
        size: [usize; D],
        components: usize,
        data: Vec<T>,
    ) -> Result<Self> {
        Self::new(ImageGrid::unit(size)?, components, T::into_buffer(data))
    }

    /// Zero-filled image on a grid.
    pub fn allocate(grid: ImageGrid<D>, pixel_type: PixelType, components: usize) -> Result<Self> {
        let len = grid.sample_count(components)?;
        Self::new(grid, components, PixelBuffer::zeros(pixel_type, len))
    }

    /// Zero-filled scalar image with unit geometry.
    pub fn zeros(size: [usize; D], pixel_type: PixelType) -> Result<Self> {
        Self::allocate(ImageGrid::unit(size)?, pixel_type, 1)
    }

    /// Replace the geometry, keeping the pixels. The size must not change.
    pub fn with_grid(mut self, grid: ImageGrid<D>) -> Result<Self> {
        if grid.size() != self.grid.size() {
            return Err(Error::invalid_grid(format!(
                "cannot place an image of size {:?} on a grid of size {:?}",
                self.grid.size(),
                grid.size()
            )));
        }
        self.mapping = grid.mapping()?;
        self.grid = grid;
        Ok(self)
    }

    pub fn with_origin(self, origin: Point<D>) -> Result<Self> {
        let grid = self.grid.with_origin(origin)?;
        self.with_grid(grid)
    }

    pub fn with_spacing(self, spacing: Spacing<D>) -> Result<Self> {
        let grid = self.grid.with_spacing(spacing)?;
        self.with_grid(grid)
    }

    pub fn with_direction(self, direction: Direction<D>) -> Result<Self> {
        let grid = self.grid.with_direction(direction)?;
        self.with_grid(grid)
    }

    /// The image's sampling grid.
    pub fn grid(&self) -> &ImageGrid<D> {
        &self.grid
    }

    /// Precomputed index/physical mapping.
    pub fn mapping(&self) -> &GridMapping<D> {
        &self.mapping
    }

    /// Get the image size (pixels per axis, axis 0 first).
    pub fn size(&self) -> [usize; D] {
        self.grid.size()
    }

    /// Get the origin (physical coordinate of first pixel).
    pub fn origin(&self) -> &Point<D> {
        self.grid.origin()
    }

    /// Get the spacing (physical distance between pixels).
    pub fn spacing(&self) -> &Spacing<D> {
        self.grid.spacing()
    }

    /// Get the direction (orientation matrix).
    pub fn direction(&self) -> &Direction<D> {
        self.grid.direction()
    }

    pub fn dimension(&self) -> usize {
        D
    }

    /// Samples per pixel.
    pub fn components(&self) -> usize {
        self.components
    }

    pub fn pixel_type(&self) -> PixelType {
        self.buffer.pixel_type()
    }

    pub fn number_of_pixels(&self) -> usize {
        self.grid.number_of_pixels()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Typed view of the samples, `None` when `T` is not the pixel type.
    pub fn as_slice<T: PixelValue>(&self) -> Option<&[T]> {
        T::slice(&self.buffer)
    }

    /// Mutable typed view of the samples.
    pub fn as_mut_slice<T: PixelValue>(&mut self) -> Option<&mut [T]> {
        T::slice_mut(&mut self.buffer)
    }

    /// Consume the image, returning its buffer.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// Convert a continuous physical point to a continuous index.
    ///
    /// `index = (Direction^-1 * (point - origin)) / spacing`
    pub fn transform_physical_point_to_continuous_index(&self, point: &Point<D>) -> ContinuousIndex<D> {
        self.mapping.physical_to_index(point)
    }

    /// Convert a continuous index to a physical point.
    ///
    /// `point = origin + Direction * (index * spacing)`
    pub fn transform_continuous_index_to_physical_point(&self, index: &ContinuousIndex<D>) -> Point<D> {
        self.mapping.index_to_physical(index)
    }

    /// Physical point of an integer index.
    pub fn transform_index_to_physical_point(&self, index: &[usize; D]) -> Point<D> {
        self.mapping.discrete_index_to_physical(index)
    }

    /// Nearest integer index of a physical point, `None` when outside.
    pub fn transform_physical_point_to_index(&self, point: &Point<D>) -> Option<[usize; D]> {
        let c = self.mapping.physical_to_index(point);
        let mut index = [0usize; D];
        for axis in 0..D {
            let rounded = (c[axis] + 0.5).floor();
            if rounded < 0.0 || rounded >= self.grid.size()[axis] as f64 {
                return None;
            }
            index[axis] = rounded as usize;
        }
        Some(index)
    }

    fn offset(&self, index: &[usize; D]) -> Result<usize> {
        self.grid
            .ravel(index)
            .map(|linear| linear * self.components)
            .ok_or_else(|| Error::IndexOutOfBounds {
                index: index.to_vec(),
                size: self.grid.size().to_vec(),
            })
    }

    fn require_scalar(&self) -> Result<()> {
        if self.components != 1 {
            return Err(Error::pixel_type_mismatch(format!(
                "scalar access on an image with {} components per pixel",
                self.components
            )));
        }
        Ok(())
    }

    /// Value of a scalar pixel.
    pub fn pixel(&self, index: &[usize; D]) -> Result<f64> {
        self.require_scalar()?;
        Ok(self.buffer.get(self.offset(index)?))
    }

    /// All components of a pixel.
    pub fn pixel_vector(&self, index: &[usize; D]) -> Result<Vec<f64>> {
        let offset = self.offset(index)?;
        Ok((0..self.components).map(|c| self.buffer.get(offset + c)).collect())
    }

    /// Set a scalar pixel; the value is cast to the pixel type.
    pub fn set_pixel(&mut self, index: &[usize; D], value: f64) -> Result<()> {
        self.require_scalar()?;
        let offset = self.offset(index)?;
        self.buffer.set(offset, value);
        Ok(())
    }

    /// Set all components of a pixel.
    pub fn set_pixel_vector(&mut self, index: &[usize; D], values: &[f64]) -> Result<()> {
        if values.len() != self.components {
            return Err(Error::pixel_type_mismatch(format!(
                "pixel has {} components, got {} values",
                self.components,
                values.len()
            )));
        }
        let offset = self.offset(index)?;
        for (c, v) in values.iter().enumerate() {
            self.buffer.set(offset + c, *v);
        }
        Ok(())
    }

    /// Copy of the image with another pixel type.
    pub fn cast(&self, pixel_type: PixelType) -> Self {
        Self {
            grid: self.grid,
            mapping: self.mapping,
            components: self.components,
            buffer: self.buffer.cast(pixel_type),
        }
    }

    /// Pixel-for-pixel copy with a new buffer of the same layout.
    pub(crate) fn with_buffer(&self, buffer: PixelBuffer) -> Self {
        Self {
            grid: self.grid,
            mapping: self.mapping,
            components: self.components,
            buffer,
        }
    }
}
