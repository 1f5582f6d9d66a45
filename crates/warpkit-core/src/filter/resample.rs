//! Resample image filter.
//!
//! This module provides ResampleImageFilter which resamples an image
//! into a new coordinate system using a transform and an interpolator.

use std::time::Instant;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::image::pixel::with_buffer;
use crate::image::{GridMapping, Image, ImageGrid, PixelBuffer, PixelType, PixelValue};
use crate::interpolation::{Interpolator, InterpolatorKind, SampleGrid};
use crate::transform::Transform;
use super::cancellation::CancellationToken;

/// Settings shared by every resampling call.
///
/// Can be loaded from JSON; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleSettings {
    /// Interpolation method.
    pub interpolator: InterpolatorKind,
    /// Value written where the mapped point falls outside the source.
    pub default_pixel_value: f64,
    /// Output pixel type; `None` keeps the source's type.
    pub output_pixel_type: Option<PixelType>,
    /// Split the output across the rayon thread pool.
    pub parallel: bool,
}

impl Default for ResampleSettings {
    fn default() -> Self {
        Self {
            interpolator: InterpolatorKind::Linear,
            default_pixel_value: 0.0,
            output_pixel_type: None,
            parallel: true,
        }
    }
}

impl ResampleSettings {
    pub fn with_interpolator(mut self, interpolator: InterpolatorKind) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn with_default_pixel_value(mut self, value: f64) -> Self {
        self.default_pixel_value = value;
        self
    }

    pub fn with_output_pixel_type(mut self, pixel_type: PixelType) -> Self {
        self.output_pixel_type = Some(pixel_type);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Resample image filter.
///
/// Resamples an image by applying a transform to map points from the
/// output image space to the input image space, and then interpolating values.
///
/// The transform maps from Output Physical Space -> Input Physical Space.
/// This is often the inverse of the registration transform (Fixed -> Moving).
/// To move image content by a transform `T`, resample with `T.inverse()`.
///
/// # Example
///
/// ```
/// use warpkit_core::filter::ResampleImageFilter;
/// use warpkit_core::interpolation::InterpolatorKind;
/// use warpkit_core::transform::TranslationTransform;
/// use warpkit_core::{Image, Vector};
///
/// let source = Image::<2>::from_vec([4, 4], (0..16u8).collect()).unwrap();
/// let shift = TranslationTransform::new(Vector::new([1.0, 0.0]));
/// let output = ResampleImageFilter::new(&shift)
///     .with_interpolator(InterpolatorKind::NearestNeighbor)
///     .with_default_pixel_value(255.0)
///     .apply(&source)
///     .unwrap();
/// assert_eq!(output.pixel(&[0, 0]).unwrap(), 1.0);
/// assert_eq!(output.pixel(&[3, 0]).unwrap(), 255.0);
/// ```
pub struct ResampleImageFilter<'a, const D: usize> {
    transform: &'a dyn Transform<D>,
    output_grid: Option<ImageGrid<D>>,
    reference_components: Option<usize>,
    interpolator: Box<dyn Interpolator<D>>,
    settings: ResampleSettings,
    cancellation: Option<CancellationToken>,
}

impl<'a, const D: usize> ResampleImageFilter<'a, D> {
    /// Create a new resample filter.
    ///
    /// The output grid defaults to the input image's own grid.
    ///
    /// # Arguments
    /// * `transform` - Transform from output space to input space
    pub fn new(transform: &'a dyn Transform<D>) -> Self {
        let settings = ResampleSettings::default();
        Self {
            transform,
            output_grid: None,
            reference_components: None,
            interpolator: settings.interpolator.build(),
            settings,
            cancellation: None,
        }
    }

    /// Create from a reference image.
    ///
    /// Uses the reference image's grid (size, origin, spacing, direction) as
    /// the output grid. The input must have as many components per pixel as
    /// the reference.
    pub fn new_from_reference(reference: &Image<D>, transform: &'a dyn Transform<D>) -> Self {
        Self::new(transform).with_reference(reference)
    }

    /// Use `reference`'s grid as the output grid.
    pub fn with_reference(mut self, reference: &Image<D>) -> Self {
        self.output_grid = Some(*reference.grid());
        self.reference_components = Some(reference.components());
        self
    }

    /// Set the output grid explicitly.
    pub fn with_output_grid(mut self, grid: ImageGrid<D>) -> Self {
        self.output_grid = Some(grid);
        self.reference_components = None;
        self
    }

    /// Select one of the built-in interpolators.
    pub fn with_interpolator(mut self, kind: InterpolatorKind) -> Self {
        self.settings.interpolator = kind;
        self.interpolator = kind.build();
        self
    }

    /// Use a caller-provided interpolator.
    pub fn with_custom_interpolator(mut self, interpolator: Box<dyn Interpolator<D>>) -> Self {
        self.settings.interpolator = interpolator.kind();
        self.interpolator = interpolator;
        self
    }

    /// Set default pixel value for outside the field of view.
    pub fn with_default_pixel_value(mut self, value: f64) -> Self {
        self.settings.default_pixel_value = value;
        self
    }

    /// Set the output pixel type (the input's type by default).
    pub fn with_output_pixel_type(mut self, pixel_type: PixelType) -> Self {
        self.settings.output_pixel_type = Some(pixel_type);
        self
    }

    /// Enable or disable the parallel path.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.settings.parallel = parallel;
        self
    }

    /// Apply a whole settings block.
    pub fn with_settings(mut self, settings: ResampleSettings) -> Self {
        self.interpolator = settings.interpolator.build();
        self.settings = settings;
        self
    }

    /// Stop early with `Error::Cancelled` once `token` is raised.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn settings(&self) -> &ResampleSettings {
        &self.settings
    }

    /// Apply filter to an input image.
    pub fn apply(&self, input: &Image<D>) -> Result<Image<D>> {
        let grid = match self.output_grid {
            Some(grid) => {
                grid.validate()?;
                grid
            }
            None => *input.grid(),
        };
        if let Some(components) = self.reference_components {
            if components != input.components() {
                return Err(Error::pixel_type_mismatch(format!(
                    "reference has {} component(s) per pixel, input has {}",
                    components,
                    input.components()
                )));
            }
        }

        let pixel_type = self.settings.output_pixel_type.unwrap_or(input.pixel_type());
        let components = input.components();
        let started = Instant::now();
        tracing::debug!(
            "Resampling {:?} -> {:?} ({} transform, {} interpolator, {})",
            input.size(),
            grid.size(),
            self.transform.kind(),
            self.interpolator.kind(),
            pixel_type
        );

        let samples = self.interpolator.prepare(input);
        let sampler = LineSampler {
            grid,
            output: grid.mapping()?,
            source: *input.mapping(),
            samples: &samples,
            interpolator: self.interpolator.as_ref(),
            transform: self.transform,
            default_pixel_value: self.settings.default_pixel_value,
            components,
            cancellation: self.cancellation.as_ref(),
        };

        let mut buffer = PixelBuffer::zeros(pixel_type, grid.sample_count(components)?);
        with_buffer!(&mut buffer, v => sampler.fill(v.as_mut_slice(), self.settings.parallel))?;

        tracing::info!(
            "Resampled {} pixels in {:.1} ms",
            grid.number_of_pixels(),
            started.elapsed().as_secs_f64() * 1e3
        );
        Image::new(grid, components, buffer)
    }
}

/// Read-only state shared by every worker filling output lines.
struct LineSampler<'a, const D: usize> {
    grid: ImageGrid<D>,
    output: GridMapping<D>,
    source: GridMapping<D>,
    samples: &'a SampleGrid<D>,
    interpolator: &'a dyn Interpolator<D>,
    transform: &'a dyn Transform<D>,
    default_pixel_value: f64,
    components: usize,
    cancellation: Option<&'a CancellationToken>,
}

impl<const D: usize> LineSampler<'_, D> {
    /// Fill the whole output, one axis-0 line per task.
    fn fill<T: PixelValue>(&self, out: &mut [T], parallel: bool) -> Result<()> {
        let line = self.grid.size()[0] * self.components;
        if parallel {
            out.par_chunks_mut(line)
                .enumerate()
                .try_for_each(|(row, chunk)| self.fill_line(row, chunk))
        } else {
            out.chunks_mut(line)
                .enumerate()
                .try_for_each(|(row, chunk)| self.fill_line(row, chunk))
        }
    }

    fn fill_line<T: PixelValue>(&self, row: usize, chunk: &mut [T]) -> Result<()> {
        if self.cancellation.is_some_and(|token| token.is_cancelled()) {
            return Err(Error::Cancelled);
        }
        let mut index = self.grid.unravel(row * self.grid.size()[0]);
        let mut values = vec![0.0; self.components];
        let outside = T::from_f64(self.default_pixel_value);

        for (x, pixel) in chunk.chunks_exact_mut(self.components).enumerate() {
            index[0] = x;
            let q = self.output.discrete_index_to_physical(&index);
            let p = self.transform.transform_point(&q);
            let c = self.source.physical_to_index(&p);
            if self.samples.contains(&c) {
                self.interpolator.evaluate(self.samples, &c, &mut values);
                for (o, v) in pixel.iter_mut().zip(&values) {
                    *o = T::from_f64(*v);
                }
            } else {
                pixel.fill(outside);
            }
        }
        Ok(())
    }
}

/// Resample `source` onto `output_grid` (its own grid when `None`).
///
/// `transform` maps output physical points to source physical points.
pub fn resample<const D: usize>(
    source: &Image<D>,
    output_grid: Option<&ImageGrid<D>>,
    transform: &dyn Transform<D>,
    interpolator: InterpolatorKind,
    default_value: f64,
    output_pixel_type: Option<PixelType>,
) -> Result<Image<D>> {
    let mut filter = ResampleImageFilter::new(transform)
        .with_interpolator(interpolator)
        .with_default_pixel_value(default_value);
    if let Some(grid) = output_grid {
        filter = filter.with_output_grid(*grid);
    }
    if let Some(pixel_type) = output_pixel_type {
        filter = filter.with_output_pixel_type(pixel_type);
    }
    filter.apply(source)
}
