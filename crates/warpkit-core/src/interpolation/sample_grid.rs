//! Source samples prepared for interpolation.

use crate::image::Image;
use crate::spatial::ContinuousIndex;

/// An image's samples widened to `f64`, with strides precomputed.
///
/// Produced once per resampling call by [`Interpolator::prepare`](super::Interpolator::prepare)
/// and then shared read-only by every worker. Samples are stored pixel by
/// pixel with the components of a pixel adjacent, axis 0 varying fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid<const D: usize> {
    size: [usize; D],
    strides: [usize; D],
    components: usize,
    data: Vec<f64>,
}

impl<const D: usize> SampleGrid<D> {
    /// Wrap raw samples. `data.len()` must equal `components · Π size`.
    pub fn new(size: [usize; D], components: usize, data: Vec<f64>) -> Self {
        let mut strides = [0usize; D];
        let mut stride = components;
        for axis in 0..D {
            strides[axis] = stride;
            stride *= size[axis];
        }
        debug_assert_eq!(stride, data.len());
        Self {
            size,
            strides,
            components,
            data,
        }
    }

    pub fn from_image(image: &Image<D>) -> Self {
        Self::new(image.size(), image.components(), image.buffer().to_f64_vec())
    }

    pub fn size(&self) -> [usize; D] {
        self.size
    }

    /// Sample offset between neighbours along each axis.
    pub fn strides(&self) -> [usize; D] {
        self.strides
    }

    pub fn components(&self) -> usize {
        self.components
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// True when `index` lies inside the sampling extent `[-0.5, size - 0.5)`
    /// on every axis.
    #[inline]
    pub fn contains(&self, index: &ContinuousIndex<D>) -> bool {
        (0..D).all(|axis| {
            let c = index[axis];
            c >= -0.5 && c < self.size[axis] as f64 - 0.5
        })
    }

    /// Sample offset of a clamped integer position along one axis.
    #[inline]
    pub(crate) fn clamped_offset(&self, axis: usize, position: isize) -> usize {
        let last = self.size[axis] as isize - 1;
        position.clamp(0, last) as usize * self.strides[axis]
    }

    /// Weighted sum over a separable K^D neighbourhood.
    ///
    /// `offsets[axis][k]` is the sample offset contributed by tap `k` along
    /// `axis`, `weights[axis][k]` its weight. Zero-weight taps are skipped,
    /// so a sample on an exact grid position reads only that sample.
    pub(crate) fn accumulate<const K: usize>(
        &self,
        offsets: &[[usize; K]; D],
        weights: &[[f64; K]; D],
        out: &mut [f64],
    ) {
        out.fill(0.0);
        let taps = K.pow(D as u32);
        'taps: for tap in 0..taps {
            let mut rest = tap;
            let mut offset = 0usize;
            let mut weight = 1.0;
            for axis in 0..D {
                let k = rest % K;
                rest /= K;
                let w = weights[axis][k];
                if w == 0.0 {
                    continue 'taps;
                }
                weight *= w;
                offset += offsets[axis][k];
            }
            let pixel = &self.data[offset..offset + self.components];
            for (o, v) in out.iter_mut().zip(pixel) {
                *o += weight * v;
            }
        }
    }
}
