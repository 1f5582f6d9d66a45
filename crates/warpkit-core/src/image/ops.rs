//! Pixel-wise arithmetic and comparison operators on images.
//!
//! Image∘image operators require both operands to occupy the same physical
//! space and to share pixel type and component count. Results keep the input
//! pixel type; comparisons produce a `UInt8` label image of 0/1.

use crate::error::{Error, Result};
use super::image::Image;
use super::pixel::{PixelBuffer, PixelType};

/// Tolerance used when checking that two images overlap exactly.
const SPACE_TOLERANCE: f64 = 1e-6;

/// Pixel-wise arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    fn apply(&self, a: f64, b: f64, pixel_type: PixelType) -> f64 {
        match self {
            ArithmeticOp::Add => a + b,
            ArithmeticOp::Subtract => a - b,
            ArithmeticOp::Multiply => a * b,
            // integer images have no infinity
            ArithmeticOp::Divide if b == 0.0 && pixel_type.is_integer() => 0.0,
            ArithmeticOp::Divide => a / b,
        }
    }
}

/// Pixel-wise comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl CompareOp {
    fn apply(&self, a: f64, b: f64) -> bool {
        match self {
            CompareOp::Equal => a == b,
            CompareOp::NotEqual => a != b,
            CompareOp::Less => a < b,
            CompareOp::LessEqual => a <= b,
            CompareOp::Greater => a > b,
            CompareOp::GreaterEqual => a >= b,
        }
    }
}

/// Summary statistics over all samples of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageStatistics {
    pub minimum: f64,
    pub maximum: f64,
    pub mean: f64,
    pub sum: f64,
}

impl<const D: usize> Image<D> {
    fn check_compatible(&self, other: &Self) -> Result<()> {
        if !self.grid().is_same_physical_space(other.grid(), SPACE_TOLERANCE) {
            return Err(Error::physical_space_mismatch(format!(
                "size {:?} at {:?} vs size {:?} at {:?}",
                self.size(),
                self.origin().to_vec(),
                other.size(),
                other.origin().to_vec()
            )));
        }
        if self.pixel_type() != other.pixel_type() || self.components() != other.components() {
            return Err(Error::pixel_type_mismatch(format!(
                "{} x{} vs {} x{}",
                self.pixel_type(),
                self.components(),
                other.pixel_type(),
                other.components()
            )));
        }
        Ok(())
    }

    /// Apply an arithmetic operator pixel by pixel.
    pub fn binary(&self, other: &Self, op: ArithmeticOp) -> Result<Self> {
        self.check_compatible(other)?;
        let pixel_type = self.pixel_type();
        let values: Vec<f64> = self
            .buffer()
            .to_f64_vec()
            .into_iter()
            .zip(other.buffer().to_f64_vec())
            .map(|(a, b)| op.apply(a, b, pixel_type))
            .collect();
        Ok(self.with_buffer(PixelBuffer::from_f64(pixel_type, &values)))
    }

    /// Apply an arithmetic operator against a constant.
    pub fn binary_scalar(&self, value: f64, op: ArithmeticOp) -> Self {
        let pixel_type = self.pixel_type();
        let values: Vec<f64> = self
            .buffer()
            .to_f64_vec()
            .into_iter()
            .map(|a| op.apply(a, value, pixel_type))
            .collect();
        self.with_buffer(PixelBuffer::from_f64(pixel_type, &values))
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.binary(other, ArithmeticOp::Add)
    }

    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.binary(other, ArithmeticOp::Subtract)
    }

    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.binary(other, ArithmeticOp::Multiply)
    }

    pub fn divide(&self, other: &Self) -> Result<Self> {
        self.binary(other, ArithmeticOp::Divide)
    }

    pub fn add_scalar(&self, value: f64) -> Self {
        self.binary_scalar(value, ArithmeticOp::Add)
    }

    pub fn subtract_scalar(&self, value: f64) -> Self {
        self.binary_scalar(value, ArithmeticOp::Subtract)
    }

    pub fn multiply_scalar(&self, value: f64) -> Self {
        self.binary_scalar(value, ArithmeticOp::Multiply)
    }

    pub fn divide_scalar(&self, value: f64) -> Self {
        self.binary_scalar(value, ArithmeticOp::Divide)
    }

    /// Compare two scalar images, producing a 0/1 `UInt8` image.
    pub fn compare(&self, other: &Self, op: CompareOp) -> Result<Self> {
        self.check_compatible(other)?;
        self.check_scalar_for_compare()?;
        let a = self.buffer().to_f64_vec();
        let b = other.buffer().to_f64_vec();
        let labels = a.iter().zip(&b).map(|(x, y)| op.apply(*x, *y) as u8).collect();
        Image::new(*self.grid(), 1, PixelBuffer::UInt8(labels))
    }

    /// Compare a scalar image against a constant.
    pub fn compare_scalar(&self, value: f64, op: CompareOp) -> Result<Self> {
        self.check_scalar_for_compare()?;
        let labels = self
            .buffer()
            .to_f64_vec()
            .into_iter()
            .map(|x| op.apply(x, value) as u8)
            .collect();
        Image::new(*self.grid(), 1, PixelBuffer::UInt8(labels))
    }

    fn check_scalar_for_compare(&self) -> Result<()> {
        if self.components() != 1 {
            return Err(Error::pixel_type_mismatch(
                "comparison operators need scalar pixels",
            ));
        }
        Ok(())
    }

    /// Minimum, maximum, mean and sum over all samples.
    pub fn statistics(&self) -> ImageStatistics {
        let values = self.buffer().to_f64_vec();
        let sum: f64 = values.iter().sum();
        ImageStatistics {
            minimum: values.iter().copied().fold(f64::INFINITY, f64::min),
            maximum: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: sum / values.len() as f64,
            sum,
        }
    }
}

macro_rules! impl_image_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<const D: usize> std::ops::$trait<&Image<D>> for &Image<D> {
            type Output = Result<Image<D>>;

            fn $method(self, rhs: &Image<D>) -> Self::Output {
                self.binary(rhs, $op)
            }
        }

        impl<const D: usize> std::ops::$trait<f64> for &Image<D> {
            type Output = Image<D>;

            fn $method(self, rhs: f64) -> Self::Output {
                self.binary_scalar(rhs, $op)
            }
        }
    };
}

impl_image_operator!(Add, add, ArithmeticOp::Add);
impl_image_operator!(Sub, sub, ArithmeticOp::Subtract);
impl_image_operator!(Mul, mul, ArithmeticOp::Multiply);
impl_image_operator!(Div, div, ArithmeticOp::Divide);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Point;

    fn ramp() -> Image<2> {
        Image::from_vec([2, 2], vec![0u8, 10, 20, 250]).unwrap()
    }

    #[test]
    fn test_add_saturates() {
        let sum = ramp().add(&ramp()).unwrap();
        assert_eq!(sum.as_slice::<u8>().unwrap(), &[0, 20, 40, 255]);
    }

    #[test]
    fn test_operator_sugar() {
        let image = ramp();
        let doubled = (&image * 2.0).as_slice::<u8>().unwrap().to_vec();
        assert_eq!(doubled, vec![0, 20, 40, 255]);

        let diff = (&image - &image).unwrap();
        assert_eq!(diff.statistics().maximum, 0.0);
    }

    #[test]
    fn test_scalar_methods() {
        let image = ramp();
        assert_eq!(image.add_scalar(10.0).as_slice::<u8>().unwrap(), &[10, 20, 30, 255]);
        assert_eq!(image.subtract_scalar(15.0).as_slice::<u8>().unwrap(), &[0, 0, 5, 235]);
        assert_eq!(image.divide_scalar(4.0).as_slice::<u8>().unwrap(), &[0, 3, 5, 63]);
        assert_eq!(image.multiply_scalar(0.5), &image / 2.0);
    }

    #[test]
    fn test_integer_divide_by_zero() {
        let zeros = Image::<2>::from_vec([2, 2], vec![0u8; 4]).unwrap();
        let quotient = ramp().divide(&zeros).unwrap();
        assert_eq!(quotient.as_slice::<u8>().unwrap(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_physical_space_mismatch() {
        let shifted = ramp().with_origin(Point::new([1.0, 0.0])).unwrap();
        let err = ramp().add(&shifted).unwrap_err();
        assert!(matches!(err, Error::PhysicalSpaceMismatch(_)));
    }

    #[test]
    fn test_pixel_type_mismatch() {
        let floats = ramp().cast(PixelType::Float32);
        let err = ramp().add(&floats).unwrap_err();
        assert!(matches!(err, Error::PixelTypeMismatch(_)));
    }

    #[test]
    fn test_compare_scalar() {
        let mask = ramp().compare_scalar(15.0, CompareOp::Greater).unwrap();
        assert_eq!(mask.pixel_type(), PixelType::UInt8);
        assert_eq!(mask.as_slice::<u8>().unwrap(), &[0, 0, 1, 1]);
    }

    #[test]
    fn test_compare_images() {
        let other = Image::<2>::from_vec([2, 2], vec![0u8, 11, 19, 250]).unwrap();
        let eq = ramp().compare(&other, CompareOp::Equal).unwrap();
        assert_eq!(eq.as_slice::<u8>().unwrap(), &[1, 0, 0, 1]);
    }

    #[test]
    fn test_statistics() {
        let stats = ramp().statistics();
        assert_eq!(stats.minimum, 0.0);
        assert_eq!(stats.maximum, 250.0);
        assert_eq!(stats.sum, 280.0);
        assert_eq!(stats.mean, 70.0);
    }
}
