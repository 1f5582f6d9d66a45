//! Pixel types and typed pixel buffers.
//!
//! Images store their samples in a [`PixelBuffer`], one `Vec` variant per
//! supported [`PixelType`]. All arithmetic happens in `f64` and is cast back
//! with [`PixelType::cast`] (round-to-nearest and saturate for integers).

use serde::{Deserialize, Serialize};

/// Element type of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelType {
    UInt8,
    Int16,
    UInt16,
    Int32,
    Float32,
    Float64,
}

impl PixelType {
    /// True for the integer pixel types.
    pub fn is_integer(&self) -> bool {
        !matches!(self, PixelType::Float32 | PixelType::Float64)
    }

    /// Representable value range as `f64`.
    pub fn range(&self) -> (f64, f64) {
        match self {
            PixelType::UInt8 => (u8::MIN as f64, u8::MAX as f64),
            PixelType::Int16 => (i16::MIN as f64, i16::MAX as f64),
            PixelType::UInt16 => (u16::MIN as f64, u16::MAX as f64),
            PixelType::Int32 => (i32::MIN as f64, i32::MAX as f64),
            PixelType::Float32 => (f32::MIN as f64, f32::MAX as f64),
            PixelType::Float64 => (f64::MIN, f64::MAX),
        }
    }

    /// Cast a value the way a buffer of this type would store it.
    ///
    /// Integer targets round to nearest and saturate; NaN becomes 0.
    pub fn cast(&self, value: f64) -> f64 {
        match self {
            PixelType::Float64 => value,
            PixelType::Float32 => value as f32 as f64,
            _ => {
                if value.is_nan() {
                    return 0.0;
                }
                let (lo, hi) = self.range();
                value.round().clamp(lo, hi)
            }
        }
    }

    /// Short lowercase name, e.g. `"uint8"`.
    pub fn name(&self) -> &'static str {
        match self {
            PixelType::UInt8 => "uint8",
            PixelType::Int16 => "int16",
            PixelType::UInt16 => "uint16",
            PixelType::Int32 => "int32",
            PixelType::Float32 => "float32",
            PixelType::Float64 => "float64",
        }
    }
}

impl std::fmt::Display for PixelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rust scalar types that can back a [`PixelBuffer`].
pub trait PixelValue: Copy + Send + Sync + PartialEq + std::fmt::Debug + 'static {
    /// Matching pixel type tag.
    const PIXEL_TYPE: PixelType;

    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Narrow from `f64` with [`PixelType::cast`] semantics.
    fn from_f64(value: f64) -> Self;

    /// Wrap a vector of samples in the matching buffer variant.
    fn into_buffer(data: Vec<Self>) -> PixelBuffer;

    /// Borrow the samples if the buffer holds this type.
    fn slice(buffer: &PixelBuffer) -> Option<&[Self]>;

    /// Mutably borrow the samples if the buffer holds this type.
    fn slice_mut(buffer: &mut PixelBuffer) -> Option<&mut [Self]>;
}

macro_rules! impl_pixel_value {
    ($t:ty, $variant:ident) => {
        impl PixelValue for $t {
            const PIXEL_TYPE: PixelType = PixelType::$variant;

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                PixelType::$variant.cast(value) as $t
            }

            fn into_buffer(data: Vec<Self>) -> PixelBuffer {
                PixelBuffer::$variant(data)
            }

            fn slice(buffer: &PixelBuffer) -> Option<&[Self]> {
                match buffer {
                    PixelBuffer::$variant(v) => Some(v.as_slice()),
                    _ => None,
                }
            }

            fn slice_mut(buffer: &mut PixelBuffer) -> Option<&mut [Self]> {
                match buffer {
                    PixelBuffer::$variant(v) => Some(v.as_mut_slice()),
                    _ => None,
                }
            }
        }
    };
}

impl_pixel_value!(u8, UInt8);
impl_pixel_value!(i16, Int16);
impl_pixel_value!(u16, UInt16);
impl_pixel_value!(i32, Int32);
impl_pixel_value!(f32, Float32);
impl_pixel_value!(f64, Float64);

/// Typed, contiguous pixel storage.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

/// Run `$body` with `$v` bound to the inner `Vec` of any buffer variant.
macro_rules! with_buffer {
    ($buffer:expr, $v:ident => $body:expr) => {
        match $buffer {
            PixelBuffer::UInt8($v) => $body,
            PixelBuffer::Int16($v) => $body,
            PixelBuffer::UInt16($v) => $body,
            PixelBuffer::Int32($v) => $body,
            PixelBuffer::Float32($v) => $body,
            PixelBuffer::Float64($v) => $body,
        }
    };
}
pub(crate) use with_buffer;

impl PixelBuffer {
    /// Zero-filled buffer of `len` samples.
    pub fn zeros(pixel_type: PixelType, len: usize) -> Self {
        match pixel_type {
            PixelType::UInt8 => PixelBuffer::UInt8(vec![0; len]),
            PixelType::Int16 => PixelBuffer::Int16(vec![0; len]),
            PixelType::UInt16 => PixelBuffer::UInt16(vec![0; len]),
            PixelType::Int32 => PixelBuffer::Int32(vec![0; len]),
            PixelType::Float32 => PixelBuffer::Float32(vec![0.0; len]),
            PixelType::Float64 => PixelBuffer::Float64(vec![0.0; len]),
        }
    }

    /// Build a buffer of the given type from `f64` samples, casting each.
    pub fn from_f64(pixel_type: PixelType, values: &[f64]) -> Self {
        fn conv<T: PixelValue>(values: &[f64]) -> PixelBuffer {
            T::into_buffer(values.iter().map(|v| T::from_f64(*v)).collect())
        }
        match pixel_type {
            PixelType::UInt8 => conv::<u8>(values),
            PixelType::Int16 => conv::<i16>(values),
            PixelType::UInt16 => conv::<u16>(values),
            PixelType::Int32 => conv::<i32>(values),
            PixelType::Float32 => conv::<f32>(values),
            PixelType::Float64 => conv::<f64>(values),
        }
    }

    /// Type tag of the stored samples.
    pub fn pixel_type(&self) -> PixelType {
        match self {
            PixelBuffer::UInt8(_) => PixelType::UInt8,
            PixelBuffer::Int16(_) => PixelType::Int16,
            PixelBuffer::UInt16(_) => PixelType::UInt16,
            PixelBuffer::Int32(_) => PixelType::Int32,
            PixelBuffer::Float32(_) => PixelType::Float32,
            PixelBuffer::Float64(_) => PixelType::Float64,
        }
    }

    /// Number of samples (pixels × components).
    pub fn len(&self) -> usize {
        with_buffer!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample at a flat offset, widened to `f64`.
    ///
    /// Panics if `offset` is out of range, like slice indexing.
    pub fn get(&self, offset: usize) -> f64 {
        with_buffer!(self, v => v[offset].to_f64())
    }

    /// Store a sample at a flat offset, casting to the buffer's type.
    pub fn set(&mut self, offset: usize, value: f64) {
        with_buffer!(self, v => v[offset] = PixelValue::from_f64(value))
    }

    /// Copy all samples into a `Vec<f64>`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        with_buffer!(self, v => v.iter().map(|x| x.to_f64()).collect())
    }

    /// Convert to another pixel type.
    pub fn cast(&self, pixel_type: PixelType) -> Self {
        if pixel_type == self.pixel_type() {
            return self.clone();
        }
        Self::from_f64(pixel_type, &self.to_f64_vec())
    }
}
