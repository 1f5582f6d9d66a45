//! Error types for image, transform and resampling operations.

use thiserror::Error;

/// Main error type for warpkit operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Transform and image (or parameter vector) dimensions disagree.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// An inverse was requested from a transform that has none.
    #[error("Transform is not invertible: {0}")]
    NotInvertible(String),

    /// Output grid description is unusable.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Pixel types or component counts are incompatible for the operation.
    #[error("Pixel type mismatch: {0}")]
    PixelTypeMismatch(String),

    /// Two images do not occupy the same physical space.
    #[error("Images do not occupy the same physical space: {0}")]
    PhysicalSpaceMismatch(String),

    /// Pixel index outside the image.
    #[error("Index {index:?} is outside image of size {size:?}")]
    IndexOutOfBounds { index: Vec<usize>, size: Vec<usize> },

    /// Parameter values are unusable (NaN, wrong shape of a field, ...).
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A cooperative cancellation token fired while resampling.
    #[error("Operation cancelled")]
    Cancelled,
}

/// Result type for warpkit operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Create a not-invertible error.
    pub fn not_invertible(msg: impl Into<String>) -> Self {
        Self::NotInvertible(msg.into())
    }

    /// Create an invalid grid error.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Create a pixel type mismatch error.
    pub fn pixel_type_mismatch(msg: impl Into<String>) -> Self {
        Self::PixelTypeMismatch(msg.into())
    }

    /// Create a physical space mismatch error.
    pub fn physical_space_mismatch(msg: impl Into<String>) -> Self {
        Self::PhysicalSpaceMismatch(msg.into())
    }

    /// Create an invalid parameters error.
    pub fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Check a parameter vector length, the most common dimension check.
    pub(crate) fn check_len(what: &str, expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(Self::dimension_mismatch(format!(
                "{} expects {} values, got {}",
                what, expected, actual
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::not_invertible("displacement field");
        assert!(matches!(err, Error::NotInvertible(_)));
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_grid("size[1] is zero");
        assert_eq!(err.to_string(), "Invalid grid: size[1] is zero");
    }

    #[test]
    fn test_index_out_of_bounds() {
        let err = Error::IndexOutOfBounds {
            index: vec![10, 2],
            size: vec![4, 4],
        };
        let err_str = err.to_string();
        assert!(err_str.contains("[10, 2]"));
        assert!(err_str.contains("[4, 4]"));
    }

    #[test]
    fn test_check_len() {
        assert!(Error::check_len("Translation", 2, 2).is_ok());
        let err = Error::check_len("Translation", 2, 3).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch(_)));
    }
}
