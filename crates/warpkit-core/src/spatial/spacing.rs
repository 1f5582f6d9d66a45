//! Spacing type for representing physical distances between pixels/voxels.

use super::Vector;
use crate::error::{Error, Result};

/// Spacing between adjacent pixels/voxels along each axis.
///
/// This is a type alias to Vector for semantic clarity.
pub type Spacing<const D: usize> = Vector<D>;

impl<const D: usize> Spacing<D> {
    /// Create uniform spacing (same value for all dimensions).
    pub fn uniform(value: f64) -> Self {
        Self::new([value; D])
    }

    /// Fail unless every component is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        for i in 0..D {
            if !(self[i].is_finite() && self[i] > 0.0) {
                return Err(Error::invalid_grid(format!(
                    "spacing[{}] must be positive and finite, got {}",
                    i, self[i]
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Spacing3 = Spacing<3>;

    #[test]
    fn test_spacing_uniform() {
        let s = Spacing3::uniform(1.0);
        assert_eq!(s, Spacing3::new([1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_spacing_validate() {
        assert!(Spacing3::new([1.0, 2.0, 3.0]).validate().is_ok());
        assert!(matches!(
            Spacing3::new([1.0, 0.0, 3.0]).validate(),
            Err(Error::InvalidGrid(_))
        ));
        assert!(Spacing3::new([1.0, f64::NAN, 3.0]).validate().is_err());
    }
}
