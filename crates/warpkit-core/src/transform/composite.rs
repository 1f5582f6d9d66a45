//! Composite transform implementation.
//!
//! A composite holds an ordered stack of transforms and applies them
//! last-added first: for a stack `[T0, T1, ..., Tn]`,
//! `T(x) = T0(T1(...Tn(x)))`.

use crate::error::{Error, Result};
use crate::spatial::Point;
use super::descriptor::TransformDescriptor;
use super::trait_::{Transform, TransformKind};

/// Ordered stack of transforms applied in reverse insertion order.
///
/// An empty composite behaves as the identity. Parameters are the
/// concatenation of the children's parameters in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CompositeTransform<const D: usize> {
    transforms: Vec<Box<dyn Transform<D>>>,
}

impl<const D: usize> CompositeTransform<D> {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Create a composite from transforms in insertion order.
    pub fn from_transforms(transforms: Vec<Box<dyn Transform<D>>>) -> Self {
        Self { transforms }
    }

    /// Push a transform onto the stack. It will be applied before every
    /// transform added earlier.
    pub fn add(&mut self, transform: Box<dyn Transform<D>>) {
        self.transforms.push(transform);
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with<T: Transform<D> + 'static>(mut self, transform: T) -> Self {
        self.add(Box::new(transform));
        self
    }

    /// Transforms in insertion order.
    pub fn transforms(&self) -> &[Box<dyn Transform<D>>] {
        &self.transforms
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl<const D: usize> Transform<D> for CompositeTransform<D> {
    fn kind(&self) -> TransformKind {
        TransformKind::Composite
    }

    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        self.transforms
            .iter()
            .rev()
            .fold(*point, |p, transform| transform.transform_point(&p))
    }

    fn inverse(&self) -> Result<Box<dyn Transform<D>>> {
        // (A ∘ B)⁻¹ = B⁻¹ ∘ A⁻¹: stack the inverses in reverse order
        let inverses = self
            .transforms
            .iter()
            .rev()
            .map(|transform| transform.inverse())
            .collect::<Result<Vec<_>>>()?;
        Ok(Box::new(Self::from_transforms(inverses)))
    }

    fn parameters(&self) -> Vec<f64> {
        self.transforms.iter().flat_map(|t| t.parameters()).collect()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        Error::check_len("composite parameters", self.number_of_parameters(), parameters.len())?;
        // all children update or none do
        let mut updated = self.transforms.clone();
        let mut rest = parameters;
        for transform in &mut updated {
            let (head, tail) = rest.split_at(transform.number_of_parameters());
            transform.set_parameters(head)?;
            rest = tail;
        }
        self.transforms = updated;
        Ok(())
    }

    fn fixed_parameters(&self) -> Vec<f64> {
        self.transforms.iter().flat_map(|t| t.fixed_parameters()).collect()
    }

    fn is_linear(&self) -> bool {
        self.transforms.iter().all(|t| t.is_linear())
    }

    fn clone_box(&self) -> Box<dyn Transform<D>> {
        Box::new(self.clone())
    }

    fn to_descriptor(&self) -> TransformDescriptor {
        TransformDescriptor::composite(D, self.transforms.iter().map(|t| t.to_descriptor()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Vector;
    use crate::image::ImageGrid;
    use crate::transform::{DisplacementFieldTransform, RigidTransform, ScaleTransform, TranslationTransform};

    fn translation(x: f64, y: f64) -> TranslationTransform<2> {
        TranslationTransform::new(Vector::new([x, y]))
    }

    #[test]
    fn test_empty_composite_is_identity() {
        let composite = CompositeTransform::<2>::new();
        let p = Point::new([3.0, -1.0]);
        assert_eq!(composite.transform_point(&p), p);
        assert!(composite.is_linear());
    }

    #[test]
    fn test_translations_accumulate() {
        let composite = CompositeTransform::new().with(translation(5.0, 0.0)).with(translation(0.0, 5.0));
        let p = composite.transform_point(&Point::new([0.0, 0.0]));
        assert_eq!(p, Point::new([5.0, 5.0]));
    }

    #[test]
    fn test_last_added_applied_first() {
        let scale = ScaleTransform::new(Vector::new([2.0, 2.0]), Point::origin());
        // scale(translate(p)) = 2 * (p + 1)
        let composite = CompositeTransform::new().with(scale).with(translation(1.0, 1.0));
        let p = composite.transform_point(&Point::new([1.0, 0.0]));
        assert_eq!(p, Point::new([4.0, 2.0]));
    }

    #[test]
    fn test_composite_inverse() {
        let rigid = RigidTransform::<2>::new(&[0.4], Vector::new([1.0, -3.0]), Point::new([2.0, 2.0])).unwrap();
        let scale = ScaleTransform::new(Vector::new([2.0, 0.5]), Point::origin());
        let composite = CompositeTransform::new().with(rigid).with(scale);
        let inverse = composite.inverse().unwrap();

        let p = Point::new([-1.5, 8.0]);
        let back = inverse.transform_point(&composite.transform_point(&p));
        assert!(back.max_abs_diff(&p) < 1e-9);
    }

    #[test]
    fn test_inverse_fails_if_any_child_singular() {
        let singular = ScaleTransform::new(Vector::new([0.0, 1.0]), Point::origin());
        let composite = CompositeTransform::new().with(translation(1.0, 0.0)).with(singular);
        assert!(matches!(composite.inverse(), Err(Error::NotInvertible(_))));
    }

    #[test]
    fn test_nested_composite() {
        let inner = CompositeTransform::new().with(translation(1.0, 0.0)).with(translation(0.0, 1.0));
        let outer = CompositeTransform::new().with(inner).with(translation(2.0, 2.0));
        assert_eq!(outer.transform_point(&Point::new([0.5, 0.5])), Point::new([3.5, 3.5]));
        assert_eq!(outer.to_descriptor().children[0].children.len(), 2);
    }

    #[test]
    fn test_parameters_concatenate() {
        let mut composite = CompositeTransform::new()
            .with(translation(1.0, 2.0))
            .with(ScaleTransform::new(Vector::new([3.0, 4.0]), Point::origin()));
        assert_eq!(composite.parameters(), vec![1.0, 2.0, 3.0, 4.0]);

        composite.set_parameters(&[0.0, 0.0, 1.0, 1.0]).unwrap();
        let p = Point::new([7.0, 7.0]);
        assert_eq!(composite.transform_point(&p), p);

        assert!(composite.set_parameters(&[0.0; 3]).is_err());
    }

    #[test]
    fn test_failed_set_parameters_leaves_children_unchanged() {
        let field = DisplacementFieldTransform::zeros(ImageGrid::<2>::unit([2, 1]).unwrap()).unwrap();
        let mut composite = CompositeTransform::new().with(translation(1.0, 1.0)).with(field);
        let before = composite.parameters();
        assert_eq!(before, vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

        let err = composite
            .set_parameters(&[9.0, 9.0, 0.0, f64::NAN, 0.0, 0.0])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
        assert_eq!(composite.parameters(), before);
        assert_eq!(composite.transform_point(&Point::new([0.0, 0.0])), Point::new([1.0, 1.0]));
    }

    #[test]
    fn test_fixed_parameters_concatenate() {
        let rigid = RigidTransform::<2>::new(&[0.1], Vector::zeros(), Point::new([5.0, 6.0])).unwrap();
        let scale = ScaleTransform::new(Vector::new([2.0, 2.0]), Point::new([-1.0, 3.0]));
        let composite = CompositeTransform::new()
            .with(rigid)
            .with(translation(1.0, 0.0))
            .with(scale);
        assert_eq!(composite.fixed_parameters(), vec![5.0, 6.0, -1.0, 3.0]);
    }
}
