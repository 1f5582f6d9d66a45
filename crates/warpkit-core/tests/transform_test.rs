use warpkit_core::error::Error;
use warpkit_core::spatial::{Point, Vector};
use warpkit_core::transform::{
    from_descriptor, AffineTransform, CompositeTransform, DisplacementFieldTransform,
    IdentityTransform, RigidTransform, ScaleTransform, Transform, TransformDescriptor,
    TranslationTransform,
};
use warpkit_core::image::ImageGrid;
use proptest::prelude::*;
use std::f64::consts::PI;

fn assert_close<const D: usize>(a: &Point<D>, b: &Point<D>, tol: f64) {
    assert!(a.max_abs_diff(b) < tol, "{:?} vs {:?}", a, b);
}

#[test]
fn test_rigid_transform_2d() {
    // Rotate 90 degrees and translate by (1, 1)
    // Point (1, 0) -> Rotation(90) -> (0, 1) -> Translation(1, 1) -> (1, 2)
    let transform = RigidTransform::<2>::new(&[PI / 2.0], Vector::new([1.0, 1.0]), Point::origin()).unwrap();
    let p = transform.transform_point(&Point::new([1.0, 0.0]));
    assert_close(&p, &Point::new([1.0, 2.0]), 1e-12);
}

#[test]
fn test_rigid_transform_3d() {
    // Rotate 90 degrees around Z, then translate by (1, 2, 3)
    // Point (1, 0, 0) -> (0, 1, 0) -> (1, 3, 3)
    let transform = RigidTransform::<3>::new(
        &[0.0, 0.0, PI / 2.0],
        Vector::new([1.0, 2.0, 3.0]),
        Point::origin(),
    )
    .unwrap();
    let p = transform.transform_point(&Point::new([1.0, 0.0, 0.0]));
    assert_close(&p, &Point::new([1.0, 3.0, 3.0]), 1e-12);
}

#[test]
fn test_rigid_equals_translation_after_rotation() {
    let center = Point::new([3.0, -2.0]);
    let t = Vector::new([4.0, 1.5]);
    let rigid = RigidTransform::<2>::new(&[0.6], t, center).unwrap();

    // last added applies first: rotate, then translate
    let composite = CompositeTransform::new()
        .with(TranslationTransform::new(t))
        .with(RigidTransform::<2>::new(&[0.6], Vector::zeros(), center).unwrap());

    for p in [Point::new([0.0, 0.0]), Point::new([10.0, -4.0]), Point::new([-2.5, 7.0])] {
        assert_close(&rigid.transform_point(&p), &composite.transform_point(&p), 1e-9);
    }

    let reversed = CompositeTransform::new()
        .with(RigidTransform::<2>::new(&[0.6], Vector::zeros(), center).unwrap())
        .with(TranslationTransform::new(t));
    let differs = [Point::new([0.0, 0.0]), Point::new([10.0, -4.0])]
        .iter()
        .any(|p| reversed.transform_point(p).max_abs_diff(&composite.transform_point(p)) > 1e-6);
    assert!(differs, "composition order must matter");
}

#[test]
fn test_composite_translations() {
    let mut composite = CompositeTransform::<2>::new();
    composite.add(Box::new(TranslationTransform::new(Vector::new([5.0, 0.0]))));
    composite.add(Box::new(TranslationTransform::new(Vector::new([0.0, 5.0]))));
    assert_eq!(composite.transform_point(&Point::new([0.0, 0.0])), Point::new([5.0, 5.0]));
}

#[test]
fn test_not_invertible() {
    let singular = AffineTransform::<3>::from_slices(
        &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0; 3],
        Point::origin(),
    )
    .unwrap();
    assert!(matches!(singular.inverse(), Err(Error::NotInvertible(_))));

    let field = DisplacementFieldTransform::zeros(ImageGrid::<3>::unit([2, 2, 2]).unwrap()).unwrap();
    let composite = CompositeTransform::new().with(field).with(IdentityTransform::new());
    assert!(matches!(composite.inverse(), Err(Error::NotInvertible(_))));
}

#[test]
fn test_descriptor_json_roundtrip() {
    let composite = CompositeTransform::new()
        .with(RigidTransform::<3>::new(&[0.1, 0.2, 0.3], Vector::new([1.0, 2.0, 3.0]), Point::new([5.0, 5.0, 5.0])).unwrap())
        .with(ScaleTransform::new(Vector::new([2.0, 2.0, 0.5]), Point::origin()));

    let json = serde_json::to_string(&composite.to_descriptor()).unwrap();
    let descriptor: TransformDescriptor = serde_json::from_str(&json).unwrap();
    let rebuilt = from_descriptor::<3>(&descriptor).unwrap();

    let p = Point::new([1.0, -1.0, 4.0]);
    assert_close(&rebuilt.transform_point(&p), &composite.transform_point(&p), 1e-12);
    assert_eq!(rebuilt.parameters(), composite.parameters());
}

#[test]
fn test_boxed_transforms_clone() {
    let boxed: Box<dyn Transform<2>> = Box::new(TranslationTransform::new(Vector::new([1.0, 1.0])));
    let mut copy = boxed.clone();
    copy.set_parameters(&[0.0, 0.0]).unwrap();
    assert_eq!(boxed.parameters(), vec![1.0, 1.0]);
    assert_eq!(copy.parameters(), vec![0.0, 0.0]);
}

fn invertible_transforms(
    angles: [f64; 3],
    offset: [f64; 3],
    factors: [f64; 3],
    shear: f64,
) -> Vec<Box<dyn Transform<3>>> {
    let center = Point::new([offset[2], offset[0], offset[1]]);
    let rigid = RigidTransform::<3>::new(&angles, Vector::new(offset), center).unwrap();
    let scale = ScaleTransform::new(Vector::new(factors), center);
    let affine = AffineTransform::<3>::from_slices(
        &[factors[0], shear, 0.0, 0.0, factors[1], shear, shear, 0.0, factors[2]],
        &offset,
        center,
    )
    .unwrap();
    let composite = CompositeTransform::new()
        .with(rigid)
        .with(scale)
        .with(TranslationTransform::new(Vector::new(offset)));

    vec![
        Box::new(IdentityTransform::new()),
        Box::new(TranslationTransform::new(Vector::new(offset))),
        Box::new(scale),
        Box::new(rigid),
        Box::new(affine),
        Box::new(composite),
    ]
}

proptest! {
    #[test]
    fn test_inverse_roundtrip(
        ax in -PI..PI, ay in -1.5f64..1.5, az in -PI..PI,
        tx in -50.0f64..50.0, ty in -50.0f64..50.0, tz in -50.0f64..50.0,
        sx in 0.2f64..4.0, sy in 0.2f64..4.0, sz in 0.2f64..4.0,
        shear in -0.1f64..0.1,
        px in -100.0f64..100.0, py in -100.0f64..100.0, pz in -100.0f64..100.0
    ) {
        let p = Point::new([px, py, pz]);
        for transform in invertible_transforms([ax, ay, az], [tx, ty, tz], [sx, sy, sz], shear) {
            let inverse = transform.inverse().unwrap();
            let back = inverse.transform_point(&transform.transform_point(&p));
            prop_assert!(back.max_abs_diff(&p) < 1e-6, "{}: {:?} vs {:?}", transform.kind(), back, p);
        }
    }

    #[test]
    fn test_rigid_inverse_angles_rebuild(
        ax in -PI..PI, ay in -PI..PI, az in -PI..PI,
        px in -10.0f64..10.0, py in -10.0f64..10.0, pz in -10.0f64..10.0
    ) {
        let transform = RigidTransform::<3>::new(&[ax, ay, az], Vector::new([1.0, 2.0, 3.0]), Point::origin()).unwrap();
        let inverse = transform.inverse().unwrap();

        // parameters alone must describe the inverse
        let mut rebuilt = RigidTransform::<3>::identity(None).unwrap();
        rebuilt.set_parameters(&inverse.parameters()).unwrap();

        let p = Point::new([px, py, pz]);
        let back = rebuilt.transform_point(&transform.transform_point(&p));
        prop_assert!(back.max_abs_diff(&p) < 1e-6);
    }
}
