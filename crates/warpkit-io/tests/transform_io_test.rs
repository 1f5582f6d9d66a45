use warpkit_core::filter::ResampleSettings;
use warpkit_core::interpolation::InterpolatorKind;
use warpkit_core::spatial::{Point, Vector};
use warpkit_core::transform::{
    AffineTransform, CompositeTransform, RigidTransform, Transform, TransformKind,
    TranslationTransform,
};
use warpkit_io::{read_descriptor, read_settings, read_transform, write_transform, IoError};
use std::fs;

#[test]
fn test_translation_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shift.json");

    let shift = TranslationTransform::<2>::new(Vector::new([3.0, 4.0]));
    write_transform::<2, _>(&path, &shift).unwrap();

    let read = read_transform::<2, _>(&path).unwrap();
    assert_eq!(read.kind(), TransformKind::Translation);
    assert_eq!(read.parameters(), vec![3.0, 4.0]);
}

#[test]
fn test_composite_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stack.json");

    let composite = CompositeTransform::new()
        .with(RigidTransform::<3>::new(&[0.1, -0.2, 0.3], Vector::new([1.0, 0.0, -1.0]), Point::new([2.0, 2.0, 2.0])).unwrap())
        .with(AffineTransform::<3>::from_slices(
            &[1.0, 0.2, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 1.1],
            &[0.5, 0.5, 0.5],
            Point::origin(),
        ).unwrap());
    write_transform::<3, _>(&path, &composite).unwrap();

    let read = read_transform::<3, _>(&path).unwrap();
    let p = Point::new([4.0, -3.0, 8.0]);
    assert!(read.transform_point(&p).max_abs_diff(&composite.transform_point(&p)) < 1e-12);

    let descriptor = read_descriptor(&path).unwrap();
    assert_eq!(descriptor.children.len(), 2);
    assert_eq!(descriptor.children[0].kind, TransformKind::Rigid);
}

#[test]
fn test_dimension_mismatch_on_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shift.json");
    write_transform::<3, _>(&path, &TranslationTransform::<3>::new(Vector::zeros())).unwrap();

    let err = read_transform::<2, _>(&path).unwrap_err();
    assert!(matches!(err, IoError::Core(warpkit_core::Error::DimensionMismatch(_))));
}

#[test]
fn test_unsupported_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.json");
    fs::write(
        &path,
        r#"{"version": 7, "transform": {"kind": "Identity", "dimension": 2}}"#,
    )
    .unwrap();

    let err = read_descriptor(&path).unwrap_err();
    assert!(matches!(err, IoError::UnsupportedVersion { found: 7, expected: 1 }));
}

#[test]
fn test_oversized_field_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge_field.json");
    fs::write(
        &path,
        r#"{"version": 1, "transform": {"kind": "DisplacementField", "dimension": 2,
            "fixed_parameters": [1e10, 1e10, 0, 0, 1, 1, 1, 0, 0, 1]}}"#,
    )
    .unwrap();

    let err = read_transform::<2, _>(&path).unwrap_err();
    assert!(matches!(err, IoError::Core(warpkit_core::Error::InvalidGrid(_))));
}

#[test]
fn test_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(read_descriptor(&path), Err(IoError::Json(_))));
}

#[test]
fn test_missing_file_does_not_leak_path() {
    let path = std::path::PathBuf::from("/non/existent/path/transform.json");
    let err = read_transform::<2, _>(&path).unwrap_err();
    let message = err.to_string();
    assert!(!message.contains("/non/existent"), "Error message leaks path: {}", message);
}

#[test]
fn test_read_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"interpolator": "BSpline", "output_pixel_type": "UInt8"}"#).unwrap();

    let settings = read_settings(&path).unwrap();
    assert_eq!(settings.interpolator, InterpolatorKind::BSpline);
    assert_eq!(settings.default_pixel_value, ResampleSettings::default().default_pixel_value);
    assert!(settings.output_pixel_type.is_some());
}
