use warpkit_core::image::{Image, ImageGrid, PixelType};
use warpkit_core::spatial::{Direction, Point, Spacing};
use proptest::prelude::*;

const D: usize = 3;

fn make_rotation(angle_x: f64, angle_y: f64, angle_z: f64) -> Direction<D> {
    let (sx, cx) = angle_x.sin_cos();
    let (sy, cy) = angle_y.sin_cos();
    let (sz, cz) = angle_z.sin_cos();

    let rz = nalgebra::SMatrix::<f64, 3, 3>::new(
        cz, -sz, 0.0,
        sz, cz, 0.0,
        0.0, 0.0, 1.0,
    );
    let ry = nalgebra::SMatrix::<f64, 3, 3>::new(
        cy, 0.0, sy,
        0.0, 1.0, 0.0,
        -sy, 0.0, cy,
    );
    let rx = nalgebra::SMatrix::<f64, 3, 3>::new(
        1.0, 0.0, 0.0,
        0.0, cx, -sx,
        0.0, sx, cx,
    );

    Direction(rx * ry * rz)
}

proptest! {
    #[test]
    fn test_coordinate_roundtrip(
        ox in -100.0f64..100.0, oy in -100.0f64..100.0, oz in -100.0f64..100.0,
        sx in 0.1f64..5.0, sy in 0.1f64..5.0, sz in 0.1f64..5.0,
        ax in -3.14f64..3.14, ay in -3.14f64..3.14, az in -3.14f64..3.14,
        px in -50.0f64..50.0, py in -50.0f64..50.0, pz in -50.0f64..50.0
    ) {
        let grid = ImageGrid::new(
            [2, 2, 2],
            Point::<D>::new([ox, oy, oz]),
            Spacing::<D>::new([sx, sy, sz]),
            make_rotation(ax, ay, az),
        ).unwrap();
        let image = Image::allocate(grid, PixelType::UInt8, 1).unwrap();
        let point = Point::<D>::new([px, py, pz]);

        let index = image.transform_physical_point_to_continuous_index(&point);
        let recovered = image.transform_continuous_index_to_physical_point(&index);

        prop_assert!((point[0] - recovered[0]).abs() < 1e-9, "X mismatch: {} vs {}", point[0], recovered[0]);
        prop_assert!((point[1] - recovered[1]).abs() < 1e-9, "Y mismatch: {} vs {}", point[1], recovered[1]);
        prop_assert!((point[2] - recovered[2]).abs() < 1e-9, "Z mismatch: {} vs {}", point[2], recovered[2]);
    }

    #[test]
    fn test_discrete_index_matches_continuous(
        ox in -10.0f64..10.0,
        sx in 0.5f64..2.0,
        i in 0usize..4, j in 0usize..4, k in 0usize..4
    ) {
        let grid = ImageGrid::new(
            [4, 4, 4],
            Point::<D>::new([ox, ox, ox]),
            Spacing::<D>::uniform(sx),
            Direction::identity(),
        ).unwrap();
        let image = Image::allocate(grid, PixelType::Float32, 1).unwrap();

        let physical = image.transform_index_to_physical_point(&[i, j, k]);
        prop_assert_eq!(image.transform_physical_point_to_index(&physical), Some([i, j, k]));

        let continuous = image.transform_physical_point_to_continuous_index(&physical);
        prop_assert!((continuous[0] - i as f64).abs() < 1e-9);
        prop_assert!((continuous[1] - j as f64).abs() < 1e-9);
        prop_assert!((continuous[2] - k as f64).abs() < 1e-9);
    }
}

#[test]
fn test_point_outside_has_no_index() {
    let image = Image::<3>::zeros([4, 4, 4], PixelType::UInt8).unwrap();
    assert_eq!(image.transform_physical_point_to_index(&Point::new([-1.0, 0.0, 0.0])), None);
    assert_eq!(image.transform_physical_point_to_index(&Point::new([3.6, 0.0, 0.0])), None);
    assert_eq!(image.transform_physical_point_to_index(&Point::new([3.4, 0.0, 0.0])), Some([3, 0, 0]));
}
