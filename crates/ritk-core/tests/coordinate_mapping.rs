use ritk_core::image::{Image, ImageGeometry};
use ritk_core::spatial::{Point, Spacing, Direction};
use burn::tensor::Tensor;
use burn_ndarray::NdArray;
use nalgebra::{Rotation3, Vector3};
use proptest::prelude::*;
use std::f64::consts::PI;

type Backend = NdArray<f32>;
const D: usize = 3;

fn make_rotation(angle_x: f64, angle_y: f64, angle_z: f64) -> Direction<D> {
    let rotation = Rotation3::from_euler_angles(angle_x, angle_y, angle_z);
    Direction(rotation.into_inner())
}

#[test]
fn test_rotated_image_transform() {
    let device = Default::default();
    let data = Tensor::<Backend, 3>::zeros([10, 10, 10], &device);
    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), PI / 2.0);
    let image = Image::new(data, Point::origin(), Spacing::uniform(1.0), Direction(rotation.into_inner()));

    // R_z(90) maps axis 1 onto -x, so physical (1, 0, 0) sits at index (0, -1, 0)
    let index = image
        .transform_physical_point_to_continuous_index(&Point::new([1.0, 0.0, 0.0]))
        .unwrap();
    assert!(index[0].abs() < 1e-9);
    assert!((index[1] + 1.0).abs() < 1e-9);
    assert!(index[2].abs() < 1e-9);

    let points = Tensor::<Backend, 2>::from_floats([[1.0, 0.0, 0.0]], &device);
    let indices = image.world_to_index_tensor(points).unwrap().into_data();
    let indices = indices.as_slice::<f32>().unwrap();
    assert!(indices[0].abs() < 1e-5);
    assert!((indices[1] + 1.0).abs() < 1e-5);
    assert!(indices[2].abs() < 1e-5);
}

proptest! {
    #[test]
    fn test_coordinate_roundtrip(
        ox in -100.0f64..100.0, oy in -100.0f64..100.0, oz in -100.0f64..100.0,
        sx in 0.1f64..5.0, sy in 0.1f64..5.0, sz in 0.1f64..5.0,
        ax in -3.14f64..3.14, ay in -3.14f64..3.14, az in -3.14f64..3.14,
        px in -50.0f64..50.0, py in -50.0f64..50.0, pz in -50.0f64..50.0
    ) {
        let geometry = ImageGeometry::new(
            [2, 2, 2],
            Point::<D>::new([ox, oy, oz]),
            Spacing::<D>::new([sx, sy, sz]),
            make_rotation(ax, ay, az),
        );
        let point = Point::<D>::new([px, py, pz]);

        let index = geometry.physical_to_index(&point).unwrap();
        let recovered = geometry.index_to_physical(&index);

        prop_assert!((point[0] - recovered[0]).abs() < 1e-6, "X mismatch: {} vs {}", point[0], recovered[0]);
        prop_assert!((point[1] - recovered[1]).abs() < 1e-6, "Y mismatch: {} vs {}", point[1], recovered[1]);
        prop_assert!((point[2] - recovered[2]).abs() < 1e-6, "Z mismatch: {} vs {}", point[2], recovered[2]);
    }

    #[test]
    fn test_tensor_batch_consistency(
        ox in -10.0f64..10.0,
        sx in 0.5f64..2.0,
        az in -3.14f64..3.14,
        ix in 0.0f64..9.0, iy in 0.0f64..9.0, iz in 0.0f64..9.0
    ) {
        let device = Default::default();
        let geometry = ImageGeometry::new(
            [10, 10, 10],
            Point::<D>::new([ox, -ox, 2.0 * ox]),
            Spacing::<D>::new([sx, 1.0, 2.0 * sx]),
            make_rotation(0.0, 0.0, az),
        );

        let expected = geometry.index_to_physical(&Point::<D>::new([ix, iy, iz]));

        let indices = Tensor::<Backend, 2>::from_floats([[ix as f32, iy as f32, iz as f32]], &device);
        let points = geometry.index_to_physical_tensor(indices).into_data();
        let points = points.as_slice::<f32>().unwrap();

        for axis in 0..D {
            prop_assert!((points[axis] as f64 - expected[axis]).abs() < 1e-3);
        }
    }
}
