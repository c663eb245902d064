//! Affine transform with a fixed center.
//!
//! `T(x) = A (x - c) + c + t`. Parameters are kept on the host in `f64`
//! alongside the image geometry types, so the inverse can be computed
//! exactly; tensors are built per call.

use std::marker::PhantomData;
use burn::tensor::{Tensor, TensorData, Shape};
use burn::tensor::backend::Backend;
use nalgebra::SMatrix;
use crate::spatial::{Point, Vector};
use super::trait_::Transform;

/// Affine transform `T(x) = A (x - c) + c + t`.
///
/// * `A` - D×D linear part (rotation, scale, shear)
/// * `t` - translation
/// * `c` - fixed center
#[derive(Debug, Clone)]
pub struct AffineTransform<B: Backend, const D: usize> {
    matrix: SMatrix<f64, D, D>,
    translation: Vector<D>,
    center: Point<D>,
    _phantom: PhantomData<B>,
}

impl<B: Backend, const D: usize> AffineTransform<B, D> {
    pub fn new(matrix: SMatrix<f64, D, D>, translation: Vector<D>, center: Point<D>) -> Self {
        Self {
            matrix,
            translation,
            center,
            _phantom: PhantomData,
        }
    }

    /// Affine transform from a row-major linear part, about the origin.
    pub fn from_rows(rows: [[f64; D]; D], translation: [f64; D]) -> Self {
        let matrix = SMatrix::<f64, D, D>::from_fn(|r, c| rows[r][c]);
        Self::new(matrix, Vector::new(translation), Point::origin())
    }

    /// Identity about `center` (the origin if `None`).
    pub fn identity(center: Option<Point<D>>) -> Self {
        Self::new(SMatrix::identity(), Vector::zeros(), center.unwrap_or_default())
    }

    pub fn matrix(&self) -> &SMatrix<f64, D, D> {
        &self.matrix
    }

    pub fn translation(&self) -> &Vector<D> {
        &self.translation
    }

    pub fn center(&self) -> &Point<D> {
        &self.center
    }

    /// The constant offset `c + t - A c`, so that `T(x) = A x + offset`.
    pub fn offset(&self) -> Vector<D> {
        let c = self.center.inner().coords;
        Vector(c + self.translation.inner() - self.matrix * c)
    }
}

impl<B: Backend, const D: usize> Transform<B, D> for AffineTransform<B, D> {
    fn transform_points(&self, points: Tensor<B, 2>) -> Tensor<B, 2> {
        let device = points.device();

        // Row vectors: y = x @ A^T + offset
        let mut a_t = Vec::with_capacity(D * D);
        for r in 0..D {
            for c in 0..D {
                a_t.push(self.matrix[(c, r)] as f32);
            }
        }
        let a_t = Tensor::<B, 2>::from_data(TensorData::new(a_t, Shape::new([D, D])), &device);

        let offset: Vec<f32> = self.offset().to_array().iter().map(|&v| v as f32).collect();
        let offset = Tensor::<B, 2>::from_data(TensorData::new(offset, Shape::new([1, D])), &device);

        points.matmul(a_t) + offset
    }

    /// `A^-1 (y - c - t) + c`, or `None` when `A` is singular.
    fn inverse(&self) -> Option<Box<dyn Transform<B, D>>> {
        let inverse = self.matrix.try_inverse()?;
        let translation = -(inverse * self.translation.inner());
        Some(Box::new(Self::new(inverse, Vector(translation), self.center)))
    }

    fn name(&self) -> &'static str {
        "AffineTransform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_identity_leaves_points() {
        let device = Default::default();
        let transform = AffineTransform::<TestBackend, 3>::identity(None);

        let points = Tensor::<TestBackend, 2>::from_floats([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], &device);
        let data = transform.transform_points(points).into_data();
        assert_eq!(data.as_slice::<f32>().unwrap(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_center_moves_by_translation() {
        let device = Default::default();
        let transform = AffineTransform::<TestBackend, 2>::new(
            SMatrix::<f64, 2, 2>::new(0.0, -1.0, 1.0, 0.0),
            Vector::new([1.0, 1.0]),
            Point::new([10.0, 10.0]),
        );
        assert_eq!(transform.offset().to_array(), [21.0, 1.0]);

        let points = Tensor::<TestBackend, 2>::from_floats([[10.0, 10.0]], &device);
        let data = transform.transform_points(points).into_data();
        assert_eq!(data.as_slice::<f32>().unwrap(), &[11.0, 11.0]);
    }

    #[test]
    fn test_shear() {
        let device = Default::default();
        // x' = x + 0.5 y
        let transform = AffineTransform::<TestBackend, 2>::from_rows([[1.0, 0.5], [0.0, 1.0]], [0.0, 0.0]);

        let points = Tensor::<TestBackend, 2>::from_floats([[2.0, 4.0]], &device);
        let data = transform.transform_points(points).into_data();
        let slice = data.as_slice::<f32>().unwrap();
        assert!((slice[0] - 4.0).abs() < 1e-6);
        assert!((slice[1] - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let device = Default::default();
        let transform = AffineTransform::<TestBackend, 2>::new(
            SMatrix::<f64, 2, 2>::new(2.0, 1.0, 0.0, 0.5),
            Vector::new([3.0, -1.0]),
            Point::new([1.0, 2.0]),
        );
        let inverse = transform.inverse().unwrap();

        let points = Tensor::<TestBackend, 2>::from_floats([[0.5, 7.0], [-3.0, 2.0]], &device);
        let data = inverse.transform_points(transform.transform_points(points)).into_data();
        let slice = data.as_slice::<f32>().unwrap();
        for (a, e) in slice.iter().zip([0.5, 7.0, -3.0, 2.0]) {
            assert!((a - e).abs() < 1e-5);
        }
    }

    #[test]
    fn test_singular_has_no_inverse() {
        let transform = AffineTransform::<TestBackend, 2>::from_rows([[1.0, 2.0], [2.0, 4.0]], [0.0, 0.0]);
        assert!(transform.inverse().is_none());
    }
}
