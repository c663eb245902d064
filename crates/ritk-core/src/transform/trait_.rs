//! The `Transform` trait.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;

/// Maps physical points to physical points.
///
/// Implementors may be `burn` modules (translation, scale) or plain structs
/// (identity, affine, displacement field); the trait does not require
/// `Module`.
///
/// # Type Parameters
/// * `B` - The Burn backend
/// * `D` - The spatial dimensionality
pub trait Transform<B: Backend, const D: usize> {
    /// Map a `[N, D]` batch of points, one point per row.
    ///
    /// Must return a tensor of the same shape.
    fn transform_points(&self, points: Tensor<B, 2>) -> Tensor<B, 2>;

    /// The inverse mapping, or `None` if it is unknown or does not exist.
    fn inverse(&self) -> Option<Box<dyn Transform<B, D>>> {
        None
    }

    /// Short type name used in logs and printouts.
    fn name(&self) -> &'static str {
        "Transform"
    }
}

impl<B: Backend, const D: usize, T: Transform<B, D> + ?Sized> Transform<B, D> for Box<T> {
    fn transform_points(&self, points: Tensor<B, 2>) -> Tensor<B, 2> {
        (**self).transform_points(points)
    }

    fn inverse(&self) -> Option<Box<dyn Transform<B, D>>> {
        (**self).inverse()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
