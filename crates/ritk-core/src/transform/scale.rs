//! Scale transform implementation.
//!
//! This module provides a scale transform (scaling around a center).

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use burn::module::{Module, Param};
use super::trait_::Transform;

/// Scale Transform.
///
/// Represents a scaling transformation with a fixed center:
/// T(x) = S * (x - c) + c
///
/// where:
/// * S is a D-dimensional scale vector (diagonal matrix)
/// * c is a D-dimensional fixed center of scaling
#[derive(Module, Debug)]
pub struct ScaleTransform<B: Backend, const D: usize> {
    scale: Param<Tensor<B, 1>>, // [D] scale factors
    center: Tensor<B, 1>,       // [D] fixed center
}

impl<B: Backend, const D: usize> ScaleTransform<B, D> {
    /// Create a new scale transform.
    ///
    /// # Arguments
    /// * `scale` - Tensor of shape `[D]` containing the scale factors
    /// * `center` - Tensor of shape `[D]` containing the fixed center
    pub fn new(scale: Tensor<B, 1>, center: Tensor<B, 1>) -> Self {
        Self {
            scale: Param::from_tensor(scale),
            center,
        }
    }

    /// Create an identity scale transform (scale = 1.0).
    ///
    /// # Arguments
    /// * `center` - Optional center of scaling. If None, uses origin (0,0...0).
    /// * `device` - Device to create tensors on.
    pub fn identity(center: Option<Tensor<B, 1>>, device: &B::Device) -> Self {
        let scale = Tensor::<B, 1>::ones([D], device);
        let center = center.unwrap_or_else(|| Tensor::<B, 1>::zeros([D], device));
        Self::new(scale, center)
    }

    /// Get the scale factors.
    pub fn scale(&self) -> Tensor<B, 1> {
        self.scale.val()
    }

    /// Get the center of scaling.
    pub fn center(&self) -> Tensor<B, 1> {
        self.center.clone()
    }
}

impl<B: Backend, const D: usize> Transform<B, D> for ScaleTransform<B, D> {
    fn transform_points(&self, points: Tensor<B, 2>) -> Tensor<B, 2> {
        let c = self.center.clone().reshape([1, D]);
        let s = self.scale.val().reshape([1, D]);

        (points - c.clone()) * s + c
    }

    /// Scaling by the reciprocal factors about the same center.
    /// Zero factors produce non-finite coordinates.
    fn inverse(&self) -> Option<Box<dyn Transform<B, D>>> {
        Some(Box::new(Self::new(self.scale.val().recip(), self.center.clone())))
    }

    fn name(&self) -> &'static str {
        "ScaleTransform"
    }
}
