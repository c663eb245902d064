//! Identity transform implementation.

use std::fmt;
use std::marker::PhantomData;
use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use super::trait_::Transform;

/// Identity Transform.
///
/// Maps every point to itself: T(x) = x. It has no parameters and is its
/// own inverse.
pub struct IdentityTransform<B: Backend, const D: usize> {
    _phantom: PhantomData<B>,
}

impl<B: Backend, const D: usize> IdentityTransform<B, D> {
    /// Create a new identity transform.
    pub fn new() -> Self {
        Self { _phantom: PhantomData }
    }
}

impl<B: Backend, const D: usize> Default for IdentityTransform<B, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend, const D: usize> Clone for IdentityTransform<B, D> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<B: Backend, const D: usize> fmt::Debug for IdentityTransform<B, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityTransform<{}>", D)
    }
}

impl<B: Backend, const D: usize> Transform<B, D> for IdentityTransform<B, D> {
    fn transform_points(&self, points: Tensor<B, 2>) -> Tensor<B, 2> {
        points
    }

    fn inverse(&self) -> Option<Box<dyn Transform<B, D>>> {
        Some(Box::new(Self::new()))
    }

    fn name(&self) -> &'static str {
        "IdentityTransform"
    }
}
