//! Translation transform implementation.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use burn::module::{Module, Param};
use super::trait_::Transform;

/// Simple Translation Transform.
///
/// Translates points by a fixed offset vector: T(x) = x + t.
/// Every pixel of its displacement field equals `t`.
#[derive(Module, Debug)]
pub struct TranslationTransform<B: Backend, const D: usize> {
    translation: Param<Tensor<B, 1>>,
}

impl<B: Backend, const D: usize> TranslationTransform<B, D> {
    /// Create a new translation transform.
    ///
    /// # Arguments
    /// * `translation` - Tensor of shape `[D]` containing the translation vector
    pub fn new(translation: Tensor<B, 1>) -> Self {
        Self {
            translation: Param::from_tensor(translation),
        }
    }

    /// Get the translation vector.
    pub fn translation(&self) -> Tensor<B, 1> {
        self.translation.val()
    }
}

impl<B: Backend, const D: usize> Transform<B, D> for TranslationTransform<B, D> {
    fn transform_points(&self, points: Tensor<B, 2>) -> Tensor<B, 2> {
        // Broadcast translation [D] to [Batch, D]
        let t = self.translation.val().reshape([1, D]);
        points + t
    }

    fn inverse(&self) -> Option<Box<dyn Transform<B, D>>> {
        Some(Box::new(Self::new(self.translation.val().neg())))
    }

    fn name(&self) -> &'static str {
        "TranslationTransform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_translation_transform() {
        let device = Default::default();
        let translation = Tensor::<TestBackend, 1>::from_floats([1.0, 2.0, 3.0], &device);
        let transform = TranslationTransform::<TestBackend, 3>::new(translation);

        let points = Tensor::<TestBackend, 2>::from_floats(
            [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            &device,
        );

        let data = transform.transform_points(points).into_data();
        assert_eq!(data.as_slice::<f32>().unwrap(), &[1.0, 2.0, 3.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_translation_inverse() {
        let device = Default::default();
        let translation = Tensor::<TestBackend, 1>::from_floats([1.0, -2.0], &device);
        let transform = TranslationTransform::<TestBackend, 2>::new(translation);
        let inverse = transform.inverse().unwrap();

        let points = Tensor::<TestBackend, 2>::from_floats([[5.0, 5.0]], &device);
        let roundtrip = inverse.transform_points(transform.transform_points(points));
        let data = roundtrip.into_data();
        assert_eq!(data.as_slice::<f32>().unwrap(), &[5.0, 5.0]);
    }
}
