//! Error types for image, transform and filter operations.

use thiserror::Error;

/// Main error type for ritk-core operations.
#[derive(Error, Debug)]
pub enum FilterError {
    /// The filter was told to use a reference image but none was supplied.
    #[error("Missing reference image: {0}")]
    MissingReferenceImage(String),

    /// An output size with a zero extent.
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// Spacing that is zero, negative or not finite.
    #[error("Invalid spacing: {0}")]
    InvalidSpacing(String),

    /// Direction matrix that cannot be inverted.
    #[error("Singular direction: {0}")]
    SingularDirection(String),

    /// Dimension mismatch.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Index outside the buffered region.
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(String),

    /// Tensor data could not be read back to the host.
    #[error("Tensor data error: {0}")]
    TensorData(String),

    /// Shape mismatch.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

/// Result type for ritk-core operations.
pub type Result<T> = std::result::Result<T, FilterError>;

impl FilterError {
    /// Create a missing reference image error.
    pub fn missing_reference_image(msg: impl Into<String>) -> Self {
        Self::MissingReferenceImage(msg.into())
    }

    /// Create an invalid size error.
    pub fn invalid_size(msg: impl Into<String>) -> Self {
        Self::InvalidSize(msg.into())
    }

    /// Create an invalid spacing error.
    pub fn invalid_spacing(msg: impl Into<String>) -> Self {
        Self::InvalidSpacing(msg.into())
    }

    /// Create a singular direction error.
    pub fn singular_direction(msg: impl Into<String>) -> Self {
        Self::SingularDirection(msg.into())
    }

    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Create an index out of bounds error.
    pub fn index_out_of_bounds(msg: impl Into<String>) -> Self {
        Self::IndexOutOfBounds(msg.into())
    }

    /// Create a tensor data error.
    pub fn tensor_data(msg: impl Into<String>) -> Self {
        Self::TensorData(msg.into())
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}
