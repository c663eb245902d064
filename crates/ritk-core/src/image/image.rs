//! Image type with physical metadata and coordinate transformations.
//!
//! An [`Image`] combines scalar tensor data with the physical space metadata
//! (origin, spacing, direction) that places its pixels in the world.

use std::fmt;
use burn::tensor::{Tensor, TensorData, Shape};
use burn::tensor::backend::Backend;
use crate::error::{FilterError, Result};
use crate::spatial::{Point, Spacing, Direction};
use super::geometry::ImageGeometry;

/// Scalar image with physical metadata.
///
/// # Type Parameters
/// * `B` - The backend (CPU or GPU) for tensor operations
/// * `D` - The dimensionality of the image (2 or 3)
///
/// # Coordinate Systems
/// * **Index Space**: Discrete pixel/voxel indices, axis order (x first)
/// * **Physical Space**: Continuous coordinates in mm or other units
///
/// The data tensor is in array order: a `[10, 20, 30]` tensor is 30 pixels
/// along x, 20 along y and 10 along z.
///
/// # Examples
/// ```rust
/// use ritk_core::Image;
/// use ritk_core::spatial::{Point3, Spacing3, Direction3};
/// use burn::tensor::Tensor;
/// use burn_ndarray::NdArray;
///
/// type Backend = NdArray<f32>;
///
/// let device = Default::default();
/// let data = Tensor::<Backend, 3>::zeros([10, 10, 10], &device);
/// let origin = Point3::new([0.0, 0.0, 0.0]);
/// let spacing = Spacing3::new([1.0, 1.0, 1.0]);
/// let direction = Direction3::identity();
/// let image = Image::new(data, origin, spacing, direction);
/// assert_eq!(image.shape(), [10, 10, 10]);
/// ```
#[derive(Debug, Clone)]
pub struct Image<B: Backend, const D: usize> {
    /// The pixel data, potentially on GPU.
    data: Tensor<B, D>,
    /// Physical coordinate of the first pixel (index 0,0,0).
    origin: Point<D>,
    /// Physical distance between pixels along each axis.
    spacing: Spacing<D>,
    /// Orientation of the image axes.
    direction: Direction<D>,
}

impl<B: Backend, const D: usize> Image<B, D> {
    /// Create a new image with the given data and metadata.
    pub fn new(
        data: Tensor<B, D>,
        origin: Point<D>,
        spacing: Spacing<D>,
        direction: Direction<D>,
    ) -> Self {
        Self {
            data,
            origin,
            spacing,
            direction,
        }
    }

    /// Wrap a tensor with default metadata: zero origin, unit spacing,
    /// identity direction.
    ///
    /// ```rust
    /// use ritk_core::Image;
    /// use burn::tensor::Tensor;
    /// use burn_ndarray::NdArray;
    ///
    /// let device = Default::default();
    /// let image = Image::from_tensor(Tensor::<NdArray<f32>, 3>::zeros([10, 10, 10], &device));
    /// assert_eq!(image.geometry().num_pixels(), 1000);
    /// ```
    pub fn from_tensor(data: Tensor<B, D>) -> Self {
        Self::new(data, Point::origin(), Spacing::uniform(1.0), Direction::identity())
    }

    /// Build an image from flat array-order samples.
    ///
    /// Fails if the number of samples does not match the shape.
    pub fn from_data(values: Vec<f32>, shape: [usize; D], device: &B::Device) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(FilterError::shape_mismatch(&[expected], &[values.len()]));
        }
        let data = Tensor::<B, D>::from_data(TensorData::new(values, Shape::new(shape)), device);
        Ok(Self::from_tensor(data))
    }

    /// Zero-filled image covering `geometry`'s region.
    pub fn zeros(geometry: &ImageGeometry<D>, device: &B::Device) -> Self {
        Self::new(
            Tensor::<B, D>::zeros(geometry.shape(), device),
            *geometry.origin(),
            *geometry.spacing(),
            *geometry.direction(),
        )
    }

    /// Get the image data tensor.
    pub fn data(&self) -> &Tensor<B, D> {
        &self.data
    }

    /// Get the origin (physical coordinate of first pixel).
    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    /// Get the spacing (physical distance between pixels).
    pub fn spacing(&self) -> &Spacing<D> {
        &self.spacing
    }

    /// Get the direction (orientation matrix).
    pub fn direction(&self) -> &Direction<D> {
        &self.direction
    }

    /// Get the image shape in array order.
    pub fn shape(&self) -> [usize; D] {
        self.data.dims()
    }

    /// The sampling grid of this image.
    pub fn geometry(&self) -> ImageGeometry<D> {
        let mut size = self.shape();
        size.reverse();
        ImageGeometry::new(size, self.origin, self.spacing, self.direction)
    }

    /// Convert a continuous physical point to a continuous index.
    ///
    /// `index = (Direction^-1 * (point - origin)) / spacing`
    ///
    /// Fails when the direction matrix is singular.
    pub fn transform_physical_point_to_continuous_index(&self, point: &Point<D>) -> Result<Point<D>> {
        self.geometry().physical_to_index(point)
    }

    /// Convert a continuous index to a physical point.
    ///
    /// `point = origin + Direction * (index * spacing)`
    pub fn transform_continuous_index_to_physical_point(&self, index: &Point<D>) -> Point<D> {
        self.geometry().index_to_physical(index)
    }

    /// Batch transform physical points `[Batch, D]` to continuous indices.
    pub fn world_to_index_tensor(&self, points: Tensor<B, 2>) -> Result<Tensor<B, 2>> {
        self.geometry().physical_to_index_tensor(points)
    }

    /// Batch transform continuous indices `[Batch, D]` to physical points.
    pub fn index_to_world_tensor(&self, indices: Tensor<B, 2>) -> Tensor<B, 2> {
        self.geometry().index_to_physical_tensor(indices)
    }
}

impl<B: Backend, const D: usize> fmt::Display for Image<B, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let geometry = self.geometry();
        writeln!(f, "Image ({}D, scalar)", D)?;
        write!(f, "{}", geometry)?;
        writeln!(f, "  Pixels: {}", geometry.num_pixels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type Backend = NdArray<f32>;
    type Point3 = Point<3>;
    type Spacing3 = Spacing<3>;
    type Direction3 = Direction<3>;

    #[test]
    fn test_image_creation() {
        let device = Default::default();
        let data = Tensor::<Backend, 3>::zeros([10, 10, 10], &device);
        let origin = Point3::new([0.0, 0.0, 0.0]);
        let spacing = Spacing3::new([1.0, 1.0, 1.0]);
        let direction = Direction3::identity();

        let image = Image::new(data, origin, spacing, direction);

        assert_eq!(image.shape(), [10, 10, 10]);
        assert_eq!(image.origin(), &origin);
        assert_eq!(image.spacing(), &spacing);
        assert_eq!(image.direction(), &direction);
    }

    #[test]
    fn test_from_data_checks_length() {
        let device = Default::default();
        let image = Image::<Backend, 2>::from_data(vec![0.0; 6], [2, 3], &device).unwrap();
        assert_eq!(image.shape(), [2, 3]);
        assert_eq!(image.geometry().size(), [3, 2]);

        let err = Image::<Backend, 2>::from_data(vec![0.0; 5], [2, 3], &device).unwrap_err();
        assert!(matches!(err, FilterError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_zeros_follows_geometry() {
        let device = Default::default();
        let geometry = ImageGeometry::new(
            [4, 3, 2],
            Point3::new([1.0, 2.0, 3.0]),
            Spacing3::new([0.5, 0.5, 2.0]),
            Direction3::identity(),
        );
        let image = Image::<Backend, 3>::zeros(&geometry, &device);
        assert_eq!(image.shape(), [2, 3, 4]);
        assert_eq!(image.geometry(), geometry);
    }

    #[test]
    fn test_physical_to_index_transform() {
        let device = Default::default();
        let data = Tensor::<Backend, 3>::zeros([10, 10, 10], &device);
        let image = Image::new(data, Point3::new([10.0, 20.0, 30.0]), Spacing3::uniform(2.0), Direction3::identity());

        let point = Point3::new([20.0, 30.0, 40.0]);
        let index = image.transform_physical_point_to_continuous_index(&point).unwrap();

        assert!((index[0] - 5.0).abs() < 1e-6);
        assert!((index[1] - 5.0).abs() < 1e-6);
        assert!((index[2] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_roundtrip() {
        let device = Default::default();
        let image = Image::from_tensor(Tensor::<Backend, 3>::zeros([10, 10, 10], &device));

        let original_point = Point3::new([3.5, 4.5, 5.5]);
        let index = image.transform_physical_point_to_continuous_index(&original_point).unwrap();
        let transformed_point = image.transform_continuous_index_to_physical_point(&index);

        for i in 0..3 {
            assert!((original_point[i] - transformed_point[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_display() {
        let device = Default::default();
        let image = Image::from_tensor(Tensor::<Backend, 3>::zeros([10, 10, 10], &device));
        let text = image.to_string();
        assert!(text.starts_with("Image (3D, scalar)"));
        assert!(text.contains("Pixels: 1000"));
    }
}
