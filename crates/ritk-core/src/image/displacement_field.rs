//! Dense displacement field image.
//!
//! A displacement field is an image whose pixels are D-component vectors.
//! Vectors are stored as a `[N, D]` tensor: one row per pixel in array
//! order (axis 0 fastest), one column per physical axis.

use std::fmt;
use burn::tensor::{Tensor, Shape};
use burn::tensor::backend::Backend;
use serde::{Serialize, Deserialize};
use crate::error::{FilterError, Result};
use crate::spatial::{Point, Vector};
use super::geometry::ImageGeometry;
use super::image::Image;

/// Per-pixel displacement vectors over an image grid.
#[derive(Debug, Clone)]
pub struct DisplacementField<B: Backend, const D: usize> {
    vectors: Tensor<B, 2>,
    geometry: ImageGeometry<D>,
}

impl<B: Backend, const D: usize> DisplacementField<B, D> {
    /// Wrap a `[N, D]` vector buffer covering `geometry`.
    pub fn new(vectors: Tensor<B, 2>, geometry: ImageGeometry<D>) -> Result<Self> {
        let expected = [geometry.num_pixels(), D];
        let actual = vectors.dims();
        if actual != expected {
            return Err(FilterError::shape_mismatch(&expected, &actual));
        }
        Ok(Self { vectors, geometry })
    }

    /// Field with a zero vector at every pixel.
    pub fn zeros(geometry: ImageGeometry<D>, device: &B::Device) -> Self {
        let vectors = Tensor::<B, 2>::zeros([geometry.num_pixels(), D], device);
        Self { vectors, geometry }
    }

    /// The `[N, D]` vector buffer.
    pub fn vectors(&self) -> &Tensor<B, 2> {
        &self.vectors
    }

    pub fn geometry(&self) -> &ImageGeometry<D> {
        &self.geometry
    }

    /// Region size in axis order.
    pub fn size(&self) -> [usize; D] {
        self.geometry.size()
    }

    /// Spatial shape in array order.
    pub fn shape(&self) -> [usize; D] {
        self.geometry.shape()
    }

    /// Read every vector back as a flat row-major `f64` buffer.
    pub fn host_vectors(&self) -> Result<Vec<f64>> {
        self.vectors
            .clone()
            .into_data()
            .convert::<f64>()
            .to_vec::<f64>()
            .map_err(|err| FilterError::tensor_data(format!("{:?}", err)))
    }

    /// Vector at a region-relative index in axis order.
    pub fn vector_at(&self, index: [usize; D]) -> Result<Vector<D>> {
        let size = self.size();
        let mut linear = 0;
        let mut stride = 1;
        for axis in 0..D {
            if index[axis] >= size[axis] {
                return Err(FilterError::index_out_of_bounds(format!(
                    "{:?} outside region of size {:?}",
                    index, size
                )));
            }
            linear += index[axis] * stride;
            stride *= size[axis];
        }

        let row = self
            .vectors
            .clone()
            .slice([linear..linear + 1, 0..D])
            .into_data()
            .convert::<f64>()
            .to_vec::<f64>()
            .map_err(|err| FilterError::tensor_data(format!("{:?}", err)))?;
        Ok(Vector::from_slice(&row))
    }

    /// One displacement component as a scalar image.
    ///
    /// The image origin is placed on the region's first pixel.
    pub fn component(&self, axis: usize) -> Result<Image<B, D>> {
        if axis >= D {
            return Err(FilterError::dimension_mismatch(format!(
                "component {} requested from a {}-component field",
                axis, D
            )));
        }
        let data = self
            .vectors
            .clone()
            .narrow(1, axis, 1)
            .reshape(Shape::new(self.shape()));

        let start = self.geometry.start_index().map(|i| i as f64);
        let origin = self.geometry.index_to_physical(&Point::new(start));
        Ok(Image::new(data, origin, *self.geometry.spacing(), *self.geometry.direction()))
    }

    /// Largest Euclidean length over all displacement vectors.
    pub fn max_magnitude(&self) -> Result<f64> {
        let values = self.host_vectors()?;
        Ok(values
            .chunks(D)
            .map(|v| v.iter().map(|c| c * c).sum::<f64>().sqrt())
            .fold(0.0, f64::max))
    }

    /// True when every component is within `tolerance` of zero.
    pub fn is_zero(&self, tolerance: f64) -> Result<bool> {
        Ok(self.host_vectors()?.iter().all(|c| c.abs() <= tolerance))
    }

    /// Serialisable description of the field.
    pub fn summary(&self) -> Result<FieldSummary> {
        let max_magnitude = self.max_magnitude()?;
        Ok(FieldSummary {
            dimension: D,
            components: D,
            size: self.size().to_vec(),
            start_index: self.geometry.start_index().to_vec(),
            spacing: self.geometry.spacing().to_array().to_vec(),
            origin: self.geometry.origin().to_array().to_vec(),
            direction: self.geometry.direction().rows().iter().map(|r| r.to_vec()).collect(),
            pixels: self.geometry.num_pixels(),
            max_magnitude,
            all_zero: max_magnitude == 0.0,
        })
    }
}

impl<B: Backend, const D: usize> fmt::Display for DisplacementField<B, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DisplacementField ({}D, {} components per pixel)", D, D)?;
        write!(f, "{}", self.geometry)?;
        writeln!(f, "  Pixels: {}", self.geometry.num_pixels())?;
        match self.max_magnitude() {
            Ok(max) => writeln!(f, "  Max Displacement: {}", max),
            Err(err) => writeln!(f, "  Max Displacement: unavailable ({})", err),
        }
    }
}

/// Summary of a displacement field, for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub dimension: usize,
    pub components: usize,
    pub size: Vec<usize>,
    pub start_index: Vec<i64>,
    pub spacing: Vec<f64>,
    pub origin: Vec<f64>,
    pub direction: Vec<Vec<f64>>,
    pub pixels: usize,
    pub max_magnitude: f64,
    pub all_zero: bool,
}
