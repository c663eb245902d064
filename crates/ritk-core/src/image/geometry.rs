//! Image geometry: the sampling grid of an image in physical space.
//!
//! Size and start index are in axis order (x first). The tensor holding
//! pixel data uses array order, slowest axis first, so `shape()` is the
//! reversed size.

use std::fmt;
use burn::tensor::{Tensor, TensorData, Shape};
use burn::tensor::backend::Backend;
use crate::error::{FilterError, Result};
use crate::spatial::{Point, Spacing, Direction, Vector};

/// Physical geometry of a regular image grid.
///
/// Maps a (continuous) index to a physical point by
/// `point = origin + Direction * (index * spacing)`.
/// The origin is the physical location of index zero, which need not lie
/// inside the region when the start index is non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry<const D: usize> {
    size: [usize; D],
    start_index: [i64; D],
    origin: Point<D>,
    spacing: Spacing<D>,
    direction: Direction<D>,
}

impl<const D: usize> ImageGeometry<D> {
    /// Create a geometry whose region starts at index zero.
    pub fn new(size: [usize; D], origin: Point<D>, spacing: Spacing<D>, direction: Direction<D>) -> Self {
        Self {
            size,
            start_index: [0; D],
            origin,
            spacing,
            direction,
        }
    }

    /// Geometry for an array-order tensor shape with unit spacing,
    /// zero origin and identity direction.
    pub fn from_shape(shape: [usize; D]) -> Self {
        let mut size = shape;
        size.reverse();
        Self::new(size, Point::origin(), Spacing::uniform(1.0), Direction::identity())
    }

    /// Set the first index of the region.
    pub fn with_start_index(mut self, start_index: [i64; D]) -> Self {
        self.start_index = start_index;
        self
    }

    /// Region size in axis order.
    pub fn size(&self) -> [usize; D] {
        self.size
    }

    /// First index of the region in axis order.
    pub fn start_index(&self) -> [i64; D] {
        self.start_index
    }

    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    pub fn spacing(&self) -> &Spacing<D> {
        &self.spacing
    }

    pub fn direction(&self) -> &Direction<D> {
        &self.direction
    }

    /// Tensor shape in array order (slowest axis first).
    pub fn shape(&self) -> [usize; D] {
        let mut shape = self.size;
        shape.reverse();
        shape
    }

    /// Number of pixels in the region.
    pub fn num_pixels(&self) -> usize {
        self.size.iter().product()
    }

    /// Check that the geometry describes a non-empty, invertible grid.
    pub fn validate(&self) -> Result<()> {
        if D == 0 || self.size.iter().any(|&s| s == 0) {
            return Err(FilterError::invalid_size(format!(
                "every axis needs at least one pixel, got {:?}",
                self.size
            )));
        }
        if !self.spacing.is_valid() {
            return Err(FilterError::invalid_spacing(format!(
                "spacing must be finite and positive, got {:?}",
                self.spacing.to_array()
            )));
        }
        if self.direction.try_inverse().is_none() {
            return Err(FilterError::singular_direction(format!(
                "direction {:?} is not invertible",
                self.direction.rows()
            )));
        }
        Ok(())
    }

    /// Convert a continuous index to a physical point.
    pub fn index_to_physical(&self, index: &Point<D>) -> Point<D> {
        let mut scaled_index = Vector::<D>::zeros();
        for i in 0..D {
            scaled_index[i] = index[i] * self.spacing[i];
        }
        self.origin + self.direction * scaled_index
    }

    /// Convert a physical point to a continuous index.
    ///
    /// `index = (Direction^-1 * (point - origin)) / spacing`
    pub fn physical_to_index(&self, point: &Point<D>) -> Result<Point<D>> {
        let inv_dir = self.inverse_direction()?;
        let rotated = inv_dir * (*point - self.origin);

        let mut index = Point::<D>::origin();
        for i in 0..D {
            index[i] = rotated[i] / self.spacing[i];
        }
        Ok(index)
    }

    /// Batch version of [`Self::index_to_physical`] for a `[N, D]` tensor.
    pub fn index_to_physical_tensor<B: Backend>(&self, indices: Tensor<B, 2>) -> Tensor<B, 2> {
        let device = indices.device();

        // P = O + I @ M with M_rc = S_r * Dir_cr
        let mut m_data = Vec::with_capacity(D * D);
        for r in 0..D {
            for c in 0..D {
                m_data.push((self.spacing[r] * self.direction[(c, r)]) as f32);
            }
        }
        let m_tensor = Tensor::<B, 2>::from_data(TensorData::new(m_data, Shape::new([D, D])), &device);

        indices.matmul(m_tensor) + self.origin_row::<B>(&device)
    }

    /// Batch version of [`Self::physical_to_index`] for a `[N, D]` tensor.
    pub fn physical_to_index_tensor<B: Backend>(&self, points: Tensor<B, 2>) -> Result<Tensor<B, 2>> {
        let device = points.device();
        let inv_dir = self.inverse_direction()?;

        // I = (P - O) @ T with T_rc = (Dir^-1)_cr / S_c
        let mut t_data = Vec::with_capacity(D * D);
        for r in 0..D {
            for c in 0..D {
                t_data.push((inv_dir[(c, r)] / self.spacing[c]) as f32);
            }
        }
        let t_tensor = Tensor::<B, 2>::from_data(TensorData::new(t_data, Shape::new([D, D])), &device);

        Ok((points - self.origin_row::<B>(&device)).matmul(t_tensor))
    }

    fn inverse_direction(&self) -> Result<Direction<D>> {
        self.direction.try_inverse().ok_or_else(|| {
            FilterError::singular_direction(format!(
                "direction {:?} is not invertible",
                self.direction.rows()
            ))
        })
    }

    fn origin_row<B: Backend>(&self, device: &B::Device) -> Tensor<B, 2> {
        let origin_vec: Vec<f32> = (0..D).map(|i| self.origin[i] as f32).collect();
        Tensor::<B, 1>::from_data(TensorData::new(origin_vec, Shape::new([D])), device).reshape([1, D])
    }
}

impl<const D: usize> fmt::Display for ImageGeometry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Size: {:?}", self.size)?;
        writeln!(f, "  Start Index: {:?}", self.start_index)?;
        writeln!(f, "  Spacing: {:?}", self.spacing.to_array())?;
        writeln!(f, "  Origin: {:?}", self.origin.to_array())?;
        writeln!(f, "  Direction:")?;
        for row in self.direction.rows() {
            writeln!(f, "    {:?}", row)?;
        }
        Ok(())
    }
}
