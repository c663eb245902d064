//! Displacement field transform implementation.
//!
//! A dense displacement field transform moves each point by the displacement
//! interpolated from a [`DisplacementField`] at that point:
//! T(x) = x + u(x). This is the inverse operation of sampling a transform
//! into a field.

use burn::tensor::{Tensor, TensorData, Shape};
use burn::tensor::backend::Backend;
use crate::error::{FilterError, Result};
use crate::image::{DisplacementField, ImageGeometry};
use crate::spatial::Direction;
use super::trait_::Transform;

/// Dense displacement field transform.
///
/// Displacements are interpolated multilinearly between pixel centres.
/// Points whose continuous index falls outside the buffered region are
/// left where they are.
///
/// # Type Parameters
/// * `B` - The Burn backend
/// * `D` - The spatial dimensionality
#[derive(Debug, Clone)]
pub struct DisplacementFieldTransform<B: Backend, const D: usize> {
    field: DisplacementField<B, D>,
    /// Host copy of the vectors, row-major `[N, D]`.
    values: Vec<f64>,
    inverse_direction: Direction<D>,
}

impl<B: Backend, const D: usize> DisplacementFieldTransform<B, D> {
    /// Create a transform from a displacement field.
    ///
    /// Fails if the field geometry is degenerate or its data cannot be read.
    pub fn new(field: DisplacementField<B, D>) -> Result<Self> {
        let geometry = field.geometry();
        geometry.validate()?;
        let inverse_direction = geometry.direction().try_inverse().ok_or_else(|| {
            FilterError::singular_direction("displacement field direction is not invertible")
        })?;
        let values = field.host_vectors()?;
        Ok(Self {
            field,
            values,
            inverse_direction,
        })
    }

    /// Create a zero displacement field transform over `geometry`.
    pub fn zeros(geometry: ImageGeometry<D>, device: &B::Device) -> Result<Self> {
        Self::new(DisplacementField::zeros(geometry, device))
    }

    /// Get the displacement field.
    pub fn field(&self) -> &DisplacementField<B, D> {
        &self.field
    }

    /// Displacement at one physical point.
    pub fn displacement_at(&self, point: [f64; D]) -> [f64; D] {
        let geometry = self.field.geometry();
        let size = geometry.size();
        let start = geometry.start_index();
        let spacing = geometry.spacing();
        let origin = geometry.origin();

        // Region-relative continuous index
        let mut rel = [0.0f64; D];
        for r in 0..D {
            let mut acc = 0.0;
            for c in 0..D {
                acc += self.inverse_direction[(r, c)] * (point[c] - origin[c]);
            }
            rel[r] = acc / spacing[r] - start[r] as f64;
        }

        let eps = 1e-6;
        if (0..D).any(|a| rel[a] < -eps || rel[a] > (size[a] - 1) as f64 + eps) {
            return [0.0; D];
        }

        let mut base = [0usize; D];
        let mut frac = [0.0f64; D];
        for a in 0..D {
            let clamped = rel[a].clamp(0.0, (size[a] - 1) as f64);
            let floor = clamped.floor() as usize;
            base[a] = floor.min(size[a].saturating_sub(2));
            frac[a] = clamped - base[a] as f64;
        }

        let mut out = [0.0f64; D];
        for corner in 0..(1usize << D) {
            let mut weight = 1.0;
            let mut linear = 0;
            let mut stride = 1;
            for a in 0..D {
                let upper = (corner >> a) & 1 == 1;
                let idx = if upper { (base[a] + 1).min(size[a] - 1) } else { base[a] };
                weight *= if upper { frac[a] } else { 1.0 - frac[a] };
                linear += idx * stride;
                stride *= size[a];
            }
            if weight == 0.0 {
                continue;
            }
            for (c, o) in out.iter_mut().enumerate() {
                *o += weight * self.values[linear * D + c];
            }
        }
        out
    }
}

impl<B: Backend, const D: usize> Transform<B, D> for DisplacementFieldTransform<B, D> {
    fn transform_points(&self, points: Tensor<B, 2>) -> Tensor<B, 2> {
        let device = points.device();
        let [batch, _] = points.dims();
        let coords: Vec<f64> = points.into_data().iter::<f64>().collect();

        let mut moved = Vec::with_capacity(batch * D);
        for point in coords.chunks(D) {
            let p: [f64; D] = std::array::from_fn(|i| point[i]);
            let u = self.displacement_at(p);
            for i in 0..D {
                moved.push((p[i] + u[i]) as f32);
            }
        }

        Tensor::<B, 2>::from_data(TensorData::new(moved, Shape::new([batch, D])), &device)
    }

    fn name(&self) -> &'static str {
        "DisplacementFieldTransform"
    }
}
