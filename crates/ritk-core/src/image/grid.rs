use std::ops::Range;
use burn::tensor::{Tensor, TensorData, Shape};
use burn::tensor::backend::Backend;
use super::geometry::ImageGeometry;

/// Generate the index grid of a geometry's region.
///
/// Returns a tensor of shape `[N, D]` holding the absolute index
/// (start index included) of every pixel whose offset along the slowest
/// axis lies in `slab`. Rows follow array order, so axis 0 varies fastest.
///
/// # Arguments
/// * `geometry` - Grid whose region is enumerated
/// * `slab` - Range of offsets along the slowest axis (`D - 1`)
/// * `device` - The device to create the tensor on
pub fn generate_grid<B, const D: usize>(
    geometry: &ImageGeometry<D>,
    slab: Range<usize>,
    device: &B::Device,
) -> Tensor<B, 2>
where
    B: Backend,
{
    let size = geometry.size();
    let start = geometry.start_index();

    let mut strides = [1usize; D];
    for axis in 1..D {
        strides[axis] = strides[axis - 1] * size[axis - 1];
    }
    let slab_stride = strides[D - 1];
    let first = slab.start * slab_stride;
    let last = slab.end.min(size[D - 1]) * slab_stride;
    let total = last.saturating_sub(first);

    let mut grid = Vec::with_capacity(total * D);
    for linear in first..last {
        for axis in 0..D {
            let offset = (linear / strides[axis]) % size[axis];
            grid.push((start[axis] + offset as i64) as f32);
        }
    }

    Tensor::<B, 1>::from_data(TensorData::new(grid, Shape::new([total * D])), device)
        .reshape([total, D])
}
