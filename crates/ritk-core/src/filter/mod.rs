//! Image filters.

pub mod transform_to_displacement_field;

pub use transform_to_displacement_field::{transform_to_displacement_field, TransformToDisplacementFieldFilter};
