//! Image types and operations.
//!
//! Scalar images, the geometry that places them in physical space, the
//! index grid over a region, and vector-valued displacement fields.

pub mod image;
pub mod geometry;
pub mod grid;
pub mod displacement_field;

pub use image::Image;
pub use geometry::ImageGeometry;
pub use grid::generate_grid;
pub use displacement_field::{DisplacementField, FieldSummary};
