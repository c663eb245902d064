//! Transform types and operations.
//!
//! This module provides the transform trait and the spatial transforms that
//! can be sampled into a displacement field.

pub mod trait_;
pub mod identity;
pub mod translation;
pub mod scale;
pub mod affine;
pub mod chained;
pub mod displacement_field;

pub use trait_::Transform;
pub use identity::IdentityTransform;
pub use translation::TranslationTransform;
pub use scale::ScaleTransform;
pub use affine::AffineTransform;
pub use chained::ChainedTransform;
pub use displacement_field::DisplacementFieldTransform;
