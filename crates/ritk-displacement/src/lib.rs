//! Command-line pipeline around [`ritk_core::TransformToDisplacementFieldFilter`].
//!
//! Builds a zero reference volume, samples a transform over it, and renders
//! the resulting displacement field.

pub mod config;
pub mod pipeline;

pub use config::{OutputFormat, RunArgs, RunConfig, TransformSpec};
pub use pipeline::{compute_field, render, verify, CliBackend, CliDevice, Report};
