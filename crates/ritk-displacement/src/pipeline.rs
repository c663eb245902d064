//! Reference volume construction, filter execution and rendering.

use std::sync::Arc;
use anyhow::{ensure, Context, Result};
use burn::tensor::Tensor;
use burn_ndarray::NdArray;
use ritk_core::transform::{IdentityTransform, ScaleTransform, Transform, TranslationTransform};
use ritk_core::{
    ConsoleProgressCallback, Direction, DisplacementField, FieldSummary, Image, ImageGeometry,
    Point, Spacing, TransformToDisplacementFieldFilter,
};
use serde::Serialize;
use tracing::{debug, info};
use crate::config::{OutputFormat, RunConfig, TransformSpec};

/// Backend used by the binary.
pub type CliBackend = NdArray<f32>;

/// Device of [`CliBackend`].
pub type CliDevice = <CliBackend as burn::tensor::backend::Backend>::Device;

/// JSON document written by `--format json`.
#[derive(Debug, Serialize)]
pub struct Report {
    pub transform: TransformSpec,
    pub use_reference_image: bool,
    pub field: FieldSummary,
}

fn build_transform(spec: TransformSpec, device: &CliDevice) -> Box<dyn Transform<CliBackend, 3>> {
    match spec {
        TransformSpec::Identity => Box::new(IdentityTransform::<CliBackend, 3>::new()),
        TransformSpec::Translation(t) => Box::new(TranslationTransform::<CliBackend, 3>::new(
            Tensor::from_floats(t.map(|v| v as f32), device),
        )),
        TransformSpec::Scale(s) => Box::new(ScaleTransform::<CliBackend, 3>::new(
            Tensor::from_floats(s.map(|v| v as f32), device),
            Tensor::zeros([3], device),
        )),
    }
}

/// Build the zero reference volume and sample the configured transform over it.
pub fn compute_field(
    config: &RunConfig,
    device: &CliDevice,
) -> Result<DisplacementField<CliBackend, 3>> {
    let geometry = ImageGeometry::new(
        config.size,
        Point::new(config.origin),
        Spacing::new(config.spacing),
        Direction::identity(),
    );
    geometry.validate().context("invalid reference volume")?;
    let reference = Image::<CliBackend, 3>::zeros(&geometry, device);
    debug!("Reference volume:\n{}", reference);

    let transform = build_transform(config.transform, device);
    info!(
        "Sampling {} over {:?} voxels (use_reference_image = {})",
        transform.name(),
        config.size,
        config.use_reference_image
    );

    let mut filter = TransformToDisplacementFieldFilter::<CliBackend, _, 3>::new(transform)
        .with_reference_image(&reference)
        .with_use_reference_image(config.use_reference_image)
        .with_number_of_chunks(config.chunks)
        .with_progress_callback(Arc::new(ConsoleProgressCallback::default()));
    if !config.use_reference_image {
        filter = filter.with_output_geometry(&geometry);
    }

    filter.update(device).context("displacement field generation failed")
}

/// Render a field in the requested format.
pub fn render(field: &DisplacementField<CliBackend, 3>, config: &RunConfig) -> Result<String> {
    match config.format {
        OutputFormat::Text => Ok(field.to_string()),
        OutputFormat::Json => {
            let report = Report {
                transform: config.transform,
                use_reference_image: config.use_reference_image,
                field: field.summary().context("failed to summarise field")?,
            };
            serde_json::to_string_pretty(&report).context("failed to serialise field summary")
        }
    }
}

/// Run the identity scenario and check that the field is zero with the
/// reference volume's extent.
pub fn verify(size: [usize; 3], chunks: usize, device: &CliDevice) -> Result<()> {
    let config = RunConfig {
        size,
        chunks,
        ..RunConfig::default()
    };
    let field = compute_field(&config, device)?;

    let mut expected_shape = size;
    expected_shape.reverse();
    ensure!(
        field.shape() == expected_shape,
        "field shape {:?} does not match reference shape {:?}",
        field.shape(),
        expected_shape
    );

    let max = field.max_magnitude().context("failed to read field")?;
    ensure!(max == 0.0, "identity produced a non-zero displacement (max {})", max);

    info!("Verified {} zero displacement vectors", field.geometry().num_pixels());
    Ok(())
}
