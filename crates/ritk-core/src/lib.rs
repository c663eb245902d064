//! Images with physical geometry, spatial transforms, and the filter that
//! samples a transform into a dense displacement field.

pub mod error;
pub mod spatial;
pub mod image;
pub mod transform;
pub mod filter;
pub mod progress;

pub use error::{FilterError, Result};
pub use image::{Image, ImageGeometry, DisplacementField, FieldSummary};
pub use spatial::{Point, Vector, Spacing, Direction};
pub use filter::TransformToDisplacementFieldFilter;
pub use progress::{ProgressCallback, ProgressInfo, ProgressTracker, ConsoleProgressCallback, HistoryCallback};
