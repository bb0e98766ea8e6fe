//! Pipeline orchestration — the single public entry point.
//!
//! Sequences the four stages for one image: read orientation metadata,
//! decode, resolve rotation, plan dimensions, search encodings. Each
//! invocation is independent and holds no state, so callers may normalize
//! many images concurrently; pacing between images is the caller's concern.

use crate::config::PipelineConfig;
use crate::encode::{self, EncodeResult};
use crate::exif;
use crate::planner::plan_dimensions;
use crate::rotation::{ManualRotation, resolve_rotation};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The input is not a decodable image. The only fatal core error —
    /// callers report "failed to load image" without attempting rotation
    /// or size logic. Retrying is a caller policy decision.
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("JPEG encode failed: {0}")]
    Encode(image::ImageError),
}

/// Normalize one encoded image into an upload-ready payload.
///
/// Orientation metadata that is missing or malformed degrades to "no
/// rotation"; a budget miss degrades to the forced-fit fallback. Past a
/// successful decode this function always produces a result.
pub fn normalize(
    image_bytes: &[u8],
    manual: ManualRotation,
    config: &PipelineConfig,
) -> Result<EncodeResult, NormalizeError> {
    let orientation = exif::read_orientation(image_bytes);

    let raster = image::load_from_memory(image_bytes).map_err(NormalizeError::Decode)?;
    let (width, height) = (raster.width(), raster.height());

    let rotation = resolve_rotation(orientation, manual, width, height, config.auto_portrait);
    let plan = plan_dimensions(
        width,
        height,
        &rotation,
        config.min_dimension,
        config.max_dimension,
    );
    debug!(
        code = orientation.code(),
        total_degrees = rotation.total_degrees,
        source_width = width,
        source_height = height,
        plan_width = plan.width,
        plan_height = plan.height,
        "normalization plan"
    );

    encode::search(&raster, &plan, &rotation, config).map_err(NormalizeError::Encode)
}
