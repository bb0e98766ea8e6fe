//! Budget-constrained encode search.
//!
//! Probes a scale × quality grid in fixed priority order — largest scale
//! outermost, highest quality innermost — and returns the first re-encoding
//! whose transport-encoded size fits the byte budget. Pixel-count reduction
//! buys file-size headroom faster than quality reduction, but quality steps
//! preserve legibility better than downscaling, so the search prefers the
//! largest scale at which any acceptable quality exists.
//!
//! The grid is finite and a forced-fit fallback encode closes it out, so the
//! search always terminates with a result.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Rotate | `image::DynamicImage::rotate90/180/270` |
//! | Resample | `image::DynamicImage::resize_exact` (Lanczos3) |
//! | Encode | `image::codecs::jpeg::JpegEncoder` |
//! | Transport | `base64` STANDARD engine |

use crate::config::PipelineConfig;
use crate::planner::SizePlan;
use crate::rotation::RotationPlan;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use image::imageops::FilterType;
use serde::Serialize;
use tracing::debug;

/// All outputs are baseline JPEG; a single format keeps the downstream
/// payload handling trivial.
pub const MEDIA_TYPE: &str = "image/jpeg";

/// Upload-ready normalized image.
///
/// `data` is the base64 transport encoding of a baseline JPEG. The remaining
/// fields are diagnostics: when `fallback` is set the byte budget was not
/// honored, and callers that care must check `data.len()` themselves.
#[derive(Debug, Clone, Serialize)]
pub struct EncodeResult {
    pub data: String,
    pub media_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub fallback: bool,
}

/// Size of `n` payload bytes after base64 transport encoding.
///
/// Computed arithmetically so the search never materializes a base64 string
/// for a rejected attempt.
pub(crate) fn transport_encoded_len(n: usize) -> usize {
    n.div_ceil(3) * 4
}

/// Planned dimensions at a given grid scale, never rounding to zero.
fn scaled(plan: &SizePlan, scale: f64) -> (u32, u32) {
    (
        ((plan.width as f64 * scale).round() as u32).max(1),
        ((plan.height as f64 * scale).round() as u32).max(1),
    )
}

/// Rotate about the image center. 90/270 swap the raster's axes.
fn rotate(raster: &DynamicImage, total_degrees: u16) -> DynamicImage {
    match total_degrees {
        90 => raster.rotate90(),
        180 => raster.rotate180(),
        270 => raster.rotate270(),
        _ => raster.clone(),
    }
}

/// Encode a raster as baseline JPEG at the given quality.
pub(crate) fn encode_jpeg(raster: &DynamicImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let rgb = raster.to_rgb8();
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality).encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

/// Search the scale × quality grid for the highest-fidelity encoding that
/// fits the budget; fall back to a forced-fit encode if none does.
///
/// First success wins. Each scale step resamples the rotated raster once and
/// probes every quality against it, so peak memory stays at one decoded
/// raster plus one working canvas.
pub fn search(
    raster: &DynamicImage,
    plan: &SizePlan,
    rotation: &RotationPlan,
    config: &PipelineConfig,
) -> Result<EncodeResult, image::ImageError> {
    let upright = rotate(raster, rotation.total_degrees);

    for &scale in &config.scale_ladder {
        let (width, height) = scaled(plan, scale);
        let resampled = upright.resize_exact(width, height, FilterType::Lanczos3);

        for &quality in &config.quality_ladder {
            let jpeg = encode_jpeg(&resampled, quality)?;
            let transport = transport_encoded_len(jpeg.len());
            debug!(scale, quality, width, height, transport, "encode attempt");

            if transport <= config.byte_budget {
                return Ok(EncodeResult {
                    data: STANDARD.encode(&jpeg),
                    media_type: MEDIA_TYPE,
                    width,
                    height,
                    quality,
                    fallback: false,
                });
            }
        }
    }

    // Grid exhausted: forced-fit encode, returned regardless of size.
    let (width, height) = scaled(plan, config.fallback_scale);
    let resampled = upright.resize_exact(width, height, FilterType::Lanczos3);
    let jpeg = encode_jpeg(&resampled, config.fallback_quality)?;
    debug!(
        width,
        height,
        transport = transport_encoded_len(jpeg.len()),
        "budget unmet, fallback encode"
    );

    Ok(EncodeResult {
        data: STANDARD.encode(&jpeg),
        media_type: MEDIA_TYPE,
        width,
        height,
        quality: config.fallback_quality,
        fallback: true,
    })
}
