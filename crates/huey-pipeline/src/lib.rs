//! huey-pipeline: Pure hue-rotation pipeline (sans-IO).
//!
//! Renders a sequence of hue-rotated variants of one source image:
//! decode -> walk the angle range -> rotate every pixel per angle ->
//! hand each result to a sink.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and rasters. Persisting images is delegated to an
//! [`ImageSink`]; the filesystem implementation lives in `huey-io`.

pub mod color;
pub mod decode;
pub mod diagnostics;
pub mod rotate;
pub mod spin;
pub mod transform;
pub mod types;
pub mod walk;

pub use color::{Hsl, MaxChannel, Rgb, hsl_to_rgb, rgb_to_hsl};
pub use diagnostics::{AngleDiagnostics, Clock, SpinDiagnostics};
pub use rotate::{HueRotationCache, PixelRotator, rotate_pixel};
pub use spin::{CancellationToken, ImageSink, SpinController};
pub use transform::{TransformStats, hue_rotate, hue_rotate_parallel};
pub use types::{Dimensions, PipelineError, RgbaImage, SinkError, SpinConfig, Stage};
pub use walk::{DegreeRange, DegreeRangeIter};

/// Run a full spin over encoded image bytes.
///
/// # Pipeline steps
///
/// 1. Validate the angle range (nothing else is touched on failure)
/// 2. Decode the source image to RGBA
/// 3. For each sampled angle, rotate every pixel and persist the result
///
/// # Errors
///
/// Returns a [`Stage::Validation`] error for an invalid range,
/// [`PipelineError::EmptyInput`] or [`PipelineError::ImageDecode`] if
/// the source cannot be decoded, and [`PipelineError::Persist`] or
/// [`PipelineError::Cancelled`] if the walk is aborted.
pub fn spin<S, C>(
    image_bytes: &[u8],
    config: &SpinConfig,
    sink: &mut S,
    clock: &C,
    cancel: &CancellationToken,
) -> Result<SpinDiagnostics, PipelineError>
where
    S: ImageSink + ?Sized,
    C: Clock,
{
    // 1. Validate before decoding.
    let range = config.range()?;

    // 2. Decode.
    let source = decode::decode_rgba(image_bytes)?;

    // 3. Walk.
    SpinController::with_range(&source, range, config.parallel)
        .with_cancellation(cancel.clone())
        .run(sink, clock)
}
