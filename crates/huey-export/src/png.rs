//! PNG export serializer.
//!
//! Lossless, so a rotated raster written here decodes back to exactly
//! the pixels the pipeline produced. Alpha is kept as a full 8-bit
//! channel.
//!
//! This is a pure function with no I/O -- it returns a byte vector.

use huey_pipeline::RgbaImage;
use image::ImageEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::ExportError;

/// Encode an RGBA raster as PNG bytes.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if the encoder rejects the image
/// (for example, zero-sized dimensions).
pub fn to_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}
