//! huey-export: Pure output serializers (sans-IO)
//!
//! Encodes rotated rasters and names the files they are stored under.
//! Currently supports PNG.

pub mod naming;
pub mod png;

pub use naming::OutputNaming;
pub use png::to_png;

/// Errors produced while preparing output files.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The image encoder rejected the raster.
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    /// The filename prefix cannot be used.
    #[error("invalid output prefix {0:?}: must be non-empty and contain no path separators")]
    InvalidPrefix(String),
}
