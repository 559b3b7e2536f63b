//! huey-io: Filesystem I/O for huey.
//!
//! Reads the source image from disk and persists each rotated image
//! into an output directory. All pixel work stays in `huey-pipeline`;
//! encoding and naming come from `huey-export`.

pub mod sink;
pub mod source;

use std::path::PathBuf;

pub use sink::DirectorySink;
pub use source::read_source;

/// Errors from filesystem collaborators.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// The source image could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The image could not be encoded or named.
    #[error(transparent)]
    Export(#[from] huey_export::ExportError),
}
