//! Reading the source image from disk.

use std::path::Path;

use crate::IoError;

/// Read the raw bytes of the source image.
///
/// Decoding is left to [`huey_pipeline::spin`] so that argument
/// validation can run before the image is touched.
///
/// # Errors
///
/// Returns [`IoError::Read`] if the file cannot be read.
pub fn read_source(path: &Path) -> Result<Vec<u8>, IoError> {
    let bytes = std::fs::read(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn reads_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        assert_eq!(read_source(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let err = read_source(&path).unwrap_err();
        assert!(matches!(err, IoError::Read { .. }));
        assert!(err.to_string().contains("missing.png"));
    }
}
