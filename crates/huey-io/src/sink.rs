//! Directory-backed image sink.
//!
//! Each rotated image is encoded to PNG and written to
//! `<dir>/<prefix>_<angle>.png` as soon as the pipeline hands it over,
//! then dropped, so only one output raster is held at a time.

use std::path::{Path, PathBuf};

use huey_export::{OutputNaming, to_png};
use huey_pipeline::{ImageSink, RgbaImage, SinkError};

use crate::IoError;

/// Writes rotated images into an output directory.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    naming: OutputNaming,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create the sink, creating `dir` (and its parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::CreateDir`] if the directory cannot be created.
    pub fn create(dir: impl Into<PathBuf>, naming: OutputNaming) -> Result<Self, IoError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| IoError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            naming,
            written: Vec::new(),
        })
    }

    /// The output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the image for `angle` is (or would be) written to.
    #[must_use]
    pub fn path_for(&self, angle: u32) -> PathBuf {
        self.dir.join(self.naming.file_name(angle))
    }

    /// Files written so far, in walk order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Encode and write one image.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Export`] if encoding fails and
    /// [`IoError::Write`] if the file cannot be written.
    pub fn write(&mut self, angle: u32, image: &RgbaImage) -> Result<(), IoError> {
        let bytes = to_png(image)?;
        let path = self.path_for(angle);
        std::fs::write(&path, &bytes).map_err(|source| IoError::Write {
            path: path.clone(),
            source,
        })?;
        log::debug!("wrote {} ({} bytes)", path.display(), bytes.len());
        self.written.push(path);
        Ok(())
    }
}

impl ImageSink for DirectorySink {
    fn persist(&mut self, angle: u32, image: RgbaImage) -> Result<(), SinkError> {
        Ok(self.write(angle, &image)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn creates_nested_output_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("a").join("b");
        let sink = DirectorySink::create(&dir, OutputNaming::default()).unwrap();
        assert!(dir.is_dir());
        assert_eq!(sink.dir(), dir);
        assert!(sink.written().is_empty());
    }

    #[test]
    fn persist_writes_named_png() {
        let root = tempfile::tempdir().unwrap();
        let mut sink =
            DirectorySink::create(root.path(), OutputNaming::png("spin").unwrap()).unwrap();
        let img = RgbaImage::from_pixel(4, 4, Rgba([9, 99, 199, 42]));

        sink.persist(120, img.clone()).unwrap();

        let path = root.path().join("spin_120.png");
        assert_eq!(sink.written(), [path.clone()]);
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }

    #[test]
    fn write_failure_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::create(root.path(), OutputNaming::default()).unwrap();
        // A directory occupying the target path makes the write fail.
        std::fs::create_dir(sink.path_for(7)).unwrap();

        let err = sink.write(7, &RgbaImage::from_pixel(1, 1, Rgba([0; 4]))).unwrap_err();
        assert!(matches!(err, IoError::Write { .. }));
        assert!(sink.written().is_empty());
    }
}
