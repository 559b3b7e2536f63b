//! Output file naming.
//!
//! Each sampled angle is stored as `<prefix>_<angle>.<extension>`. The
//! walk never yields the same angle twice, so names never collide
//! within one spin.

use crate::ExportError;

/// Builds per-angle output filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    prefix: String,
    extension: String,
}

impl OutputNaming {
    /// Prefix used when none is configured.
    pub const DEFAULT_PREFIX: &str = "hue";

    /// File extension for PNG output.
    pub const PNG_EXTENSION: &str = "png";

    /// Create a PNG naming scheme with the given prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidPrefix`] if `prefix` is empty or
    /// contains `/` or `\`, which would escape the output directory.
    pub fn png(prefix: impl Into<String>) -> Result<Self, ExportError> {
        let prefix = prefix.into();
        if prefix.is_empty() || prefix.contains(['/', '\\']) {
            return Err(ExportError::InvalidPrefix(prefix));
        }
        Ok(Self {
            prefix,
            extension: Self::PNG_EXTENSION.to_owned(),
        })
    }

    /// The configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Filename for the image rotated by `angle` degrees.
    #[must_use]
    pub fn file_name(&self, angle: u32) -> String {
        format!("{}_{angle}.{}", self.prefix, self.extension)
    }
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            prefix: Self::DEFAULT_PREFIX.to_owned(),
            extension: Self::PNG_EXTENSION.to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_names() {
        let naming = OutputNaming::default();
        assert_eq!(naming.file_name(0), "hue_0.png");
        assert_eq!(naming.file_name(360), "hue_360.png");
    }

    #[test]
    fn custom_prefix() {
        let naming = OutputNaming::png("sunset").unwrap();
        assert_eq!(naming.prefix(), "sunset");
        assert_eq!(naming.file_name(45), "sunset_45.png");
    }

    #[test]
    fn rejects_empty_and_path_prefixes() {
        for bad in ["", "a/b", "..\\up"] {
            assert!(matches!(
                OutputNaming::png(bad),
                Err(ExportError::InvalidPrefix(_))
            ));
        }
    }
}
