//! Shared types for the huey hue-rotation pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::walk::DegreeRange;

/// Re-export `RgbaImage` so downstream crates can hand rasters to a
/// sink without depending on `image` directly.
pub use image::RgbaImage;

/// Configuration for one spin over the color wheel.
///
/// Degree bounds are validated when the range is built
/// ([`SpinConfig::range`]), not at construction, so a config can be
/// deserialized or assembled from CLI flags first and checked once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// First sampled rotation, in `0..=360`.
    pub from_degree: i32,

    /// Requested last rotation, in `0..=360`. When smaller than
    /// `from_degree` the walk wraps past 360.
    pub to_degree: i32,

    /// Distance between samples. The sign is ignored; zero is rejected.
    pub step_degree: i32,

    /// Rotate rows of each image on the rayon thread pool.
    pub parallel: bool,
}

impl SpinConfig {
    /// Default starting angle.
    pub const DEFAULT_FROM_DEGREE: i32 = 0;
    /// Default end angle.
    pub const DEFAULT_TO_DEGREE: i32 = 360;
    /// Default step.
    pub const DEFAULT_STEP_DEGREE: i32 = 1;

    /// Validate the bounds and build the angle walk.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::DegreeOutOfRange`] or
    /// [`PipelineError::ZeroStep`] for invalid arguments.
    pub fn range(&self) -> Result<DegreeRange, PipelineError> {
        DegreeRange::new(self.from_degree, self.to_degree, self.step_degree)
    }
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            from_degree: Self::DEFAULT_FROM_DEGREE,
            to_degree: Self::DEFAULT_TO_DEGREE,
            step_degree: Self::DEFAULT_STEP_DEGREE,
            parallel: false,
        }
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of an RGBA raster.
    #[must_use]
    pub fn of(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }

    /// Total pixel count.
    #[must_use]
    pub const fn pixel_count(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Boxed error returned by an [`ImageSink`](crate::spin::ImageSink).
pub type SinkError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Argument validation, before any image data is touched.
    Validation,
    /// Decoding the source image.
    Decode,
    /// Rotating an image (includes cancellation between angles).
    Transform,
    /// Handing a rotated image to the sink.
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => f.write_str("validation"),
            Self::Decode => f.write_str("decode"),
            Self::Transform => f.write_str("transform"),
            Self::Persist => f.write_str("persist"),
        }
    }
}

/// Errors that can occur during a spin.
///
/// Every error aborts the whole walk.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A degree bound is outside `0..=360`.
    #[error("{name} degree {value} is outside the range 0-360")]
    DegreeOutOfRange {
        /// Which bound was rejected (`"from"` or `"to"`).
        name: &'static str,
        /// The rejected value.
        value: i32,
    },

    /// The step is zero, so the walk would never advance.
    #[error("step degree must not be zero")]
    ZeroStep,

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The sink failed to persist the image for one angle.
    #[error("failed to persist image rotated by {angle} degrees: {source}")]
    Persist {
        /// Angle whose output could not be persisted.
        angle: u32,
        /// Error reported by the sink.
        #[source]
        source: SinkError,
    },

    /// The walk was cancelled between two angles.
    #[error("spin cancelled after {completed} of {total} angles")]
    Cancelled {
        /// Angles fully rendered and persisted before cancellation.
        completed: usize,
        /// Angles the walk would have rendered.
        total: usize,
    },
}

impl PipelineError {
    /// The stage this error originated from.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::DegreeOutOfRange { .. } | Self::ZeroStep => Stage::Validation,
            Self::EmptyInput | Self::ImageDecode(_) => Stage::Decode,
            Self::Cancelled { .. } => Stage::Transform,
            Self::Persist { .. } => Stage::Persist,
        }
    }

    /// Returns `true` for errors caused by invalid arguments.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self.stage(), Stage::Validation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_walks_the_full_wheel() {
        let range = SpinConfig::default().range().unwrap();
        assert_eq!(range.len(), 361);
        assert!(!SpinConfig::default().parallel);
    }

    #[test]
    fn config_json_round_trip() {
        let config = SpinConfig {
            from_degree: 350,
            to_degree: 10,
            step_degree: -5,
            parallel: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SpinConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn config_json_missing_fields_use_defaults() {
        let config: SpinConfig = serde_json::from_str(r#"{"step_degree": 15}"#).unwrap();
        assert_eq!(
            config,
            SpinConfig {
                step_degree: 15,
                ..SpinConfig::default()
            }
        );
    }

    #[test]
    fn invalid_config_fails_validation_stage() {
        let config = SpinConfig {
            from_degree: -1,
            ..SpinConfig::default()
        };
        let err = config.range().unwrap_err();
        assert_eq!(err.stage(), Stage::Validation);
        assert!(err.is_invalid_argument());

        let zero = SpinConfig {
            step_degree: 0,
            ..SpinConfig::default()
        };
        assert!(zero.range().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn error_stages() {
        assert_eq!(PipelineError::EmptyInput.stage(), Stage::Decode);
        let persist = PipelineError::Persist {
            angle: 10,
            source: "disk full".into(),
        };
        assert_eq!(persist.stage(), Stage::Persist);
        assert!(!persist.is_invalid_argument());
        assert_eq!(
            persist.to_string(),
            "failed to persist image rotated by 10 degrees: disk full"
        );
        let cancelled = PipelineError::Cancelled {
            completed: 2,
            total: 5,
        };
        assert_eq!(cancelled.stage(), Stage::Transform);
    }

    #[test]
    fn out_of_range_message_names_the_bound() {
        let err = PipelineError::DegreeOutOfRange {
            name: "to",
            value: 400,
        };
        assert_eq!(err.to_string(), "to degree 400 is outside the range 0-360");
    }

    #[test]
    fn dimensions_pixel_count() {
        let dims = Dimensions {
            width: 70_000,
            height: 70_000,
        };
        assert_eq!(dims.pixel_count(), 4_900_000_000);
    }
}
