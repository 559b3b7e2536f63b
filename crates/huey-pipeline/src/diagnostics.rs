//! Spin diagnostics: per-angle timing and cache counts.
//!
//! Every call to [`SpinController::run`](crate::SpinController::run)
//! collects diagnostics alongside its side effects on the sink.
//!
//! Time is read through the [`Clock`] trait so this crate does not pick
//! a platform time source; the CLI supplies one backed by
//! `std::time::Instant`.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Dimensions;

/// Source of timestamps for diagnostics.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Capture the current time.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinDiagnostics {
    /// Source image dimensions.
    pub dimensions: Dimensions,
    /// Whether rows were rotated in parallel.
    pub parallel: bool,
    /// One entry per rendered angle, in walk order.
    pub angles: Vec<AngleDiagnostics>,
    /// Wall-clock duration of the whole walk (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
}

/// Diagnostics for one sampled angle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleDiagnostics {
    /// Rotation applied, in degrees.
    pub angle: u32,
    /// Time spent rotating the image (seconds).
    #[serde(with = "duration_serde")]
    pub transform_duration: Duration,
    /// Time spent in the sink (seconds).
    #[serde(with = "duration_serde")]
    pub persist_duration: Duration,
    /// Distinct colors converted through HSL.
    pub cache_misses: usize,
}

impl SpinDiagnostics {
    /// Total time spent rotating across all angles.
    #[must_use]
    pub fn transform_total(&self) -> Duration {
        self.angles.iter().map(|a| a.transform_duration).sum()
    }

    /// Total time spent persisting across all angles.
    #[must_use]
    pub fn persist_total(&self) -> Duration {
        self.angles.iter().map(|a| a.persist_duration).sum()
    }

    /// Format diagnostics as a human-readable report.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Spin Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Image: {}x{} ({} pixels){}",
            self.dimensions.width,
            self.dimensions.height,
            self.dimensions.pixel_count(),
            if self.parallel { ", parallel" } else { "" },
        ));
        lines.push(format!(
            "Angles: {}  |  Total duration: {:.3}ms",
            self.angles.len(),
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:>8} {:>14} {:>14} {:>14}",
            "Angle", "Transform", "Persist", "Cache misses"
        ));
        lines.push("-".repeat(60));

        for angle in &self.angles {
            lines.push(format!(
                "{:>8} {:>12.3}ms {:>12.3}ms {:>14}",
                angle.angle,
                duration_ms(angle.transform_duration),
                duration_ms(angle.persist_duration),
                angle.cache_misses,
            ));
        }

        if !self.angles.is_empty() {
            let count = self.angles.len() as f64;
            lines.push("-".repeat(60));
            lines.push(format!(
                "{:>8} {:>12.3}ms {:>12.3}ms",
                "mean",
                duration_ms(self.transform_total()) / count,
                duration_ms(self.persist_total()) / count,
            ));
        }

        lines.join("\n")
    }
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
