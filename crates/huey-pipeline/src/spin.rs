//! Walking the color wheel and handing each rotated image to a sink.
//!
//! [`SpinController`] renders one angle at a time: the rotated raster
//! for an angle is moved into the [`ImageSink`] before the next angle is
//! allocated, so at most one output raster is alive at once. Any error
//! aborts the walk; outputs already persisted stay with the sink.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::diagnostics::{AngleDiagnostics, Clock, SpinDiagnostics};
use crate::transform::{hue_rotate_parallel, hue_rotate_with_stats};
use crate::types::{Dimensions, PipelineError, RgbaImage, SinkError, SpinConfig};
use crate::walk::DegreeRange;

/// Destination for rotated images.
pub trait ImageSink {
    /// Take ownership of the image rendered for `angle` and persist it.
    ///
    /// # Errors
    ///
    /// Any error aborts the spin and is reported as
    /// [`PipelineError::Persist`].
    fn persist(&mut self, angle: u32, image: RgbaImage) -> Result<(), SinkError>;
}

/// Cloneable flag for aborting a spin between angles.
///
/// All clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next angle boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on
    /// any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Renders every angle of a [`DegreeRange`] from one source image.
#[derive(Debug)]
pub struct SpinController<'a> {
    source: &'a RgbaImage,
    range: DegreeRange,
    parallel: bool,
    cancel: CancellationToken,
}

impl<'a> SpinController<'a> {
    /// Create a controller for `source` using the walk described by
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the config's range is invalid.
    pub fn new(source: &'a RgbaImage, config: &SpinConfig) -> Result<Self, PipelineError> {
        Ok(Self::with_range(source, config.range()?, config.parallel))
    }

    /// Create a controller from an already validated range.
    #[must_use]
    pub fn with_range(source: &'a RgbaImage, range: DegreeRange, parallel: bool) -> Self {
        Self {
            source,
            range,
            parallel,
            cancel: CancellationToken::new(),
        }
    }

    /// Use `token` to allow the caller to abort the walk.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The angle walk this controller will render.
    #[must_use]
    pub const fn range(&self) -> &DegreeRange {
        &self.range
    }

    /// Render every angle and hand each result to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Cancelled`] if the token fires before an
    /// angle starts, and [`PipelineError::Persist`] if the sink rejects
    /// an image. Either aborts the remaining angles.
    pub fn run<S, C>(&self, sink: &mut S, clock: &C) -> Result<SpinDiagnostics, PipelineError>
    where
        S: ImageSink + ?Sized,
        C: Clock,
    {
        let total = self.range.len();
        let start = clock.now();
        let mut angles = Vec::with_capacity(total);

        log::info!(
            "spinning {}x{} image through {total} angles ({} to {} step {})",
            self.source.width(),
            self.source.height(),
            self.range.start(),
            self.range.end(),
            self.range.step(),
        );

        for angle in &self.range {
            if self.cancel.is_cancelled() {
                log::warn!("spin cancelled after {} of {total} angles", angles.len());
                return Err(PipelineError::Cancelled {
                    completed: angles.len(),
                    total,
                });
            }

            let transform_start = clock.now();
            let (rotated, stats) = if self.parallel {
                hue_rotate_parallel(self.source, f64::from(angle))
            } else {
                hue_rotate_with_stats(self.source, f64::from(angle))
            };
            let transform_duration = clock.elapsed(&transform_start);

            let persist_start = clock.now();
            sink.persist(angle, rotated)
                .map_err(|source| PipelineError::Persist { angle, source })?;
            let persist_duration = clock.elapsed(&persist_start);

            log::debug!(
                "angle {angle}: {} distinct colors, transform {transform_duration:?}, persist {persist_duration:?}",
                stats.cache_misses,
            );

            angles.push(AngleDiagnostics {
                angle,
                transform_duration,
                persist_duration,
                cache_misses: stats.cache_misses,
            });
        }

        Ok(SpinDiagnostics {
            dimensions: Dimensions::of(self.source),
            parallel: self.parallel,
            angles,
            total_duration: clock.elapsed(&start),
        })
    }
}
