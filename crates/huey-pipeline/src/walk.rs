//! Enumerating the sampled angles between two points on the color wheel.
//!
//! A [`DegreeRange`] is validated once and then iterated any number of
//! times. The number of samples is `step_count + 1`, where
//!
//! ```text
//! step_count = floor((to - from) / step)          if from <= to
//! step_count = floor((to - from + 360) / step)    if from >  to (wraps)
//! ```
//!
//! Samples are `from + k * step`. The last sample is wherever the step
//! arithmetic lands, so it undershoots `to` when the span is not a
//! multiple of `step`:
//!
//! ```rust
//! # use huey_pipeline::DegreeRange;
//! let range = DegreeRange::new(0, 7, 3)?;
//! assert_eq!(range.iter().collect::<Vec<_>>(), vec![0, 3, 6]);
//! # Ok::<(), huey_pipeline::PipelineError>(())
//! ```
//!
//! In a wrapping walk, samples after the start that pass the top of the
//! wheel are reported one full turn lower (`350, 360, 370` becomes
//! `350, 0, 10`). Rotating by either value is equivalent, and the reduced
//! value keeps every sample of one walk distinct. A forward walk never
//! exceeds `to`, so `360` can still appear as its own sample there.

use std::iter::FusedIterator;

use crate::types::PipelineError;

/// The largest accepted angle bound.
pub const MAX_DEGREE: i32 = 360;

/// A validated angle range with a step size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeRange {
    from: u32,
    to: u32,
    step: u32,
    step_count: u32,
}

impl DegreeRange {
    /// Validate the bounds and compute the number of steps.
    ///
    /// `step` is used by magnitude; its sign is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::DegreeOutOfRange`] if `from` or `to` is
    /// outside `0..=360`, and [`PipelineError::ZeroStep`] if `step` is 0.
    pub fn new(from: i32, to: i32, step: i32) -> Result<Self, PipelineError> {
        let from = check_bound("from", from)?;
        let to = check_bound("to", to)?;
        let step = step.unsigned_abs();
        if step == 0 {
            return Err(PipelineError::ZeroStep);
        }

        let span = if from <= to { to - from } else { to + 360 - from };

        Ok(Self {
            from,
            to,
            step,
            step_count: span / step,
        })
    }

    /// Starting angle.
    #[must_use]
    pub const fn start(&self) -> u32 {
        self.from
    }

    /// Requested end angle (not necessarily the last sample).
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.to
    }

    /// Step size in degrees (always positive).
    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Returns `true` if the walk crosses the top of the wheel.
    #[must_use]
    pub const fn wraps(&self) -> bool {
        self.from > self.to
    }

    /// Number of steps taken after the starting sample.
    #[must_use]
    pub const fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Total number of sampled angles (`step_count + 1`).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.step_count as usize + 1
    }

    /// Always `false`: every range includes its starting angle.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the sampled angles from the start.
    #[must_use]
    pub const fn iter(&self) -> DegreeRangeIter {
        DegreeRangeIter {
            range: *self,
            next: 0,
        }
    }

    /// The `k`-th sample, without bounds checking against `step_count`.
    const fn sample(&self, k: u32) -> u32 {
        let raw = self.from + k * self.step;
        if self.wraps() && k > 0 && raw >= 360 {
            raw - 360
        } else {
            raw
        }
    }
}

impl IntoIterator for DegreeRange {
    type Item = u32;
    type IntoIter = DegreeRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DegreeRange {
    type Item = u32;
    type IntoIter = DegreeRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the angles of a [`DegreeRange`].
#[derive(Debug, Clone)]
pub struct DegreeRangeIter {
    range: DegreeRange,
    next: u32,
}

impl Iterator for DegreeRangeIter {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next > self.range.step_count {
            return None;
        }
        let angle = self.range.sample(self.next);
        self.next += 1;
        Some(angle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.range.step_count + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DegreeRangeIter {}

impl FusedIterator for DegreeRangeIter {}

#[allow(clippy::cast_sign_loss)]
fn check_bound(name: &'static str, value: i32) -> Result<u32, PipelineError> {
    if (0..=MAX_DEGREE).contains(&value) {
        Ok(value as u32)
    } else {
        Err(PipelineError::DegreeOutOfRange { name, value })
    }
}
