//! Per-pixel hue rotation with a per-pass color cache.
//!
//! A rotation pass over one image at one angle creates a
//! [`PixelRotator`], which owns a [`HueRotationCache`]. Photographs
//! typically contain far fewer distinct colors than pixels, so each
//! distinct RGBA value is converted through HSL once and every repeat is
//! a map lookup. The cache is only valid for the angle it was built
//! with and is dropped with the rotator.

use std::collections::HashMap;

use image::Rgba;

use crate::color::{Rgb, hsl_to_rgb, rgb_to_hsl};

/// Degrees in a full turn of the color wheel.
pub const FULL_TURN: f64 = 360.0;

/// Normalize an angle in degrees into `[0, 360)`.
///
/// Accepts any finite magnitude, positive or negative.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Pack an RGBA pixel into a single cache key.
#[must_use]
pub const fn pack(pixel: Rgba<u8>) -> u32 {
    u32::from_be_bytes(pixel.0)
}

/// Rotate the hue of a single pixel by `angle_degrees`, without caching.
///
/// Saturation, lightness and alpha are preserved.
#[must_use]
pub fn rotate_pixel(pixel: Rgba<u8>, angle_degrees: f64) -> Rgba<u8> {
    let [r, g, b, alpha] = pixel.0;

    let mut hsl = rgb_to_hsl(Rgb::from_u8(r, g, b));
    let degrees = normalize_degrees(hsl.hue.mul_add(FULL_TURN, angle_degrees));
    hsl.hue = degrees / FULL_TURN;

    let [r, g, b] = hsl_to_rgb(hsl).to_u8();
    Rgba([r, g, b, alpha])
}

/// Mapping from a packed source pixel to its rotated pixel.
///
/// Scoped to one rotation pass (one image, one angle).
#[derive(Debug, Default)]
pub struct HueRotationCache {
    entries: HashMap<u32, Rgba<u8>>,
}

impl HueRotationCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously rotated pixel.
    #[must_use]
    pub fn get(&self, source: Rgba<u8>) -> Option<Rgba<u8>> {
        self.entries.get(&pack(source)).copied()
    }

    /// Record the rotated value for a source pixel.
    pub fn insert(&mut self, source: Rgba<u8>, rotated: Rgba<u8>) {
        self.entries.insert(pack(source), rotated);
    }

    /// Number of distinct source colors seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rotates pixels by a fixed angle, memoizing each distinct color.
#[derive(Debug)]
pub struct PixelRotator {
    angle_degrees: f64,
    cache: HueRotationCache,
}

impl PixelRotator {
    /// Create a rotator for one pass at `angle_degrees`.
    #[must_use]
    pub fn new(angle_degrees: f64) -> Self {
        Self {
            angle_degrees,
            cache: HueRotationCache::new(),
        }
    }

    /// The rotation offset this rotator applies.
    #[must_use]
    pub const fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    /// Rotate `pixel`, reusing the cached result for repeated colors.
    pub fn rotate(&mut self, pixel: Rgba<u8>) -> Rgba<u8> {
        if let Some(rotated) = self.cache.get(pixel) {
            return rotated;
        }
        let rotated = rotate_pixel(pixel, self.angle_degrees);
        self.cache.insert(pixel, rotated);
        rotated
    }

    /// Number of distinct colors converted so far (cache misses).
    #[must_use]
    pub fn cache_misses(&self) -> usize {
        self.cache.len()
    }
}
