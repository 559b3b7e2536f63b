//! RGB <-> HSL conversion.
//!
//! Both directions work on `f64` components. RGB channels are on the
//! 0-255 scale; hue, saturation and lightness are normalized to
//! `[0.0, 1.0]`. Rounding to 8-bit integers happens only at the raster
//! boundary via [`to_channel`].
//!
//! Lightness here is the value of the brightest channel, so an
//! RGB -> HSL -> RGB round trip is exact up to floating-point error.

/// A color in the hue/saturation/lightness model.
///
/// All components are in `[0.0, 1.0]`. Hue is cyclic: `0.0` and `1.0`
/// denote the same point on the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Position on the color wheel.
    pub hue: f64,
    /// Chromatic intensity. Zero means achromatic (gray, black, white).
    pub saturation: f64,
    /// Brightness of the strongest channel.
    pub lightness: f64,
}

/// A color with red, green and blue components on the 0-255 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red channel.
    pub red: f64,
    /// Green channel.
    pub green: f64,
    /// Blue channel.
    pub blue: f64,
}

impl Rgb {
    /// Create a color from 0-255 components.
    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Create a color from 8-bit channels.
    #[must_use]
    pub fn from_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(f64::from(red), f64::from(green), f64::from(blue))
    }

    /// Round each component to the nearest 8-bit channel value.
    #[must_use]
    pub fn to_u8(self) -> [u8; 3] {
        [
            to_channel(self.red),
            to_channel(self.green),
            to_channel(self.blue),
        ]
    }
}

/// Which channel holds the maximum component.
///
/// When two or more channels tie for the maximum, the first one in the
/// order red, green, blue wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxChannel {
    /// Red is the (first) largest channel.
    Red,
    /// Green is the (first) largest channel.
    Green,
    /// Blue is the largest channel.
    Blue,
}

impl MaxChannel {
    /// Classify normalized channels by their maximum.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn of(red: f64, green: f64, blue: f64) -> Self {
        let max = red.max(green).max(blue);
        if red == max {
            Self::Red
        } else if green == max {
            Self::Green
        } else {
            Self::Blue
        }
    }
}

/// Convert 0-255 RGB components to HSL.
///
/// Achromatic inputs (all channels equal) map to hue `0.0` and
/// saturation `0.0`; their original hue is unrecoverable.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.red / 255.0;
    let g = rgb.green / 255.0;
    let b = rgb.blue / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return Hsl {
            hue: 0.0,
            saturation: 0.0,
            lightness: max,
        };
    }

    let saturation = delta / max;

    let partial = |channel: f64| ((max - channel) / 6.0 + delta / 2.0) / delta;
    let dr = partial(r);
    let dg = partial(g);
    let db = partial(b);

    let mut hue = match MaxChannel::of(r, g, b) {
        MaxChannel::Red => db - dg,
        MaxChannel::Green => 1.0 / 3.0 + dr - db,
        MaxChannel::Blue => 2.0 / 3.0 + dg - dr,
    };

    // The partial terms are bounded, so a single wrap suffices.
    if hue < 0.0 {
        hue += 1.0;
    }
    if hue > 1.0 {
        hue -= 1.0;
    }

    Hsl {
        hue,
        saturation,
        lightness: max,
    }
}

/// Convert HSL back to 0-255 RGB components.
///
/// `hsl.hue` must already be normalized into `[0.0, 1.0)`. Sector
/// indices outside `0..=5` (possible only at exact numeric boundaries)
/// fall back to the last sector.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let Hsl {
        hue,
        saturation: s,
        lightness: l,
    } = hsl;

    if s == 0.0 {
        let gray = l * 255.0;
        return Rgb::new(gray, gray, gray);
    }

    let sector = hue * 6.0;
    let index = sector.floor();
    let fraction = sector - index;

    let v1 = l * (1.0 - s);
    let v2 = l * s.mul_add(-fraction, 1.0);
    let v3 = l * s.mul_add(-(1.0 - fraction), 1.0);

    let (r, g, b) = match index as i64 {
        0 => (l, v3, v1),
        1 => (v2, l, v1),
        2 => (v1, l, v3),
        3 => (v1, v2, l),
        4 => (v3, v1, l),
        _ => (l, v1, v2),
    };

    Rgb::new(r * 255.0, g * 255.0, b * 255.0)
}

/// Round a 0-255 component to an 8-bit channel, clamping out-of-range
/// and non-finite values.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn hsl_of(r: u8, g: u8, b: u8) -> Hsl {
        rgb_to_hsl(Rgb::from_u8(r, g, b))
    }

    #[test]
    fn primaries_land_on_thirds() {
        assert_abs_diff_eq!(hsl_of(255, 0, 0).hue, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hsl_of(0, 255, 0).hue, 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hsl_of(0, 0, 255).hue, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn secondaries_land_on_sixths() {
        assert_abs_diff_eq!(hsl_of(255, 255, 0).hue, 1.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hsl_of(0, 255, 255).hue, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(hsl_of(255, 0, 255).hue, 5.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn achromatic_has_zero_hue_and_saturation() {
        for v in [0u8, 1, 128, 254, 255] {
            let hsl = hsl_of(v, v, v);
            assert_abs_diff_eq!(hsl.hue, 0.0);
            assert_abs_diff_eq!(hsl.saturation, 0.0);
            assert_abs_diff_eq!(hsl.lightness, f64::from(v) / 255.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn saturation_and_lightness_of_dark_orange() {
        let hsl = hsl_of(200, 100, 0);
        assert_abs_diff_eq!(hsl.saturation, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hsl.lightness, 200.0 / 255.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hsl.hue, 100.0 / 200.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn hue_stays_in_unit_interval() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(15) {
                    let hsl = hsl_of(r, g, b);
                    assert!((0.0..1.0).contains(&hsl.hue), "hue {} for {r},{g},{b}", hsl.hue);
                    assert!((0.0..=1.0).contains(&hsl.saturation));
                    assert!((0.0..=1.0).contains(&hsl.lightness));
                }
            }
        }
    }

    #[test]
    fn max_channel_tie_break_prefers_red_then_green() {
        assert_eq!(MaxChannel::of(1.0, 1.0, 1.0), MaxChannel::Red);
        assert_eq!(MaxChannel::of(0.5, 1.0, 1.0), MaxChannel::Green);
        assert_eq!(MaxChannel::of(0.5, 0.2, 1.0), MaxChannel::Blue);
        assert_eq!(MaxChannel::of(1.0, 0.2, 1.0), MaxChannel::Red);
    }

    #[test]
    fn round_trip_recovers_rgb() {
        for r in (0..=255u8).step_by(5) {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(5) {
                    let back = hsl_to_rgb(hsl_of(r, g, b));
                    assert_abs_diff_eq!(back.red, f64::from(r), epsilon = 1e-9);
                    assert_abs_diff_eq!(back.green, f64::from(g), epsilon = 1e-9);
                    assert_abs_diff_eq!(back.blue, f64::from(b), epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn zero_saturation_is_gray() {
        let rgb = hsl_to_rgb(Hsl {
            hue: 0.7,
            saturation: 0.0,
            lightness: 0.5,
        });
        assert_eq!(rgb.to_u8(), [128, 128, 128]);
    }

    #[test]
    fn sector_six_falls_back_to_last_sector() {
        // hue == 1.0 is outside the normalized range; the table still
        // produces a color instead of failing.
        let rgb = hsl_to_rgb(Hsl {
            hue: 1.0,
            saturation: 1.0,
            lightness: 1.0,
        });
        assert_eq!(rgb.to_u8(), [255, 0, 255]);
    }

    #[test]
    fn to_channel_rounds_and_clamps() {
        assert_eq!(to_channel(127.5), 128);
        assert_eq!(to_channel(127.49), 127);
        assert_eq!(to_channel(-3.0), 0);
        assert_eq!(to_channel(300.0), 255);
        assert_eq!(to_channel(f64::NAN), 0);
        assert_eq!(to_channel(f64::INFINITY), 255);
    }
}
