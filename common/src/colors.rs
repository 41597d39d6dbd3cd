//! Overlay colors: RGBA values, status palette, and interpolation.
//!
//! The overlay is composited over a live camera frame, so unlike an opaque
//! dashboard every color carries an alpha channel. [`Rgba`] is the working
//! color type; it blends onto the `Rgb888` framebuffer with source-over
//! compositing in [`crate::frame`].
//!
//! Two interpolation helpers live here:
//! - [`interp_color`]: continuous multi-stop blend used by the set-speed
//!   badge (limit +5/+15/+25 thresholds blend instead of hard-switching).
//! - [`Rgba::from_hslf`]: HSL construction for the path-gradient hues.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

/// An 8-bit RGBA color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Opaque part of the color as a framebuffer pixel value.
    pub const fn rgb888(self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }

    /// Source-over blend of `self` onto an opaque destination pixel.
    pub fn over(self, dst: Rgb888) -> Rgb888 {
        let a = u16::from(self.a);
        let blend = |s: u8, d: u8| -> u8 { ((u16::from(s) * a + u16::from(d) * (255 - a)) / 255) as u8 };
        Rgb888::new(blend(self.r, dst.r()), blend(self.g, dst.g()), blend(self.b, dst.b()))
    }

    /// Per-channel linear blend toward `other`, `t` in `[0, 1]`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 { (f32::from(a) + t * (f32::from(b) - f32::from(a)) + 0.5) as u8 };
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Construct from fractional HSLA components, all in `[0, 1]`.
    ///
    /// Hue is a fraction of the circle (`h = degrees / 360`), matching the
    /// gradient stops of the predicted-path fill.
    pub fn from_hslf(h: f32, s: f32, l: f32, a: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s.clamp(0.0, 1.0);
        let hp = h * 6.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to8 = |v: f32| -> u8 { ((v + m).clamp(0.0, 1.0) * 255.0 + 0.5) as u8 };
        Self::new(to8(r1), to8(g1), to8(b1), (a.clamp(0.0, 1.0) * 255.0 + 0.5) as u8)
    }
}

// =============================================================================
// Base Palette
// =============================================================================

/// Warm HUD red used for chevrons, road edges, and the braking speed value.
pub const fn red(alpha: u8) -> Rgba {
    Rgba::new(201, 34, 49, alpha)
}

pub const fn white(alpha: u8) -> Rgba {
    Rgba::new(255, 255, 255, alpha)
}

pub const fn black(alpha: u8) -> Rgba {
    Rgba::new(0, 0, 0, alpha)
}

/// Panel warning orange (moderate steering angle, closing lead).
pub const ORANGE: Rgba = Rgba::rgb(255, 188, 0);

/// Panel alert red (large steering angle, very close lead).
pub const ALERT_RED: Rgba = Rgba::rgb(255, 0, 0);

/// Outer glow of the lead indicator glyph.
pub const LEAD_GLOW: Rgba = Rgba::rgb(218, 202, 37);

/// Tire-pressure warning text color.
pub const TPMS_WARN: Rgba = Rgba::new(255, 90, 90, 220);

/// Tire-pressure normal / not-available text color.
pub const TPMS_NORMAL: Rgba = Rgba::new(255, 255, 255, 220);

// =============================================================================
// Set-Speed Badge Stops
// =============================================================================

/// "MAX" caption stops while within / near / above the speed limit.
pub const MAX_CAPTION_STOPS: [Rgba; 3] =
    [Rgba::rgb(0x80, 0xd8, 0xa6), Rgba::rgb(0xff, 0xe4, 0xbf), Rgba::rgb(0xff, 0xbf, 0xbf)];

/// Set-speed value stops while within / near / above the speed limit.
pub const SET_SPEED_STOPS: [Rgba; 3] =
    [white(255), Rgba::rgb(0xff, 0x95, 0x00), Rgba::rgb(0xff, 0x00, 0x00)];

// =============================================================================
// Interpolation
// =============================================================================

/// Piecewise-linear interpolation between color stops.
///
/// `xp` must be sorted ascending and the same length as `fp`. Values below
/// the first stop clamp to the first color; values above the last stop
/// clamp to the last color; in between each channel blends linearly.
pub fn interp_color(xv: f32, xp: &[f32], fp: &[Rgba]) -> Rgba {
    debug_assert_eq!(xp.len(), fp.len());
    debug_assert!(!xp.is_empty());

    let n = xp.len();
    let mut hi = 0;
    while hi < n && xv > xp[hi] {
        hi += 1;
    }
    if hi == 0 {
        return fp[0];
    }
    if hi == n {
        return fp[n - 1];
    }

    let low = hi - 1;
    let t = (xv - xp[low]) / (xp[hi] - xp[low]);
    let lerp = |a: u8, b: u8| -> u8 { (f32::from(a) + t * (f32::from(b) - f32::from(a))) as u8 };
    Rgba::new(
        lerp(fp[low].r, fp[hi].r),
        lerp(fp[low].g, fp[hi].g),
        lerp(fp[low].b, fp[hi].b),
        lerp(fp[low].a, fp[hi].a),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_opaque_replaces() {
        let dst = Rgb888::new(10, 20, 30);
        assert_eq!(Rgba::rgb(200, 100, 50).over(dst), Rgb888::new(200, 100, 50));
    }

    #[test]
    fn test_over_transparent_keeps_destination() {
        let dst = Rgb888::new(10, 20, 30);
        assert_eq!(Rgba::new(200, 100, 50, 0).over(dst), dst);
    }

    #[test]
    fn test_over_half_alpha_is_midpoint() {
        let dst = Rgb888::new(0, 0, 0);
        let out = Rgba::new(255, 255, 255, 128).over(dst);
        assert!((i32::from(out.r()) - 128).abs() <= 1, "half-alpha white over black ~ mid gray");
    }

    #[test]
    fn test_hsl_primaries() {
        // Hue 0 = red, 1/3 = green, 2/3 = blue at full saturation, mid lightness
        assert_eq!(Rgba::from_hslf(0.0, 1.0, 0.5, 1.0), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::from_hslf(1.0 / 3.0, 1.0, 0.5, 1.0), Rgba::rgb(0, 255, 0));
        assert_eq!(Rgba::from_hslf(2.0 / 3.0, 1.0, 0.5, 1.0), Rgba::rgb(0, 0, 255));
    }

    #[test]
    fn test_hsl_zero_saturation_is_gray() {
        let c = Rgba::from_hslf(0.42, 0.0, 0.5, 1.0);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn test_interp_color_clamps_below_first_stop() {
        // Scenario C: set speed 68 with limit 65 is below the first stop at
        // 70, so the badge stays on the first segment's start color instead
        // of jumping to a blended or warning color.
        let c = interp_color(68.0, &[70.0, 80.0, 90.0], &SET_SPEED_STOPS);
        assert_eq!(c, SET_SPEED_STOPS[0], "below first stop clamps to first color");
    }

    #[test]
    fn test_interp_color_clamps_above_last_stop() {
        let c = interp_color(120.0, &[70.0, 80.0, 90.0], &SET_SPEED_STOPS);
        assert_eq!(c, SET_SPEED_STOPS[2], "above last stop clamps to last color");
    }

    #[test]
    fn test_interp_color_blends_between_stops() {
        let c = interp_color(75.0, &[70.0, 80.0, 90.0], &SET_SPEED_STOPS);
        // Midway between white and orange: every channel strictly between
        assert!(c.r == 255, "red channel equal at both stops");
        assert!(c.g > SET_SPEED_STOPS[1].g && c.g < SET_SPEED_STOPS[0].g, "green mid-blend");
        assert!(c.b > SET_SPEED_STOPS[1].b && c.b < SET_SPEED_STOPS[0].b, "blue mid-blend");
    }

    #[test]
    fn test_interp_color_exact_stop() {
        let stops = [70.0, 80.0, 90.0];
        assert_eq!(interp_color(70.0, &stops, &SET_SPEED_STOPS), SET_SPEED_STOPS[0]);
        assert_eq!(interp_color(90.0, &stops, &SET_SPEED_STOPS), SET_SPEED_STOPS[2]);
    }
}
