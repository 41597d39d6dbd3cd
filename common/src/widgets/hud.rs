//! Speed HUD block: current speed, the MAX set-speed badge, and the
//! jurisdiction-specific speed-limit sign.
//!
//! Badge and sign geometry follows the sign style and digit count:
//!
//! | Variant              | Badge size  |
//! |----------------------|-------------|
//! | no limit, imperial   | 172 x 204   |
//! | no limit, metric     | 200 x 204   |
//! | MUTCD limit shown    | 223 x 402   |
//! | Vienna limit shown   | 200 x 392   |

use core::fmt::Write;

use embedded_graphics::prelude::*;
use heapless::String;

use crate::colors::{
    MAX_CAPTION_STOPS, Rgba, SET_SPEED_STOPS, black, interp_color, red, white,
};
use crate::config::SET_SPEED_NA;
use crate::frame::OverlayFrame;
use crate::state::DerivedHudState;
use crate::styles::{CAPTION_FONT, SET_SPEED_FONT, SIGN_SMALL_FONT, SPEED_FONT, UNIT_FONT};
use crate::telemetry::SpeedLimitSign;
use crate::widgets::primitives::{draw_text_centered, fill_circle, fill_rounded_rect, stroke_rounded_rect};

// =============================================================================
// Layout Constants
// =============================================================================

const BADGE_X: i32 = 60;
const BADGE_Y: i32 = 45;
const BADGE_RADIUS: u32 = 32;
/// Vienna badges round off generously at the bottom to hug the circle.
const BADGE_BOTTOM_RADIUS_VIENNA: u32 = 100;
const BADGE_BORDER_WIDTH: u32 = 6;

const BADGE_DEFAULT: Size = Size::new(172, 204);
const BADGE_METRIC: Size = Size::new(200, 204);
const BADGE_MUTCD: Size = Size::new(223, 402);
const BADGE_VIENNA: Size = Size::new(200, 392);

const MUTCD_SIGN_HEIGHT: u32 = 186;
const MUTCD_SIGN_MARGIN: i32 = 12;
const MUTCD_OUTER_RADIUS: u32 = 24;
const MUTCD_INNER_RADIUS: u32 = 16;

const VIENNA_OUTER_RADIUS: u32 = 88;
const VIENNA_RING_WIDTH: u32 = 20;

const SPEED_Y: i32 = 210;
const SPEED_UNIT_Y: i32 = 290;

/// A speed limit below this is "unknown"; the sign is not drawn.
const SPEED_LIMIT_MIN: f32 = 1.0;

/// Thresholds above the limit at which the badge color shifts.
const LIMIT_OFFSETS: [f32; 3] = [5.0, 15.0, 25.0];

const MAX_CAPTION_IDLE: Rgba = Rgba::rgb(0xa6, 0xa6, 0xa6);
const SET_SPEED_IDLE: Rgba = Rgba::rgb(0x72, 0x72, 0x72);
const MAX_CAPTION_OVERRIDE: Rgba = Rgba::rgb(0x91, 0x9b, 0x95);

// =============================================================================
// Drawing
// =============================================================================

pub fn draw_hud(frame: &mut OverlayFrame, hud: &DerivedHudState) {
    draw_set_speed_badge(frame, hud);
    draw_current_speed(frame, hud);
}

fn badge_size(hud: &DerivedHudState) -> Size {
    let mut width = if hud.is_metric { BADGE_METRIC.width } else { BADGE_DEFAULT.width };
    let mut height = BADGE_DEFAULT.height;
    if hud.speed_limit > SPEED_LIMIT_MIN {
        match hud.speed_limit_sign {
            SpeedLimitSign::Mutcd => {
                height = BADGE_MUTCD.height;
                // the wide card is only needed once the limit hits three digits
                if hud.speed_limit.round() >= 100.0 {
                    width = BADGE_MUTCD.width;
                }
            }
            SpeedLimitSign::Vienna => {
                width = BADGE_VIENNA.width;
                height = BADGE_VIENNA.height;
            }
            SpeedLimitSign::None => {}
        }
    }
    Size::new(width, height)
}

/// Caption and value colors for the MAX badge. When cruising with a known
/// limit, both blend continuously across the limit+5/+15/+25 thresholds
/// rather than switching at hard cutoffs.
pub fn badge_colors(hud: &DerivedHudState) -> (Rgba, Rgba) {
    use crate::alerts::VehicleStatus;

    if !hud.is_cruise_set {
        return (MAX_CAPTION_IDLE, SET_SPEED_IDLE);
    }
    match hud.status {
        VehicleStatus::Disengaged => (white(255), white(255)),
        VehicleStatus::Override => (MAX_CAPTION_OVERRIDE, white(255)),
        _ if hud.speed_limit > SPEED_LIMIT_MIN => {
            let xp = LIMIT_OFFSETS.map(|o| hud.speed_limit + o);
            (
                interp_color(hud.set_speed, &xp, &MAX_CAPTION_STOPS),
                interp_color(hud.set_speed, &xp, &SET_SPEED_STOPS),
            )
        }
        _ => (MAX_CAPTION_STOPS[0], white(255)),
    }
}

fn draw_set_speed_badge(frame: &mut OverlayFrame, hud: &DerivedHudState) {
    let size = badge_size(hud);
    let top_left = Point::new(
        BADGE_X + (BADGE_DEFAULT.width as i32 - size.width as i32) / 2,
        BADGE_Y,
    );
    let is_vienna = size == BADGE_VIENNA;
    let bottom_radius = if is_vienna { BADGE_BOTTOM_RADIUS_VIENNA } else { BADGE_RADIUS };

    fill_rounded_rect(frame, top_left, size, BADGE_RADIUS, bottom_radius, black(166));
    stroke_rounded_rect(frame, top_left, size, BADGE_RADIUS, BADGE_BORDER_WIDTH, white(75));

    let (max_color, set_speed_color) = badge_colors(hud);
    let cx = top_left.x + size.width as i32 / 2;
    draw_text_centered(frame, "MAX", Point::new(cx, top_left.y + 55), CAPTION_FONT, max_color);

    let mut value: String<8> = String::new();
    if hud.is_cruise_set && hud.set_speed != SET_SPEED_NA {
        let _ = write!(value, "{:.0}", hud.set_speed);
    } else {
        let _ = value.push('-');
    }
    draw_text_centered(frame, &value, Point::new(cx, top_left.y + 130), SET_SPEED_FONT, set_speed_color);

    if hud.speed_limit > SPEED_LIMIT_MIN {
        match hud.speed_limit_sign {
            SpeedLimitSign::Mutcd => draw_mutcd_sign(frame, hud, top_left, size),
            SpeedLimitSign::Vienna => draw_vienna_sign(frame, hud, top_left, size),
            SpeedLimitSign::None => {}
        }
    }
}

/// Rectangular US/Canada sign: white card, black inner border, SPEED and
/// LIMIT captions above the value.
fn draw_mutcd_sign(frame: &mut OverlayFrame, hud: &DerivedHudState, badge: Point, badge_size: Size) {
    let top_left = Point::new(
        badge.x + MUTCD_SIGN_MARGIN,
        badge.y + (badge_size.height - MUTCD_SIGN_HEIGHT) as i32 - MUTCD_SIGN_MARGIN,
    );
    let size = Size::new(badge_size.width - 2 * MUTCD_SIGN_MARGIN as u32, MUTCD_SIGN_HEIGHT);

    fill_rounded_rect(frame, top_left, size, MUTCD_OUTER_RADIUS, MUTCD_OUTER_RADIUS, white(255));
    stroke_rounded_rect(
        frame,
        top_left + Point::new(9, 9),
        size - Size::new(18, 18),
        MUTCD_INNER_RADIUS,
        BADGE_BORDER_WIDTH,
        black(255),
    );

    let cx = top_left.x + size.width as i32 / 2;
    draw_text_centered(frame, "SPEED", Point::new(cx, top_left.y + 45), CAPTION_FONT, black(255));
    draw_text_centered(frame, "LIMIT", Point::new(cx, top_left.y + 75), CAPTION_FONT, black(255));

    let mut value: String<8> = String::new();
    let _ = write!(value, "{:.0}", hud.speed_limit);
    draw_text_centered(frame, &value, Point::new(cx, top_left.y + 135), SET_SPEED_FONT, black(255));
}

/// Circular EU sign: white disc with a red ring; the value font shrinks
/// once the limit needs three digits.
fn draw_vienna_sign(frame: &mut OverlayFrame, hud: &DerivedHudState, badge: Point, badge_size: Size) {
    let center = Point::new(
        badge.x + badge_size.width as i32 / 2,
        badge.y + badge_size.height as i32 - VIENNA_OUTER_RADIUS as i32 - MUTCD_SIGN_MARGIN,
    );

    fill_circle(frame, center, VIENNA_OUTER_RADIUS, white(255));
    fill_circle(frame, center, VIENNA_OUTER_RADIUS - BADGE_BORDER_WIDTH / 2, Rgba::rgb(255, 0, 0));
    fill_circle(frame, center, VIENNA_OUTER_RADIUS - BADGE_BORDER_WIDTH / 2 - VIENNA_RING_WIDTH, white(255));

    let mut value: String<8> = String::new();
    let _ = write!(value, "{:.0}", hud.speed_limit);
    let font = if value.len() >= 3 { SIGN_SMALL_FONT } else { SET_SPEED_FONT };
    draw_text_centered(frame, &value, center, font, black(255));
}

fn draw_current_speed(frame: &mut OverlayFrame, hud: &DerivedHudState) {
    let cx = frame.size().width as i32 / 2;
    let color = if hud.is_braking { red(255) } else { white(255) };

    let mut value: String<8> = String::new();
    let _ = write!(value, "{:.0}", hud.speed);
    draw_text_centered(frame, &value, Point::new(cx, SPEED_Y), SPEED_FONT, color);
    draw_text_centered(frame, hud.speed_unit, Point::new(cx, SPEED_UNIT_Y), UNIT_FONT, white(200));
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::VehicleStatus;

    fn cruising(set_speed: f32, speed_limit: f32) -> DerivedHudState {
        DerivedHudState {
            is_cruise_set: true,
            set_speed,
            speed_limit,
            speed_limit_sign: SpeedLimitSign::Mutcd,
            status: VehicleStatus::Engaged,
            speed_unit: "mph",
            ..Default::default()
        }
    }

    #[test]
    fn test_badge_color_below_first_threshold_is_unblended() {
        // limit 65, set 68: below the limit+5 boundary, so the nominal
        // color, reached via interpolation clamping rather than a branch
        let (max_color, value_color) = badge_colors(&cruising(68.0, 65.0));
        assert_eq!(max_color, MAX_CAPTION_STOPS[0]);
        assert_eq!(value_color, SET_SPEED_STOPS[0]);
    }

    #[test]
    fn test_badge_color_blends_between_thresholds() {
        let (mid, _) = badge_colors(&cruising(75.0, 65.0));
        assert_ne!(mid, MAX_CAPTION_STOPS[0], "inside the band the color must blend");
        assert_ne!(mid, MAX_CAPTION_STOPS[1]);
    }

    #[test]
    fn test_badge_color_clamps_far_over_limit() {
        let (max_color, value_color) = badge_colors(&cruising(120.0, 65.0));
        assert_eq!(max_color, MAX_CAPTION_STOPS[2]);
        assert_eq!(value_color, SET_SPEED_STOPS[2]);
    }

    #[test]
    fn test_idle_badge_uses_grey() {
        let hud = DerivedHudState { is_cruise_set: false, ..Default::default() };
        assert_eq!(badge_colors(&hud), (MAX_CAPTION_IDLE, SET_SPEED_IDLE));
    }

    #[test]
    fn test_badge_size_follows_sign_style() {
        // 2-digit US limit keeps the narrow card, just taller
        assert_eq!(badge_size(&cruising(68.0, 65.0)), Size::new(172, 402));
        // 3-digit US limit takes the wide card
        assert_eq!(badge_size(&cruising(110.0, 105.0)), BADGE_MUTCD);

        let mut eu = cruising(68.0, 65.0);
        eu.speed_limit_sign = SpeedLimitSign::Vienna;
        assert_eq!(badge_size(&eu), BADGE_VIENNA);

        let mut no_limit = cruising(68.0, 0.0);
        no_limit.is_metric = true;
        assert_eq!(badge_size(&no_limit), BADGE_METRIC);
        no_limit.is_metric = false;
        assert_eq!(badge_size(&no_limit), BADGE_DEFAULT);
    }

    #[test]
    fn test_metric_mutcd_badge_keeps_metric_width() {
        let mut hud = cruising(95.0, 90.0);
        hud.is_metric = true;
        assert_eq!(badge_size(&hud), Size::new(200, 402), "metric width survives a 2-digit US sign");
    }

    #[test]
    fn test_hud_draws_without_panicking_on_sentinel() {
        let mut frame = OverlayFrame::new(512, 512);
        let hud = DerivedHudState {
            set_speed: SET_SPEED_NA,
            is_cruise_set: false,
            speed_unit: "km/h",
            ..Default::default()
        };
        draw_hud(&mut frame, &hud);
    }
}
