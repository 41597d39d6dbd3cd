//! Diagnostic side panels: lead kinematics, steering, engine RPM, GPS
//! quality, and tire pressures.
//!
//! Each row is an independent label + value + unit triple; value colors
//! switch at per-signal thresholds.
//!
//! | Row         | Orange            | Red               |
//! |-------------|-------------------|-------------------|
//! | REL DIST    | < 15 m            | < 5 m             |
//! | REL SPEED   | closing           | closing > 10 mph  |
//! | REAL STEER  | magnitude > 6     | magnitude > 12    |
//! | DESIR STEER | magnitude > 6     | magnitude > 12    |

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;

use crate::alerts::VehicleStatus;
use crate::colors::{ALERT_RED, ORANGE, Rgba, TPMS_NORMAL, TPMS_WARN, white};
use crate::config::{
    STEER_ANGLE_ALERT, STEER_ANGLE_WARN, TPMS_MAX_VALID, TPMS_MIN_VALID, TPMS_WARNING,
};
use crate::frame::OverlayFrame;
use crate::state::DerivedHudState;
use crate::styles::{LEFT_ALIGNED, PANEL_FONT, PANEL_LABEL_STYLE, RIGHT_ALIGNED};
use crate::units::{MS_TO_KPH, MS_TO_MPH};

/// Closing speed treated as critical: 10 mph expressed in m/s.
const REL_SPEED_ALERT: f32 = -4.4704;

const PANEL_WIDTH: i32 = 300;
const PANEL_TOP: i32 = 80;
const ROW_HEIGHT: i32 = 36;

// =============================================================================
// Threshold Colors
// =============================================================================

pub fn rel_dist_color(d_rel: f32) -> Rgba {
    if d_rel < 5.0 {
        ALERT_RED
    } else if d_rel < 15.0 {
        ORANGE
    } else {
        white(255)
    }
}

pub fn rel_speed_color(v_rel: f32) -> Rgba {
    if v_rel < REL_SPEED_ALERT {
        ALERT_RED
    } else if v_rel < 0.0 {
        ORANGE
    } else {
        white(255)
    }
}

pub fn steer_angle_color(angle_deg: f32) -> Rgba {
    if angle_deg.abs() > STEER_ANGLE_ALERT {
        ALERT_RED
    } else if angle_deg.abs() > STEER_ANGLE_WARN {
        ORANGE
    } else {
        white(255)
    }
}

/// Tire-pressure value color: out-of-range readings show as plain
/// not-available white, low pressure as the warning red.
pub fn tpms_color(pressure: f32) -> Rgba {
    if !(TPMS_MIN_VALID..=TPMS_MAX_VALID).contains(&pressure) {
        TPMS_NORMAL
    } else if pressure < TPMS_WARNING {
        TPMS_WARN
    } else {
        TPMS_NORMAL
    }
}

/// Tire-pressure value text; empty for out-of-range readings.
pub fn tpms_text(pressure: f32) -> String<8> {
    let mut s = String::new();
    if (TPMS_MIN_VALID..=TPMS_MAX_VALID).contains(&pressure) {
        let _ = write!(s, "{pressure:.0}");
    }
    s
}

/// Bearing row text: compass direction plus degrees, or "OFF" while the
/// receiver reports no usable heading (zero accuracy).
pub fn bearing_text(bearing_deg: f32, accuracy_deg: f32) -> String<24> {
    let mut s = String::new();
    if accuracy_deg == 0.0 {
        let _ = s.push_str("OFF");
    } else {
        let _ = write!(s, "{} {:.0}", compass_direction(bearing_deg), bearing_deg);
    }
    s
}

/// 16-point compass direction for a bearing in degrees.
pub fn compass_direction(bearing_deg: f32) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    let idx = ((bearing_deg.rem_euclid(360.0) / 22.5) + 0.5) as usize % 16;
    POINTS[idx]
}

// =============================================================================
// Drawing
// =============================================================================

pub fn draw_panels(frame: &mut OverlayFrame, hud: &DerivedHudState) {
    let x = frame.size().width as i32 - PANEL_WIDTH;
    let mut y = PANEL_TOP;

    let mut value: String<24> = String::new();

    // lead kinematics from the radar-fused track
    if hud.lead_status {
        let _ = write!(value, "{:.1} m", hud.lead_d_rel);
    } else {
        let _ = value.push('-');
    }
    draw_row(frame, x, y, "REL DIST", &value, rel_dist_color(hud.lead_d_rel));
    y += ROW_HEIGHT;

    value.clear();
    if hud.lead_status {
        let (factor, unit) = if hud.is_metric { (MS_TO_KPH, "km/h") } else { (MS_TO_MPH, "mph") };
        let _ = write!(value, "{:.1} {unit}", hud.lead_v_rel * factor);
    } else {
        let _ = value.push('-');
    }
    draw_row(frame, x, y, "REL SPEED", &value, rel_speed_color(hud.lead_v_rel));
    y += ROW_HEIGHT;

    value.clear();
    let _ = write!(value, "{:.1} deg", hud.steering_angle_deg);
    draw_row(frame, x, y, "REAL STEER", &value, steer_angle_color(hud.steering_angle_deg));
    y += ROW_HEIGHT;

    value.clear();
    // desired angle only means something while the controller is active
    let desired_color = if hud.status == VehicleStatus::Disengaged {
        let _ = value.push('-');
        white(255)
    } else {
        let _ = write!(value, "{:.1} deg", hud.steering_angle_desired_deg);
        steer_angle_color(hud.steering_angle_desired_deg)
    };
    draw_row(frame, x, y, "DESIR STEER", &value, desired_color);
    y += ROW_HEIGHT;

    value.clear();
    if hud.engine_rpm == 0.0 {
        let _ = value.push_str("OFF");
    } else {
        let _ = write!(value, "{:.0}", hud.engine_rpm);
    }
    draw_row(frame, x, y, "ENG RPM", &value, white(255));
    y += ROW_HEIGHT;

    value.clear();
    if hud.gps_sat_count == 0 {
        let _ = value.push_str("NO SAT");
    } else {
        let _ = write!(value, "{:.1}m ({})", hud.gps_accuracy, hud.gps_sat_count);
    }
    draw_row(frame, x, y, "GPS", &value, white(255));
    y += ROW_HEIGHT;

    value.clear();
    let _ = write!(value, "{:.0} m", hud.altitude);
    draw_row(frame, x, y, "ALTITUDE", &value, white(255));
    y += ROW_HEIGHT;

    draw_row(
        frame,
        x,
        y,
        "BEARING",
        &bearing_text(hud.bearing_deg, hud.bearing_accuracy_deg),
        white(255),
    );

    draw_tpms(frame, hud);
}

fn draw_row(frame: &mut OverlayFrame, x: i32, y: i32, label: &str, value: &str, color: Rgba) {
    Text::with_text_style(label, Point::new(x, y), PANEL_LABEL_STYLE, LEFT_ALIGNED)
        .draw(frame)
        .ok();
    let style = MonoTextStyle::new(PANEL_FONT, color.rgb888());
    Text::with_text_style(value, Point::new(x + PANEL_WIDTH - 20, y), style, RIGHT_ALIGNED)
        .draw(frame)
        .ok();
}

/// Four pressure readings in a 2x2 wheel layout at the bottom-left corner.
fn draw_tpms(frame: &mut OverlayFrame, hud: &DerivedHudState) {
    let h = frame.size().height as i32;
    let base = Point::new(40, h - 140);
    Text::with_text_style("TPMS", base, PANEL_LABEL_STYLE, LEFT_ALIGNED).draw(frame).ok();

    let offsets = [(0, 36), (90, 36), (0, 76), (90, 76)];
    for (pressure, (dx, dy)) in hud.tpms.iter().zip(offsets) {
        let style = MonoTextStyle::new(PANEL_FONT, tpms_color(*pressure).rgb888());
        Text::with_text_style(
            &tpms_text(*pressure),
            base + Point::new(dx, dy),
            style,
            LEFT_ALIGNED,
        )
        .draw(frame)
        .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tpms_color_bands() {
        // out of range reads as not-available white
        assert_eq!(tpms_color(3.0), TPMS_NORMAL);
        assert_eq!(tpms_color(65.0), TPMS_NORMAL);
        // low pressure warns
        assert_eq!(tpms_color(5.0), TPMS_WARN);
        assert_eq!(tpms_color(30.9), TPMS_WARN);
        // healthy range
        assert_eq!(tpms_color(31.0), TPMS_NORMAL);
        assert_eq!(tpms_color(36.0), TPMS_NORMAL);
        assert_eq!(tpms_color(60.0), TPMS_NORMAL);
    }

    #[test]
    fn test_tpms_text_empty_when_not_available() {
        assert!(tpms_text(3.0).is_empty());
        assert!(tpms_text(80.0).is_empty());
        assert_eq!(tpms_text(36.4).as_str(), "36");
    }

    #[test]
    fn test_rel_dist_thresholds() {
        assert_eq!(rel_dist_color(2.0), ALERT_RED);
        assert_eq!(rel_dist_color(10.0), ORANGE);
        assert_eq!(rel_dist_color(30.0), white(255));
    }

    #[test]
    fn test_rel_speed_thresholds() {
        assert_eq!(rel_speed_color(-6.0), ALERT_RED);
        assert_eq!(rel_speed_color(-1.0), ORANGE);
        assert_eq!(rel_speed_color(2.0), white(255));
    }

    #[test]
    fn test_steer_angle_thresholds_use_magnitude() {
        assert_eq!(steer_angle_color(13.0), ALERT_RED);
        assert_eq!(steer_angle_color(-13.0), ALERT_RED);
        assert_eq!(steer_angle_color(8.0), ORANGE);
        assert_eq!(steer_angle_color(-8.0), ORANGE);
        assert_eq!(steer_angle_color(3.0), white(255));
    }

    #[test]
    fn test_compass_direction_quadrants() {
        assert_eq!(compass_direction(0.0), "N");
        assert_eq!(compass_direction(90.0), "E");
        assert_eq!(compass_direction(180.0), "S");
        assert_eq!(compass_direction(270.0), "W");
        assert_eq!(compass_direction(22.5), "NNE");
        assert_eq!(compass_direction(359.0), "N");
        assert_eq!(compass_direction(-45.0), "NW", "negative bearings wrap");
    }

    #[test]
    fn test_bearing_reads_off_without_heading_accuracy() {
        assert_eq!(bearing_text(123.0, 0.0).as_str(), "OFF", "zero accuracy means no usable heading");
        assert_eq!(bearing_text(90.0, 1.0).as_str(), "E 90");
    }

    #[test]
    fn test_panels_draw_with_default_state() {
        let mut frame = OverlayFrame::new(2160, 1080);
        draw_panels(&mut frame, &DerivedHudState::default());
    }
}
