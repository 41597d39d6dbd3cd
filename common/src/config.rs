//! Layout, timing, and sentinel constants for the onroad HUD.
//!
//! Threshold groups carry compile-time ordering assertions so a
//! misconfigured constant fails the build instead of silently miscoloring
//! the display.

use std::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Framebuffer width in pixels (matches the road-camera device panel).
pub const SCREEN_WIDTH: u32 = 2160;

/// Framebuffer height in pixels.
pub const SCREEN_HEIGHT: u32 = 1080;

/// Border margin around the annotated camera view, in pixels. The alert
/// band is inset by this margin.
pub const BORDER_SIZE: i32 = 30;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Nominal UI update rate in Hz. Telemetry ticks and the render loop both
/// target this cadence; the turn-signal clock and the 2 Hz property
/// downshift are derived from it.
pub const UI_FREQ: u32 = 20;

/// Target frame time at `UI_FREQ` (50 ms). The simulator loop sleeps if a
/// frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(1000 / UI_FREQ as u64);

/// Low-priority derived properties (tire pressures, GPS quality,
/// driver-monitoring state) refresh only when
/// `frame % PROPERTY_DOWNSHIFT_INTERVAL == 0`, i.e. at 2 Hz.
pub const PROPERTY_DOWNSHIFT_INTERVAL: u64 = (UI_FREQ / 2) as u64;

/// Smoothed frame rate below which the watchdog logs a warning.
pub const MIN_FPS_WARN: f32 = 15.0;

const _: () = assert!(UI_FREQ > 0);
const _: () = assert!(PROPERTY_DOWNSHIFT_INTERVAL > 0);

// =============================================================================
// Sentinels
// =============================================================================

/// Set-speed sentinel meaning "not available" (rendered as a dash glyph).
/// Distinct from a valid zero reading.
pub const SET_SPEED_NA: f32 = 255.0;

// =============================================================================
// Tire Pressure Thresholds (psi)
// =============================================================================

/// Readings below this are sensor noise / missing sensors: not available.
pub const TPMS_MIN_VALID: f32 = 5.0;

/// Readings above this are implausible: not available.
pub const TPMS_MAX_VALID: f32 = 60.0;

/// Below this pressure the wheel value is drawn in the warning color.
pub const TPMS_WARNING: f32 = 31.0;

const _: () = assert!(TPMS_MIN_VALID < TPMS_WARNING);
const _: () = assert!(TPMS_WARNING < TPMS_MAX_VALID);

// =============================================================================
// Lead Vehicle Thresholds
// =============================================================================

/// A model lead is drawn only above this detection probability.
pub const LEAD_PROB_MIN: f32 = 0.5;

/// Minimum longitudinal separation (distance units) for the second lead to
/// be considered distinct from the first.
pub const LEAD_MIN_SEPARATION: f32 = 3.0;

// =============================================================================
// Steering Angle Thresholds (degrees)
// =============================================================================

/// Moderate steering angle: panel value turns orange.
pub const STEER_ANGLE_WARN: f32 = 6.0;

/// Large steering angle: panel value turns red.
pub const STEER_ANGLE_ALERT: f32 = 12.0;

const _: () = assert!(STEER_ANGLE_WARN < STEER_ANGLE_ALERT);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time_matches_ui_freq() {
        assert_eq!(FRAME_TIME, Duration::from_millis(50), "20 Hz = 50 ms per frame");
    }

    #[test]
    fn test_downshift_interval_is_2hz() {
        // UI_FREQ / 2 ticks between refreshes = 2 Hz at the nominal rate
        assert_eq!(PROPERTY_DOWNSHIFT_INTERVAL, 10);
    }

    #[test]
    fn test_tpms_threshold_ordering() {
        assert!(TPMS_MIN_VALID < TPMS_WARNING);
        assert!(TPMS_WARNING < TPMS_MAX_VALID);
    }

    #[test]
    fn test_set_speed_sentinel_is_not_a_plausible_speed() {
        // 255 km/h or mph is above any set-speed the cruise control accepts
        assert!(SET_SPEED_NA > 200.0);
    }
}
