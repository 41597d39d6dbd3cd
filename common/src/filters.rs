//! Smoothing filters and the frame-rate watchdog.

use crate::config::{MIN_FPS_WARN, UI_FREQ};

/// First-order low-pass filter (exponential smoothing).
/// `k = dt / (rc + dt)`, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct FirstOrderFilter {
    x: f32,
    k: f32,
}

impl FirstOrderFilter {
    pub fn new(x0: f32, rc: f32, dt: f32) -> Self {
        Self { x: x0, k: dt / (rc + dt) }
    }

    pub fn update(&mut self, sample: f32) -> f32 {
        self.x = (1.0 - self.k) * self.x + self.k * sample;
        self.x
    }

    pub const fn value(&self) -> f32 {
        self.x
    }
}

/// Tracks the smoothed render rate and logs when it drops below the
/// warning threshold. Time is injected so the monitor is testable.
#[derive(Clone, Copy, Debug)]
pub struct FrameRateMonitor {
    fps: FirstOrderFilter,
    last_update_ms: Option<u64>,
}

impl FrameRateMonitor {
    pub fn new() -> Self {
        Self {
            fps: FirstOrderFilter::new(UI_FREQ as f32, 3.0, 1.0 / UI_FREQ as f32),
            last_update_ms: None,
        }
    }

    /// Record a completed frame at wall-clock `now_ms` and return the
    /// smoothed rate.
    pub fn frame_done(&mut self, now_ms: u64) -> f32 {
        if let Some(last) = self.last_update_ms {
            let dt_s = (now_ms.saturating_sub(last)) as f32 / 1000.0;
            if dt_s > 0.0 {
                self.fps.update(1.0 / dt_s);
            }
        }
        self.last_update_ms = Some(now_ms);

        let fps = self.fps.value();
        if fps < MIN_FPS_WARN {
            tracing::warn!(fps, "slow frame rate");
        }
        fps
    }

    pub const fn fps(&self) -> f32 {
        self.fps.value()
    }
}

impl Default for FrameRateMonitor {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_converges_to_constant_input() {
        let mut f = FirstOrderFilter::new(0.0, 3.0, 1.0 / UI_FREQ as f32);
        for _ in 0..2000 {
            f.update(20.0);
        }
        assert!((f.value() - 20.0).abs() < 0.01, "converges to the input, got {}", f.value());
    }

    #[test]
    fn test_filter_moves_monotonically_toward_input() {
        let mut f = FirstOrderFilter::new(0.0, 3.0, 0.05);
        let mut prev = f.value();
        for _ in 0..50 {
            let x = f.update(10.0);
            assert!(x > prev, "each step moves toward the target");
            assert!(x < 10.0, "never overshoots a constant target");
            prev = x;
        }
    }

    #[test]
    fn test_monitor_starts_at_nominal_rate() {
        let m = FrameRateMonitor::new();
        assert_eq!(m.fps(), UI_FREQ as f32);
    }

    #[test]
    fn test_monitor_tracks_slow_frames() {
        let mut m = FrameRateMonitor::new();
        let mut now = 0u64;
        // 10 fps cadence; smoothed rate decays below the warning line
        for _ in 0..200 {
            now += 100;
            m.frame_done(now);
        }
        assert!(m.fps() < MIN_FPS_WARN, "sustained 10 fps must drop below {MIN_FPS_WARN}, got {}", m.fps());
    }

    #[test]
    fn test_monitor_holds_at_nominal_cadence() {
        let mut m = FrameRateMonitor::new();
        let mut now = 0u64;
        for _ in 0..200 {
            now += 1000 / UI_FREQ as u64;
            m.frame_done(now);
        }
        assert!((m.fps() - UI_FREQ as f32).abs() < 0.5);
    }
}
