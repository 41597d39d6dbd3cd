//! Frame composition: draws every widget in back-to-front order and runs
//! the frame-rate watchdog.

use crate::alerts::Alert;
use crate::animation::TurnSignalClock;
use crate::filters::FrameRateMonitor;
use crate::frame::OverlayFrame;
use crate::state::DerivedHudState;
use crate::widgets::{banner, hud as hud_widget, lanes, leads, panels, signals};

/// Owns the only piece of render-side state, the smoothed fps estimate.
/// Everything drawn is a pure function of the inputs to [`draw`].
///
/// [`draw`]: OverlayRenderer::draw
#[derive(Debug, Default)]
pub struct OverlayRenderer {
    fps_monitor: FrameRateMonitor,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose one overlay frame and return the smoothed frame rate.
    /// Road geometry first, glyphs and text on top, alert band last.
    pub fn draw(
        &mut self,
        frame: &mut OverlayFrame,
        hud: &DerivedHudState,
        alert: &Alert,
        clock: &TurnSignalClock,
        now_ms: u64,
    ) -> f32 {
        lanes::draw_lane_lines(frame, hud);
        leads::draw_leads(frame, hud);
        hud_widget::draw_hud(frame, hud);
        panels::draw_panels(frame, hud);
        signals::draw_turn_signals(frame, hud, clock);
        banner::draw_alert(frame, alert, hud.status);

        self.fps_monitor.frame_done(now_ms)
    }

    pub const fn fps(&self) -> f32 {
        self.fps_monitor.fps()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertKind, AlertSize};
    use crate::config::{MIN_FPS_WARN, UI_FREQ};
    use crate::state::LeadVehicle;
    use embedded_graphics::pixelcolor::Rgb888;

    fn busy_state() -> DerivedHudState {
        DerivedHudState {
            speed: 62.0,
            speed_unit: "mph",
            set_speed: 65.0,
            is_cruise_set: true,
            longitudinal_control: true,
            left_blinker: true,
            lane_lines: vec![vec![(100.0, 900.0), (1000.0, 500.0), (1010.0, 510.0), (120.0, 920.0)]],
            lane_line_alphas: vec![0.6],
            path: vec![(900.0, 1080.0), (1100.0, 1080.0), (1050.0, 600.0), (950.0, 600.0)],
            path_curve_hue: 112.0,
            leads: [Some(LeadVehicle { d_rel: 22.0, v_rel: -3.0, anchor: (1080.0, 700.0) }), None],
            tpms: [36.0, 36.0, 35.0, 35.0],
            ..Default::default()
        }
    }

    #[test]
    fn test_full_scene_produces_nonempty_frame() {
        let mut renderer = OverlayRenderer::new();
        let mut frame = OverlayFrame::new(2160, 1080);
        let mut clock = TurnSignalClock::new();
        clock.tick(0, true);
        let alert = Alert::new(AlertSize::Small, "TAKE OVER", "", AlertKind::Normal);
        renderer.draw(&mut frame, &busy_state(), &alert, &clock, 50);
        let drawn = frame.data().iter().filter(|&&p| p != Rgb888::new(0, 0, 0)).count();
        assert!(drawn > 10_000, "a busy scene touches many pixels, got {drawn}");
    }

    #[test]
    fn test_default_state_still_renders_a_frame() {
        // degraded inputs must never abort composition
        let mut renderer = OverlayRenderer::new();
        let mut frame = OverlayFrame::new(2160, 1080);
        let clock = TurnSignalClock::new();
        renderer.draw(&mut frame, &DerivedHudState::default(), &Alert::default(), &clock, 50);
    }

    #[test]
    fn test_watchdog_tracks_render_cadence() {
        let mut renderer = OverlayRenderer::new();
        let mut frame = OverlayFrame::new(64, 64);
        let clock = TurnSignalClock::new();
        let hud = DerivedHudState::default();
        let alert = Alert::default();

        let mut now = 0;
        for _ in 0..100 {
            now += 1000 / UI_FREQ as u64;
            renderer.draw(&mut frame, &hud, &alert, &clock, now);
        }
        assert!(renderer.fps() >= MIN_FPS_WARN, "nominal cadence stays above the floor");

        for _ in 0..300 {
            now += 200; // 5 fps
            renderer.draw(&mut frame, &hud, &alert, &clock, now);
        }
        assert!(renderer.fps() < MIN_FPS_WARN, "sustained slowdown drops below the floor");
    }
}
