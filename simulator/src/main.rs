//! Desktop simulator for the HUD overlay renderer.
//!
//! Runs the full extraction + render pipeline at 20 Hz against fake
//! telemetry in an SDL window. Keyboard toggles:
//!
//! | Key   | Effect                          |
//! |-------|---------------------------------|
//! | E     | engage / disengage              |
//! | Left  | left blinker                    |
//! | Right | right blinker                   |
//! | B     | blind-spot flag (active side)   |
//! | S     | brake lights                    |
//! | M     | metric / imperial units         |
//! | V     | Vienna / MUTCD speed-limit sign |
//! | C     | drop the controls channel       |
//! | A     | cycle alert sizes               |

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod telemetry_sim;

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use roadhud_common::alerts::{Alert, AlertKind, AlertSize};
use roadhud_common::config::{FRAME_TIME, SCREEN_HEIGHT, SCREEN_WIDTH};
use roadhud_common::{
    OverlayFrame, OverlayRenderer, ProjectionState, StateExtractor, TurnSignalClock, UiPrefs,
};
use tracing::info;

use crate::telemetry_sim::{SimToggles, build_snapshot};

/// Half the device panel resolution fits comfortably on a desktop.
const WINDOW_WIDTH: u32 = SCREEN_WIDTH / 2;
const WINDOW_HEIGHT: u32 = SCREEN_HEIGHT / 2;

/// Road surface stand-in for the camera feed.
const ROAD_GREY: Rgb888 = Rgb888::new(18, 18, 22);

fn main() {
    tracing_subscriber::fmt::init();

    let mut display: SimulatorDisplay<Rgb888> =
        SimulatorDisplay::new(Size::new(WINDOW_WIDTH, WINDOW_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().build();
    let mut window = Window::new("Road HUD Sim", &output_settings);

    let proj = ProjectionState::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut extractor = StateExtractor::new();
    let mut renderer = OverlayRenderer::new();
    let mut clock = TurnSignalClock::new();
    let mut frame = OverlayFrame::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    let mut toggles = SimToggles::default();
    let mut prefs = UiPrefs { is_metric: false, longitudinal_control: true };
    let mut alert_cycle = 0u8;

    let start = Instant::now();
    let mut t = 0.0f32;
    let mut frame_count = 0u64;

    info!(width = WINDOW_WIDTH, height = WINDOW_HEIGHT, "simulator started");

    'running: loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::E => toggles.engaged = !toggles.engaged,
                        Keycode::Left => toggles.left_blinker = !toggles.left_blinker,
                        Keycode::Right => toggles.right_blinker = !toggles.right_blinker,
                        Keycode::B => toggles.blind_spot = !toggles.blind_spot,
                        Keycode::S => toggles.braking = !toggles.braking,
                        Keycode::M => prefs.is_metric = !prefs.is_metric,
                        Keycode::V => toggles.vienna_sign = !toggles.vienna_sign,
                        Keycode::C => toggles.drop_controls = !toggles.drop_controls,
                        Keycode::A => alert_cycle = (alert_cycle + 1) % 4,
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let snap = build_snapshot(t, frame_count, &toggles);
        let hud = extractor.update(&snap, &prefs, &proj).clone();

        let alert = match alert_cycle {
            1 => Alert::new(AlertSize::Small, "Monitoring driver", "", AlertKind::Normal),
            2 => Alert::new(AlertSize::Mid, "Take control", "Steering required", AlertKind::Normal),
            3 => Alert::new(
                AlertSize::Full,
                "TAKE CONTROL IMMEDIATELY",
                "Controls unresponsive",
                AlertKind::ControlsUnresponsive,
            ),
            _ => Alert::default(),
        };

        let now_ms = start.elapsed().as_millis() as u64;
        clock.tick(now_ms, toggles.left_blinker || toggles.right_blinker);

        frame.clear_to(ROAD_GREY);
        renderer.draw(&mut frame, &hud, &alert, &clock, now_ms);

        display
            .fill_contiguous(
                &Rectangle::new(Point::zero(), Size::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
                frame.data().iter().copied(),
            )
            .ok();
        window.update(&display);

        t += 0.05;
        frame_count = frame_count.wrapping_add(1);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME.saturating_sub(elapsed));
        }
    }
}
