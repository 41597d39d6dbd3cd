//! Turn-signal sweep: a run of directional arrow glyphs marching outward
//! from the center of the frame.

use crate::animation::{BLINKER_DRAW_COUNT, TurnSignalClock};
use crate::colors::Rgba;
use crate::frame::OverlayFrame;
use crate::state::DerivedHudState;
use embedded_graphics::prelude::*;

/// Alpha of the glyph at the active sweep index.
const BASE_ALPHA: u8 = 200;

const GLYPH_WIDTH: f32 = 60.0;
const GLYPH_HEIGHT: f32 = 80.0;
const GLYPH_SPACING: f32 = 75.0;

/// Horizontal gap between the frame center and the first glyph.
const CENTER_GAP: f32 = 250.0;

const GLYPH_Y: f32 = 120.0;

const SIGNAL_GREEN: Rgba = Rgba::rgb(0, 200, 60);

pub fn draw_turn_signals(frame: &mut OverlayFrame, hud: &DerivedHudState, clock: &TurnSignalClock) {
    let cx = frame.size().width as f32 / 2.0;
    if hud.left_blinker {
        draw_sweep(frame, clock, cx, -1.0);
    }
    if hud.right_blinker {
        draw_sweep(frame, clock, cx, 1.0);
    }
}

fn draw_sweep(frame: &mut OverlayFrame, clock: &TurnSignalClock, cx: f32, dir: f32) {
    for i in 0..BLINKER_DRAW_COUNT {
        let alpha = clock.glyph_alpha(BASE_ALPHA, i);
        if alpha == 0 {
            continue;
        }
        let base_x = cx + dir * (CENTER_GAP + i as f32 * GLYPH_SPACING);
        let tip_x = base_x + dir * GLYPH_WIDTH;
        frame.fill_polygon(
            &[
                (base_x, GLYPH_Y),
                (tip_x, GLYPH_Y + GLYPH_HEIGHT / 2.0),
                (base_x, GLYPH_Y + GLYPH_HEIGHT),
            ],
            SIGNAL_GREEN.with_alpha(alpha),
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::Rgb888;

    fn center_row_green(frame: &OverlayFrame, x: u32) -> u8 {
        frame.pixel(x, GLYPH_Y as u32 + GLYPH_HEIGHT as u32 / 2).unwrap().g()
    }

    #[test]
    fn test_no_blinker_draws_nothing() {
        let mut frame = OverlayFrame::new(2160, 400);
        let clock = TurnSignalClock::new();
        draw_turn_signals(&mut frame, &DerivedHudState::default(), &clock);
        assert!(frame.data().iter().all(|&p| p == Rgb888::new(0, 0, 0)));
    }

    #[test]
    fn test_left_blinker_draws_left_of_center_only() {
        let mut frame = OverlayFrame::new(2160, 400);
        let mut clock = TurnSignalClock::new();
        clock.tick(0, true);
        let hud = DerivedHudState { left_blinker: true, ..Default::default() };
        draw_turn_signals(&mut frame, &hud, &clock);

        let left_half: u32 = (0..1080).map(|x| u32::from(center_row_green(&frame, x))).sum();
        let right_half: u32 = (1080..2160).map(|x| u32::from(center_row_green(&frame, x))).sum();
        assert!(left_half > 0, "left sweep draws on the left half");
        assert_eq!(right_half, 0, "nothing on the right half");
    }

    #[test]
    fn test_active_glyph_is_brightest() {
        let mut frame = OverlayFrame::new(2160, 400);
        let mut clock = TurnSignalClock::new();
        // advance to index 2
        clock.tick(0, true);
        clock.tick(50, true);
        clock.tick(100, true);
        let hud = DerivedHudState { right_blinker: true, ..Default::default() };
        draw_turn_signals(&mut frame, &hud, &clock);

        let glyph_green = |i: usize| {
            let x = 1080.0 + CENTER_GAP + i as f32 * GLYPH_SPACING + GLYPH_WIDTH / 2.0;
            center_row_green(&frame, x as u32)
        };
        assert!(glyph_green(2) > glyph_green(0), "index glyph outshines distant glyphs");
        assert!(glyph_green(2) > glyph_green(6));
    }
}
