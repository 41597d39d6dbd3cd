//! Road geometry: lane lines, road edges, predicted path, blind spots.

use crate::colors::{Rgba, red, white};
use crate::frame::{OverlayFrame, VerticalGradient};
use crate::state::DerivedHudState;
use embedded_graphics::prelude::*;

/// Blind-spot hazard fill, red at 0.8 opacity.
const BLIND_SPOT_ALPHA: u8 = 204;

pub fn draw_lane_lines(frame: &mut OverlayFrame, hud: &DerivedHudState) {
    for (poly, alpha) in hud.lane_lines.iter().zip(&hud.lane_line_alphas) {
        frame.fill_polygon(poly, white((alpha * 255.0) as u8));
    }

    for (poly, alpha) in hud.road_edges.iter().zip(&hud.road_edge_alphas) {
        frame.fill_polygon(poly, red((alpha * 255.0) as u8));
    }

    if hud.left_blind_spot {
        frame.fill_polygon(&hud.blind_spot_left_poly, red(BLIND_SPOT_ALPHA));
    }
    if hud.right_blind_spot {
        frame.fill_polygon(&hud.blind_spot_right_poly, red(BLIND_SPOT_ALPHA));
    }

    draw_path(frame, hud);
}

/// Predicted-path fill: a bottom-to-quarter-height gradient whose middle
/// stop bends from green toward yellow as the predicted curvature grows.
fn draw_path(frame: &mut OverlayFrame, hud: &DerivedHudState) {
    if hud.path.is_empty() {
        return;
    }
    let h = frame.size().height as f32;
    let gradient = VerticalGradient::new(
        h,
        h / 4.0,
        vec![
            (0.0, Rgba::from_hslf(148.0 / 360.0, 0.94, 0.51, 0.4)),
            (0.5, Rgba::from_hslf(hud.path_curve_hue / 360.0, 1.0, 0.68, 0.35)),
            (1.0, Rgba::from_hslf(hud.path_curve_hue / 360.0, 1.0, 0.68, 0.0)),
        ],
    );
    frame.fill_polygon_gradient(&hud.path, &gradient);
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::Rgb888;
    use embedded_graphics::prelude::*;

    fn hud_with_lane(alpha: f32) -> DerivedHudState {
        DerivedHudState {
            lane_lines: vec![vec![(10.0, 10.0), (50.0, 10.0), (50.0, 50.0), (10.0, 50.0)]],
            lane_line_alphas: vec![alpha],
            ..Default::default()
        }
    }

    #[test]
    fn test_lane_line_alpha_scales_brightness() {
        let mut faint = OverlayFrame::new(64, 64);
        draw_lane_lines(&mut faint, &hud_with_lane(0.2));
        let mut strong = OverlayFrame::new(64, 64);
        draw_lane_lines(&mut strong, &hud_with_lane(0.7));
        let f = faint.pixel(30, 30).unwrap().r();
        let s = strong.pixel(30, 30).unwrap().r();
        assert!(s > f, "higher probability draws a brighter line ({s} vs {f})");
    }

    #[test]
    fn test_blind_spot_only_drawn_when_flagged() {
        let poly = vec![(5.0, 5.0), (25.0, 5.0), (25.0, 25.0), (5.0, 25.0)];
        let mut hud = DerivedHudState { blind_spot_left_poly: poly, ..Default::default() };

        let mut frame = OverlayFrame::new(32, 32);
        draw_lane_lines(&mut frame, &hud);
        assert_eq!(frame.pixel(10, 10).unwrap(), Rgb888::new(0, 0, 0));

        hud.left_blind_spot = true;
        draw_lane_lines(&mut frame, &hud);
        assert!(frame.pixel(10, 10).unwrap().r() > 100, "flagged blind spot fills red");
    }

    #[test]
    fn test_empty_path_draws_nothing() {
        let mut frame = OverlayFrame::new(32, 32);
        draw_lane_lines(&mut frame, &DerivedHudState::default());
        assert!(frame.data().iter().all(|&p| p == Rgb888::new(0, 0, 0)));
    }
}
