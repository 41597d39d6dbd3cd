//! Status alert banner.
//!
//! A full-width band anchored to the bottom of the frame (or covering it
//! entirely for full-size alerts), tinted by engagement status with the
//! unresponsive-controls overrides, darkened top-to-bottom by a subtle
//! gradient, with one or two lines of centered text.

use crate::alerts::{Alert, AlertSize, FULL_ALERT_SHRINK_LEN, VehicleStatus, resolve_alert_color};
use crate::colors::black;
use crate::config::BORDER_SIZE;
use crate::frame::{OverlayFrame, VerticalGradient};
use crate::styles::{ALERT_BODY_STYLE, ALERT_TITLE_SMALL_STYLE, ALERT_TITLE_STYLE};
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use crate::styles::CENTERED;

/// Gradient alphas over the band, top to bottom.
const GRADIENT_TOP_ALPHA: f32 = 0.05;
const GRADIENT_BOTTOM_ALPHA: f32 = 0.35;

pub fn draw_alert(frame: &mut OverlayFrame, alert: &Alert, status: VehicleStatus) {
    if alert.size == AlertSize::None {
        return;
    }
    let Size { width, height } = frame.size();
    let band_height = alert.size.band_height(height);
    let band_top = (height - band_height) as f32;

    // full alerts cover the border margin too
    let inset = if alert.size == AlertSize::Full { 0.0 } else { BORDER_SIZE as f32 };
    let bg = resolve_alert_color(alert.kind, status);
    let band = [
        (inset, band_top),
        (width as f32 - inset, band_top),
        (width as f32 - inset, height as f32),
        (inset, height as f32),
    ];
    frame.fill_polygon(&band, bg);

    let gradient = VerticalGradient::new(
        band_top,
        height as f32,
        vec![
            (0.0, black((GRADIENT_TOP_ALPHA * 255.0) as u8)),
            (1.0, black((GRADIENT_BOTTOM_ALPHA * 255.0) as u8)),
        ],
    );
    frame.fill_polygon_gradient(&band, &gradient);

    draw_alert_text(frame, alert, band_top as i32, band_height as i32);
}

fn draw_alert_text(frame: &mut OverlayFrame, alert: &Alert, band_top: i32, band_height: i32) {
    let cx = frame.size().width as i32 / 2;
    match alert.size {
        AlertSize::None => {}
        AlertSize::Small => {
            let anchor = Point::new(cx, band_top + band_height / 2);
            Text::with_text_style(&alert.text1, anchor, ALERT_TITLE_STYLE, CENTERED)
                .draw(frame)
                .ok();
        }
        AlertSize::Mid => {
            let title = Point::new(cx, band_top + band_height / 2 - 45);
            Text::with_text_style(&alert.text1, title, ALERT_TITLE_STYLE, CENTERED)
                .draw(frame)
                .ok();
            let body = Point::new(cx, band_top + band_height / 2 + 45);
            Text::with_text_style(&alert.text2, body, ALERT_BODY_STYLE, CENTERED)
                .draw(frame)
                .ok();
        }
        AlertSize::Full => {
            // Long headlines drop to the smaller face to stay inside the
            // frame.
            let style = if full_alert_title_shrinks(&alert.text1) {
                ALERT_TITLE_SMALL_STYLE
            } else {
                ALERT_TITLE_STYLE
            };
            let title = Point::new(cx, band_top + band_height / 2 - 60);
            Text::with_text_style(&alert.text1, title, style, CENTERED).draw(frame).ok();
            let body = Point::new(cx, band_top + band_height / 2 + 90);
            Text::with_text_style(&alert.text2, body, ALERT_BODY_STYLE, CENTERED)
                .draw(frame)
                .ok();
        }
    }
}

/// Title style selection, split out so the shrink rule is testable.
pub fn full_alert_title_shrinks(text1: &str) -> bool {
    text1.len() > FULL_ALERT_SHRINK_LEN
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertKind;
    use embedded_graphics::pixelcolor::Rgb888;

    #[test]
    fn test_no_alert_draws_nothing() {
        let mut frame = OverlayFrame::new(64, 64);
        draw_alert(&mut frame, &Alert::default(), VehicleStatus::Engaged);
        assert!(frame.data().iter().all(|&p| p == Rgb888::new(0, 0, 0)));
    }

    #[test]
    fn test_small_alert_tints_only_the_bottom_band() {
        let mut frame = OverlayFrame::new(100, 1080);
        let alert = Alert::new(AlertSize::Small, "TAKE OVER", "", AlertKind::Normal);
        draw_alert(&mut frame, &alert, VehicleStatus::Engaged);
        assert_ne!(frame.pixel(50, 1000).unwrap(), Rgb888::new(0, 0, 0), "inside the band");
        assert_eq!(frame.pixel(50, 100).unwrap(), Rgb888::new(0, 0, 0), "above the band");
    }

    #[test]
    fn test_full_alert_covers_the_frame() {
        let mut frame = OverlayFrame::new(100, 200);
        let alert = Alert::new(AlertSize::Full, "TAKE CONTROL", "", AlertKind::Normal);
        draw_alert(&mut frame, &alert, VehicleStatus::Alert);
        assert_ne!(frame.pixel(50, 5).unwrap(), Rgb888::new(0, 0, 0), "top row tinted too");
    }

    #[test]
    fn test_band_is_darker_at_the_bottom() {
        let mut frame = OverlayFrame::new(100, 1080);
        let alert = Alert::new(AlertSize::Mid, "", "", AlertKind::Normal);
        draw_alert(&mut frame, &alert, VehicleStatus::Engaged);
        let top = frame.pixel(50, 1080 - 410).unwrap().g();
        let bottom = frame.pixel(50, 1070).unwrap().g();
        assert!(bottom < top, "gradient darkens toward the bottom ({bottom} vs {top})");
    }

    #[test]
    fn test_full_alert_font_shrink_rule() {
        assert!(!full_alert_title_shrinks("TAKE CONTROL"));
        assert!(full_alert_title_shrinks("TAKE CONTROL IMMEDIATELY"));
        assert!(!full_alert_title_shrinks(&"x".repeat(15)), "boundary length keeps the big face");
    }
}
