//! Low-level drawing helpers shared across widgets.
//!
//! Translucent shapes are drawn by setting the frame's global opacity,
//! drawing an opaque primitive, and restoring the previous opacity. These
//! helpers wrap that dance so widget code reads as single calls.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    prelude::*,
    primitives::{Circle, CornerRadii, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle},
    text::Text,
};

use crate::colors::Rgba;
use crate::frame::OverlayFrame;
use crate::styles::CENTERED;

/// Filled rounded rectangle with independent top and bottom corner radii.
pub fn fill_rounded_rect(
    frame: &mut OverlayFrame,
    top_left: Point,
    size: Size,
    top_radius: u32,
    bottom_radius: u32,
    color: Rgba,
) {
    let prev = frame.opacity();
    frame.set_opacity(prev * f32::from(color.a) / 255.0);
    let radii = CornerRadii {
        top_left: Size::new(top_radius, top_radius),
        top_right: Size::new(top_radius, top_radius),
        bottom_left: Size::new(bottom_radius, bottom_radius),
        bottom_right: Size::new(bottom_radius, bottom_radius),
    };
    RoundedRectangle::new(Rectangle::new(top_left, size), radii)
        .into_styled(PrimitiveStyle::with_fill(color.rgb888()))
        .draw(frame)
        .ok();
    frame.set_opacity(prev);
}

/// Rounded rectangle outline, uniform corner radius.
pub fn stroke_rounded_rect(
    frame: &mut OverlayFrame,
    top_left: Point,
    size: Size,
    radius: u32,
    stroke_width: u32,
    color: Rgba,
) {
    let prev = frame.opacity();
    frame.set_opacity(prev * f32::from(color.a) / 255.0);
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(color.rgb888())
        .stroke_width(stroke_width)
        .build();
    RoundedRectangle::with_equal_corners(Rectangle::new(top_left, size), Size::new(radius, radius))
        .into_styled(style)
        .draw(frame)
        .ok();
    frame.set_opacity(prev);
}

/// Filled circle given its center and radius.
pub fn fill_circle(frame: &mut OverlayFrame, center: Point, radius: u32, color: Rgba) {
    let prev = frame.opacity();
    frame.set_opacity(prev * f32::from(color.a) / 255.0);
    Circle::with_center(center, radius * 2)
        .into_styled(PrimitiveStyle::with_fill(color.rgb888()))
        .draw(frame)
        .ok();
    frame.set_opacity(prev);
}

/// Text centered on `anchor`, with an alpha-carrying color.
pub fn draw_text_centered(
    frame: &mut OverlayFrame,
    text: &str,
    anchor: Point,
    font: &'static MonoFont<'static>,
    color: Rgba,
) {
    let prev = frame.opacity();
    frame.set_opacity(prev * f32::from(color.a) / 255.0);
    Text::with_text_style(text, anchor, MonoTextStyle::new(font, color.rgb888()), CENTERED)
        .draw(frame)
        .ok();
    frame.set_opacity(prev);
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::Rgb888;

    #[test]
    fn test_fill_circle_covers_center() {
        let mut frame = OverlayFrame::new(64, 64);
        fill_circle(&mut frame, Point::new(32, 32), 10, Rgba::rgb(255, 0, 0));
        assert_eq!(frame.pixel(32, 32).unwrap(), Rgb888::new(255, 0, 0));
        assert_eq!(frame.pixel(1, 1).unwrap(), Rgb888::new(0, 0, 0), "outside stays untouched");
    }

    #[test]
    fn test_helpers_restore_opacity() {
        let mut frame = OverlayFrame::new(32, 32);
        frame.set_opacity(0.8);
        fill_rounded_rect(&mut frame, Point::zero(), Size::new(16, 16), 4, 4, Rgba::new(0, 0, 0, 100));
        assert!((frame.opacity() - 0.8).abs() < 1e-6, "global opacity must survive a helper call");
    }
}
