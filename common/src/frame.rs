//! RGB framebuffer with painter-style alpha compositing.
//!
//! Shapes and text draw through the `DrawTarget` impl like any display,
//! but every pixel is blended against the existing contents using the
//! current global opacity. Translucent fills set the opacity, draw an
//! opaque primitive, and restore it. Polygon and gradient fills are
//! provided directly since the road geometry is not expressible with
//! rectangle/circle primitives.

use core::convert::Infallible;

use embedded_graphics::Pixel;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::RgbColor;

use crate::colors::Rgba;

pub struct OverlayFrame {
    width: u32,
    height: u32,
    buf: Vec<Rgb888>,
    opacity: f32,
}

impl OverlayFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buf: vec![Rgb888::BLACK; (width * height) as usize],
            opacity: 1.0,
        }
    }

    pub fn clear_to(&mut self, color: Rgb888) {
        self.buf.fill(color);
        self.opacity = 1.0;
    }

    /// Global opacity multiplied into every subsequent draw, clamped to
    /// [0, 1].
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        (x < self.width && y < self.height)
            .then(|| self.buf[(y * self.width + x) as usize])
    }

    /// Row-major pixel data for blitting to a real display.
    pub fn data(&self) -> &[Rgb888] {
        &self.buf
    }

    /// Source-over blend of one pixel, scaled by the global opacity.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        let scaled = color.with_alpha((color.a as f32 * self.opacity) as u8);
        self.buf[idx] = scaled.over(self.buf[idx]);
    }

    // =========================================================================
    // Polygon Fills
    // =========================================================================

    /// Even-odd scanline fill. Rows are sampled at their pixel centers so
    /// shared edges between adjacent polygons neither gap nor double-blend.
    pub fn fill_polygon(&mut self, pts: &[(f32, f32)], color: Rgba) {
        self.fill_polygon_with(pts, |_| color);
    }

    /// Polygon fill where each row's color comes from a vertical gradient.
    pub fn fill_polygon_gradient(&mut self, pts: &[(f32, f32)], gradient: &VerticalGradient) {
        self.fill_polygon_with(pts, |y| gradient.color_at(y));
    }

    fn fill_polygon_with(&mut self, pts: &[(f32, f32)], color_at: impl Fn(f32) -> Rgba) {
        if pts.len() < 3 {
            return;
        }
        let y_min = pts.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
        let y_max = pts.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);
        let row_start = (y_min.floor().max(0.0)) as u32;
        let row_end = (y_max.ceil().min(self.height as f32)) as u32;

        let mut xs: Vec<f32> = Vec::with_capacity(8);
        for row in row_start..row_end {
            let yc = row as f32 + 0.5;
            xs.clear();
            for i in 0..pts.len() {
                let (x1, y1) = pts[i];
                let (x2, y2) = pts[(i + 1) % pts.len()];
                if (y1 <= yc && yc < y2) || (y2 <= yc && yc < y1) {
                    xs.push(x1 + (yc - y1) * (x2 - x1) / (y2 - y1));
                }
            }
            xs.sort_by(|a, b| a.total_cmp(b));

            let color = color_at(yc);
            for pair in xs.chunks_exact(2) {
                let x_start = (pair[0] - 0.5).ceil().max(0.0) as i32;
                let x_end = ((pair[1] - 0.5).floor().min(self.width as f32 - 1.0)) as i32;
                for x in x_start..=x_end {
                    self.blend_pixel(x, row as i32, color);
                }
            }
        }
    }
}

impl OriginDimensions for OverlayFrame {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for OverlayFrame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let alpha = (self.opacity * 255.0) as u8;
        for Pixel(point, color) in pixels {
            if point.x < 0
                || point.y < 0
                || point.x as u32 >= self.width
                || point.y as u32 >= self.height
            {
                continue;
            }
            let idx = (point.y as u32 * self.width + point.x as u32) as usize;
            if alpha == 255 {
                self.buf[idx] = color;
            } else {
                let src = Rgba::new(color.r(), color.g(), color.b(), alpha);
                self.buf[idx] = src.over(self.buf[idx]);
            }
        }
        Ok(())
    }
}

// =============================================================================
// Vertical Gradient
// =============================================================================

/// Linear gradient along the y axis, from `y0` (position 0.0) to `y1`
/// (position 1.0). Positions outside the stop range clamp to the nearest
/// stop.
pub struct VerticalGradient {
    y0: f32,
    y1: f32,
    stops: Vec<(f32, Rgba)>,
}

impl VerticalGradient {
    /// `stops` must be sorted by position ascending.
    pub fn new(y0: f32, y1: f32, stops: Vec<(f32, Rgba)>) -> Self {
        debug_assert!(stops.windows(2).all(|w| w[0].0 <= w[1].0));
        Self { y0, y1, stops }
    }

    pub fn color_at(&self, y: f32) -> Rgba {
        let t = ((y - self.y0) / (self.y1 - self.y0)).clamp(0.0, 1.0);
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Rgba::new(0, 0, 0, 0),
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for w in self.stops.windows(2) {
            let (p0, c0) = w[0];
            let (p1, c1) = w[1];
            if t >= p0 && t <= p1 {
                let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
                return c0.lerp(c1, f);
            }
        }
        last.1
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
