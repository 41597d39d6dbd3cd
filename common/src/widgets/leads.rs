//! Lead-vehicle chevron glyphs.
//!
//! Each visible lead draws two stacked triangles at its projected anchor:
//! an outer glow and an inner chevron whose fill alpha encodes urgency
//! (closer and/or closing faster = more opaque).

use crate::colors::{LEAD_GLOW, red};
use crate::frame::OverlayFrame;
use crate::state::{DerivedHudState, LeadVehicle};
use embedded_graphics::prelude::*;

/// Closing speed (m/s) at which velocity alone saturates the chevron.
const SPEED_BUFF: f32 = 10.0;

/// Distance (m) inside which the chevron starts gaining opacity.
const LEAD_BUFF: f32 = 40.0;

/// Chevron fill alpha: ramps up as the lead gets closer than the buffer
/// distance, plus a closing-speed term, saturating fully opaque.
pub fn chevron_alpha(d_rel: f32, v_rel: f32) -> u8 {
    if d_rel >= LEAD_BUFF {
        return 0;
    }
    let mut fill = 255.0 * (1.0 - d_rel / LEAD_BUFF);
    if v_rel < 0.0 {
        fill += 255.0 * (-v_rel / SPEED_BUFF);
    }
    fill.min(255.0) as u8
}

/// Glyph half-height in pixels, shrinking with distance within [15, 30]
/// units before scaling.
pub fn glyph_size(d_rel: f32) -> f32 {
    (25.0 * 30.0 / (d_rel / 3.0 + 30.0)).clamp(15.0, 30.0) * 2.35
}

pub fn draw_leads(frame: &mut OverlayFrame, hud: &DerivedHudState) {
    if !hud.longitudinal_control {
        return;
    }
    for lead in hud.leads.iter().flatten() {
        draw_lead(frame, lead);
    }
}

fn draw_lead(frame: &mut OverlayFrame, lead: &LeadVehicle) {
    let Size { width, height } = frame.size();
    let sz = glyph_size(lead.d_rel);

    // keep the glyph on screen even when the anchor is off the edge
    let x = lead.anchor.0.clamp(sz / 2.0, width as f32 - sz / 2.0);
    let y = lead.anchor.1.min(height as f32 - sz * 0.6);

    let g_xo = sz / 5.0;
    let g_yo = sz / 10.0;
    frame.fill_polygon(
        &[
            (x + sz * 1.35 + g_xo, y + sz + g_yo),
            (x, y - g_yo),
            (x - sz * 1.35 - g_xo, y + sz + g_yo),
        ],
        LEAD_GLOW,
    );
    frame.fill_polygon(
        &[(x + sz * 1.25, y + sz), (x, y), (x - sz * 1.25, y + sz)],
        red(chevron_alpha(lead.d_rel, lead.v_rel)),
    );
}

// =============================================================================
// Unit Tests
// =============================================================================
