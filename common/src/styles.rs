//! Pre-computed static text styles shared across the overlay widgets.
//!
//! Styles are `const` so draw code references them directly instead of
//! rebuilding `MonoTextStyle` structs every frame. Widgets that need a
//! dynamic color (status-dependent speed value, interpolated badge text)
//! use the exposed font references with `MonoTextStyle::new(FONT, color)`.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::FONT_6X10,
    },
    pixelcolor::Rgb888,
    prelude::RgbColor,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{
    PROFONT_10_POINT, PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT,
};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered on the anchor point, both axes. Used for badge and sign text.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Left-aligned from the anchor. Used for panel labels and values.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

/// Right-aligned to the anchor. Used for panel value columns.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Main current-speed readout.
pub const SPEED_FONT: &MonoFont = &PROFONT_24_POINT;

/// Set-speed value inside the cruise badge.
pub const SET_SPEED_FONT: &MonoFont = &PROFONT_18_POINT;

/// Badge captions ("MAX", sign legends) and alert detail lines.
pub const CAPTION_FONT: &MonoFont = &PROFONT_12_POINT;

/// Speed unit line and mid-size alert text.
pub const UNIT_FONT: &MonoFont = &PROFONT_14_POINT;

/// Shrunken speed-limit value for three-digit limits.
pub const SIGN_SMALL_FONT: &MonoFont = &PROFONT_10_POINT;

/// Small monospace labels in the developer panels.
pub const PANEL_FONT: &MonoFont = &FONT_6X10;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Headline font for alerts, same as the speed readout.
pub const ALERT_TITLE_STYLE: MonoTextStyle<'static, Rgb888> =
    MonoTextStyle::new(&PROFONT_24_POINT, Rgb888::WHITE);

/// Shrunken headline for long full-screen alert text.
pub const ALERT_TITLE_SMALL_STYLE: MonoTextStyle<'static, Rgb888> =
    MonoTextStyle::new(&PROFONT_18_POINT, Rgb888::WHITE);

/// Secondary alert line.
pub const ALERT_BODY_STYLE: MonoTextStyle<'static, Rgb888> =
    MonoTextStyle::new(&PROFONT_14_POINT, Rgb888::WHITE);

/// White label text in the developer panels.
pub const PANEL_LABEL_STYLE: MonoTextStyle<'static, Rgb888> =
    MonoTextStyle::new(&FONT_6X10, Rgb888::WHITE);
