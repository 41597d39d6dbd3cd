//! Overlay widgets, one module per visual element.
//!
//! - [`lanes`]: lane lines, road edges, predicted path, blind-spot hazards
//! - [`leads`]: lead-vehicle chevron glyphs
//! - [`hud`]: current speed, set-speed badge, speed-limit signs
//! - [`banner`]: status alert band
//! - [`signals`]: turn-signal sweep
//! - [`panels`]: diagnostic label/value/unit panels
//! - [`primitives`]: shared low-level drawing helpers
//!
//! Every widget is a free function taking `&mut OverlayFrame` plus the
//! already-derived display state. Widgets never read telemetry and never
//! keep state of their own; everything they draw is a function of their
//! arguments.

pub mod banner;
pub mod hud;
pub mod lanes;
pub mod leads;
pub mod panels;
pub mod primitives;
pub mod signals;
