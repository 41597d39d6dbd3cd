//! Core of the driving-assistance HUD overlay.
//!
//! Platform-agnostic code shared between the simulator frontend and any
//! real display target:
//!
//! - [`telemetry`]: signal-group snapshot types consumed each tick
//! - [`state`]: snapshot -> display-property extraction
//! - [`projection`]: road-space -> screen-space transform
//! - [`frame`]: alpha-compositing framebuffer and polygon fills
//! - [`render`]: per-frame widget composition and the fps watchdog
//! - [`widgets`]: the individual overlay elements
//! - [`animation`]: turn-signal sweep clock
//! - [`filters`]: low-pass smoothing and frame-rate monitoring
//! - [`alerts`]: alert banner model and status colors
//! - [`colors`], [`styles`], [`units`], [`config`]: shared constants
//!
//! The per-frame flow is one-way: a [`telemetry::TelemetrySnapshot`] goes
//! through [`state::StateExtractor`] into a [`state::DerivedHudState`],
//! which [`render::OverlayRenderer`] rasterizes into a
//! [`frame::OverlayFrame`]. Nothing in this crate blocks or aborts the
//! render loop; degraded inputs degrade the picture, not the process.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod alerts;
pub mod animation;
pub mod colors;
pub mod config;
pub mod filters;
pub mod frame;
pub mod projection;
pub mod render;
pub mod state;
pub mod styles;
pub mod telemetry;
pub mod units;
pub mod widgets;

// Re-export the types a frontend needs to run the loop
pub use alerts::{Alert, AlertKind, AlertSize, VehicleStatus};
pub use animation::TurnSignalClock;
pub use frame::OverlayFrame;
pub use projection::ProjectionState;
pub use render::OverlayRenderer;
pub use state::{DerivedHudState, StateExtractor, UiPrefs};
pub use telemetry::TelemetrySnapshot;
