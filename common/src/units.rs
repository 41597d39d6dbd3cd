//! Speed unit conversions.
//!
//! Telemetry reports all speed-like quantities in m/s. Conversion to the
//! display unit happens exactly once, during state extraction; after that
//! every value in [`crate::state::DerivedHudState`] is a pure display
//! quantity.

/// m/s to km/h.
pub const MS_TO_KPH: f32 = 3.6;

/// m/s to mph.
pub const MS_TO_MPH: f32 = 2.236_936;

/// km/h to mph, for quantities the vehicle reports already clustered in
/// km/h (set speed).
pub const KM_TO_MILE: f32 = 0.621_371;

/// Convert a speed in m/s to the active display unit.
#[inline]
pub fn speed_to_display(ms: f32, is_metric: bool) -> f32 {
    ms * if is_metric { MS_TO_KPH } else { MS_TO_MPH }
}

/// Display unit label for the active unit system.
#[inline]
pub const fn speed_unit(is_metric: bool) -> &'static str {
    if is_metric { "km/h" } else { "mph" }
}
