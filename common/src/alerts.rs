//! Alert banner model and engagement-status colors.

use crate::colors::Rgba;

/// Banner heights in pixels. `Full` covers the whole viewport.
pub const ALERT_HEIGHT_SMALL: u32 = 271;
pub const ALERT_HEIGHT_MID: u32 = 420;

/// Full-size alerts shrink the headline font once the text gets long.
pub const FULL_ALERT_SHRINK_LEN: usize = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertSize {
    #[default]
    None,
    Small,
    Mid,
    Full,
}

impl AlertSize {
    pub const fn band_height(self, viewport_height: u32) -> u32 {
        match self {
            Self::None => 0,
            Self::Small => ALERT_HEIGHT_SMALL,
            Self::Mid => ALERT_HEIGHT_MID,
            Self::Full => viewport_height,
        }
    }
}

/// Special alerts that override the status background color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertKind {
    #[default]
    Normal,
    /// Control process stopped responding while engaged.
    ControlsUnresponsive,
    /// Unresponsive long enough that the takeover prompt went permanent.
    ControlsUnresponsivePermanent,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Alert {
    pub size: AlertSize,
    pub text1: String,
    pub text2: String,
    pub kind: AlertKind,
}

impl Alert {
    pub fn new(size: AlertSize, text1: &str, text2: &str, kind: AlertKind) -> Self {
        Self { size, text1: text1.into(), text2: text2.into(), kind }
    }
}

/// Overall engagement status, in increasing order of driver attention
/// demanded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VehicleStatus {
    #[default]
    Disengaged,
    Override,
    Engaged,
    Warning,
    Alert,
}

impl VehicleStatus {
    pub const fn bg_color(self) -> Rgba {
        match self {
            Self::Disengaged => Rgba::new(0x17, 0x33, 0x49, 0xc8),
            Self::Override => Rgba::new(0x91, 0x9b, 0x95, 0xf1),
            Self::Engaged => Rgba::new(0x17, 0x86, 0x44, 0xf1),
            Self::Warning => Rgba::new(0xDA, 0x6F, 0x25, 0xf1),
            Self::Alert => Rgba::new(0xC9, 0x22, 0x31, 0xf1),
        }
    }
}

/// Background color for the alert banner. Unresponsive-controls alerts
/// force their own color regardless of the reported status.
pub const fn resolve_alert_color(alert_kind: AlertKind, status: VehicleStatus) -> Rgba {
    match alert_kind {
        AlertKind::ControlsUnresponsive => VehicleStatus::Alert.bg_color(),
        AlertKind::ControlsUnresponsivePermanent => VehicleStatus::Disengaged.bg_color(),
        AlertKind::Normal => status.bg_color(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_heights() {
        assert_eq!(AlertSize::None.band_height(1080), 0);
        assert_eq!(AlertSize::Small.band_height(1080), 271);
        assert_eq!(AlertSize::Mid.band_height(1080), 420);
        assert_eq!(AlertSize::Full.band_height(1080), 1080, "full alert covers the viewport");
    }

    #[test]
    fn test_every_status_has_a_distinct_color() {
        let statuses = [
            VehicleStatus::Disengaged,
            VehicleStatus::Override,
            VehicleStatus::Engaged,
            VehicleStatus::Warning,
            VehicleStatus::Alert,
        ];
        for (i, a) in statuses.iter().enumerate() {
            for b in &statuses[i + 1..] {
                assert_ne!(a.bg_color(), b.bg_color(), "{a:?} and {b:?} must differ");
            }
        }
    }

    #[test]
    fn test_unresponsive_alerts_override_status_color() {
        for status in [VehicleStatus::Engaged, VehicleStatus::Warning, VehicleStatus::Override] {
            assert_eq!(
                resolve_alert_color(AlertKind::ControlsUnresponsive, status),
                VehicleStatus::Alert.bg_color(),
                "unresponsive controls always show the alert color"
            );
            assert_eq!(
                resolve_alert_color(AlertKind::ControlsUnresponsivePermanent, status),
                VehicleStatus::Disengaged.bg_color(),
                "permanent unresponsiveness shows the disengaged color"
            );
        }
    }

    #[test]
    fn test_normal_alerts_use_the_status_color() {
        assert_eq!(
            resolve_alert_color(AlertKind::Normal, VehicleStatus::Engaged),
            VehicleStatus::Engaged.bg_color()
        );
    }
}
