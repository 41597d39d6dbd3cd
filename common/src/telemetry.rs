//! Telemetry snapshot consumed once per update tick.
//!
//! The snapshot provider (transport excluded from this crate) delivers a
//! consistent bundle of named signal groups, each carrying a liveness bit
//! (data arrived within its recency window) and a validity bit. The whole
//! snapshot is replaced per tick; the core only ever reads it.
//!
//! Absence is the normal case, not an error: a group that has never
//! arrived is simply not alive, and extraction degrades the derived value
//! to its sentinel.

/// One named signal group: payload plus freshness flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignalGroup<T> {
    pub payload: T,
    /// Data arrived within the expected recency window.
    pub alive: bool,
    /// Publisher marked the payload valid.
    pub valid: bool,
}

impl<T> SignalGroup<T> {
    pub fn live(&self) -> Option<&T> {
        self.alive.then_some(&self.payload)
    }

    pub fn live_valid(&self) -> Option<&T> {
        (self.alive && self.valid).then_some(&self.payload)
    }
}

/// A consistent bundle of signal groups, replaced wholesale each tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub controls_state: SignalGroup<ControlsState>,
    pub car_state: SignalGroup<CarState>,
    pub model: SignalGroup<ModelData>,
    pub radar_state: SignalGroup<RadarState>,
    pub nav_instruction: SignalGroup<NavInstruction>,
    pub gps_location: SignalGroup<GpsLocation>,
    pub gnss: SignalGroup<GnssReport>,
    pub driver_monitoring: SignalGroup<DriverMonitoringState>,
    /// Monotonic update counter, owned by the provider. Drives the 2 Hz
    /// property downshift so extraction stays a pure function of the
    /// snapshot.
    pub frame: u64,
}

// =============================================================================
// Signal Group Payloads
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlsState {
    /// Commanded cruise speed, km/h (legacy field).
    pub v_cruise: f32,
    /// Cluster-reported cruise speed, km/h; 0.0 when the platform does not
    /// publish it.
    pub v_cruise_cluster: f32,
    pub enabled: bool,
    pub engageable: bool,
    /// Driver is overriding (gas/steer) while the system stays enabled.
    pub overriding: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TirePressures {
    pub fl: f32,
    pub fr: f32,
    pub rl: f32,
    pub rr: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarState {
    /// Raw ego speed, m/s (legacy field).
    pub v_ego: f32,
    /// Cluster-reported ego speed, m/s; 0.0 until the platform publishes it.
    pub v_ego_cluster: f32,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub left_blind_spot: bool,
    pub right_blind_spot: bool,
    pub brake_lights: bool,
    /// Measured steering wheel angle, degrees.
    pub steering_angle_deg: f32,
    /// Controller-desired steering angle, degrees.
    pub steering_angle_desired_deg: f32,
    pub engine_rpm: f32,
    pub tpms: TirePressures,
}

/// A point in road space, relative to the camera: x forward, y left,
/// z up, meters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoadPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RoadPoint {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A polyline in road space (lane line, road edge, or predicted path).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelLine {
    pub points: Vec<RoadPoint>,
}

/// One tracked lead from the model output.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LeadData {
    /// Longitudinal distance, meters.
    pub d_rel: f32,
    /// Lateral offset, meters (positive left).
    pub y_rel: f32,
    /// Relative velocity, m/s (negative = closing).
    pub v_rel: f32,
    /// Detection probability in `[0, 1]`.
    pub prob: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelData {
    pub lane_lines: Vec<ModelLine>,
    pub lane_line_probs: Vec<f32>,
    pub road_edges: Vec<ModelLine>,
    pub road_edge_stds: Vec<f32>,
    pub path: ModelLine,
    /// Predicted heading (orientation about z) at future timesteps;
    /// index 16 is ~2.5 s ahead.
    pub orientation_z: Vec<f32>,
    pub leads: [LeadData; 2],
}

/// Radar-fused primary lead, used by the diagnostic panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RadarLead {
    pub status: bool,
    pub d_rel: f32,
    pub v_rel: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadarState {
    pub lead_one: RadarLead,
}

/// Regional speed-limit sign convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpeedLimitSign {
    #[default]
    None,
    /// US/Canada rectangular "SPEED LIMIT" sign.
    Mutcd,
    /// EU circular red-ringed sign.
    Vienna,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavInstruction {
    /// Posted speed limit, m/s; 0.0 when unknown.
    pub speed_limit: f32,
    pub speed_limit_sign: SpeedLimitSign,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GpsLocation {
    /// Horizontal accuracy, meters.
    pub accuracy: f32,
    /// Meters above sea level.
    pub altitude: f32,
    pub bearing_deg: f32,
    pub bearing_accuracy_deg: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GnssReport {
    /// Satellites used in the current measurement report.
    pub num_measurements: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriverMonitoringState {
    pub is_active_mode: bool,
    pub is_rhd: bool,
}
