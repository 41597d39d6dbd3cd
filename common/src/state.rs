//! State extraction: one telemetry snapshot in, one `DerivedHudState` out.
//!
//! Every derived value is display-ready: speeds are already in the chosen
//! display unit, geometry is already projected to screen space, and missing
//! or stale signal groups have been replaced with their sentinel values.
//! The renderer never touches raw telemetry.

use crate::alerts::VehicleStatus;
use crate::config::{PROPERTY_DOWNSHIFT_INTERVAL, SET_SPEED_NA};
use crate::projection::ProjectionState;
use crate::telemetry::{ModelLine, RoadPoint, SpeedLimitSign, TelemetrySnapshot};
use crate::units::{KM_TO_MILE, speed_to_display, speed_unit};

/// Lane-line visibility caps out below full opacity so the camera image
/// stays legible underneath.
const LANE_LINE_MAX_ALPHA: f32 = 0.7;

/// Geometry beyond this distance is not worth rasterizing.
const MAX_DRAW_DISTANCE: f32 = 100.0;

/// Path hue at zero predicted curvature (degrees on the color wheel).
const PATH_HUE_STRAIGHT: f32 = 112.0;

/// Orientation lookahead index corresponding to ~2.5 s ahead.
const ORIENTATION_LOOKAHEAD_IDX: usize = 16;

/// Lateral half-widths, meters, for extruding model polylines into
/// fillable polygons.
const LANE_LINE_HALF_WIDTH: f32 = 0.025;
const ROAD_EDGE_HALF_WIDTH: f32 = 0.025;
const PATH_HALF_WIDTH: f32 = 0.9;

/// All polylines ride slightly above the road surface.
const ROAD_Z_OFFSET: f32 = 1.22;

/// Display preferences delivered by the configuration layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub is_metric: bool,
    /// Whether the system is controlling speed; gates lead indicators.
    pub longitudinal_control: bool,
}

/// A drawable lead: kinematics plus its projected screen anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeadVehicle {
    pub d_rel: f32,
    pub v_rel: f32,
    pub anchor: (f32, f32),
}

/// Display-ready properties for one frame. Overwritten in place every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedHudState {
    // Speed block
    pub speed: f32,
    pub speed_unit: &'static str,
    pub set_speed: f32,
    pub is_cruise_set: bool,
    pub speed_limit: f32,
    pub speed_limit_sign: SpeedLimitSign,
    pub is_metric: bool,
    pub longitudinal_control: bool,
    pub is_braking: bool,
    pub status: VehicleStatus,

    // Turn signals and blind spots
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub left_blind_spot: bool,
    pub right_blind_spot: bool,

    // Screen-space geometry
    pub lane_lines: Vec<Vec<(f32, f32)>>,
    pub lane_line_alphas: Vec<f32>,
    pub road_edges: Vec<Vec<(f32, f32)>>,
    pub road_edge_alphas: Vec<f32>,
    pub path: Vec<(f32, f32)>,
    pub path_curve_hue: f32,
    pub blind_spot_left_poly: Vec<(f32, f32)>,
    pub blind_spot_right_poly: Vec<(f32, f32)>,
    pub leads: [Option<LeadVehicle>; 2],

    // Diagnostic panels, refreshed every tick
    pub steering_angle_deg: f32,
    pub steering_angle_desired_deg: f32,
    pub engine_rpm: f32,
    pub lead_status: bool,
    pub lead_d_rel: f32,
    pub lead_v_rel: f32,
    pub altitude: f32,
    pub bearing_deg: f32,
    pub bearing_accuracy_deg: f32,

    // Rate-limited properties, refreshed at half rate and held in between
    pub engageable: bool,
    pub dm_active: bool,
    pub right_hand_dm: bool,
    pub tpms: [f32; 4],
    pub gps_accuracy: f32,
    pub gps_sat_count: u32,
}

/// Owns the per-session sticky flags and the `DerivedHudState` it rewrites
/// each tick.
#[derive(Clone, Debug, Default)]
pub struct StateExtractor {
    v_ego_cluster_seen: bool,
    state: DerivedHudState,
}

impl StateExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DerivedHudState {
        &self.state
    }

    /// Derive display properties from the latest snapshot. Rate-limited
    /// fields are only recomputed on downshift ticks (keyed off the
    /// snapshot's own frame counter) and hold their previous value
    /// otherwise.
    pub fn update(
        &mut self,
        snap: &TelemetrySnapshot,
        prefs: &UiPrefs,
        proj: &ProjectionState,
    ) -> &DerivedHudState {
        self.state.is_metric = prefs.is_metric;
        self.state.longitudinal_control = prefs.longitudinal_control;
        self.state.speed_unit = speed_unit(prefs.is_metric);

        self.update_speeds(snap, prefs);
        self.update_car_state(snap);
        self.update_speed_limit(snap, prefs);
        self.update_status(snap);
        self.update_geometry(snap, proj);
        self.update_panels(snap);

        if snap.frame % PROPERTY_DOWNSHIFT_INTERVAL == 0 {
            self.update_rate_limited(snap);
        }

        &self.state
    }

    fn update_speeds(&mut self, snap: &TelemetrySnapshot, prefs: &UiPrefs) {
        // Set speed: a stale controls channel shows the sentinel, never 0.
        let mut set_speed = match snap.controls_state.live() {
            Some(cs) if cs.v_cruise_cluster == 0.0 => cs.v_cruise,
            Some(cs) => cs.v_cruise_cluster,
            None => SET_SPEED_NA,
        };
        let is_cruise_set = set_speed > 0.0 && set_speed != SET_SPEED_NA;
        if is_cruise_set && !prefs.is_metric {
            set_speed *= KM_TO_MILE;
        }
        self.state.set_speed = set_speed;
        self.state.is_cruise_set = is_cruise_set;

        // Ego speed: prefer the cluster value once it has ever been
        // non-zero. The all-zero startup reading falls back to the raw
        // sensor for that tick only. A dead controls channel zeroes the
        // readout outright.
        let car = &snap.car_state.payload;
        let v_ego = if car.v_ego_cluster == 0.0 && !self.v_ego_cluster_seen {
            car.v_ego
        } else {
            self.v_ego_cluster_seen = true;
            car.v_ego_cluster
        };
        self.state.speed = if snap.controls_state.live().is_some() {
            speed_to_display(v_ego, prefs.is_metric).max(0.0)
        } else {
            0.0
        };
    }

    fn update_car_state(&mut self, snap: &TelemetrySnapshot) {
        let car = &snap.car_state.payload;
        self.state.left_blinker = car.left_blinker;
        self.state.right_blinker = car.right_blinker;
        self.state.left_blind_spot = car.left_blind_spot;
        self.state.right_blind_spot = car.right_blind_spot;
        self.state.is_braking = car.brake_lights;
        self.state.steering_angle_deg = car.steering_angle_deg;
        self.state.steering_angle_desired_deg = car.steering_angle_desired_deg;
        self.state.engine_rpm = car.engine_rpm;
    }

    fn update_speed_limit(&mut self, snap: &TelemetrySnapshot, prefs: &UiPrefs) {
        match snap.nav_instruction.live_valid() {
            Some(nav) => {
                self.state.speed_limit = speed_to_display(nav.speed_limit, prefs.is_metric);
                self.state.speed_limit_sign = nav.speed_limit_sign;
            }
            None => {
                self.state.speed_limit = 0.0;
                self.state.speed_limit_sign = SpeedLimitSign::None;
            }
        }
    }

    fn update_status(&mut self, snap: &TelemetrySnapshot) {
        self.state.status = match snap.controls_state.live() {
            Some(cs) if cs.enabled && cs.overriding => VehicleStatus::Override,
            Some(cs) if cs.enabled => VehicleStatus::Engaged,
            _ => VehicleStatus::Disengaged,
        };
    }

    fn update_geometry(&mut self, snap: &TelemetrySnapshot, proj: &ProjectionState) {
        let Some(model) = snap.model.live_valid() else {
            self.state.lane_lines.clear();
            self.state.lane_line_alphas.clear();
            self.state.road_edges.clear();
            self.state.road_edge_alphas.clear();
            self.state.path.clear();
            self.state.blind_spot_left_poly.clear();
            self.state.blind_spot_right_poly.clear();
            self.state.leads = [None, None];
            return;
        };

        self.state.lane_lines = model
            .lane_lines
            .iter()
            .map(|line| line_polygon(line, proj, LANE_LINE_HALF_WIDTH, ROAD_Z_OFFSET, MAX_DRAW_DISTANCE))
            .collect();
        self.state.lane_line_alphas = model
            .lane_line_probs
            .iter()
            .map(|p| p.clamp(0.0, LANE_LINE_MAX_ALPHA))
            .collect();

        self.state.road_edges = model
            .road_edges
            .iter()
            .map(|line| line_polygon(line, proj, ROAD_EDGE_HALF_WIDTH, ROAD_Z_OFFSET, MAX_DRAW_DISTANCE))
            .collect();
        self.state.road_edge_alphas =
            model.road_edge_stds.iter().map(|std| (1.0 - std).clamp(0.0, 1.0)).collect();

        // Truncate the path at the lead so it never draws through a car.
        let lead = snap.radar_state.live_valid().map(|r| r.lead_one).unwrap_or_default();
        let max_dist = if lead.status {
            (lead.d_rel - (lead.d_rel * 0.35).min(10.0)).clamp(0.0, MAX_DRAW_DISTANCE)
        } else {
            MAX_DRAW_DISTANCE
        };
        self.state.path = line_polygon(&model.path, proj, PATH_HALF_WIDTH, ROAD_Z_OFFSET, max_dist);
        self.state.path_curve_hue = path_curve_hue(&model.orientation_z);

        self.state.blind_spot_left_poly = blind_spot_polygon(proj, true);
        self.state.blind_spot_right_poly = blind_spot_polygon(proj, false);

        // Leads: probability gate, plus a distinctness gate for the second
        let leads = &model.leads;
        self.state.leads = [None, None];
        if leads[0].prob > crate::config::LEAD_PROB_MIN {
            self.state.leads[0] = project_lead(proj, leads[0].d_rel, leads[0].y_rel, leads[0].v_rel);
        }
        if leads[1].prob > crate::config::LEAD_PROB_MIN
            && (leads[1].d_rel - leads[0].d_rel).abs() > crate::config::LEAD_MIN_SEPARATION
        {
            self.state.leads[1] = project_lead(proj, leads[1].d_rel, leads[1].y_rel, leads[1].v_rel);
        }
    }

    fn update_panels(&mut self, snap: &TelemetrySnapshot) {
        let lead = snap.radar_state.live_valid().map(|r| r.lead_one).unwrap_or_default();
        self.state.lead_status = lead.status;
        self.state.lead_d_rel = lead.d_rel;
        self.state.lead_v_rel = lead.v_rel;

        match snap.gps_location.live_valid() {
            Some(gps) => {
                self.state.altitude = gps.altitude;
                self.state.bearing_deg = gps.bearing_deg;
                self.state.bearing_accuracy_deg = gps.bearing_accuracy_deg;
            }
            None => {
                // zero accuracy doubles as the "no fix" marker downstream
                self.state.altitude = 0.0;
                self.state.bearing_deg = 0.0;
                self.state.bearing_accuracy_deg = 0.0;
            }
        }
    }

    fn update_rate_limited(&mut self, snap: &TelemetrySnapshot) {
        if let Some(cs) = snap.controls_state.live() {
            self.state.engageable = cs.engageable || cs.enabled;
        }
        if let Some(dm) = snap.driver_monitoring.live_valid() {
            self.state.dm_active = dm.is_active_mode;
            self.state.right_hand_dm = dm.is_rhd;
        }
        let car = &snap.car_state.payload;
        self.state.tpms = [car.tpms.fl, car.tpms.fr, car.tpms.rl, car.tpms.rr];
        if let Some(gps) = snap.gps_location.live_valid() {
            self.state.gps_accuracy = gps.accuracy;
        }
        if let Some(gnss) = snap.gnss.live_valid() {
            self.state.gps_sat_count = gnss.num_measurements;
        }
    }
}

/// Extrude a road-space polyline into a closed screen-space polygon by
/// projecting both lateral offsets of every point, walking up one side and
/// back down the other. Unprojectable points are skipped; fewer than three
/// surviving vertices yields an empty polygon (the element is skipped).
fn line_polygon(
    line: &ModelLine,
    proj: &ProjectionState,
    half_width: f32,
    z_off: f32,
    max_dist: f32,
) -> Vec<(f32, f32)> {
    let mut left = Vec::with_capacity(line.points.len());
    let mut right = Vec::with_capacity(line.points.len());
    for p in &line.points {
        if p.x > max_dist {
            break;
        }
        let a = proj.car_space_to_screen(RoadPoint::new(p.x, p.y + half_width, p.z + z_off));
        let b = proj.car_space_to_screen(RoadPoint::new(p.x, p.y - half_width, p.z + z_off));
        if let (Some(a), Some(b)) = (a, b) {
            left.push(a);
            right.push(b);
        }
    }
    if left.len() < 2 {
        return Vec::new();
    }
    left.extend(right.into_iter().rev());
    left
}

/// Hue of the path gradient's middle stop: bends from green toward yellow
/// with predicted heading change 2.5 s out. Rounded to two decimals so
/// float jitter in the model output does not change the drawn gradient
/// every frame.
fn path_curve_hue(orientation_z: &[f32]) -> f32 {
    let orientation_future = orientation_z
        .get(ORIENTATION_LOOKAHEAD_IDX)
        .map_or(0.0, |o| o.abs());
    let hue = (PATH_HUE_STRAIGHT - orientation_future * 420.0).max(70.0);
    (hue * 100.0).round() / 100.0
}

/// Road-space hazard trapezoid beside the car, projected to screen space.
fn blind_spot_polygon(proj: &ProjectionState, left: bool) -> Vec<(f32, f32)> {
    let side = if left { 1.0 } else { -1.0 };
    let corners = [
        RoadPoint::new(2.0, side * 1.2, 0.0),
        RoadPoint::new(12.0, side * 1.2, 0.0),
        RoadPoint::new(12.0, side * 3.4, 0.0),
        RoadPoint::new(2.0, side * 3.4, 0.0),
    ];
    let pts: Vec<_> = corners.iter().filter_map(|p| proj.car_space_to_screen(*p)).collect();
    if pts.len() < 3 { Vec::new() } else { pts }
}

fn project_lead(proj: &ProjectionState, d_rel: f32, y_rel: f32, v_rel: f32) -> Option<LeadVehicle> {
    proj.car_space_to_screen(RoadPoint::new(d_rel, y_rel, 0.0))
        .map(|anchor| LeadVehicle { d_rel, v_rel, anchor })
}

// =============================================================================
// Unit Tests
// =============================================================================
