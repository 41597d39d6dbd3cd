//! Fake telemetry generation for the desktop simulator.
//!
//! Produces a fully-populated `TelemetrySnapshot` each tick from smooth
//! sine generators, so every overlay element gets exercised without a
//! vehicle attached.

use roadhud_common::telemetry::{
    LeadData, ModelLine, RoadPoint, SpeedLimitSign, TelemetrySnapshot,
};

/// Toggleable scenario switches bound to keyboard keys in the main loop.
#[derive(Clone, Copy, Debug)]
pub struct SimToggles {
    pub engaged: bool,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub blind_spot: bool,
    pub braking: bool,
    pub vienna_sign: bool,
    pub drop_controls: bool,
}

impl Default for SimToggles {
    fn default() -> Self {
        Self {
            engaged: true,
            left_blinker: false,
            right_blinker: false,
            blind_spot: false,
            braking: false,
            vienna_sign: false,
            drop_controls: false,
        }
    }
}

fn fake_signal(t: f32, min: f32, max: f32, freq: f32) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// Gently curving model polyline out to ~100 m.
fn road_line(t: f32, lateral: f32) -> ModelLine {
    let curvature = (t * 0.05).sin() * 0.0015;
    ModelLine {
        points: (0..33)
            .map(|i| {
                let x = i as f32 * 3.0 + 1.0;
                RoadPoint::new(x, lateral + curvature * x * x, 0.0)
            })
            .collect(),
    }
}

pub fn build_snapshot(t: f32, frame: u64, toggles: &SimToggles) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();
    snap.frame = frame;

    snap.controls_state.alive = !toggles.drop_controls;
    snap.controls_state.valid = true;
    snap.controls_state.payload.enabled = toggles.engaged;
    snap.controls_state.payload.engageable = true;
    snap.controls_state.payload.v_cruise = 110.0;
    snap.controls_state.payload.v_cruise_cluster = fake_signal(t, 100.0, 120.0, 0.03);

    snap.car_state.alive = true;
    snap.car_state.valid = true;
    let car = &mut snap.car_state.payload;
    car.v_ego = fake_signal(t, 18.0, 33.0, 0.07);
    car.v_ego_cluster = car.v_ego * 1.02;
    car.left_blinker = toggles.left_blinker;
    car.right_blinker = toggles.right_blinker;
    car.left_blind_spot = toggles.blind_spot && toggles.left_blinker;
    car.right_blind_spot = toggles.blind_spot && toggles.right_blinker;
    car.brake_lights = toggles.braking;
    car.steering_angle_deg = fake_signal(t, -14.0, 14.0, 0.11);
    car.steering_angle_desired_deg = fake_signal(t + 0.4, -14.0, 14.0, 0.11);
    car.engine_rpm = fake_signal(t, 900.0, 3200.0, 0.09);
    car.tpms.fl = fake_signal(t, 28.0, 38.0, 0.02);
    car.tpms.fr = fake_signal(t + 1.0, 28.0, 38.0, 0.02);
    car.tpms.rl = fake_signal(t + 2.0, 28.0, 38.0, 0.02);
    car.tpms.rr = fake_signal(t + 3.0, 2.0, 38.0, 0.02); // dips into the N/A range

    snap.model.alive = true;
    snap.model.valid = true;
    let model = &mut snap.model.payload;
    model.lane_lines = vec![road_line(t, 1.85), road_line(t, -1.85)];
    model.lane_line_probs = vec![fake_signal(t, 0.2, 1.0, 0.13), fake_signal(t + 2.0, 0.2, 1.0, 0.13)];
    model.road_edges = vec![road_line(t, 3.6), road_line(t, -3.6)];
    model.road_edge_stds = vec![fake_signal(t, 0.0, 0.8, 0.06), fake_signal(t + 1.5, 0.0, 0.8, 0.06)];
    model.path = road_line(t, 0.0);
    model.orientation_z = (0..33).map(|i| (t * 0.05).sin() * 0.003 * i as f32).collect();
    let lead_dist = fake_signal(t, 8.0, 60.0, 0.05);
    model.leads = [
        LeadData { d_rel: lead_dist, y_rel: 0.0, v_rel: fake_signal(t, -6.0, 2.0, 0.08), prob: 0.95 },
        LeadData { d_rel: lead_dist + 25.0, y_rel: 1.5, v_rel: 0.5, prob: 0.7 },
    ];

    snap.radar_state.alive = true;
    snap.radar_state.valid = true;
    snap.radar_state.payload.lead_one.status = true;
    snap.radar_state.payload.lead_one.d_rel = lead_dist;
    snap.radar_state.payload.lead_one.v_rel = model.leads[0].v_rel;

    snap.nav_instruction.alive = true;
    snap.nav_instruction.valid = true;
    snap.nav_instruction.payload.speed_limit = 29.06; // 65 mph posted limit, in m/s
    snap.nav_instruction.payload.speed_limit_sign =
        if toggles.vienna_sign { SpeedLimitSign::Vienna } else { SpeedLimitSign::Mutcd };

    snap.gps_location.alive = true;
    snap.gps_location.valid = true;
    snap.gps_location.payload.accuracy = fake_signal(t, 0.4, 3.0, 0.04);
    snap.gps_location.payload.altitude = fake_signal(t, 120.0, 150.0, 0.01);
    snap.gps_location.payload.bearing_deg = (t * 4.0) % 360.0;
    snap.gps_location.payload.bearing_accuracy_deg = 1.0;

    snap.gnss.alive = true;
    snap.gnss.valid = true;
    snap.gnss.payload.num_measurements = 14;

    snap.driver_monitoring.alive = true;
    snap.driver_monitoring.valid = true;
    snap.driver_monitoring.payload.is_active_mode = true;

    snap
}
