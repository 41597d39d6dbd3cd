//! Camera-space projection: road-space points to screen pixels.
//!
//! Two stages:
//! 1. Pinhole projection through the calibration (view-from-road) matrix
//!    and the camera intrinsics, producing camera-frame pixel coordinates.
//! 2. The frame transform mapping camera-frame pixels into the viewport,
//!    rebuilt whenever the viewport or calibration changes.
//!
//! The frame transform is built translate -> scale -> translate, and that
//! order is load-bearing: the principal point must land on the (offset)
//! viewport center *after* zooming about it, or the overlay geometry
//! drifts off the live camera image.

use crate::telemetry::RoadPoint;

pub type Mat3 = [[f32; 3]; 3];

/// Substituted whenever the live calibration is marked invalid, so the
/// projection is always well-defined (never identity/uninitialized).
/// Maps road space (x forward, y left, z up) to camera axes
/// (right, down, forward).
pub const DEFAULT_CALIBRATION: Mat3 = [
    [0.0, -1.0, 0.0],
    [0.0, 0.0, -1.0],
    [1.0, 0.0, 0.0],
];

/// Road-camera intrinsics: 2648 px focal length, 1928x1208 sensor.
pub const CAM_INTRINSICS: Mat3 = [
    [2648.0, 0.0, 1928.0 / 2.0],
    [0.0, 2648.0, 1208.0 / 2.0],
    [0.0, 0.0, 1.0],
];

/// Camera-frame points projecting further than this outside the frame are
/// dropped rather than drawn wildly off-screen.
const CLIP_MARGIN: f32 = 500.0;

/// Zoom at the reference viewport width; scales linearly with the actual
/// viewport so smaller windows see the same framing.
const DEFAULT_ZOOM: f32 = 1.1;
const REFERENCE_WIDTH: f32 = 2160.0;
const DEFAULT_X_OFFSET: f32 = 0.0;
const DEFAULT_Y_OFFSET: f32 = 150.0;

fn mat_vec(m: &Mat3, v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

// =============================================================================
// 2D Affine Transform
// =============================================================================

/// A 2D affine transform with post-multiplying builder methods: operations
/// written last apply to the point first, so
/// `identity().translate(a).scale(z).translate(b)` maps `p` to
/// `z * (p + b) + a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2 {
    m: Mat3,
}

impl Transform2 {
    pub const fn identity() -> Self {
        Self { m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] }
    }

    pub fn translate(self, tx: f32, ty: f32) -> Self {
        self.then([[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]])
    }

    pub fn scale(self, s: f32) -> Self {
        self.then([[s, 0.0, 0.0], [0.0, s, 0.0], [0.0, 0.0, 1.0]])
    }

    fn then(self, op: Mat3) -> Self {
        let a = &self.m;
        let b = &op;
        let mut m = [[0.0f32; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Self { m }
    }

    pub fn map(&self, x: f32, y: f32) -> (f32, f32) {
        let p = mat_vec(&self.m, [x, y, 1.0]);
        (p[0], p[1])
    }
}

// =============================================================================
// Projection State
// =============================================================================

/// Camera calibration, viewport geometry, and the derived frame transform.
/// Stable across frames; mutated only on resize or calibration updates.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionState {
    width: u32,
    height: u32,
    x_offset: f32,
    y_offset: f32,
    zoom: f32,
    intrinsics: Mat3,
    calibration: Mat3,
    transform: Transform2,
}

impl ProjectionState {
    pub fn new(width: u32, height: u32) -> Self {
        let mut state = Self {
            width,
            height,
            x_offset: DEFAULT_X_OFFSET,
            y_offset: DEFAULT_Y_OFFSET,
            zoom: DEFAULT_ZOOM,
            intrinsics: CAM_INTRINSICS,
            calibration: DEFAULT_CALIBRATION,
            transform: Transform2::identity(),
        };
        state.update_frame_mat();
        state
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Viewport resize. Rebuilds the frame transform.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.update_frame_mat();
    }

    /// Calibration update. `None` means the live calibration is invalid;
    /// the default constant is substituted so the projection stays
    /// well-defined.
    pub fn set_calibration(&mut self, calibration: Option<Mat3>) {
        self.calibration = calibration.unwrap_or(DEFAULT_CALIBRATION);
    }

    /// Rebuild the camera-frame -> viewport transform.
    ///
    /// 1) put (0, 0) at the (offset) middle of the viewport,
    /// 2) apply the same zoom as the video,
    /// 3) put (0, 0) at the camera principal point.
    fn update_frame_mat(&mut self) {
        let w = self.width as f32;
        let h = self.height as f32;
        self.zoom = DEFAULT_ZOOM * w / REFERENCE_WIDTH;
        let y_offset = self.y_offset * w / REFERENCE_WIDTH;
        self.transform = Transform2::identity()
            .translate(w / 2.0 - self.x_offset, h / 2.0 - y_offset)
            .scale(self.zoom)
            .translate(-self.intrinsics[0][2], -self.intrinsics[1][2]);
    }

    /// Project a road-space point to viewport pixel coordinates.
    ///
    /// Returns `None` for points behind the camera or far outside the
    /// frame; callers skip the dependent visual element for the frame.
    pub fn car_space_to_screen(&self, p: RoadPoint) -> Option<(f32, f32)> {
        let cam = mat_vec(&self.calibration, [p.x, p.y, p.z]);
        if cam[2] <= 0.0 {
            return None;
        }
        let kp = mat_vec(&self.intrinsics, cam);
        let fx = kp[0] / kp[2];
        let fy = kp[1] / kp[2];

        let cam_w = 2.0 * self.intrinsics[0][2];
        let cam_h = 2.0 * self.intrinsics[1][2];
        if fx < -CLIP_MARGIN || fx > cam_w + CLIP_MARGIN || fy < -CLIP_MARGIN || fy > cam_h + CLIP_MARGIN {
            return None;
        }

        Some(self.transform.map(fx, fy))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_order_is_load_bearing() {
        // translate(a).scale(z).translate(b) must map p to z*(p+b)+a.
        // The reversed composition would give z*p + b + a instead.
        let t = Transform2::identity().translate(100.0, 50.0).scale(2.0).translate(-10.0, -20.0);
        assert_eq!(t.map(10.0, 20.0), (100.0, 50.0), "offset point lands on the first translation");
        assert_eq!(t.map(11.0, 20.0), (102.0, 50.0), "zoom applies about the inner translation");
    }

    #[test]
    fn test_principal_point_maps_to_offset_center() {
        let proj = ProjectionState::new(2160, 1080);
        let (cx, cy) = proj.transform.map(CAM_INTRINSICS[0][2], CAM_INTRINSICS[1][2]);
        assert!((cx - (2160.0 / 2.0 - DEFAULT_X_OFFSET)).abs() < 1e-3);
        assert!((cy - (1080.0 / 2.0 - DEFAULT_Y_OFFSET)).abs() < 1e-3);
    }

    #[test]
    fn test_forward_point_projects_near_center() {
        let proj = ProjectionState::new(2160, 1080);
        let (x, y) = proj.car_space_to_screen(RoadPoint::new(50.0, 0.0, 0.0)).unwrap();
        // Straight ahead at road height: horizontally centered, in frame
        assert!((x - 1080.0).abs() < 1.0, "centered horizontally, got {x}");
        assert!(y > 0.0 && y < 1080.0, "within viewport, got {y}");
    }

    #[test]
    fn test_point_behind_camera_is_skipped() {
        let proj = ProjectionState::new(2160, 1080);
        assert!(proj.car_space_to_screen(RoadPoint::new(-5.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_left_is_left_on_screen() {
        let proj = ProjectionState::new(2160, 1080);
        let (x_center, _) = proj.car_space_to_screen(RoadPoint::new(30.0, 0.0, 0.0)).unwrap();
        let (x_left, _) = proj.car_space_to_screen(RoadPoint::new(30.0, 2.0, 0.0)).unwrap();
        assert!(x_left < x_center, "positive y (left) must decrease screen x");
    }

    #[test]
    fn test_invalid_calibration_substitutes_default() {
        let mut proj = ProjectionState::new(2160, 1080);
        proj.set_calibration(Some([[0.0; 3]; 3]));
        assert!(
            proj.car_space_to_screen(RoadPoint::new(50.0, 0.0, 0.0)).is_none(),
            "degenerate calibration projects nothing"
        );

        proj.set_calibration(None);
        assert!(
            proj.car_space_to_screen(RoadPoint::new(50.0, 0.0, 0.0)).is_some(),
            "invalid calibration falls back to the default constant"
        );
    }

    #[test]
    fn test_resize_rebuilds_transform() {
        let mut proj = ProjectionState::new(2160, 1080);
        let before = proj.transform;
        proj.set_viewport(1920, 1080);
        assert_ne!(proj.transform, before, "resize must rebuild the frame transform");
    }
}
