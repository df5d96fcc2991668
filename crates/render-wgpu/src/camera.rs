use glam::{Mat4, Vec3};
use latticeview_render::RenderView;
use std::f32::consts::{PI, TAU};

/// Keeps the camera off the poles, where the up vector degenerates.
const POLAR_EPSILON: f32 = 1e-4;

/// Perspective camera orbiting a target point.
///
/// The offset from target to eye is held in spherical form: `radius`,
/// `polar` measured from +Y, and `azimuth` about +Y measured from +Z.
/// Dragging and zooming follow three.js OrbitControls defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    home: (Vec3, Vec3),
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_view(&RenderView::default())
    }
}

impl OrbitCamera {
    pub fn from_view(view: &RenderView) -> Self {
        let mut cam = Self {
            target: view.target,
            radius: 1.0,
            polar: PI / 2.0,
            azimuth: 0.0,
            fov: view.fov_degrees.to_radians(),
            aspect: view.aspect,
            near: view.near,
            far: view.far,
            min_distance: 0.01,
            max_distance: f32::INFINITY,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            home: (view.eye, view.target),
        };
        cam.look_from(view.eye, view.target);
        cam
    }

    /// Place the eye at `eye`, looking at `target`.
    pub fn look_from(&mut self, eye: Vec3, target: Vec3) {
        let offset = eye - target;
        self.target = target;
        self.radius = offset.length().max(self.min_distance);
        self.polar = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.azimuth = offset.x.atan2(offset.z);
        self.clamp();
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Orbit by a pointer delta. A drag the height of the viewport turns a
    /// full circle.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.azimuth -= TAU * dx / h * self.rotate_speed;
        self.polar -= TAU * dy / h * self.rotate_speed;
        self.azimuth = self.azimuth.rem_euclid(TAU);
        self.clamp();
    }

    /// Slide the target across the view plane so the point under the cursor
    /// follows it.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let target_distance = self.radius * (self.fov / 2.0).tan();
        let left = -self.right() * (2.0 * dx * target_distance / h);
        let up = self.up() * (2.0 * dy * target_distance / h);
        self.target += left + up;
    }

    /// Dolly in by `steps` wheel notches; negative steps dolly out.
    pub fn zoom(&mut self, steps: f32) {
        self.radius *= 0.95_f32.powf(self.zoom_speed * steps);
        self.clamp();
    }

    pub fn reset(&mut self) {
        let (eye, target) = self.home;
        self.look_from(eye, target);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    fn clamp(&mut self) {
        self.polar = self.polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn render_view(&self) -> RenderView {
        RenderView {
            eye: self.position(),
            target: self.target,
            fov_degrees: self.fov.to_degrees(),
            aspect: self.aspect,
            near: self.near,
            far: self.far,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_sits_on_plus_z() {
        let cam = OrbitCamera::default();
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let cam = OrbitCamera::default();
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn rotation_keeps_distance() {
        let mut cam = OrbitCamera::default();
        cam.rotate(120.0, -45.0, 720.0);
        cam.rotate(-300.0, 80.0, 720.0);
        assert!((cam.position().distance(cam.target) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn full_height_drag_is_a_full_turn() {
        let mut cam = OrbitCamera::default();
        let start = cam.position();
        cam.rotate(720.0, 0.0, 720.0);
        assert!(cam.position().abs_diff_eq(start, 1e-3));
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.rotate(0.0, 10_000.0, 720.0);
        assert!(cam.polar >= POLAR_EPSILON);
        assert!(!cam.view_matrix().col(0).x.is_nan());
        cam.rotate(0.0, -20_000.0, 720.0);
        assert!(cam.polar <= PI - POLAR_EPSILON);
    }

    #[test]
    fn zoom_respects_limits() {
        let mut cam = OrbitCamera::default();
        cam.zoom(1.0);
        assert!((cam.radius - 4.75).abs() < 1e-5);
        cam.zoom(-1.0);
        assert!((cam.radius - 5.0).abs() < 1e-4);

        cam.min_distance = 2.0;
        cam.max_distance = 10.0;
        cam.zoom(500.0);
        assert_eq!(cam.radius, 2.0);
        cam.zoom(-500.0);
        assert_eq!(cam.radius, 10.0);
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let mut cam = OrbitCamera::default();
        let eye = cam.position();
        cam.pan(100.0, 0.0, 720.0);
        let moved = cam.target;
        // Dragging right drags the scene right, so the target moves left.
        assert!(moved.x < 0.0);
        assert!(moved.y.abs() < 1e-5 && moved.z.abs() < 1e-5);
        assert!((cam.position() - eye).abs_diff_eq(moved, 1e-5));
    }

    #[test]
    fn reset_returns_home() {
        let mut cam = OrbitCamera::default();
        cam.rotate(50.0, 20.0, 720.0);
        cam.pan(10.0, 10.0, 720.0);
        cam.zoom(3.0);
        cam.reset();
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut cam = OrbitCamera::default();
        cam.set_viewport(800, 400);
        assert_eq!(cam.aspect, 2.0);
        cam.set_viewport(800, 0);
        assert_eq!(cam.aspect, 800.0);
    }

    #[test]
    fn render_view_round_trip() {
        let cam = OrbitCamera::default();
        let view = cam.render_view();
        assert!((view.fov_degrees - 75.0).abs() < 1e-4);
        assert!(view.eye.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
    }
}
