use glam::Vec3;
use latticeview_scene::config::CameraConfig;
use latticeview_scene::{Geometry, NodeKind, Scene};
use std::fmt::Write;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Width over height of the output.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}

impl RenderView {
    pub fn from_config(camera: &CameraConfig, aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(camera.position),
            target: Vec3::from_array(camera.target),
            fov_degrees: camera.fov_degrees,
            aspect,
            near: camera.near,
            far: camera.far,
        }
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a view, then produces output. It never
/// mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Text renderer for the CLI, logs and tests.
///
/// Produces one line per attached node.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Scene (background={}, nodes={}, attached={}) ===",
            scene.background(),
            scene.node_count(),
            scene.attached_count()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.2}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees,
            view.aspect
        );

        for (id, node) in scene.attached() {
            let p = node.transform.position;
            let detail = match &node.kind {
                NodeKind::Mesh { geometry, material } => {
                    let shape = match geometry {
                        Geometry::Box {
                            width,
                            height,
                            depth,
                        } => format!("box {width}x{height}x{depth}"),
                        Geometry::Plane { width, height } => format!("plane {width}x{height}"),
                    };
                    format!(
                        "{shape} color={} opacity={:.2}",
                        material.color,
                        material.effective_opacity()
                    )
                }
                NodeKind::AxesHelper { size } => format!("axes size={size}"),
                NodeKind::GridHelper {
                    size, divisions, ..
                } => format!("grid size={size} divisions={divisions}"),
            };
            let _ = writeln!(
                out,
                "  [{}] {} pos=({:.2}, {:.2}, {:.2}) rot.x={:.2} {}",
                id.short(),
                node.name,
                p.x,
                p.y,
                p.z,
                node.transform.rotation.x,
                detail
            );
        }

        out
    }
}
