//! Per-frame draw list built from the scene, before anything touches the GPU.

use crate::mesh::LineVertex;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use latticeview_scene::{Geometry, NodeKind, Scene, Side};
use std::ops::Range;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub color: [f32; 4],
}

impl InstanceData {
    fn new(model: Mat4, color: [f32; 4]) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color,
        }
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.model_3[0], self.model_3[1], self.model_3[2])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    Plane,
}

/// Pipeline selection for a run of instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawKey {
    pub shape: Shape,
    pub side: Side,
    pub translucent: bool,
}

impl DrawKey {
    fn sort_key(&self) -> (u8, u8) {
        let shape = match self.shape {
            Shape::Box => 0,
            Shape::Plane => 1,
        };
        (shape, side_index(self.side))
    }
}

pub(crate) fn side_index(side: Side) -> u8 {
    match side {
        Side::Front => 0,
        Side::Back => 1,
        Side::Double => 2,
    }
}

/// A contiguous run of instances drawn with one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub key: DrawKey,
    pub instances: Range<u32>,
}

#[derive(Debug, Default)]
pub struct PreparedFrame {
    pub instances: Vec<InstanceData>,
    /// Opaque batches first, then translucent batches far to near.
    pub batches: Vec<Batch>,
    /// Helper lines already in world space.
    pub lines: Vec<LineVertex>,
    /// Instances that did not fit in the buffer.
    pub skipped: usize,
}

/// Collect everything attached to `scene` into instance and line lists.
///
/// Opaque meshes are grouped by pipeline. Translucent meshes are sorted
/// back to front from `eye` so blending composes correctly.
pub fn prepare_frame(
    scene: &Scene,
    eye: Vec3,
    max_instances: usize,
    max_line_vertices: usize,
) -> PreparedFrame {
    let mut opaque: Vec<(DrawKey, InstanceData)> = Vec::new();
    let mut translucent: Vec<(DrawKey, InstanceData, f32)> = Vec::new();
    let mut lines: Vec<LineVertex> = Vec::new();

    for (_, node) in scene.attached() {
        let world = node.transform.matrix();
        match &node.kind {
            NodeKind::Mesh { geometry, material } => {
                let (shape, size) = match *geometry {
                    Geometry::Box {
                        width,
                        height,
                        depth,
                    } => (Shape::Box, Vec3::new(width, height, depth)),
                    Geometry::Plane { width, height } => {
                        (Shape::Plane, Vec3::new(width, height, 1.0))
                    }
                };
                let model = world * Mat4::from_scale(size);
                let key = DrawKey {
                    shape,
                    side: material.side,
                    translucent: material.is_translucent(),
                };
                let instance = InstanceData::new(
                    model,
                    material.color.with_alpha(material.effective_opacity()),
                );
                if key.translucent {
                    let depth = instance.translation().distance_squared(eye);
                    translucent.push((key, instance, depth));
                } else {
                    opaque.push((key, instance));
                }
            }
            NodeKind::AxesHelper { size } => {
                append_lines(&mut lines, crate::mesh::axes_lines(*size), world);
            }
            NodeKind::GridHelper {
                size,
                divisions,
                center_color,
                line_color,
            } => {
                append_lines(
                    &mut lines,
                    crate::mesh::grid_lines(*size, *divisions, *center_color, *line_color),
                    world,
                );
            }
        }
    }

    opaque.sort_by_key(|(key, _)| key.sort_key());
    translucent.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut frame = PreparedFrame::default();
    let ordered = opaque
        .into_iter()
        .chain(translucent.into_iter().map(|(key, inst, _)| (key, inst)));
    for (key, instance) in ordered {
        if frame.instances.len() >= max_instances {
            frame.skipped += 1;
            continue;
        }
        let index = frame.instances.len() as u32;
        frame.instances.push(instance);
        match frame.batches.last_mut() {
            Some(batch) if batch.key == key => batch.instances.end = index + 1,
            _ => frame.batches.push(Batch {
                key,
                instances: index..index + 1,
            }),
        }
    }

    if lines.len() > max_line_vertices {
        let total = lines.len();
        // Keep whole segments.
        lines.truncate(max_line_vertices & !1);
        tracing::debug!(
            "line buffer full: drew {} vertices, dropped {}",
            lines.len(),
            total - lines.len()
        );
    }
    frame.lines = lines;

    if frame.skipped > 0 {
        tracing::debug!(
            "instance buffer full: drew {}, skipped {}",
            frame.instances.len(),
            frame.skipped
        );
    }
    frame
}

fn append_lines(out: &mut Vec<LineVertex>, local: Vec<LineVertex>, world: Mat4) {
    out.extend(local.into_iter().map(|v| LineVertex {
        position: world
            .transform_point3(Vec3::from_array(v.position))
            .to_array(),
        color: v.color,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use latticeview_scene::{DemoScene, SceneConfig};

    fn demo_frame() -> (DemoScene, PreparedFrame) {
        let demo = DemoScene::build(&SceneConfig::default());
        let frame = prepare_frame(&demo.scene, Vec3::new(0.0, 0.0, 5.0), 1024, 4096);
        (demo, frame)
    }

    #[test]
    fn demo_scene_batches() {
        let (_, frame) = demo_frame();
        assert_eq!(frame.instances.len(), 28);
        assert_eq!(frame.skipped, 0);
        // The plane first, then every cube in a single translucent run.
        assert_eq!(frame.batches.len(), 2);
        assert_eq!(frame.batches[0].key.shape, Shape::Plane);
        assert_eq!(frame.batches[0].key.side, Side::Double);
        assert!(!frame.batches[0].key.translucent);
        assert_eq!(frame.batches[1].instances, 1..28);
        assert!(frame.batches[1].key.translucent);
    }

    #[test]
    fn translucent_instances_run_far_to_near() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let (_, frame) = demo_frame();
        let depths: Vec<f32> = frame.instances[1..]
            .iter()
            .map(|i| i.translation().distance_squared(eye))
            .collect();
        assert!(depths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn plane_model_carries_size_and_position() {
        let (_, frame) = demo_frame();
        let plane = &frame.instances[0];
        assert_eq!(plane.model_0[0], 4.0);
        assert_eq!(plane.model_1[1], 4.0);
        assert_eq!(plane.translation(), Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(plane.color, [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn helper_lines_are_in_world_space() {
        let (_, frame) = demo_frame();
        // Grid (21 * 4) + axes (6).
        assert_eq!(frame.lines.len(), 90);
        // The rotated grid lies in the XY plane.
        assert!(frame.lines[..84].iter().all(|v| v.position[2].abs() < 1e-5));
    }

    #[test]
    fn detached_helpers_add_no_lines() {
        let mut demo = DemoScene::build(&SceneConfig::default());
        demo.scene.remove(demo.grid).unwrap();
        demo.scene.remove(demo.axes).unwrap();
        let frame = prepare_frame(&demo.scene, Vec3::Z * 5.0, 1024, 4096);
        assert!(frame.lines.is_empty());
        assert_eq!(frame.instances.len(), 28);
    }

    #[test]
    fn overflow_is_skipped_not_drawn() {
        let demo = DemoScene::build(&SceneConfig::default());
        let frame = prepare_frame(&demo.scene, Vec3::Z * 5.0, 10, 4096);
        assert_eq!(frame.instances.len(), 10);
        assert_eq!(frame.skipped, 18);
        let drawn: u32 = frame.batches.iter().map(|b| b.instances.len() as u32).sum();
        assert_eq!(drawn, 10);
    }

    #[test]
    fn line_overflow_keeps_whole_segments() {
        let demo = DemoScene::build(&SceneConfig::default());
        let full = prepare_frame(&demo.scene, Vec3::Z * 5.0, 1024, 16_384);
        assert!(full.lines.len() > 11);

        let frame = prepare_frame(&demo.scene, Vec3::Z * 5.0, 1024, 11);
        assert_eq!(frame.lines.len(), 10);
        assert_eq!(frame.lines[..], full.lines[..10]);
    }
}
