//! Constructors for the demo's meshes and helpers, and the demo scene itself.

use crate::config::SceneConfig;
use crate::node::{BasicMaterial, Geometry, MaterialCache, MaterialRef, Node, NodeKind, Side};
use crate::scene::Scene;
use glam::Vec3;
use latticeview_common::{Color, NodeId, Transform};
use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

/// Unit box at the given position.
pub fn box_mesh(x: f32, y: f32, z: f32, material: MaterialRef) -> Node {
    Node::new(
        "box",
        NodeKind::Mesh {
            geometry: Geometry::unit_box(),
            material,
        },
    )
    .with_transform(Transform::from_position(Vec3::new(x, y, z)))
}

/// Yellow double-sided plane with its own material.
pub fn plane_mesh(width: f32, height: f32) -> Node {
    let material = BasicMaterial {
        side: Side::Double,
        ..BasicMaterial::opaque(Color::YELLOW)
    };
    Node::new(
        "plane",
        NodeKind::Mesh {
            geometry: Geometry::Plane { width, height },
            material: Arc::new(material),
        },
    )
}

pub fn axes_helper(size: f32) -> Node {
    Node::new("axes", NodeKind::AxesHelper { size })
}

/// Grid turned a quarter about X so it lies in the XY plane.
pub fn grid_helper(size: f32, divisions: u32) -> Node {
    Node::new(
        "grid",
        NodeKind::GridHelper {
            size,
            divisions,
            center_color: Color(0x444444),
            line_color: Color(0x888888),
        },
    )
    .with_transform(Transform {
        rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
        ..Transform::default()
    })
}

/// Centres of a `grid_size`³ lattice, centred on the origin.
///
/// Ordered with x outermost and z innermost.
pub fn lattice_positions(grid_size: u32, cell: f32, gap: f32) -> Vec<Vec3> {
    let step = cell + gap;
    let offset = (grid_size as f32 - 1.0) / 2.0;
    let coord = |i: u32| (i as f32 - offset) * step;
    let mut out = Vec::with_capacity((grid_size as usize).saturating_pow(3));
    for x in 0..grid_size {
        for y in 0..grid_size {
            for z in 0..grid_size {
                out.push(Vec3::new(coord(x), coord(y), coord(z)));
            }
        }
    }
    out
}

/// The demo scene plus the handles the app needs to drive it.
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub scene: Scene,
    pub materials: MaterialCache,
    pub plane: NodeId,
    pub grid: NodeId,
    pub axes: NodeId,
    pub cubes: Vec<NodeId>,
}

impl DemoScene {
    /// Build the stock scene: plane, grid, axes, then the cube lattice.
    ///
    /// Helpers switched off in the config are created but left detached.
    pub fn build(config: &SceneConfig) -> Self {
        let materials = MaterialCache::new();
        let mut scene = Scene::with_background(config.background);

        let p = &config.plane;
        let plane = scene.spawn(
            plane_mesh(p.width, p.height)
                .with_transform(Transform::from_position(Vec3::from_array(p.position))),
        );

        let h = &config.helpers;
        let place = |scene: &mut Scene, node: Node, show: bool| {
            if show {
                scene.spawn(node)
            } else {
                scene.insert(node)
            }
        };
        let grid = place(&mut scene, grid_helper(h.grid_size, h.grid_divisions), h.show_grid);
        let axes = place(&mut scene, axes_helper(h.axes_size), h.show_axis);

        let l = &config.lattice;
        let cubes: Vec<NodeId> = lattice_positions(l.grid_size, l.cell, l.gap)
            .into_iter()
            .enumerate()
            .map(|(i, pos)| {
                let mut node = box_mesh(pos.x, pos.y, pos.z, materials.translucent.clone());
                node.name = format!("cube_{i}");
                if let NodeKind::Mesh { geometry, .. } = &mut node.kind {
                    *geometry = Geometry::Box {
                        width: l.cell,
                        height: l.cell,
                        depth: l.cell,
                    };
                }
                scene.spawn(node)
            })
            .collect();

        tracing::info!(
            "built demo scene: {} nodes, {} cubes",
            scene.node_count(),
            cubes.len()
        );

        Self {
            scene,
            materials,
            plane,
            grid,
            axes,
            cubes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneEvent;
    use std::collections::BTreeSet;

    #[test]
    fn lattice_has_27_symmetric_positions() {
        let positions = lattice_positions(3, 1.0, 0.2);
        assert_eq!(positions.len(), 27);
        assert_eq!(positions[0], Vec3::splat(-1.2));
        assert_eq!(positions[13], Vec3::ZERO);
        assert_eq!(positions[26], Vec3::splat(1.2));
        // z varies fastest
        assert_eq!(positions[1], Vec3::new(-1.2, -1.2, 0.0));

        let distinct: BTreeSet<[u32; 3]> = positions
            .iter()
            .map(|p| p.to_array().map(f32::to_bits))
            .collect();
        assert_eq!(distinct.len(), 27);
        let sum: Vec3 = positions.iter().copied().sum();
        assert!(sum.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn single_cell_lattice_sits_on_origin() {
        assert_eq!(lattice_positions(1, 1.0, 0.2), vec![Vec3::ZERO]);
    }

    #[test]
    fn grid_helper_lies_in_xy() {
        let grid = grid_helper(20.0, 20);
        // Local +Z (a grid axis) ends up on world -Y after the quarter turn.
        let p = grid.transform.matrix().transform_point3(Vec3::Z);
        assert!(p.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), 1e-6));
    }

    #[test]
    fn plane_is_yellow_and_double_sided() {
        let plane = plane_mesh(4.0, 4.0);
        let material = plane.material().unwrap();
        assert_eq!(material.color, Color::YELLOW);
        assert_eq!(material.side, Side::Double);
        assert!(!material.is_translucent());
    }

    #[test]
    fn demo_scene_layout() {
        let demo = DemoScene::build(&SceneConfig::default());
        assert_eq!(demo.cubes.len(), 27);
        assert_eq!(demo.scene.node_count(), 30);
        assert_eq!(demo.scene.attached_count(), 30);

        let order: Vec<NodeId> = demo.scene.attached().map(|(id, _)| id).take(3).collect();
        assert_eq!(order, vec![demo.plane, demo.grid, demo.axes]);

        let plane = demo.scene.get(demo.plane).unwrap();
        assert_eq!(plane.transform.position, Vec3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn every_cube_shares_the_cached_material() {
        let demo = DemoScene::build(&SceneConfig::default());
        for id in &demo.cubes {
            let node = demo.scene.get(*id).unwrap();
            assert!(Arc::ptr_eq(
                node.material().unwrap(),
                &demo.materials.translucent
            ));
        }
    }

    #[test]
    fn hidden_helpers_are_stored_but_detached() {
        let mut config = SceneConfig::default();
        config.helpers.show_axis = false;
        let demo = DemoScene::build(&config);
        assert!(demo.scene.contains(demo.axes));
        assert!(!demo.scene.is_attached(demo.axes));
        assert!(demo.scene.is_attached(demo.grid));

        let added: Vec<NodeId> = demo
            .scene
            .events()
            .iter()
            .filter_map(|e| match e {
                SceneEvent::Added { id } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(added.len(), 29);
        assert_eq!(&added[..2], &[demo.plane, demo.grid]);
        assert!(!added.contains(&demo.axes));
    }
}
