use crate::panel::HelperHandles;
use latticeview_common::NodeId;
use latticeview_scene::Scene;
use serde::Serialize;

/// Read-only queries against the scene for the panel and the CLI.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(scene: &Scene, helpers: &HelperHandles) -> SceneSummary {
        SceneSummary {
            node_count: scene.node_count(),
            attached_count: scene.attached_count(),
            mesh_count: scene.mesh_count(),
            axes_visible: scene.is_attached(helpers.axes),
            grid_visible: scene.is_attached(helpers.grid),
            background: scene.background().to_string(),
        }
    }

    pub fn inspect_node(scene: &Scene, id: NodeId) -> Option<NodeInfo> {
        scene.get(id).map(|node| {
            let t = &node.transform;
            NodeInfo {
                id,
                name: node.name.clone(),
                kind: node.kind.label(),
                attached: scene.is_attached(id),
                position: t.position.to_array(),
                rotation: t.rotation.to_array(),
                scale: t.scale.to_array(),
            }
        })
    }

    /// Attached nodes in draw order.
    pub fn list_attached(scene: &Scene) -> Vec<NodeInfo> {
        scene
            .attached()
            .filter_map(|(id, _)| Self::inspect_node(scene, id))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub node_count: usize,
    pub attached_count: usize,
    pub mesh_count: usize,
    pub axes_visible: bool,
    pub grid_visible: bool,
    pub background: String,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: nodes={} attached={} meshes={} axes={} grid={} background={}",
            self.node_count,
            self.attached_count,
            self.mesh_count,
            on_off(self.axes_visible),
            on_off(self.grid_visible),
            self.background
        )
    }
}

fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeInfo {
    #[serde(serialize_with = "serialize_id")]
    pub id: NodeId,
    pub name: String,
    pub kind: &'static str,
    pub attached: bool,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

fn serialize_id<S: serde::Serializer>(id: &NodeId, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&id.short())
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {:<8} {:<5} pos=({:.2}, {:.2}, {:.2}) rot=({:.2}, {:.2}, {:.2})",
            self.id.short(),
            self.name,
            self.kind,
            self.position[0],
            self.position[1],
            self.position[2],
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{DebugPanel, HelperKind};
    use glam::Vec3;
    use latticeview_scene::{DemoScene, SceneConfig};

    #[test]
    fn summary_of_demo_scene() {
        let demo = DemoScene::build(&SceneConfig::default());
        let summary = SceneInspector::summary(&demo.scene, &HelperHandles::from(&demo));
        assert_eq!(summary.node_count, 30);
        assert_eq!(summary.attached_count, 30);
        assert_eq!(summary.mesh_count, 28);
        assert!(summary.axes_visible && summary.grid_visible);
        assert_eq!(summary.background, "#ffffff");
    }

    #[test]
    fn summary_tracks_helper_toggles() {
        let mut demo = DemoScene::build(&SceneConfig::default());
        let handles = HelperHandles::from(&demo);
        let mut panel = DebugPanel::default();
        panel
            .set_helper(HelperKind::Grid, false, &mut demo.scene, &handles)
            .unwrap();
        let summary = SceneInspector::summary(&demo.scene, &handles);
        assert!(!summary.grid_visible);
        assert!(summary.to_string().contains("grid=off"));
    }

    #[test]
    fn inspect_plane() {
        let demo = DemoScene::build(&SceneConfig::default());
        let info = SceneInspector::inspect_node(&demo.scene, demo.plane).unwrap();
        assert_eq!(info.kind, "plane");
        assert_eq!(info.position, Vec3::new(2.0, 2.0, 0.0).to_array());
        assert!(info.attached);
    }

    #[test]
    fn inspect_missing_node() {
        let demo = DemoScene::build(&SceneConfig::default());
        assert!(SceneInspector::inspect_node(&demo.scene, NodeId::new()).is_none());
    }

    #[test]
    fn list_attached_follows_draw_order() {
        let demo = DemoScene::build(&SceneConfig::default());
        let listed = SceneInspector::list_attached(&demo.scene);
        assert_eq!(listed.len(), 30);
        assert_eq!(listed[0].kind, "plane");
        assert_eq!(listed[1].kind, "grid");
        assert_eq!(listed[2].kind, "axes");
        assert!(listed[3..].iter().all(|n| n.kind == "box"));
    }
}
