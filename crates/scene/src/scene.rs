use crate::node::{Node, NodeKind};
use latticeview_common::{Color, NodeId, Transform};
use std::collections::BTreeMap;

/// An event record produced by every structural or transform change.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Node was attached to the scene root.
    Added { id: NodeId },
    /// Node was detached from the scene root. It is still in storage.
    Removed { id: NodeId },
    /// Node transform was replaced through `set_transform`.
    TransformUpdated {
        id: NodeId,
        old: Transform,
        new: Transform,
    },
}

/// Errors from scene operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
}

/// The scene root.
///
/// Nodes are owned by the scene from the moment they are inserted. Only
/// attached nodes are drawn, in the order they were attached.
#[derive(Debug, Clone)]
pub struct Scene {
    background: Color,
    nodes: BTreeMap<NodeId, Node>,
    attached: Vec<NodeId>,
    event_log: Vec<SceneEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::with_background(Color::WHITE)
    }
}

impl Scene {
    /// Create an empty scene with a white background.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(background: Color) -> Self {
        Self {
            background,
            nodes: BTreeMap::new(),
            attached: Vec::new(),
            event_log: Vec::new(),
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Number of nodes in storage, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes currently drawn.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Store a node without attaching it. Returns its id.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, node);
        id
    }

    /// Store a node and attach it in one step.
    pub fn spawn(&mut self, node: Node) -> NodeId {
        let id = self.insert(node);
        self.attached.push(id);
        self.event_log.push(SceneEvent::Added { id });
        id
    }

    /// Attach a stored node. Attaching an attached node is a no-op and keeps
    /// its place in the draw order.
    pub fn add(&mut self, id: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::NodeNotFound(id));
        }
        if !self.attached.contains(&id) {
            self.attached.push(id);
            self.event_log.push(SceneEvent::Added { id });
            tracing::debug!("attached node {}", id.short());
        }
        Ok(())
    }

    /// Detach a node. Returns whether it was attached.
    pub fn remove(&mut self, id: NodeId) -> Result<bool, SceneError> {
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::NodeNotFound(id));
        }
        let Some(index) = self.attached.iter().position(|a| *a == id) else {
            return Ok(false);
        };
        self.attached.remove(index);
        self.event_log.push(SceneEvent::Removed { id });
        tracing::debug!("detached node {}", id.short());
        Ok(true)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.attached.contains(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable node access. Changes made here are not logged.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Replace a node's transform and log the change.
    pub fn set_transform(&mut self, id: NodeId, new: Transform) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))?;
        let old = node.transform;
        node.transform = new;
        self.event_log
            .push(SceneEvent::TransformUpdated { id, old, new });
        Ok(())
    }

    /// Attached nodes in draw order.
    pub fn attached(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.attached
            .iter()
            .filter_map(|id| self.nodes.get(id).map(|node| (*id, node)))
    }

    /// All stored nodes in id order.
    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    /// Attached mesh count, helpers excluded.
    pub fn mesh_count(&self) -> usize {
        self.attached()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Mesh { .. }))
            .count()
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }
}
