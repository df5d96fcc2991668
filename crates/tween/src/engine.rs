use crate::tween::{Tween, TweenVars};
use latticeview_common::NodeId;
use latticeview_scene::Scene;
use std::collections::BTreeMap;

/// Handle to a tween registered with [`Tweens`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

/// Owns every running tween and advances them once per frame.
///
/// Tweens are applied in creation order, so a later tween on the same
/// property wins.
#[derive(Debug, Default)]
pub struct Tweens {
    tweens: BTreeMap<TweenId, Tween>,
    next_id: u64,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween from the node's current values toward `vars`.
    pub fn to(&mut self, node: NodeId, vars: TweenVars) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, Tween::new(node, vars));
        id
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Stop a tween where it is. Returns false if it was not running.
    pub fn kill(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    /// Stop every tween on `node`. Returns how many were removed.
    pub fn kill_node(&mut self, node: NodeId) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|_, t| t.node() != node);
        before - self.tweens.len()
    }

    /// Advance all tweens by `dt` seconds, writing into node transforms.
    /// Finished tweens, and tweens whose node is gone, are dropped.
    /// Returns how many tweens are still running.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) -> usize {
        self.tweens.retain(|id, tween| {
            let Some(node) = scene.get_mut(tween.node()) else {
                tracing::warn!(
                    "dropping tween {} on missing node {}",
                    id.0,
                    tween.node().short()
                );
                return false;
            };
            let done = tween.advance(dt, &mut node.transform);
            if done {
                tracing::debug!("tween {} finished", id.0);
            }
            !done
        });
        self.tweens.len()
    }
}
