use latticeview_common::{Color, Transform};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Primitive geometry, described by its construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Axis-aligned box centred on the origin.
    Box { width: f32, height: f32, depth: f32 },
    /// Plane in local XY, facing +Z.
    Plane { width: f32, height: f32 },
}

impl Geometry {
    pub fn unit_box() -> Self {
        Self::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }
}

/// Which faces of a mesh are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Unlit flat-colour material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicMaterial {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub side: Side,
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
        }
    }
}

impl BasicMaterial {
    pub fn opaque(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Whether the material needs blending. Opacity is ignored unless
    /// `transparent` is set.
    pub fn is_translucent(&self) -> bool {
        self.transparent && self.opacity < 1.0
    }

    pub fn effective_opacity(&self) -> f32 {
        if self.transparent {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Shared, read-only material handle.
pub type MaterialRef = Arc<BasicMaterial>;

/// Materials that many meshes reuse. Built once at startup.
#[derive(Debug, Clone)]
pub struct MaterialCache {
    pub translucent: MaterialRef,
}

impl MaterialCache {
    pub fn new() -> Self {
        Self {
            translucent: Arc::new(BasicMaterial {
                color: Color::GREEN,
                opacity: 0.5,
                transparent: true,
                side: Side::Front,
            }),
        }
    }
}

impl Default for MaterialCache {
    fn default() -> Self {
        Self::new()
    }
}

/// What a node draws.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Mesh {
        geometry: Geometry,
        material: MaterialRef,
    },
    /// Three lines from the origin along +X, +Y, +Z.
    AxesHelper { size: f32 },
    /// Square line grid in local XZ.
    GridHelper {
        size: f32,
        divisions: u32,
        center_color: Color,
        line_color: Color,
    },
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mesh {
                geometry: Geometry::Box { .. },
                ..
            } => "box",
            Self::Mesh {
                geometry: Geometry::Plane { .. },
                ..
            } => "plane",
            Self::AxesHelper { .. } => "axes",
            Self::GridHelper { .. } => "grid",
        }
    }

    pub fn is_helper(&self) -> bool {
        !matches!(self, Self::Mesh { .. })
    }
}

/// A scene node: a name, a transform, and something to draw.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn material(&self) -> Option<&MaterialRef> {
        match &self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_material_is_half_transparent_green() {
        let cache = MaterialCache::new();
        assert_eq!(cache.translucent.color, Color::GREEN);
        assert_eq!(cache.translucent.opacity, 0.5);
        assert!(cache.translucent.is_translucent());
    }

    #[test]
    fn opacity_needs_transparent_flag() {
        let m = BasicMaterial {
            opacity: 0.3,
            ..BasicMaterial::default()
        };
        assert!(!m.is_translucent());
        assert_eq!(m.effective_opacity(), 1.0);
    }

    #[test]
    fn meshes_share_the_cached_material() {
        let cache = MaterialCache::new();
        let a = Node::new(
            "a",
            NodeKind::Mesh {
                geometry: Geometry::unit_box(),
                material: cache.translucent.clone(),
            },
        );
        let b = Node::new(
            "b",
            NodeKind::Mesh {
                geometry: Geometry::unit_box(),
                material: cache.translucent.clone(),
            },
        );
        assert!(Arc::ptr_eq(a.material().unwrap(), b.material().unwrap()));
        assert_eq!(Arc::strong_count(&cache.translucent), 3);
    }

    #[test]
    fn kind_labels() {
        assert_eq!(NodeKind::AxesHelper { size: 1.0 }.label(), "axes");
        assert!(NodeKind::AxesHelper { size: 1.0 }.is_helper());
        let plane = NodeKind::Mesh {
            geometry: Geometry::Plane {
                width: 1.0,
                height: 1.0,
            },
            material: Arc::new(BasicMaterial::default()),
        };
        assert_eq!(plane.label(), "plane");
        assert!(!plane.is_helper());
    }
}
