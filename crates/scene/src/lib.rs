//! Scene graph: node storage, attach/detach, geometry and shared materials.
//!
//! # Invariants
//! - Every created node lives in storage until the scene is dropped.
//!   Detaching a node only takes it out of the draw list.
//! - The attach list has no duplicates and keeps attach order.
//! - Materials are immutable once built and shared through `Arc`.

pub mod build;
pub mod config;
pub mod node;
pub mod scene;

pub use build::{DemoScene, lattice_positions};
pub use config::{ConfigError, MAX_GRID_SIZE, SceneConfig};
pub use node::{BasicMaterial, Geometry, MaterialCache, MaterialRef, Node, NodeKind, Side};
pub use scene::{Scene, SceneError, SceneEvent};

pub fn crate_info() -> &'static str {
    concat!("latticeview-scene v", env!("CARGO_PKG_VERSION"))
}
