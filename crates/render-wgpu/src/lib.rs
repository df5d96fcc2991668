//! wgpu render backend for latticeview.
//!
//! Draws attached meshes with flat unlit colour, instanced per shape, and
//! helper nodes as coloured line lists. The camera orbits a target point.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Only attached nodes are drawn.
//! - Translucent meshes draw after opaque ones, far to near.
//! - Camera motion is independent of tween time.

mod camera;
pub mod frame;
mod gpu;
pub mod mesh;
mod shaders;

pub use camera::OrbitCamera;
pub use gpu::WgpuRenderer;
