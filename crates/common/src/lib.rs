//! Shared types used across the latticeview crates.

mod color;
mod ease_names;
mod types;

pub use color::Color;
pub use ease_names::{EASE_FAMILIES, EASE_MODES, is_known_ease};
pub use types::{NodeId, Transform};

pub fn crate_info() -> &'static str {
    concat!("latticeview-common v", env!("CARGO_PKG_VERSION"))
}
