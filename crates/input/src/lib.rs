//! Input mapping: raw pointer and key state turned into [`Action`]s.
//!
//! # Invariants
//! - The app consumes actions, never raw window events, so the same camera
//!   code serves any windowing backend.

pub mod action;
pub mod drag;

pub use action::{Action, KEY_BINDINGS};
pub use drag::{DragTracker, PointerButton};

pub fn crate_info() -> &'static str {
    concat!("latticeview-input v", env!("CARGO_PKG_VERSION"))
}
