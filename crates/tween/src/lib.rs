//! Tweening: animate node transform fields toward target values over time.
//!
//! # Invariants
//! - Start values are read from the node on a tween's first active update.
//! - A finished tween leaves its property exactly on the final value.
//! - Tweens never create or attach nodes; they only write transforms.

mod ease;
mod engine;
mod lattice;
mod tween;

pub use ease::{Ease, EaseMode, EaseParseError};
pub use engine::{TweenId, Tweens};
pub use lattice::animate_lattice;
pub use tween::{Property, Repeat, Tween, TweenVars};

pub fn crate_info() -> &'static str {
    concat!("latticeview-tween v", env!("CARGO_PKG_VERSION"))
}
