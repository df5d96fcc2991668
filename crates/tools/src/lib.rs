//! Developer tooling: the debug panel model, the frame-rate counter, and
//! read-only scene inspection.
//!
//! Nothing here draws. The desktop app renders these with egui; the CLI
//! prints them.

pub mod inspector;
pub mod panel;
pub mod stats;

pub use inspector::{NodeInfo, SceneInspector, SceneSummary};
pub use panel::{DebugOptions, DebugPanel, HelperHandles, HelperKind, SPEED_RANGE};
pub use stats::{FrameStats, Panel, PanelValue};

pub fn crate_info() -> &'static str {
    concat!("latticeview-tools v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
