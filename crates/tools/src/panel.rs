use latticeview_common::NodeId;
use latticeview_scene::{DemoScene, Scene, SceneError};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed range for the speed slider.
pub const SPEED_RANGE: RangeInclusive<f32> = -5.0..=5.0;

/// Values shown in the debug panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugOptions {
    pub message: String,
    pub speed: f32,
    pub display_outline: bool,
    pub show_axis: bool,
    pub show_grid: bool,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            message: "dat.gui".into(),
            speed: 0.8,
            display_outline: false,
            show_axis: true,
            show_grid: true,
        }
    }
}

/// The two helper objects the panel can show or hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperKind {
    Axes,
    Grid,
}

impl HelperKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Axes => "Axis",
            Self::Grid => "Grid",
        }
    }
}

/// Node ids of the helpers, as created by the scene builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperHandles {
    pub axes: NodeId,
    pub grid: NodeId,
}

impl HelperHandles {
    pub fn get(&self, kind: HelperKind) -> NodeId {
        match kind {
            HelperKind::Axes => self.axes,
            HelperKind::Grid => self.grid,
        }
    }
}

impl From<&DemoScene> for HelperHandles {
    fn from(demo: &DemoScene) -> Self {
        Self {
            axes: demo.axes,
            grid: demo.grid,
        }
    }
}

/// Debug panel state. The "Helper" folder holds the two visibility toggles.
#[derive(Debug, Clone)]
pub struct DebugPanel {
    pub options: DebugOptions,
    pub helper_folder_open: bool,
    pub visible: bool,
    button_presses: u32,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self::new(DebugOptions::default())
    }
}

impl DebugPanel {
    pub fn new(options: DebugOptions) -> Self {
        Self {
            options,
            helper_folder_open: true,
            visible: true,
            button_presses: 0,
        }
    }

    /// Set the slider value, clamped to [`SPEED_RANGE`].
    pub fn set_speed(&mut self, value: f32) {
        self.options.speed = value.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
    }

    /// The panel button. It has no action beyond being counted.
    pub fn press_button(&mut self) {
        self.button_presses += 1;
        tracing::info!("button pressed ({} total)", self.button_presses);
    }

    pub fn button_presses(&self) -> u32 {
        self.button_presses
    }

    pub fn is_helper_shown(&self, kind: HelperKind) -> bool {
        match kind {
            HelperKind::Axes => self.options.show_axis,
            HelperKind::Grid => self.options.show_grid,
        }
    }

    /// Show or hide a helper by attaching or detaching its node.
    ///
    /// Returns whether the scene changed. Setting the current value again
    /// changes nothing.
    pub fn set_helper(
        &mut self,
        kind: HelperKind,
        shown: bool,
        scene: &mut Scene,
        handles: &HelperHandles,
    ) -> Result<bool, SceneError> {
        let id = handles.get(kind);
        let was_attached = scene.is_attached(id);
        if shown {
            scene.add(id)?;
        } else {
            scene.remove(id)?;
        }
        match kind {
            HelperKind::Axes => self.options.show_axis = shown,
            HelperKind::Grid => self.options.show_grid = shown,
        }
        let changed = was_attached != shown;
        if changed {
            let state = if shown { "ON" } else { "OFF" };
            tracing::info!("Show {}: {state}", kind.label());
        }
        Ok(changed)
    }

    /// Flip a helper's visibility. Returns the new value.
    pub fn toggle_helper(
        &mut self,
        kind: HelperKind,
        scene: &mut Scene,
        handles: &HelperHandles,
    ) -> Result<bool, SceneError> {
        let shown = !self.is_helper_shown(kind);
        self.set_helper(kind, shown, scene, handles)?;
        Ok(shown)
    }

    /// Push the current option values into the scene. Used once after the
    /// scene is built, and after the panel is edited from outside.
    pub fn sync(&mut self, scene: &mut Scene, handles: &HelperHandles) -> Result<(), SceneError> {
        for kind in [HelperKind::Axes, HelperKind::Grid] {
            let shown = self.is_helper_shown(kind);
            self.set_helper(kind, shown, scene, handles)?;
        }
        Ok(())
    }
}
