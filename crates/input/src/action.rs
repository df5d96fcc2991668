use glam::Vec2;

/// A high-level action produced from pointer or keyboard input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Orbit the camera by a pointer delta in physical pixels.
    Orbit(Vec2),
    /// Pan the camera target by a pointer delta in physical pixels.
    Pan(Vec2),
    /// Dolly toward (positive) or away from (negative) the target, in wheel steps.
    Zoom(f32),
    ToggleAxis,
    ToggleGrid,
    TogglePanel,
    ResetCamera,
    /// Input that is not bound to anything.
    Noop,
}

/// Key bindings as `(key name, action, help text)`. Key names follow
/// winit's `KeyCode` debug form.
pub const KEY_BINDINGS: &[(&str, Action, &str)] = &[
    ("KeyA", Action::ToggleAxis, "A: axes"),
    ("KeyG", Action::ToggleGrid, "G: grid"),
    ("F1", Action::TogglePanel, "F1: panel"),
    ("KeyR", Action::ResetCamera, "R: reset camera"),
];

impl Action {
    /// Map a key name to its bound action.
    pub fn from_key(key: &str) -> Self {
        KEY_BINDINGS
            .iter()
            .find(|(name, _, _)| *name == key)
            .map(|(_, action, _)| *action)
            .unwrap_or(Self::Noop)
    }

    pub fn is_camera(&self) -> bool {
        matches!(
            self,
            Self::Orbit(_) | Self::Pan(_) | Self::Zoom(_) | Self::ResetCamera
        )
    }
}
