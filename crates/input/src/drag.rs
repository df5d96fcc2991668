use crate::action::Action;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Turns button presses and cursor motion into orbit, pan and zoom actions.
///
/// Primary drag orbits, secondary drag pans, middle drag and the wheel
/// zoom. Only one button drives the drag at a time; the first one pressed
/// wins.
#[derive(Debug, Default)]
pub struct DragTracker {
    held: Option<PointerButton>,
    last: Option<Vec2>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<PointerButton> {
        self.held
    }

    pub fn is_dragging(&self) -> bool {
        self.held.is_some()
    }

    pub fn press(&mut self, button: PointerButton) {
        if self.held.is_none() {
            tracing::debug!("drag start: {button:?}");
            self.held = Some(button);
        }
    }

    pub fn release(&mut self, button: PointerButton) {
        if self.held == Some(button) {
            tracing::debug!("drag end: {button:?}");
            self.held = None;
        }
    }

    /// Route a button event. Presses over the UI do not start a drag, but
    /// a release always ends one, wherever the pointer is.
    pub fn button(&mut self, button: PointerButton, pressed: bool, over_ui: bool) {
        match (pressed, over_ui) {
            (true, false) => self.press(button),
            (true, true) => {}
            (false, _) => self.release(button),
        }
    }

    /// Feed a new cursor position. Returns an action while a button is held.
    pub fn moved(&mut self, position: Vec2) -> Action {
        let delta = self.last.map(|last| position - last);
        self.last = Some(position);
        let Some(delta) = delta else {
            return Action::Noop;
        };
        if delta == Vec2::ZERO {
            return Action::Noop;
        }
        match self.held {
            Some(PointerButton::Primary) => Action::Orbit(delta),
            Some(PointerButton::Secondary) => Action::Pan(delta),
            // Dragging down dollies out, one step per move.
            Some(PointerButton::Middle) if delta.y != 0.0 => Action::Zoom(-delta.y.signum()),
            Some(PointerButton::Middle) => Action::Noop,
            None => Action::Noop,
        }
    }

    /// Cursor left the window; the next move starts a fresh delta.
    pub fn left(&mut self) {
        self.last = None;
    }

    /// Wheel input in line steps. Scrolling up zooms in.
    pub fn wheel(&self, steps: f32) -> Action {
        if steps == 0.0 {
            Action::Noop
        } else {
            Action::Zoom(steps)
        }
    }
}
