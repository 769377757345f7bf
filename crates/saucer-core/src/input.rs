//! Held-control state, latched from press/release events.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::enums::Control;

/// Controls currently held down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: HashSet<Control>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state with the given controls held.
    pub fn holding(controls: impl IntoIterator<Item = Control>) -> Self {
        Self {
            held: controls.into_iter().collect(),
        }
    }

    pub fn press(&mut self, control: Control) {
        self.held.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.held.remove(&control);
    }

    /// Process a raw key event. Returns whether the key is mapped.
    pub fn process_key(&mut self, key: &str, pressed: bool) -> bool {
        match Control::from_key(key) {
            Some(control) if pressed => {
                self.press(control);
                true
            }
            Some(control) => {
                self.release(control);
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    /// Movement axes as (x, z) in {-1, 0, 1}, before any rotation.
    /// Forward is -z, strafe-right is +x; opposing controls cancel.
    pub fn movement_axes(&self) -> (f64, f64) {
        let mut x = 0.0;
        let mut z = 0.0;
        if self.is_held(Control::Forward) {
            z -= 1.0;
        }
        if self.is_held(Control::Backward) {
            z += 1.0;
        }
        if self.is_held(Control::StrafeLeft) {
            x -= 1.0;
        }
        if self.is_held(Control::StrafeRight) {
            x += 1.0;
        }
        (x, z)
    }

    /// Yaw direction: +1 for yaw-left, -1 for yaw-right.
    pub fn yaw_axis(&self) -> f64 {
        let mut yaw = 0.0;
        if self.is_held(Control::YawLeft) {
            yaw += 1.0;
        }
        if self.is_held(Control::YawRight) {
            yaw -= 1.0;
        }
        yaw
    }
}
