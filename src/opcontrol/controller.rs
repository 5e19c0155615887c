//! Joystick-to-power mapping.
//!
//! Pure functions that turn a [`JoystickState`] into motor powers. They hold
//! no state and touch no hardware, so the teleop loop stays a thin sequence
//! of "read, map, write".

use crate::peripherals::{Axis, ButtonDirection, ButtonGroup, JoystickState, MAX_POWER};

/// Zeroes `value` if its magnitude is at or below `deadzone`. Anything
/// outside the band passes through unchanged.
///
/// # Example
///
/// ```ignore
/// assert_eq!(apply_deadzone(20, 20), 0);
/// assert_eq!(apply_deadzone(-21, 20), -21);
/// ```
pub const fn apply_deadzone(value: i32, deadzone: i32) -> i32 {
    if value.abs() > deadzone { value } else { 0 }
}

/// Reads an analog channel with the deadzone applied.
pub const fn axis_with_deadzone(state: &JoystickState, axis: Axis, deadzone: i32) -> i32 {
    apply_deadzone(state.axis(axis), deadzone)
}

/// Mixes the two drive axes into `(left, right)` drive powers.
///
/// `x` is channel 4 and `y` is channel 3. The result is not scaled or
/// clamped; the motor backend limits it to its own range.
pub const fn tank_mix(x: i32, y: i32) -> (i32, i32) { (x - y, x + y) }

/// A two-button control for a mechanism with three states.
///
/// `forward` wins if both buttons are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualButton {
    pub group:    ButtonGroup,
    pub forward:  ButtonDirection,
    pub backward: ButtonDirection,
}

impl DualButton {
    /// Returns `MAX_POWER` while `forward` is held, `-MAX_POWER` while
    /// `backward` is held, otherwise `0`.
    pub const fn power(&self, state: &JoystickState) -> i32 {
        if state.button(self.group, self.forward) {
            MAX_POWER
        } else if state.button(self.group, self.backward) {
            -MAX_POWER
        } else {
            0
        }
    }
}

/// Returns `true` only while every listed button is held.
pub fn chord(state: &JoystickState, buttons: &[(ButtonGroup, ButtonDirection)]) -> bool {
    buttons
        .iter()
        .all(|&(group, direction)| state.button(group, direction))
}
