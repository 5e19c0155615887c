//! Joystick snapshots.
//!
//! The teleop loop reads the controller once per cycle into a
//! [`JoystickState`] and works from that copy. Analog channels and button
//! groups use the classic controller numbering:
//!
//! | Channel | Stick | | Group | Buttons |
//! |---|---|---|---|---|
//! | 1 | right X | | 5 | left triggers |
//! | 2 | right Y | | 6 | right triggers |
//! | 3 | left Y | | 7 | left button pad |
//! | 4 | left X | | 8 | right button pad |
//!
//! # Example
//!
//! ```ignore
//! use dennis::peripherals::{Axis, ButtonDirection, ButtonGroup, JoystickState};
//!
//! let state = JoystickState::default()
//!     .with_axis(Axis::LeftX, 64)
//!     .with_button(ButtonGroup::RightPad, ButtonDirection::Down, true);
//!
//! assert_eq!(state.axis(Axis::LeftX), 64);
//! assert!(state.button(ButtonGroup::RightPad, ButtonDirection::Down));
//! ```

/// An analog joystick channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Channel 1.
    RightX,
    /// Channel 2.
    RightY,
    /// Channel 3.
    LeftY,
    /// Channel 4.
    LeftX,
}

impl Axis {
    const fn index(self) -> usize { self as usize }
}

/// A group of buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonGroup {
    /// Group 5. Only [`ButtonDirection::Up`] and [`ButtonDirection::Down`] exist.
    LeftTriggers,
    /// Group 6. Only [`ButtonDirection::Up`] and [`ButtonDirection::Down`] exist.
    RightTriggers,
    /// Group 7.
    LeftPad,
    /// Group 8.
    RightPad,
}

impl ButtonGroup {
    const fn index(self) -> usize { self as usize }
}

/// A button's position within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ButtonDirection {
    const fn index(self) -> usize { self as usize }
}

/// A snapshot of the controller's sticks and buttons.
///
/// Axis values are signed, `-127..=127`. The default state has every stick
/// centred and nothing pressed, which is also what a disconnected
/// controller reads as.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JoystickState {
    axes:    [i32; 4],
    buttons: [[bool; 4]; 4],
}

impl JoystickState {
    /// Reads an analog channel.
    pub const fn axis(&self, axis: Axis) -> i32 { self.axes[axis.index()] }

    /// Returns `true` while the button is held.
    pub const fn button(&self, group: ButtonGroup, direction: ButtonDirection) -> bool {
        self.buttons[group.index()][direction.index()]
    }

    /// Sets an analog channel.
    pub const fn set_axis(&mut self, axis: Axis, value: i32) { self.axes[axis.index()] = value; }

    /// Sets a button's pressed state.
    pub const fn set_button(&mut self, group: ButtonGroup, direction: ButtonDirection, pressed: bool) {
        self.buttons[group.index()][direction.index()] = pressed;
    }

    /// Builder form of [`JoystickState::set_axis`].
    #[must_use]
    pub const fn with_axis(mut self, axis: Axis, value: i32) -> Self {
        self.set_axis(axis, value);
        self
    }

    /// Builder form of [`JoystickState::set_button`].
    #[must_use]
    pub const fn with_button(
        mut self,
        group: ButtonGroup,
        direction: ButtonDirection,
        pressed: bool,
    ) -> Self {
        self.set_button(group, direction, pressed);
        self
    }
}
