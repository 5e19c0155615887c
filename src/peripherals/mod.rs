//! Hardware abstraction for the robot.
//!
//! Everything the firmware does to the outside world goes through the
//! [`Hardware`] trait: motor outputs, encoder and potentiometer reads, limit
//! switches, the joystick, the display and time. The motion primitives, the
//! autonomous sequencer and the teleop loop are all generic over it, which
//! keeps them independent of the brain they run on.
//!
//! # Devices
//!
//! The robot has a fixed set of devices, named by the enums in this module:
//!
//! - [`MotorChannel`]: ten motors (drive, lift, mobile-goal intake, arm, grabber).
//! - [`Encoder`]: the two drive encoders and the lift encoder.
//! - [`AnalogSensor`]: the mobile-goal and arm potentiometers.
//! - [`DigitalSensor`]: the two autonomous selection limit switches.
//!
//! # Example
//!
//! ```ignore
//! use dennis::peripherals::{Hardware, MotorChannel, stop_all};
//!
//! fn spin_grabber<H: Hardware>(hw: &mut H) {
//!     hw.set_motor(MotorChannel::IntakeGrabber, 127);
//!     hw.delay(core::time::Duration::from_millis(500));
//!     stop_all(hw);
//! }
//! ```

use std::{fmt, time::Duration};

/// Joystick snapshot types.
///
/// Provides [`JoystickState`](controller::JoystickState) and the axis and
/// button identifiers used by the teleop loop.
pub mod controller;

/// vexide-backed implementation of [`Hardware`] for the V5 brain.
#[cfg(feature = "v5")]
pub mod v5;

pub use controller::{Axis, ButtonDirection, ButtonGroup, JoystickState};

/// Largest power magnitude a motor channel accepts.
pub const MAX_POWER: i32 = 127;

/// A motor on the robot.
///
/// Power is signed, `-127..=127`, with `0` meaning stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorChannel {
    LeftMobileGoalIntake,
    LiftTopLeft,
    LiftBottomLeft,
    IntakeArm,
    LeftDrive,
    RightDrive,
    IntakeGrabber,
    LiftBottomRight,
    LiftTopRight,
    RightMobileGoalIntake,
}

impl MotorChannel {
    /// Every motor on the robot.
    ///
    /// [`stop_all`] zeroes exactly this list, so a new motor must be added
    /// here or it will be left running after a motion finishes.
    pub const ALL: [MotorChannel; 10] = [
        MotorChannel::LeftMobileGoalIntake,
        MotorChannel::LiftTopLeft,
        MotorChannel::LiftBottomLeft,
        MotorChannel::IntakeArm,
        MotorChannel::LeftDrive,
        MotorChannel::RightDrive,
        MotorChannel::IntakeGrabber,
        MotorChannel::LiftBottomRight,
        MotorChannel::LiftTopRight,
        MotorChannel::RightMobileGoalIntake,
    ];

    /// Position of this channel in [`MotorChannel::ALL`].
    pub const fn index(self) -> usize { self as usize }
}

impl fmt::Display for MotorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:?}", self) }
}

/// A relative, resettable tick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoder {
    LeftDrive,
    RightDrive,
    Lift,
}

impl Encoder {
    pub const fn index(self) -> usize { self as usize }
}

/// An absolute analog position sensor (potentiometer).
///
/// Readings are raw ADC counts (`0..=4095`) and cannot be reset. See
/// [`crate::config::calibration`] for the meaningful positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalogSensor {
    MobileGoalPot,
    ArmPot,
}

impl AnalogSensor {
    pub const fn index(self) -> usize { self as usize }
}

/// A digital input read as a logic level.
///
/// The limit switches are wired with pull-ups: an unpressed switch reads
/// HIGH (`true`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigitalSensor {
    /// Selects the preload-scoring routine while unpressed.
    AutoLimit,
    /// Selects between the two mobile-goal routines.
    SideLimit,
}

impl DigitalSensor {
    pub const fn index(self) -> usize { self as usize }
}

/// The contract between the control code and the robot's devices.
///
/// Implementations are expected to swallow device faults (logging them) and
/// return a neutral value instead, so none of these methods are fallible.
pub trait Hardware {
    /// Sets a motor's signed power, `-127..=127`.
    fn set_motor(&mut self, channel: MotorChannel, power: i32);

    /// Reads an encoder's tick count since its last reset.
    fn encoder(&self, encoder: Encoder) -> i32;

    /// Sets an encoder's tick count back to zero.
    fn reset_encoder(&mut self, encoder: Encoder);

    /// Reads a potentiometer.
    fn analog(&self, sensor: AnalogSensor) -> i32;

    /// Reads a digital input. `true` is HIGH.
    fn digital(&self, sensor: DigitalSensor) -> bool;

    /// Takes a snapshot of the primary controller.
    fn joystick(&self) -> JoystickState;

    /// Writes a line of text to the display. Lines are numbered from 1.
    fn write_line(&mut self, line: u8, text: &str);

    /// Time since the program started.
    fn uptime(&self) -> Duration;

    /// Blocks the calling task for `duration`.
    fn delay(&mut self, duration: Duration);
}

/// Sets every motor in [`MotorChannel::ALL`] to zero power.
///
/// This is the only place that knows the full motor list. Every motion exit
/// path calls it.
pub fn stop_all<H: Hardware + ?Sized>(hw: &mut H) {
    for channel in MotorChannel::ALL {
        hw.set_motor(channel, 0);
    }
}
