//! The motion primitives.
//!
//! Every primitive is single-speed bang-bang control: it picks a direction
//! from where the mechanism is now, drives at a constant power, and stops
//! once the sensor crosses the target. Nothing backs up after an overshoot.
//!
//! [`start`] issues the motor commands for an [`Action`] and returns the
//! [`Gate`] that decides when it is finished. The free functions at the
//! bottom wrap [`Motion::run`] for callers that can block.

use std::time::Duration;

use super::{Action, DriveDirection, GrabberDirection, Motion, TurnDirection};
use crate::{
    error::MotionError,
    peripherals::{AnalogSensor, Encoder, Hardware, MAX_POWER, MotorChannel},
};

/// Keeps a sensor-gated motion going while `hold.holds(target, reading)`.
///
/// Whether the exact target value still counts as "keep going" differs
/// between primitives and between the two directions of one primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hold {
    /// `target >= reading`
    TargetAtLeast,
    /// `target > reading`
    TargetAbove,
    /// `target <= reading`
    TargetAtMost,
    /// `target < reading`
    TargetBelow,
}

impl Hold {
    pub const fn holds(self, target: i32, reading: i32) -> bool {
        match self {
            Hold::TargetAtLeast => target >= reading,
            Hold::TargetAbove => target > reading,
            Hold::TargetAtMost => target <= reading,
            Hold::TargetBelow => target < reading,
        }
    }
}

/// Where a sensor-gated motion reads its position from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Encoder(Encoder),
    Analog(AnalogSensor),
}

impl Source {
    fn read<H: Hardware + ?Sized>(self, hw: &H) -> i32 {
        match self {
            Source::Encoder(encoder) => hw.encoder(encoder),
            Source::Analog(sensor) => hw.analog(sensor),
        }
    }
}

/// The completion predicate of a running motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Both drive encoders must reach `distance` ticks in magnitude.
    Travel { distance: i32 },
    /// A single sensor compared against a target.
    Sensor {
        source: Source,
        hold:   Hold,
        target: i32,
    },
    /// Wall-clock time since the motion started.
    Elapsed { duration: Duration },
}

impl Gate {
    /// Returns `true` while the motion should keep running.
    pub fn pending<H: Hardware + ?Sized>(&self, hw: &H, elapsed: Duration) -> bool {
        match *self {
            Gate::Travel { distance } => {
                hw.encoder(Encoder::LeftDrive).abs() < distance ||
                    hw.encoder(Encoder::RightDrive).abs() < distance
            }
            Gate::Sensor {
                source,
                hold,
                target,
            } => hold.holds(target, source.read(hw)),
            Gate::Elapsed { duration } => elapsed < duration,
        }
    }
}

/// Issues the motor commands that start `action` and returns its gate.
pub fn start<H: Hardware + ?Sized>(action: Action, hw: &mut H) -> Gate {
    match action {
        Action::Move {
            distance,
            direction,
            speed,
        } => {
            let (left, right) = match direction {
                DriveDirection::Forward => (-speed, speed),
                DriveDirection::Backward => (speed, -speed),
            };
            drive(hw, left, right);
            Gate::Travel { distance }
        }
        Action::Turn {
            distance,
            direction,
            speed,
        } => {
            let (left, right) = match direction {
                TurnDirection::Left => (speed, speed),
                TurnDirection::Right => (-speed, -speed),
            };
            drive(hw, left, right);
            Gate::Travel { distance }
        }
        Action::MobileGoal { target, speed } => {
            let source = Source::Analog(AnalogSensor::MobileGoalPot);
            let hold = if target >= source.read(hw) {
                // Away from the robot.
                set_mobile_goal(hw, -speed);
                Hold::TargetAtLeast
            } else {
                set_mobile_goal(hw, speed);
                Hold::TargetBelow
            };
            Gate::Sensor {
                source,
                hold,
                target,
            }
        }
        Action::Lift { target, speed } => {
            let source = Source::Encoder(Encoder::Lift);
            let hold = if target <= source.read(hw) {
                set_lift(hw, -speed);
                Hold::TargetAtMost
            } else {
                set_lift(hw, speed);
                Hold::TargetAtLeast
            };
            Gate::Sensor {
                source,
                hold,
                target,
            }
        }
        Action::Arm { target, speed } => {
            let source = Source::Analog(AnalogSensor::ArmPot);
            let hold = if target > source.read(hw) {
                // Out, away from the robot.
                hw.set_motor(MotorChannel::IntakeArm, -speed);
                Hold::TargetAbove
            } else {
                hw.set_motor(MotorChannel::IntakeArm, speed);
                Hold::TargetAtMost
            };
            Gate::Sensor {
                source,
                hold,
                target,
            }
        }
        Action::Grabber {
            direction,
            duration,
        } => {
            let power = match direction {
                GrabberDirection::Intake => MAX_POWER,
                GrabberDirection::Outtake => -MAX_POWER,
            };
            hw.set_motor(MotorChannel::IntakeGrabber, power);
            Gate::Elapsed { duration }
        }
        Action::Pause { duration } => Gate::Elapsed { duration },
    }
}

fn drive<H: Hardware + ?Sized>(hw: &mut H, left: i32, right: i32) {
    hw.reset_encoder(Encoder::LeftDrive);
    hw.reset_encoder(Encoder::RightDrive);
    hw.set_motor(MotorChannel::LeftDrive, left);
    hw.set_motor(MotorChannel::RightDrive, right);
}

/// Positive `power` pulls the intake toward the robot.
pub(crate) fn set_mobile_goal<H: Hardware + ?Sized>(hw: &mut H, power: i32) {
    hw.set_motor(MotorChannel::LeftMobileGoalIntake, power);
    hw.set_motor(MotorChannel::RightMobileGoalIntake, -power);
}

/// Positive `power` raises the lift. The two sides of each stage are
/// mirrored, so the pairs always get opposite signs.
pub(crate) fn set_lift<H: Hardware + ?Sized>(hw: &mut H, power: i32) {
    hw.set_motor(MotorChannel::LiftBottomLeft, power);
    hw.set_motor(MotorChannel::LiftBottomRight, -power);
    hw.set_motor(MotorChannel::LiftTopLeft, -power);
    hw.set_motor(MotorChannel::LiftTopRight, power);
}

/// Drives straight for `distance` encoder ticks.
///
/// Both drive encoders are reset first. Returns once **both** wheels have
/// covered `distance` ticks, so a slipping wheel overshoots while it waits
/// for the other one. Every motor is stopped on return.
///
/// # Errors
///
/// Returns [`MotionError::Timeout`] if `timeout` elapses first.
pub fn move_distance<H: Hardware + ?Sized>(
    hw: &mut H,
    distance: i32,
    direction: DriveDirection,
    speed: i32,
    timeout: Option<Duration>,
) -> Result<(), MotionError> {
    let action = Action::Move {
        distance,
        direction,
        speed,
    };
    Motion::new(action).with_timeout(timeout).run(hw)
}

/// Turns in place until both drive encoders reach `distance` ticks.
///
/// # Errors
///
/// Returns [`MotionError::Timeout`] if `timeout` elapses first.
pub fn turn<H: Hardware + ?Sized>(
    hw: &mut H,
    distance: i32,
    direction: TurnDirection,
    speed: i32,
    timeout: Option<Duration>,
) -> Result<(), MotionError> {
    let action = Action::Turn {
        distance,
        direction,
        speed,
    };
    Motion::new(action).with_timeout(timeout).run(hw)
}

/// Moves the mobile-goal intake until its potentiometer crosses `target`.
///
/// See [`crate::config::calibration`] for useful targets.
///
/// # Errors
///
/// Returns [`MotionError::Timeout`] if `timeout` elapses first.
pub fn mobile_goal_position<H: Hardware + ?Sized>(
    hw: &mut H,
    target: i32,
    speed: i32,
    timeout: Option<Duration>,
) -> Result<(), MotionError> {
    Motion::new(Action::MobileGoal { target, speed })
        .with_timeout(timeout)
        .run(hw)
}

/// Moves the four-motor lift until its encoder crosses `target`.
///
/// # Errors
///
/// Returns [`MotionError::Timeout`] if `timeout` elapses first.
pub fn lift_to<H: Hardware + ?Sized>(
    hw: &mut H,
    target: i32,
    speed: i32,
    timeout: Option<Duration>,
) -> Result<(), MotionError> {
    Motion::new(Action::Lift { target, speed })
        .with_timeout(timeout)
        .run(hw)
}

/// Moves the intake arm until its potentiometer crosses `target`.
///
/// # Errors
///
/// Returns [`MotionError::Timeout`] if `timeout` elapses first.
pub fn arm_to<H: Hardware + ?Sized>(
    hw: &mut H,
    target: i32,
    speed: i32,
    timeout: Option<Duration>,
) -> Result<(), MotionError> {
    Motion::new(Action::Arm { target, speed })
        .with_timeout(timeout)
        .run(hw)
}

/// Runs the grabber at full power for `duration`, then stops.
///
/// # Errors
///
/// Never fails unless `timeout` is shorter than `duration`.
pub fn grabber<H: Hardware + ?Sized>(
    hw: &mut H,
    direction: GrabberDirection,
    duration: Duration,
    timeout: Option<Duration>,
) -> Result<(), MotionError> {
    let action = Action::Grabber {
        direction,
        duration,
    };
    Motion::new(action).with_timeout(timeout).run(hw)
}
