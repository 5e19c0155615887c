//! # Dennis
//!
//! Competition firmware for a VEX V5 mobile-goal robot, built on
//! [vexide](https://vexide.dev). It provides:
//!
//! - **Motion primitives**: drive, turn and mechanism moves that run until a
//!   sensor reaches its target, plus timed grabber and pause actions.
//! - **Autonomous**: three scripted routines, chosen by two limit switches
//!   when the autonomous period starts.
//! - **Driver control**: a fixed-rate teleop loop mapping the controller to
//!   every mechanism, with scripted shortcuts for the driver.
//! - **Mode dispatch**: one state machine that follows the field's mode and
//!   stops every motor whenever it changes.
//! - **Logging**: a logger writing to the console and the SD card.
//!
//! All robot logic talks to a [`Hardware`](peripherals::Hardware) trait. The
//! `v5` feature adds the vexide implementation and the firmware binary;
//! without it the crate builds and tests on the host.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dennis::{
//!     competition::{Mode, Robot},
//!     config::RobotConfig,
//!     peripherals::{Hardware, v5::V5Robot},
//! };
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     let mut hw = V5Robot::new(peripherals);
//!     let mut robot = Robot::new(RobotConfig::default());
//!     loop {
//!         let now = hw.uptime();
//!         robot.tick(&mut hw, Mode::from(vexide::competition::mode()), now);
//!         sleep(Duration::from_millis(5)).await;
//!     }
//! }
//! ```

/// Autonomous routines and the script sequencer.
///
/// Routines are fixed lists of [`Action`](motion::Action)s. The
/// [`Sequencer`](auton::Sequencer) runs one to completion without branching.
pub mod auton;

/// Mode dispatch between disabled, autonomous and driver control.
pub mod competition;

/// Tuning constants, calibration values and configuration structs.
pub mod config;

/// Error types.
pub mod error;

/// Filesystem utilities module.
///
/// Contains the logger that records every run to the brain's SD card.
pub mod fs;

/// Motion primitives.
///
/// Each [`Action`](motion::Action) is driven by a
/// [`Motion`](motion::Motion) state machine that commands its motors once,
/// waits for its completion condition and stops every motor on exit:
///
/// - **Travel**: drive and turn until both drive encoders reach a distance.
/// - **Sensor**: move a mechanism until its sensor crosses a target.
/// - **Timed**: run the grabber, or do nothing, for a fixed time.
pub mod motion;

/// Driver control.
///
/// Maps the controller onto the drive and every mechanism, once per control
/// period, with a deadzone on the analog channels.
pub mod opcontrol;

/// The hardware boundary.
///
/// Names every motor and sensor on the robot and defines the
/// [`Hardware`](peripherals::Hardware) trait the rest of the crate drives.
pub mod peripherals;

#[cfg(test)]
mod sim;
