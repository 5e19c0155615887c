//! Top-level mode dispatch.
//!
//! The field decides which mode the robot is in; [`Robot`] decides what that
//! means. Every tick it is handed the current [`Mode`] and forwards the tick
//! to the autonomous [`Sequencer`] or the [`Teleop`] loop. A mode change
//! always stops every motor and throws away the previous mode's state, so
//! a routine cut off by the field never leaves a motor running.
//!
//! # Example
//!
//! ```ignore
//! use dennis::{
//!     competition::{Mode, Robot},
//!     config::RobotConfig,
//! };
//!
//! let mut robot = Robot::new(RobotConfig::default());
//! loop {
//!     let now = hw.uptime();
//!     robot.tick(&mut hw, Mode::Driver, now);
//!     sleep(Duration::from_millis(LOOPRATE)).await;
//! }
//! ```

use std::time::Duration;

use log::info;

use crate::{
    auton::{Progress, Sequencer},
    config::RobotConfig,
    opcontrol::Teleop,
    peripherals::{Hardware, stop_all},
};

/// What the field is asking the robot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Disabled,
    Autonomous,
    Driver,
}

#[cfg(feature = "v5")]
impl From<vexide::competition::CompetitionMode> for Mode {
    fn from(mode: vexide::competition::CompetitionMode) -> Self {
        use vexide::competition::CompetitionMode;
        match mode {
            CompetitionMode::Disabled => Mode::Disabled,
            CompetitionMode::Autonomous => Mode::Autonomous,
            CompetitionMode::Driver => Mode::Driver,
        }
    }
}

#[derive(Debug, Clone)]
enum Active {
    Idle,
    Autonomous(Sequencer),
    Driver(Teleop),
}

/// The robot's top-level state machine.
#[derive(Debug, Clone)]
pub struct Robot {
    config: RobotConfig,
    mode:   Mode,
    active: Active,
}

impl Robot {
    /// Creates a disabled robot.
    pub const fn new(config: RobotConfig) -> Self {
        Self {
            config,
            mode: Mode::Disabled,
            active: Active::Idle,
        }
    }

    /// The mode seen on the most recent tick.
    pub const fn mode(&self) -> Mode { self.mode }

    /// Advances whichever mode is active.
    ///
    /// On a mode change every motor is stopped before the new mode gets its
    /// first tick. Entering autonomous selects the routine from the switches
    /// at that moment; once the routine is over the robot sits still until
    /// the mode changes again.
    pub fn tick<H: Hardware + ?Sized>(&mut self, hw: &mut H, mode: Mode, now: Duration) {
        if mode != self.mode {
            self.enter(hw, mode);
        }

        match &mut self.active {
            Active::Idle => {}
            Active::Autonomous(sequencer) => {
                if sequencer.tick(hw, now) != Progress::Running {
                    self.active = Active::Idle;
                }
            }
            Active::Driver(teleop) => teleop.tick(hw, now),
        }
    }

    fn enter<H: Hardware + ?Sized>(&mut self, hw: &mut H, mode: Mode) {
        info!("Mode change: {:?} -> {:?}", self.mode, mode);
        stop_all(hw);
        self.mode = mode;
        self.active = match mode {
            Mode::Disabled => Active::Idle,
            Mode::Autonomous => {
                Active::Autonomous(Sequencer::autonomous(&*hw, self.config.motion_timeout))
            }
            Mode::Driver => Active::Driver(Teleop::new(
                self.config.teleop,
                self.config.motion_timeout,
            )),
        };
    }
}
