//! Motion primitives as tick-driven state machines.
//!
//! A [`Motion`] wraps one [`Action`]. Each call to [`Motion::poll`] advances
//! it by one step: the first poll issues the motor commands, every poll
//! checks whether the target has been reached. Nothing blocks, so the
//! caller decides how often to poll and can cancel or time out a motion
//! between polls.
//!
//! # Actions
//!
//! - **Sensor-gated**: [`Action::Move`], [`Action::Turn`] (drive encoders),
//!   [`Action::MobileGoal`], [`Action::Arm`] (potentiometers) and
//!   [`Action::Lift`] (lift encoder) finish when the sensor crosses the target.
//! - **Timed**: [`Action::Grabber`] and [`Action::Pause`] finish after a fixed
//!   duration.
//!
//! Every action that commands a motor stops **all** motors when it finishes,
//! however it finishes.
//!
//! # Example
//!
//! ```ignore
//! use dennis::motion::{Action, DriveDirection, Motion, Status};
//!
//! let mut motion = Motion::new(Action::Move {
//!     distance:  400,
//!     direction: DriveDirection::Backward,
//!     speed:     100,
//! })
//! .with_timeout(Some(Duration::from_secs(3)));
//!
//! loop {
//!     match motion.poll(&mut robot, robot.uptime()) {
//!         Ok(Status::Pending) => sleep(Duration::from_millis(5)).await,
//!         Ok(Status::Done) => break,
//!         Err(e) => {
//!             warn!("{}", e);
//!             break;
//!         }
//!     }
//! }
//! ```

use std::{fmt, time::Duration};

use log::{debug, info, warn};

use crate::{
    config::LOOPRATE,
    error::{MotionError, TimeoutSnafu},
    peripherals::{Hardware, stop_all},
};

/// Motor commands and completion predicates for each action.
///
/// Also holds the blocking wrappers ([`move_distance`], [`turn`],
/// [`mobile_goal_position`], [`lift_to`], [`arm_to`], [`grabber`]).
pub mod primitives;

pub use primitives::{arm_to, grabber, lift_to, mobile_goal_position, move_distance, turn};

/// How long the blocking runners wait between polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(LOOPRATE);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabberDirection {
    /// Pull a cone in.
    Intake,
    /// Push a cone out.
    Outtake,
}

/// One step of a script: what to move, where to, and how fast.
///
/// Speeds are motor powers, `0..=127`. Targets are raw sensor readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Drive straight until both drive encoders read `distance` ticks.
    Move {
        distance:  i32,
        direction: DriveDirection,
        speed:     i32,
    },
    /// Turn in place until both drive encoders read `distance` ticks.
    Turn {
        distance:  i32,
        direction: TurnDirection,
        speed:     i32,
    },
    /// Move the mobile-goal intake to a potentiometer reading.
    MobileGoal { target: i32, speed: i32 },
    /// Move the lift to a lift encoder reading.
    Lift { target: i32, speed: i32 },
    /// Move the intake arm to a potentiometer reading.
    Arm { target: i32, speed: i32 },
    /// Run the grabber at full power for a fixed time.
    Grabber {
        direction: GrabberDirection,
        duration:  Duration,
    },
    /// Wait without touching any motor.
    Pause { duration: Duration },
}

impl Action {
    /// Whether the action drives a motor, and therefore has to stop them
    /// all when it finishes.
    pub const fn commands_motors(&self) -> bool { !matches!(self, Action::Pause { .. }) }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move {
                distance,
                direction,
                speed,
            } => write!(f, "move {distance} ticks {direction:?} at {speed}"),
            Action::Turn {
                distance,
                direction,
                speed,
            } => write!(f, "turn {distance} ticks {direction:?} at {speed}"),
            Action::MobileGoal { target, speed } => write!(f, "mobile goal to {target} at {speed}"),
            Action::Lift { target, speed } => write!(f, "lift to {target} at {speed}"),
            Action::Arm { target, speed } => write!(f, "arm to {target} at {speed}"),
            Action::Grabber {
                direction,
                duration,
            } => write!(f, "grabber {direction:?} for {duration:?}"),
            Action::Pause { duration } => write!(f, "pause for {duration:?}"),
        }
    }
}

/// Result of a successful [`Motion::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Still moving; poll again later.
    Pending,
    /// Finished, and motors have been stopped.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    Running {
        gate:    primitives::Gate,
        started: Duration,
    },
    Finished,
}

/// A single action being driven to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    action:  Action,
    timeout: Option<Duration>,
    state:   State,
}

impl Motion {
    /// Creates a motion that has not started yet. Nothing moves until the
    /// first [`Motion::poll`].
    pub const fn new(action: Action) -> Self {
        Self {
            action,
            timeout: None,
            state: State::Ready,
        }
    }

    /// Sets how long the motion may run before it gives up.
    ///
    /// `None` (the default) waits forever: a stalled mechanism or an
    /// unplugged sensor then keeps the motion pending indefinitely.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub const fn is_finished(&self) -> bool { matches!(self.state, State::Finished) }

    /// Advances the motion by one step.
    ///
    /// `now` is the current uptime; it only matters for timed actions and
    /// the timeout. A target that is already satisfied finishes on the first
    /// poll. Polling a finished motion returns [`Status::Done`] and does
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::Timeout`] once the timeout has elapsed without
    /// the target being reached. All motors are stopped first.
    pub fn poll<H: Hardware + ?Sized>(
        &mut self,
        hw: &mut H,
        now: Duration,
    ) -> Result<Status, MotionError> {
        let (gate, started) = match self.state {
            State::Finished => return Ok(Status::Done),
            State::Ready => {
                debug!("Starting {}", self.action);
                let gate = primitives::start(self.action, hw);
                self.state = State::Running { gate, started: now };
                (gate, now)
            }
            State::Running { gate, started } => (gate, started),
        };

        let elapsed = now.saturating_sub(started);
        if !gate.pending(hw, elapsed) {
            debug!("Finished {} after {:?}", self.action, elapsed);
            self.finish(hw);
            return Ok(Status::Done);
        }

        match self.timeout {
            Some(timeout) if elapsed >= timeout => {
                warn!("Timed out: {} ({:?})", self.action, timeout);
                self.finish(hw);
                TimeoutSnafu {
                    action: self.action,
                    timeout,
                }
                .fail()
            }
            _ => Ok(Status::Pending),
        }
    }

    /// Abandons the motion, stopping every motor. Does nothing if it has
    /// already finished.
    pub fn cancel<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        if !self.is_finished() {
            info!("Cancelled {}", self.action);
            self.finish(hw);
        }
    }

    /// Polls until the motion finishes, sleeping [`POLL_INTERVAL`] between
    /// polls with [`Hardware::delay`].
    ///
    /// # Errors
    ///
    /// See [`Motion::poll`].
    pub fn run<H: Hardware + ?Sized>(mut self, hw: &mut H) -> Result<(), MotionError> {
        loop {
            let now = hw.uptime();
            if self.poll(hw, now)? == Status::Done {
                return Ok(());
            }
            hw.delay(POLL_INTERVAL);
        }
    }

    fn finish<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        if self.action.commands_motors() {
            stop_all(hw);
        }
        self.state = State::Finished;
    }
}
