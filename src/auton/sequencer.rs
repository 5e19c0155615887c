//! Sequential script execution.
//!
//! A [`Sequencer`] owns a [`Script`] and runs its actions strictly in
//! order, one [`Motion`] at a time. It never branches and never re-reads a
//! sensor to decide what to do next. A step that fails (times out) aborts
//! the rest of the script; motors have already been stopped by then.
//!
//! # Example
//!
//! ```ignore
//! use dennis::auton::{Progress, Sequencer};
//!
//! let mut sequencer = Sequencer::autonomous(&robot, None);
//! while sequencer.tick(&mut robot, robot.uptime()) == Progress::Running {
//!     sleep(Duration::from_millis(5)).await;
//! }
//! ```

use std::time::Duration;

use log::{error, info, warn};

use crate::{
    motion::{Action, Motion, POLL_INTERVAL, Status},
    peripherals::{Hardware, stop_all},
};

/// Longest script a [`Sequencer`] can hold.
pub const MAX_STEPS: usize = 8;

/// An ordered list of actions.
pub type Script = heapless::Vec<Action, MAX_STEPS>;

/// Builds a [`Script`] from a slice of actions.
///
/// Steps past [`MAX_STEPS`] are dropped with a warning.
pub fn script(steps: &[Action]) -> Script {
    let mut script = Script::new();
    for &step in steps {
        if script.push(step).is_err() {
            warn!("Script longer than {} steps, dropping the rest", MAX_STEPS);
            break;
        }
    }
    script
}

/// Where a [`Sequencer`] is in its script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// A step is still in progress.
    Running,
    /// Every step finished.
    Complete,
    /// A step failed or the script was cancelled; the remaining steps were
    /// skipped.
    Aborted,
}

/// Runs a [`Script`] one action at a time.
#[derive(Debug, Clone)]
pub struct Sequencer {
    name:    &'static str,
    steps:   Script,
    next:    usize,
    current: Option<Motion>,
    timeout: Option<Duration>,
    outcome: Option<Progress>,
}

impl Sequencer {
    /// Creates a sequencer. `timeout` applies to each step separately.
    pub fn new(name: &'static str, steps: Script, timeout: Option<Duration>) -> Self {
        Self {
            name,
            steps,
            next: 0,
            current: None,
            timeout,
            outcome: None,
        }
    }

    pub const fn name(&self) -> &'static str { self.name }

    /// Returns `true` once the script has completed or been aborted.
    pub const fn is_done(&self) -> bool { self.outcome.is_some() }

    /// Advances the script.
    ///
    /// Polls the current step; when it finishes the next one is started in
    /// the same tick, so steps whose target is already satisfied cost no
    /// extra ticks. Once the script is over every further tick returns the
    /// same final [`Progress`].
    pub fn tick<H: Hardware + ?Sized>(&mut self, hw: &mut H, now: Duration) -> Progress {
        if let Some(outcome) = self.outcome {
            return outcome;
        }

        loop {
            let motion = match self.current.as_mut() {
                Some(motion) => motion,
                None => {
                    let Some(&action) = self.steps.get(self.next) else {
                        info!("{} complete", self.name);
                        return self.conclude(Progress::Complete);
                    };
                    self.next += 1;
                    self.current.insert(Motion::new(action).with_timeout(self.timeout))
                }
            };

            match motion.poll(hw, now) {
                Ok(Status::Pending) => return Progress::Running,
                Ok(Status::Done) => self.current = None,
                Err(e) => {
                    error!("{} aborted at step {}: {}", self.name, self.next, e);
                    self.current = None;
                    return self.conclude(Progress::Aborted);
                }
            }
        }
    }

    /// Abandons the script and stops every motor.
    pub fn cancel<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        if self.is_done() {
            return;
        }
        match self.current.take() {
            Some(mut motion) => motion.cancel(hw),
            None => stop_all(hw),
        }
        info!("{} cancelled", self.name);
        self.conclude(Progress::Aborted);
    }

    /// Ticks until the script is over, sleeping between ticks with
    /// [`Hardware::delay`].
    pub fn run<H: Hardware + ?Sized>(mut self, hw: &mut H) -> Progress {
        loop {
            let now = hw.uptime();
            match self.tick(hw, now) {
                Progress::Running => hw.delay(POLL_INTERVAL),
                outcome => return outcome,
            }
        }
    }

    fn conclude(&mut self, outcome: Progress) -> Progress {
        self.outcome = Some(outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        motion::{DriveDirection, GrabberDirection},
        peripherals::{AnalogSensor, Encoder, MotorChannel},
        sim::SimRobot,
    };

    fn drive(distance: i32) -> Action {
        Action::Move {
            distance,
            direction: DriveDirection::Forward,
            speed: 100,
        }
    }

    #[test]
    fn satisfied_steps_cost_no_ticks() {
        let mut robot = SimRobot::new();
        let mut sequencer = Sequencer::new("zero", script(&[drive(0), drive(0), drive(0)]), None);

        assert_eq!(sequencer.tick(&mut robot, Duration::ZERO), Progress::Complete);
        assert_eq!(robot.resets[Encoder::LeftDrive.index()], 3);
        assert!(sequencer.is_done());
    }

    #[test]
    fn steps_run_in_order() {
        let mut robot = SimRobot::new();
        let steps = script(&[
            drive(100),
            Action::Grabber {
                direction: GrabberDirection::Intake,
                duration:  Duration::from_millis(50),
            },
        ]);
        let sequencer = Sequencer::new("ordered", steps, None);
        assert_eq!(sequencer.run(&mut robot), Progress::Complete);

        let first_drive = robot
            .writes
            .iter()
            .position(|&(channel, power)| channel == MotorChannel::LeftDrive && power != 0);
        let first_grab = robot
            .writes
            .iter()
            .position(|&(channel, power)| channel == MotorChannel::IntakeGrabber && power != 0);
        assert!(first_drive < first_grab);
        assert!(robot.all_stopped());
    }

    #[test]
    fn failed_step_aborts_the_rest() {
        let mut robot = SimRobot::new().with_analog(AnalogSensor::ArmPot, 0);
        robot.stalled = true;
        let steps = script(&[
            Action::Arm {
                target: 2000,
                speed:  127,
            },
            drive(100),
        ]);
        let sequencer = Sequencer::new("stuck", steps, Some(Duration::from_millis(200)));

        assert_eq!(sequencer.run(&mut robot), Progress::Aborted);
        assert!(robot.all_stopped());
        assert_eq!(robot.resets[Encoder::LeftDrive.index()], 0);
    }

    #[test]
    fn cancel_mid_step_stops_motors() {
        let mut robot = SimRobot::new();
        let mut sequencer = Sequencer::new("long", script(&[drive(10_000)]), None);

        assert_eq!(sequencer.tick(&mut robot, Duration::ZERO), Progress::Running);
        assert_ne!(robot.motor(MotorChannel::LeftDrive), 0);

        sequencer.cancel(&mut robot);
        assert!(robot.all_stopped());
        assert_eq!(sequencer.tick(&mut robot, Duration::from_secs(1)), Progress::Aborted);
    }

    #[test]
    fn overlong_script_is_truncated() {
        let steps = [drive(1); MAX_STEPS + 2];
        assert_eq!(script(&steps).len(), MAX_STEPS);
    }
}
