/// Runs a script of actions one after another.
pub mod sequencer;

use std::time::Duration;

use log::info;
pub use sequencer::{Progress, Script, Sequencer, script};

use crate::{
    config::calibration::{ARM_EXTENDED, MOBILE_GOAL_LOWERED},
    motion::{Action, DriveDirection, GrabberDirection, TurnDirection},
    peripherals::{DigitalSensor, Hardware},
};

/// The autonomous routines the robot knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    /// Lift the preload cone, back up to the goal post and drop it on.
    ScorePreload,
    /// Red side: pick up the mobile goal and score the preload on it.
    RedMobileGoal,
    /// Blue side: turn toward the mobile goal on the right and pick it up.
    BlueMobileGoal,
}

impl Routine {
    /// Picks a routine from the two selection switches.
    ///
    /// An unpressed switch reads HIGH. The switches are read here and never
    /// again, so flipping one during a run has no effect on it.
    pub fn select<H: Hardware + ?Sized>(hw: &H) -> Self {
        if hw.digital(DigitalSensor::AutoLimit) {
            Routine::ScorePreload
        } else if hw.digital(DigitalSensor::SideLimit) {
            Routine::RedMobileGoal
        } else {
            Routine::BlueMobileGoal
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Routine::ScorePreload => "score preload",
            Routine::RedMobileGoal => "red mobile goal",
            Routine::BlueMobileGoal => "blue mobile goal",
        }
    }

    /// The routine's steps, in order.
    pub fn script(self) -> Script {
        match self {
            Routine::ScorePreload => script(&[
                Action::Lift {
                    target: 80,
                    speed:  127,
                },
                backward(400),
                pause(500),
                outtake(500),
                Action::Arm {
                    target: ARM_EXTENDED,
                    speed:  127,
                },
                Action::Move {
                    distance:  400,
                    direction: DriveDirection::Forward,
                    speed:     100,
                },
            ]),
            Routine::RedMobileGoal => script(&[
                Action::MobileGoal {
                    target: MOBILE_GOAL_LOWERED,
                    speed:  127,
                },
                backward(1700),
                Action::MobileGoal {
                    target: 1300,
                    speed:  127,
                },
                pause(500),
                outtake(700),
            ]),
            Routine::BlueMobileGoal => script(&[
                Action::Lift {
                    target: 10,
                    speed:  127,
                },
                backward(200),
                Action::Turn {
                    distance:  300,
                    direction: TurnDirection::Left,
                    speed:     50,
                },
                Action::MobileGoal {
                    target: 3300,
                    speed:  127,
                },
                backward(1700),
            ]),
        }
    }
}

const fn backward(distance: i32) -> Action {
    Action::Move {
        distance,
        direction: DriveDirection::Backward,
        speed: 100,
    }
}

const fn pause(millis: u64) -> Action {
    Action::Pause {
        duration: Duration::from_millis(millis),
    }
}

const fn outtake(millis: u64) -> Action {
    Action::Grabber {
        direction: GrabberDirection::Outtake,
        duration:  Duration::from_millis(millis),
    }
}

impl Sequencer {
    /// Selects a routine from the switches and prepares to run it.
    pub fn autonomous<H: Hardware + ?Sized>(hw: &H, timeout: Option<Duration>) -> Self {
        let routine = Routine::select(hw);
        info!("Autonomous routine: {}", routine.name());
        Sequencer::new(routine.name(), routine.script(), timeout)
    }
}
