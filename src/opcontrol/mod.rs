//! Driver control.
//!
//! [`Teleop`] runs one control cycle per [`TeleopConfig::period`]. Each cycle
//! reads the joystick once and writes every mechanism directly; nothing
//! waits on a sensor.
//!
//! # Controls
//!
//! | Input | Effect |
//! |---|---|
//! | Channel 4 / channel 3 | Tank-mixed drive (`left = x - y`, `right = x + y`) |
//! | Channel 2 | Lift, all four motors |
//! | 8 Down / 8 Right | Mobile-goal intake toward / away from the robot |
//! | 8 Up | Set the mobile goal down softly (scripted) |
//! | 5 Down / 5 Up | Intake arm toward / away from the robot |
//! | 6 Up / 6 Down | Grabber intake / outtake |
//! | 7 Down + 7 Right | Run the autonomous routine, after the set-down if 8 Up is also held |
//!
//! The scripted controls hand the robot over to a [`Sequencer`]: joystick
//! input is ignored until the script finishes, then driver control resumes.
//!
//! # Example
//!
//! ```ignore
//! use dennis::{config::TeleopConfig, opcontrol::Teleop};
//!
//! let mut teleop = Teleop::new(TeleopConfig::default(), None);
//! loop {
//!     teleop.tick(&mut robot, robot.uptime());
//!     sleep(Duration::from_millis(5)).await;
//! }
//! ```

/// Joystick-to-power mapping helpers.
pub mod controller;

use std::time::Duration;

use controller::{DualButton, axis_with_deadzone, chord, tank_mix};
use log::info;

use crate::{
    auton::{Progress, Sequencer, script},
    config::{
        TeleopConfig,
        calibration::{MOBILE_GOAL_LOWERED, MOBILE_GOAL_UPRIGHT},
    },
    motion::{
        Action,
        primitives::{set_lift, set_mobile_goal},
    },
    peripherals::{
        AnalogSensor, Axis, ButtonDirection, ButtonGroup, Hardware, MotorChannel, stop_all,
    },
};

const MOBILE_GOAL: DualButton = DualButton {
    group:    ButtonGroup::RightPad,
    forward:  ButtonDirection::Down,
    backward: ButtonDirection::Right,
};

const ARM: DualButton = DualButton {
    group:    ButtonGroup::LeftTriggers,
    forward:  ButtonDirection::Down,
    backward: ButtonDirection::Up,
};

const GRABBER: DualButton = DualButton {
    group:    ButtonGroup::RightTriggers,
    forward:  ButtonDirection::Up,
    backward: ButtonDirection::Down,
};

const SOFT_SET_DOWN: (ButtonGroup, ButtonDirection) = (ButtonGroup::RightPad, ButtonDirection::Up);

const AUTONOMOUS_CHORD: [(ButtonGroup, ButtonDirection); 2] = [
    (ButtonGroup::LeftPad, ButtonDirection::Down),
    (ButtonGroup::LeftPad, ButtonDirection::Right),
];

/// Lowers the mobile goal to upright at full speed, then lets it down the
/// rest of the way slowly.
fn soft_set_down(timeout: Option<Duration>) -> Sequencer {
    let steps = script(&[
        Action::MobileGoal {
            target: MOBILE_GOAL_UPRIGHT,
            speed:  127,
        },
        Action::Pause {
            duration: Duration::from_millis(300),
        },
        Action::MobileGoal {
            target: MOBILE_GOAL_LOWERED,
            speed:  40,
        },
    ]);
    Sequencer::new("soft set-down", steps, timeout)
}

/// The driver control loop.
#[derive(Debug, Clone)]
pub struct Teleop {
    config:            TeleopConfig,
    motion_timeout:    Option<Duration>,
    last_cycle:        Option<Duration>,
    script:            Option<Sequencer>,
    /// The autonomous chord was held while another script launched; run it
    /// as soon as that script ends.
    queued_autonomous: bool,
}

impl Teleop {
    /// Creates the loop. `motion_timeout` bounds each step of the scripts
    /// the driver can launch.
    pub const fn new(config: TeleopConfig, motion_timeout: Option<Duration>) -> Self {
        Self {
            config,
            motion_timeout,
            last_cycle: None,
            script: None,
            queued_autonomous: false,
        }
    }

    /// Returns `true` while a driver-launched script has control.
    pub const fn is_running_script(&self) -> bool { self.script.is_some() }

    /// Name of the driver-launched script that has control, if any.
    pub fn running_script(&self) -> Option<&'static str> {
        self.script.as_ref().map(Sequencer::name)
    }

    /// Advances driver control.
    ///
    /// If a script is running it gets the tick. Otherwise a control cycle
    /// runs if at least one period has passed since the previous one.
    pub fn tick<H: Hardware + ?Sized>(&mut self, hw: &mut H, now: Duration) {
        if let Some(sequencer) = self.script.as_mut() {
            if sequencer.tick(hw, now) == Progress::Running {
                return;
            }
            self.last_cycle = Some(now);
            if std::mem::take(&mut self.queued_autonomous) {
                info!("{} over, starting queued autonomous", sequencer.name());
                let autonomous = Sequencer::autonomous(&*hw, self.motion_timeout);
                self.launch(hw, autonomous);
            } else {
                info!("{} over, back to driver control", sequencer.name());
                self.script = None;
            }
            return;
        }

        if let Some(last) = self.last_cycle {
            if now.saturating_sub(last) < self.config.period {
                return;
            }
        }
        self.last_cycle = Some(now);
        self.cycle(hw);
    }

    /// Abandons any running or queued script and stops every motor.
    pub fn cancel<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        self.queued_autonomous = false;
        match self.script.take() {
            Some(mut sequencer) => sequencer.cancel(hw),
            None => stop_all(hw),
        }
    }

    fn cycle<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        let state = hw.joystick();
        let deadzone = self.config.deadzone;

        let (left, right) = tank_mix(
            axis_with_deadzone(&state, Axis::LeftX, deadzone),
            axis_with_deadzone(&state, Axis::LeftY, deadzone),
        );
        hw.set_motor(MotorChannel::LeftDrive, left);
        hw.set_motor(MotorChannel::RightDrive, right);

        set_mobile_goal(hw, MOBILE_GOAL.power(&state));
        set_lift(hw, axis_with_deadzone(&state, Axis::RightY, deadzone));
        hw.set_motor(MotorChannel::IntakeArm, ARM.power(&state));
        hw.set_motor(MotorChannel::IntakeGrabber, GRABBER.power(&state));

        let mobile_goal = hw.analog(AnalogSensor::MobileGoalPot);
        let arm = hw.analog(AnalogSensor::ArmPot);
        hw.write_line(1, &format!("MobilePot: {}", mobile_goal));
        hw.write_line(2, &format!("ArmPot: {}", arm));

        // Both scripts can be requested in one cycle; the set-down runs
        // first and autonomous follows it.
        let set_down = state.button(SOFT_SET_DOWN.0, SOFT_SET_DOWN.1);
        let autonomous = chord(&state, &AUTONOMOUS_CHORD);
        if set_down {
            self.queued_autonomous = autonomous;
            self.launch(hw, soft_set_down(self.motion_timeout));
        } else if autonomous {
            let sequencer = Sequencer::autonomous(&*hw, self.motion_timeout);
            self.launch(hw, sequencer);
        }
    }

    fn launch<H: Hardware + ?Sized>(&mut self, hw: &mut H, sequencer: Sequencer) {
        info!("Driver launched {}", sequencer.name());
        stop_all(hw);
        self.script = Some(sequencer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        peripherals::{DigitalSensor, JoystickState},
        sim::SimRobot,
    };

    const PERIOD: Duration = Duration::from_millis(20);

    fn teleop() -> Teleop { Teleop::new(TeleopConfig::default(), None) }

    fn drive_after(x: i32, y: i32) -> (i32, i32) {
        let mut robot = SimRobot::new();
        robot.joystick.set_axis(Axis::LeftX, x);
        robot.joystick.set_axis(Axis::LeftY, y);
        teleop().tick(&mut robot, Duration::ZERO);
        (
            robot.motor(MotorChannel::LeftDrive),
            robot.motor(MotorChannel::RightDrive),
        )
    }

    #[test]
    fn drive_deadzone_and_mix() {
        assert_eq!(drive_after(15, -10), (0, 0));
        assert_eq!(drive_after(20, 20), (0, 0));
        assert_eq!(drive_after(50, 0), (50, 50));
        assert_eq!(drive_after(0, 30), (-30, 30));
        assert_eq!(drive_after(50, 10), (50, 50));
        assert_eq!(drive_after(-90, 100), (-190, 10));
    }

    #[test]
    fn lift_follows_right_stick() {
        let mut robot = SimRobot::new();
        robot.joystick.set_axis(Axis::RightY, 60);
        let mut teleop = teleop();
        teleop.tick(&mut robot, Duration::ZERO);

        assert_eq!(robot.motor(MotorChannel::LiftBottomLeft), 60);
        assert_eq!(robot.motor(MotorChannel::LiftBottomRight), -60);
        assert_eq!(robot.motor(MotorChannel::LiftTopLeft), -60);
        assert_eq!(robot.motor(MotorChannel::LiftTopRight), 60);

        robot.joystick.set_axis(Axis::RightY, -20);
        teleop.tick(&mut robot, PERIOD);
        assert!(robot.all_stopped());
    }

    #[test]
    fn mechanism_buttons() {
        let mut robot = SimRobot::new();
        robot.joystick = robot
            .joystick
            .with_button(ButtonGroup::RightPad, ButtonDirection::Down, true)
            .with_button(ButtonGroup::LeftTriggers, ButtonDirection::Up, true)
            .with_button(ButtonGroup::RightTriggers, ButtonDirection::Up, true);
        let mut teleop = teleop();
        teleop.tick(&mut robot, Duration::ZERO);

        assert_eq!(robot.motor(MotorChannel::LeftMobileGoalIntake), 127);
        assert_eq!(robot.motor(MotorChannel::RightMobileGoalIntake), -127);
        assert_eq!(robot.motor(MotorChannel::IntakeArm), -127);
        assert_eq!(robot.motor(MotorChannel::IntakeGrabber), 127);

        robot.joystick = JoystickState::default()
            .with_button(ButtonGroup::RightPad, ButtonDirection::Right, true)
            .with_button(ButtonGroup::LeftTriggers, ButtonDirection::Down, true)
            .with_button(ButtonGroup::RightTriggers, ButtonDirection::Down, true);
        teleop.tick(&mut robot, PERIOD);

        assert_eq!(robot.motor(MotorChannel::LeftMobileGoalIntake), -127);
        assert_eq!(robot.motor(MotorChannel::RightMobileGoalIntake), 127);
        assert_eq!(robot.motor(MotorChannel::IntakeArm), 127);
        assert_eq!(robot.motor(MotorChannel::IntakeGrabber), -127);
    }

    #[test]
    fn cycles_respect_the_period() {
        let mut robot = SimRobot::new();
        let mut teleop = teleop();
        teleop.tick(&mut robot, Duration::ZERO);

        robot.joystick.set_axis(Axis::LeftX, 80);
        teleop.tick(&mut robot, Duration::from_millis(19));
        assert_eq!(robot.motor(MotorChannel::LeftDrive), 0);

        teleop.tick(&mut robot, PERIOD);
        assert_eq!(robot.motor(MotorChannel::LeftDrive), 80);
    }

    #[test]
    fn display_shows_both_pots() {
        let mut robot = SimRobot::new()
            .with_analog(AnalogSensor::MobileGoalPot, 3800)
            .with_analog(AnalogSensor::ArmPot, 1800);
        teleop().tick(&mut robot, Duration::ZERO);

        assert_eq!(robot.lines[0], "MobilePot: 3800");
        assert_eq!(robot.lines[1], "ArmPot: 1800");
    }

    #[test]
    fn chord_runs_autonomous_then_resumes() {
        let mut robot = SimRobot::new()
            .with_digital(DigitalSensor::AutoLimit, false)
            .with_digital(DigitalSensor::SideLimit, true)
            .with_analog(AnalogSensor::MobileGoalPot, 1100);
        robot.joystick = JoystickState::default()
            .with_button(ButtonGroup::LeftPad, ButtonDirection::Down, true)
            .with_button(ButtonGroup::LeftPad, ButtonDirection::Right, true)
            .with_axis(Axis::LeftX, 100);

        let mut teleop = teleop();
        teleop.tick(&mut robot, Duration::ZERO);
        assert!(teleop.is_running_script());
        assert!(robot.all_stopped());

        // The stick is still pushed, but the script owns the drive.
        robot.joystick = JoystickState::default().with_axis(Axis::LeftX, 100);
        while teleop.is_running_script() {
            let now = robot.clock;
            teleop.tick(&mut robot, now);
            assert_ne!(robot.motor(MotorChannel::RightDrive), 100);
            robot.advance(Duration::from_millis(5));
        }
        assert!(robot.all_stopped());
        assert!(robot.analog(AnalogSensor::MobileGoalPot) <= 1300);

        robot.advance(PERIOD);
        let now = robot.clock;
        teleop.tick(&mut robot, now);
        assert_eq!(robot.motor(MotorChannel::LeftDrive), 100);
    }

    #[test]
    fn soft_set_down_lowers_the_goal() {
        let mut robot = SimRobot::new().with_analog(AnalogSensor::MobileGoalPot, 1100);
        robot.joystick =
            JoystickState::default().with_button(ButtonGroup::RightPad, ButtonDirection::Up, true);

        let mut teleop = teleop();
        teleop.tick(&mut robot, Duration::ZERO);
        assert!(teleop.is_running_script());

        while teleop.is_running_script() {
            let now = robot.clock;
            teleop.tick(&mut robot, now);
            robot.advance(Duration::from_millis(5));
        }
        assert!(robot.analog(AnalogSensor::MobileGoalPot) > MOBILE_GOAL_LOWERED);
        assert!(robot.all_stopped());
        assert!(robot.clock >= Duration::from_millis(300));
    }

    #[test]
    fn chord_held_with_set_down_runs_autonomous_next() {
        let mut robot = SimRobot::new();
        robot.joystick = JoystickState::default()
            .with_button(ButtonGroup::RightPad, ButtonDirection::Up, true)
            .with_button(ButtonGroup::LeftPad, ButtonDirection::Down, true)
            .with_button(ButtonGroup::LeftPad, ButtonDirection::Right, true);

        let mut teleop = teleop();
        let mut launched: Vec<&str> = Vec::new();
        for _ in 0..4000 {
            let now = robot.clock;
            teleop.tick(&mut robot, now);
            if let Some(name) = teleop.running_script()
                && launched.last() != Some(&name)
            {
                launched.push(name);
            }
            robot.advance(Duration::from_millis(5));
        }

        assert_eq!(launched[0], "soft set-down");
        assert_eq!(launched[1], "score preload");
    }

    #[test]
    fn cancel_drops_a_queued_autonomous() {
        let mut robot = SimRobot::new();
        robot.joystick = JoystickState::default()
            .with_button(ButtonGroup::RightPad, ButtonDirection::Up, true)
            .with_button(ButtonGroup::LeftPad, ButtonDirection::Down, true)
            .with_button(ButtonGroup::LeftPad, ButtonDirection::Right, true);
        let mut teleop = teleop();
        teleop.tick(&mut robot, Duration::ZERO);
        assert_eq!(teleop.running_script(), Some("soft set-down"));

        teleop.cancel(&mut robot);
        robot.joystick = JoystickState::default();
        teleop.tick(&mut robot, PERIOD);
        assert_eq!(teleop.running_script(), None);
    }

    #[test]
    fn cancel_stops_a_running_script() {
        let mut robot = SimRobot::new().with_analog(AnalogSensor::MobileGoalPot, 1100);
        robot.joystick =
            JoystickState::default().with_button(ButtonGroup::RightPad, ButtonDirection::Up, true);
        let mut teleop = teleop();
        teleop.tick(&mut robot, Duration::ZERO);
        teleop.tick(&mut robot, Duration::ZERO);
        assert_ne!(robot.motor(MotorChannel::LeftMobileGoalIntake), 0);

        teleop.cancel(&mut robot);
        assert!(!teleop.is_running_script());
        assert!(robot.all_stopped());
    }
}
