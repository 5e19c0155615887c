//! A simulated robot for unit tests.
//!
//! Sensors follow the motors: every simulated millisecond each sensor moves
//! by the commanded power of the motor that drives it divided by
//! [`SimRobot::TICKS_DIVISOR`], in the direction the primitives expect. A
//! stalled robot keeps its sensors frozen no matter what the motors do.

use std::time::Duration;

use crate::peripherals::{
    AnalogSensor, DigitalSensor, Encoder, Hardware, JoystickState, MotorChannel,
};

#[derive(Debug, Clone)]
pub(crate) struct SimRobot {
    pub motors:    [i32; 10],
    pub encoders:  [i32; 3],
    pub analog:    [i32; 2],
    pub digital:   [bool; 2],
    pub joystick:  JoystickState,
    pub lines:     [String; 2],
    pub stalled:   bool,
    /// Every `set_motor` call in order.
    pub writes:    Vec<(MotorChannel, i32)>,
    /// Encoder reset count, per encoder.
    pub resets:    [u32; 3],
    pub clock:     Duration,
    /// Extra sensor updates applied once the clock passes the given time.
    pub scheduled: Vec<(Duration, DigitalSensor, bool)>,
}

impl SimRobot {
    pub const TICKS_DIVISOR: i32 = 10;

    pub fn new() -> Self {
        Self {
            motors:    [0; 10],
            encoders:  [0; 3],
            analog:    [0; 2],
            digital:   [true; 2],
            joystick:  JoystickState::default(),
            lines:     [String::new(), String::new()],
            stalled:   false,
            writes:    Vec::new(),
            resets:    [0; 3],
            clock:     Duration::ZERO,
            scheduled: Vec::new(),
        }
    }

    pub fn with_analog(mut self, sensor: AnalogSensor, value: i32) -> Self {
        self.analog[sensor.index()] = value;
        self
    }

    pub fn with_encoder(mut self, encoder: Encoder, value: i32) -> Self {
        self.encoders[encoder.index()] = value;
        self
    }

    pub fn with_digital(mut self, sensor: DigitalSensor, high: bool) -> Self {
        self.digital[sensor.index()] = high;
        self
    }

    pub fn motor(&self, channel: MotorChannel) -> i32 { self.motors[channel.index()] }

    pub fn all_stopped(&self) -> bool { self.motors.iter().all(|&power| power == 0) }

    /// Advances the simulation by one millisecond.
    pub fn step(&mut self) {
        self.clock += Duration::from_millis(1);

        let due: Vec<_> = self
            .scheduled
            .iter()
            .filter(|(at, ..)| *at <= self.clock)
            .map(|&(_, sensor, high)| (sensor, high))
            .collect();
        self.scheduled.retain(|(at, ..)| *at > self.clock);
        for (sensor, high) in due {
            self.digital[sensor.index()] = high;
        }

        if self.stalled {
            return;
        }

        let rate = |power: i32| power / Self::TICKS_DIVISOR;
        self.encoders[Encoder::LeftDrive.index()] += rate(self.motor(MotorChannel::LeftDrive));
        self.encoders[Encoder::RightDrive.index()] += rate(self.motor(MotorChannel::RightDrive));
        self.encoders[Encoder::Lift.index()] += rate(self.motor(MotorChannel::LiftBottomLeft));
        self.analog[AnalogSensor::MobileGoalPot.index()] -=
            rate(self.motor(MotorChannel::LeftMobileGoalIntake));
        self.analog[AnalogSensor::ArmPot.index()] -= rate(self.motor(MotorChannel::IntakeArm));
    }

    /// Advances the simulation by `duration`, a millisecond at a time.
    pub fn advance(&mut self, duration: Duration) {
        for _ in 0..duration.as_millis() {
            self.step();
        }
    }
}

impl Hardware for SimRobot {
    fn set_motor(&mut self, channel: MotorChannel, power: i32) {
        self.motors[channel.index()] = power;
        self.writes.push((channel, power));
    }

    fn encoder(&self, encoder: Encoder) -> i32 { self.encoders[encoder.index()] }

    fn reset_encoder(&mut self, encoder: Encoder) {
        self.encoders[encoder.index()] = 0;
        self.resets[encoder.index()] += 1;
    }

    fn analog(&self, sensor: AnalogSensor) -> i32 { self.analog[sensor.index()] }

    fn digital(&self, sensor: DigitalSensor) -> bool { self.digital[sensor.index()] }

    fn joystick(&self) -> JoystickState { self.joystick }

    fn write_line(&mut self, line: u8, text: &str) {
        if let Some(slot) = self.lines.get_mut(usize::from(line).wrapping_sub(1)) {
            *slot = text.to_owned();
        }
    }

    fn uptime(&self) -> Duration { self.clock }

    fn delay(&mut self, duration: Duration) { self.advance(duration); }
}
