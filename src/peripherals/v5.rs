//! The real robot.
//!
//! [`V5Robot`] owns every device on the brain and implements [`Hardware`]
//! on top of vexide. Device faults (unplugged cables, a disconnected
//! controller) are logged with `warn!` and replaced by a neutral value, so a
//! loose wire slows the robot down instead of stopping the program.
//!
//! # Wiring
//!
//! | Device | Port |
//! |---|---|
//! | Left / right drive | 1 / 2 |
//! | Lift top left, bottom left, bottom right, top right | 3, 4, 5, 6 |
//! | Mobile-goal intake left / right | 7 / 8 |
//! | Intake arm | 9 |
//! | Grabber | 10 |
//! | Lift rotation sensor | 11 |
//! | Left drive encoder | ADI A/B |
//! | Right drive encoder | ADI C/D |
//! | Mobile-goal potentiometer | ADI E |
//! | Arm potentiometer | ADI F |
//! | Auto-select limit switch | ADI G |
//! | Side-select limit switch | ADI H |

use std::time::Duration;

use log::warn;
use vexide::{
    color::Rgb,
    controller::ControllerState,
    display::{Rect, Text, TextSize},
    prelude::*,
    runtime::block_on,
    time::{sleep, user_uptime},
};

use super::{
    AnalogSensor, Axis, ButtonDirection, ButtonGroup, DigitalSensor, Encoder, Hardware,
    JoystickState, MAX_POWER, MotorChannel,
};

/// Ticks per revolution of the optical shaft encoders.
const ENCODER_TPR: u32 = 360;

/// Height of one display line, in pixels.
const LINE_HEIGHT: i16 = 20;

/// Converts a signed power to motor volts.
fn power_to_volts(power: i32) -> f64 {
    f64::from(power.clamp(-MAX_POWER, MAX_POWER)) / f64::from(MAX_POWER) * Motor::MAX_VOLTAGE
}

/// Every device on the robot.
pub struct V5Robot {
    /// Indexed by [`MotorChannel::index`].
    motors:          [Motor; 10],
    left_encoder:    AdiEncoder<ENCODER_TPR>,
    right_encoder:   AdiEncoder<ENCODER_TPR>,
    lift_rotation:   RotationSensor,
    mobile_goal_pot: AdiAnalogIn,
    arm_pot:         AdiAnalogIn,
    auto_limit:      AdiDigitalIn,
    side_limit:      AdiDigitalIn,
    controller:      Controller,
    display:         Display,
}

impl V5Robot {
    /// Claims every port the robot uses.
    pub fn new(peripherals: Peripherals) -> Self {
        let motor = |port| Motor::new(port, Gearset::Green, Direction::Forward);

        // Same order as `MotorChannel::ALL`.
        let motors = [
            motor(peripherals.port_7),
            motor(peripherals.port_3),
            motor(peripherals.port_4),
            motor(peripherals.port_9),
            motor(peripherals.port_1),
            motor(peripherals.port_2),
            motor(peripherals.port_10),
            motor(peripherals.port_5),
            motor(peripherals.port_6),
            motor(peripherals.port_8),
        ];

        Self {
            motors,
            left_encoder: AdiEncoder::new(peripherals.adi_a, peripherals.adi_b),
            right_encoder: AdiEncoder::new(peripherals.adi_c, peripherals.adi_d),
            lift_rotation: RotationSensor::new(peripherals.port_11, Direction::Forward),
            mobile_goal_pot: AdiAnalogIn::new(peripherals.adi_e),
            arm_pot: AdiAnalogIn::new(peripherals.adi_f),
            auto_limit: AdiDigitalIn::new(peripherals.adi_g),
            side_limit: AdiDigitalIn::new(peripherals.adi_h),
            controller: peripherals.primary_controller,
            display: peripherals.display,
        }
    }
}

impl Hardware for V5Robot {
    fn set_motor(&mut self, channel: MotorChannel, power: i32) {
        let volts = power_to_volts(power);
        if let Err(e) = self.motors[channel.index()].set_voltage(volts) {
            warn!("{} voltage error: {}", channel, e);
        }
    }

    fn encoder(&self, encoder: Encoder) -> i32 {
        let degrees = match encoder {
            Encoder::LeftDrive => self.left_encoder.position().map(|p| p.as_degrees()),
            Encoder::RightDrive => self.right_encoder.position().map(|p| p.as_degrees()),
            Encoder::Lift => self.lift_rotation.position().map(|p| p.as_degrees()),
        };
        degrees.unwrap_or_else(|e| {
            warn!("{:?} encoder error: {}", encoder, e);
            0.0
        }) as i32
    }

    fn reset_encoder(&mut self, encoder: Encoder) {
        let result = match encoder {
            Encoder::LeftDrive => self.left_encoder.reset_position(),
            Encoder::RightDrive => self.right_encoder.reset_position(),
            Encoder::Lift => self.lift_rotation.reset_position(),
        };
        if let Err(e) = result {
            warn!("{:?} encoder reset error: {}", encoder, e);
        }
    }

    fn analog(&self, sensor: AnalogSensor) -> i32 {
        let pot = match sensor {
            AnalogSensor::MobileGoalPot => &self.mobile_goal_pot,
            AnalogSensor::ArmPot => &self.arm_pot,
        };
        let value = pot.value().unwrap_or_else(|e| {
            warn!("{:?} read error: {}", sensor, e);
            0
        });
        i32::from(value)
    }

    fn digital(&self, sensor: DigitalSensor) -> bool {
        let switch = match sensor {
            DigitalSensor::AutoLimit => &self.auto_limit,
            DigitalSensor::SideLimit => &self.side_limit,
        };
        // An unplugged switch reads as unpressed.
        switch.is_high().unwrap_or_else(|e| {
            warn!("{:?} read error: {}", sensor, e);
            true
        })
    }

    fn joystick(&self) -> JoystickState {
        let state = self.controller.state().unwrap_or_else(|e| {
            warn!("Controller State Error: {}", e);
            ControllerState::default()
        });
        joystick_from_state(&state)
    }

    fn write_line(&mut self, line: u8, text: &str) {
        let top = i16::from(line.saturating_sub(1)) * LINE_HEIGHT;
        let black = Rgb::new(0, 0, 0);
        self.display.fill(
            &Rect::new([0, top], [Display::HORIZONTAL_RESOLUTION - 1, top + LINE_HEIGHT - 1]),
            black,
        );
        self.display
            .fill(&Text::new(text, TextSize::Medium, [0, top]), Rgb::new(255, 255, 255));
    }

    fn uptime(&self) -> Duration { user_uptime() }

    /// Sleeps on the vexide executor. Only the blocking motion wrappers
    /// call this; the competition loop awaits its own `sleep`.
    fn delay(&mut self, duration: Duration) { block_on(sleep(duration)); }
}

/// Maps the controller's named buttons onto channel and group numbers.
fn joystick_from_state(state: &ControllerState) -> JoystickState {
    let mut joystick = JoystickState::default();

    joystick.set_axis(Axis::RightX, i32::from(state.right_stick.x_raw()));
    joystick.set_axis(Axis::RightY, i32::from(state.right_stick.y_raw()));
    joystick.set_axis(Axis::LeftY, i32::from(state.left_stick.y_raw()));
    joystick.set_axis(Axis::LeftX, i32::from(state.left_stick.x_raw()));

    let buttons = [
        (ButtonGroup::LeftTriggers, ButtonDirection::Up, &state.front_left_trigger),
        (ButtonGroup::LeftTriggers, ButtonDirection::Down, &state.back_left_trigger),
        (ButtonGroup::RightTriggers, ButtonDirection::Up, &state.front_right_trigger),
        (ButtonGroup::RightTriggers, ButtonDirection::Down, &state.back_right_trigger),
        (ButtonGroup::LeftPad, ButtonDirection::Up, &state.button_up),
        (ButtonGroup::LeftPad, ButtonDirection::Down, &state.button_down),
        (ButtonGroup::LeftPad, ButtonDirection::Left, &state.button_left),
        (ButtonGroup::LeftPad, ButtonDirection::Right, &state.button_right),
        (ButtonGroup::RightPad, ButtonDirection::Up, &state.button_x),
        (ButtonGroup::RightPad, ButtonDirection::Down, &state.button_b),
        (ButtonGroup::RightPad, ButtonDirection::Left, &state.button_y),
        (ButtonGroup::RightPad, ButtonDirection::Right, &state.button_a),
    ];
    for (group, direction, button) in buttons {
        joystick.set_button(group, direction, button.is_pressed());
    }

    joystick
}
