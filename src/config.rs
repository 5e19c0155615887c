//! Tuning constants and configuration structs.
//!
//! Everything here is fixed at compile time. The structs exist so tests
//! and the binary can build a configuration explicitly instead of reaching
//! for globals.

use std::time::Duration;

/// Rate at which the control loop ticks, in milliseconds.
pub const LOOPRATE: u64 = 5;

/// Joystick magnitudes at or below this value are treated as zero.
pub const DEADZONE: i32 = 20;

/// Minimum time between two teleop control cycles.
pub const TELEOP_PERIOD: Duration = Duration::from_millis(20);

/// Potentiometer readings for known mechanism positions.
pub mod calibration {
    /// Mobile-goal intake pointing straight up.
    pub const MOBILE_GOAL_UPRIGHT: i32 = 2000;
    /// Mobile-goal intake lowered far enough to pick up or set down a goal.
    pub const MOBILE_GOAL_LOWERED: i32 = 3500;
    /// Intake arm all the way out.
    pub const ARM_EXTENDED: i32 = 3850;
}

/// Driver control settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeleopConfig {
    /// Deadzone applied to every analog channel.
    pub deadzone: i32,
    /// Minimum time between control cycles.
    pub period:   Duration,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            deadzone: DEADZONE,
            period:   TELEOP_PERIOD,
        }
    }
}

/// Settings for the whole robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RobotConfig {
    pub teleop:         TeleopConfig,
    /// Upper bound on how long any single motion may take.
    ///
    /// `None` lets a motion wait on its sensor forever, so a jammed
    /// mechanism or unplugged sensor hangs the routine.
    pub motion_timeout: Option<Duration>,
}
