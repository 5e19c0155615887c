use std::time::Duration;

use dennis::{
    competition::{Mode, Robot},
    config::{LOOPRATE, RobotConfig},
    fs::logger,
    peripherals::{Hardware, v5::V5Robot},
};
use log::{LevelFilter, info};
use vexide::{competition, prelude::*};

#[vexide::main]
async fn main(peripherals: Peripherals) {
    if let Err(e) = logger::init(LevelFilter::Info) {
        println!("Logger init failed: {}", e);
    }

    let mut hw = V5Robot::new(peripherals);
    let mut robot = Robot::new(RobotConfig::default());
    info!("Robot ready");

    loop {
        let mode = Mode::from(competition::mode());
        let now = hw.uptime();
        robot.tick(&mut hw, mode, now);
        sleep(Duration::from_millis(LOOPRATE)).await;
    }
}
