use argos::{fs::logger, hardware::Robot};
use log::{info, warn, LevelFilter};
use vexide::prelude::*;

#[vexide::main]
async fn main(peripherals: Peripherals) {
    logger::init(LevelFilter::Info).expect("Logger init failed");

    let mut robot = Robot::default_config(peripherals);
    if let Err(e) = robot.sensors.imu.calibrate().await {
        warn!("IMU Calibrate Error: {}", e);
    }
    info!("Argos ready");

    robot.compete().await;
}
