//! Device configuration and competition wiring.
//!
//! Everything port-specific lives here: which smart ports the motors and
//! sensors are plugged into, which direction each drive motor spins, and
//! the [`Compete`] implementation that hands the robot to the autonomous
//! runner or the driver loop depending on competition mode.

use std::time::Duration;

use vexide::{controller::ControllerId, prelude::*, time::sleep};

use crate::{
    auton::runner,
    drivetrain::Differential,
    opcontrol::controller::{ControllerButton, ControllerControl},
    peripherals::{actuators::V5Actuators, make_cloneable, sensors::V5Sensors},
};

/// Intake power while a face button is held, in volts.
const INTAKE_DRIVER_VOLTS: f64 = 100.0 * 12.0 / 127.0;
/// Driver control loop period.
const DRIVER_LOOP: Duration = Duration::from_millis(20);

/// The competition robot: sensors, actuators, and the driver's controller.
///
/// The autonomous runner borrows the sensors and actuators; the driver
/// loop uses the controller, the drivetrain, and the intake. Nothing else
/// holds device handles.
pub struct Robot {
    pub sensors:    V5Sensors,
    pub actuators:  V5Actuators,
    pub controller: Controller,
}

impl Robot {
    /// Builds the robot with its competition wiring: drive on ports 1
    /// (reversed) and 6, intake on port 16, IMU on port 10, distance
    /// sensor on port 9, line tracker on ADI port A.
    pub fn default_config(peripherals: Peripherals) -> Self {
        let drivetrain = Differential::new(
            [Motor::new(peripherals.port_1, Gearset::Green, Direction::Reverse)],
            [Motor::new(peripherals.port_6, Gearset::Green, Direction::Forward)],
        );
        let intake = make_cloneable(Motor::new(
            peripherals.port_16,
            Gearset::Green,
            Direction::Forward,
        ));

        Robot {
            sensors:    V5Sensors {
                line_tracker: AdiAnalogIn::new(peripherals.adi_a),
                imu:          InertialSensor::new(peripherals.port_10),
                range:        DistanceSensor::new(peripherals.port_9),
            },
            actuators:  V5Actuators { drivetrain, intake },
            controller: unsafe { Controller::new(ControllerId::Primary) },
        }
    }
}

impl Compete for Robot {
    async fn autonomous(&mut self) {
        let actuators = self.actuators.clone();
        runner::run(&mut self.sensors, &actuators).await;
    }

    async fn driver(&mut self) {
        loop {
            self.actuators.drivetrain.arcade(&self.controller);

            let control = ControllerControl::new(&self.controller, ControllerButton::ButtonY);
            if let Ok(mut intake) = self.actuators.intake.try_borrow_mut() {
                control.dual_button_to_motors(
                    ControllerButton::ButtonA,
                    ControllerButton::ButtonB,
                    heapless::Vec::from_iter([&mut *intake]),
                    -INTAKE_DRIVER_VOLTS,
                    INTAKE_DRIVER_VOLTS,
                    0.0,
                    false,
                );
            }

            sleep(DRIVER_LOOP).await;
        }
    }
}
