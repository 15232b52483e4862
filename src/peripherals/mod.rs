//! Hardware adapters between the robot logic and the V5 devices.
//!
//! The autonomous routine never talks to devices directly: it reads through
//! the [`Sensors`](sensors::Sensors) trait and writes through the
//! [`Actuators`](actuators::Actuators) trait. The V5 implementations here
//! absorb every device error at the boundary, logging a warning and falling
//! back to "no reading" or "no write" so the control loop stays
//! deterministic.
//!
//! # Example
//!
//! ```ignore
//! use argos::peripherals::{actuators::V5Actuators, make_cloneable, sensors::V5Sensors};
//! use vexide::prelude::*;
//!
//! let sensors = V5Sensors {
//!     line_tracker: AdiAnalogIn::new(peripherals.adi_a),
//!     imu:          InertialSensor::new(peripherals.port_10),
//!     range:        DistanceSensor::new(peripherals.port_9),
//! };
//! let intake = make_cloneable(Motor::new(peripherals.port_16, Gearset::Green, Direction::Forward));
//! ```

/// Drive and intake output commands.
///
/// Provides the [`Actuators`](actuators::Actuators) contract and its V5
/// implementation over the drivetrain and the intake motor.
pub mod actuators;

/// Line, heading, and distance readings.
///
/// Provides the [`Sensors`](sensors::Sensors) contract and its V5
/// implementation over the line tracker, the IMU, and the distance sensor.
pub mod sensors;

use std::{cell::RefCell, rc::Rc};

/// Makes an object clonable by wrapping it in `Rc` and `RefCell`
pub fn make_cloneable<T>(t: T) -> Rc<RefCell<T>> { Rc::new(RefCell::new(t)) }
