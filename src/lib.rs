//! # Argos
//!
//! Argos is a line-following retrieval robot program for the VEX V5, built
//! on [Vexide](https://vexide.dev). During the autonomous period it:
//!
//! - **Follows the guide line** out toward the far zone, pivoting back onto
//!   the line with a heading-aware turn bias whenever it drifts off.
//! - **Captures the game object** once the distance sensor picks it up,
//!   chasing it down with the intake running.
//! - **Turns around and drives home**, then expels the object.
//!
//! During driver control the same drivetrain and intake are mapped to the
//! controller sticks and face buttons.
//!
//! The decision logic is a plain state machine stepped once per 10 ms tick
//! ([`auton::phase`]), fully separated from the hardware behind sensor and
//! actuator adapters ([`peripherals`]), so the whole routine runs under
//! `cargo test` on a desktop.
//!
//! ## Quick Start
//!
//! ```ignore
//! use argos::{fs::logger, hardware::Robot};
//! use log::LevelFilter;
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(LevelFilter::Info).expect("Logger init failed");
//!     let robot = Robot::default_config(peripherals);
//!     robot.compete().await;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`auton`]: The phase state machine and the control loop that runs it.
//! - [`peripherals`]: Sensor and actuator adapters over the V5 devices.
//! - [`drivetrain`]: Differential drivetrain with power and arcade control.
//! - [`opcontrol`]: Controller button mapping for driver control.
//! - [`hardware`]: Port wiring and the competition-mode entry points.
//! - [`fs`]: SD-card run logging.

/// Autonomous routine module.
///
/// The [`phase`](auton::phase) submodule holds the state machine itself;
/// [`runner`](auton::runner) is the loop that ticks it against the
/// hardware.
pub mod auton;

/// Differential drivetrain control module.
///
/// Provides the [`Differential`](drivetrain::Differential) struct for
/// controlling robots with left and right motor groups, with power-based
/// commands for autonomous and arcade control for drivers.
pub mod drivetrain;

/// Filesystem utilities module.
///
/// Contains logging functionality for recording run telemetry and debug
/// information to a file on the V5 Brain's SD card.
pub mod fs;

/// Device configuration module.
///
/// Declares the [`Robot`](hardware::Robot), its port wiring, and the
/// competition-mode entry points.
pub mod hardware;

/// Operator control utilities module.
///
/// Maps controller buttons to the intake motor during the driver-control
/// period.
pub mod opcontrol;

/// Hardware adapter module.
///
/// The [`Sensors`](peripherals::sensors::Sensors) and
/// [`Actuators`](peripherals::actuators::Actuators) traits the autonomous
/// routine is written against, and their V5 implementations.
pub mod peripherals;
