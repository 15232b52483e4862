//! Operator control utilities for driver control periods.
//!
//! This module simplifies mapping controller inputs to robot actions
//! during the driver-controlled portion of a match. Stick mixing for the
//! drivetrain itself lives in [`crate::drivetrain`]; what is here is the
//! button layer on top of it.
//!
//! # Example
//!
//! ```ignore
//! use argos::opcontrol::controller::{ControllerControl, ControllerButton};
//!
//! let controller = Controller::new(ControllerId::Primary);
//! let control = ControllerControl::new(&controller, ControllerButton::ButtonY);
//!
//! // A runs the intake inward, B runs it outward
//! control.dual_button_to_motors(
//!     ControllerButton::ButtonA,
//!     ControllerButton::ButtonB,
//!     heapless::Vec::from_array([&mut intake]),
//!     -9.4, 9.4, 0.0, false,
//! );
//! ```

/// Controller input mapping utilities.
///
/// Provides [`ControllerControl`](controller::ControllerControl) for
/// mapping buttons to motors.
pub mod controller;
