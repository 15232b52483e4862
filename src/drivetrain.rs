//! Differential drivetrain control.
//!
//! This module provides the `Differential` struct for the robot's two-sided
//! "tank" drive. It covers both modes the robot runs in:
//!
//! - **Power commands** for the autonomous routine, in the signed
//!   `[-127, 127]` range the control loop thinks in.
//! - **Arcade** driving for operator control: left stick for
//!   forward/backward, right stick for turning.
//!
//! # Example
//!
//! ```ignore
//! use argos::drivetrain::Differential;
//! use vexide::prelude::*;
//!
//! let drivetrain = Differential::new(
//!     [Motor::new(peripherals.port_1, Gearset::Green, Direction::Reverse)],
//!     [Motor::new(peripherals.port_6, Gearset::Green, Direction::Forward)],
//! );
//!
//! // Autonomous: both sides forward at cruise power.
//! drivetrain.move_power(80, 80);
//!
//! // Driver control loop:
//! let controller = Controller::new(ControllerId::Primary);
//! drivetrain.arcade(&controller);
//! ```

use std::{cell::RefCell, rc::Rc};

use log::warn;
use vexide::{controller::ControllerState, prelude::{Controller, Motor}};

/// Full-scale drive power; commands are scaled from this to motor volts.
const FULL_POWER: f64 = 127.0;

/// A differential drivetrain controller.
///
/// This struct manages a robot with separate left and right motor groups.
/// The motors are stored in reference-counted cells to allow shared
/// ownership with other systems (the autonomous actuator adapter and the
/// driver control loop both hold the same drivetrain).
///
/// # Motor Configuration
///
/// Motors on opposite sides of the drivetrain typically need to spin in
/// opposite directions to move the robot forward. Configure motor
/// directions appropriately when creating the motors.
#[derive(Clone)]
pub struct Differential {
    /// The left motor group.
    pub left:  Rc<RefCell<dyn AsMut<[Motor]>>>,

    /// The right motor group.
    pub right: Rc<RefCell<dyn AsMut<[Motor]>>>,
}

impl Differential {
    /// Creates a new drivetrain with the provided left/right motors.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let drivetrain = Differential::new(
    ///     [Motor::new(peripherals.port_1, Gearset::Green, Direction::Reverse)],
    ///     [Motor::new(peripherals.port_6, Gearset::Green, Direction::Forward)],
    /// );
    /// ```
    pub fn new<L: AsMut<[Motor]> + 'static, R: AsMut<[Motor]> + 'static>(
        left: L,
        right: R,
    ) -> Self {
        Self {
            left:  Rc::new(RefCell::new(left)),
            right: Rc::new(RefCell::new(right)),
        }
    }

    /// Commands both sides with signed power in `[-127, 127]`.
    ///
    /// Values outside the range are clamped. Power is scaled linearly to
    /// motor voltage, so `127` is full forward and `-127` full reverse.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// drivetrain.move_power(20, -20); // pivot in place
    /// drivetrain.move_power(0, 0);    // stop
    /// ```
    pub fn move_power(&self, left: i32, right: i32) {
        let left_voltage = f64::from(left.clamp(-127, 127)) * 12.0 / FULL_POWER;
        let right_voltage = f64::from(right.clamp(-127, 127)) * 12.0 / FULL_POWER;

        if let Ok(mut left_motors) = self.left.try_borrow_mut() {
            for motor in left_motors.as_mut() {
                let _ = motor.set_voltage(left_voltage);
            }
        }

        if let Ok(mut right_motors) = self.right.try_borrow_mut() {
            for motor in right_motors.as_mut() {
                let _ = motor.set_voltage(right_voltage);
            }
        }
    }

    /// Drive the robot using arcade controls (single-stick forward/back + single-stick turn).
    ///
    /// Behavior:
    /// - Forward/backward is read from the left stick Y axis.
    /// - Turning is read from the right stick X axis.
    /// - The two values are mixed into left/right voltages as:
    ///   - left = (fwd - turn) * 12.0
    ///   - right = (fwd + turn) * 12.0
    /// - If reading the controller state fails, zeroed inputs are used (no movement) and a warning is logged.
    ///
    /// Notes:
    /// - Inputs are assumed to be in the range [-1.0, 1.0] and are scaled to volts by 12.0.
    /// - Consider applying your own deadband before calling if small-stick noise is an issue.
    ///
    /// # Example
    /// ```ignore
    /// use vexide::prelude::Controller;
    /// use vexide::devices::controller::ControllerId;
    /// let controller = Controller::new(ControllerId::Primary);
    /// drivetrain.arcade(&controller);
    /// ```
    pub fn arcade(&self, controller: &Controller) {
        let state = controller.state().unwrap_or_else(|e| {
            warn!("Controller State Error: {}", e);
            ControllerState::default()
        });

        let fwd = state.left_stick.y();
        let turn = state.right_stick.x();

        let left_voltage = (fwd - turn) * 12.0;
        let right_voltage = (fwd + turn) * 12.0;

        if let Ok(mut left_motors) = self.left.try_borrow_mut() {
            for motor in left_motors.as_mut() {
                let _ = motor.set_voltage(left_voltage);
            }
        }

        if let Ok(mut right_motors) = self.right.try_borrow_mut() {
            for motor in right_motors.as_mut() {
                let _ = motor.set_voltage(right_voltage);
            }
        }
    }
}
