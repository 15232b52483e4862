//! Actuator writes for the control loop.
//!
//! Two synchronous writes, each issued at most once per tick: the drive
//! pair and the intake. Writes are last-write-wins at the motors; not
//! writing holds the previous command. Hardware faults are logged and
//! swallowed here, never surfaced to the control loop.

use std::{cell::RefCell, rc::Rc};

use log::warn;
use vexide::prelude::Motor;

use crate::drivetrain::Differential;

/// Per-tick actuator writes for the autonomous routine.
pub trait Actuators {
    /// Commands both drive sides. Power is in `[-127, 127]`, positive
    /// forward.
    fn drive(&self, left: i32, right: i32);

    /// Commands the intake in RPM, negative inward.
    fn intake(&self, velocity: i32);
}

/// The competition actuator set: differential drivetrain plus the intake
/// motor.
///
/// Cheaply clonable (the devices are reference counted), which is what lets
/// the run loop hand a copy to its stop-on-cancel guard.
#[derive(Clone)]
pub struct V5Actuators {
    pub drivetrain: Differential,
    pub intake:     Rc<RefCell<Motor>>,
}

impl Actuators for V5Actuators {
    fn drive(&self, left: i32, right: i32) { self.drivetrain.move_power(left, right); }

    fn intake(&self, velocity: i32) {
        if let Ok(mut motor) = self.intake.try_borrow_mut() {
            motor.set_velocity(velocity).unwrap_or_else(|e| {
                warn!("Intake Motor Error: {}", e);
            });
        } else {
            warn!("Error Borrowing Intake Motor");
        }
    }
}
