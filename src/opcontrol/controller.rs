//! Controller input mapping for operator control.
//!
//! This module provides utilities for mapping controller button presses to
//! motor voltages. It supports:
//!
//! - **Dual-button controls**: Two buttons for forward/reverse (the intake's
//!   in/out pair).
//! - **Control button modifiers**: Require a "shift" button to be held.
//!
//! # Example
//!
//! ```ignore
//! use argos::opcontrol::controller::{ControllerControl, ControllerButton};
//!
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

use heapless::Vec;
use log::warn;
use vexide::{
    controller::{ButtonState, ControllerState},
    prelude::{Controller, Motor},
};

/// Controller input mapper for operator control.
///
/// This struct captures the current controller state and a designated
/// "control button" that acts as a modifier (like a shift key).
///
/// # Control Button
///
/// The control button enables extended controls. When `ctrl: true` is
/// passed to a mapping method, the action only triggers if the control
/// button is also held. This effectively doubles the available controls.
/// The robot currently maps everything with `ctrl: false`, leaving the
/// shifted layer free.
pub struct ControllerControl {
    /// The current state of all controller buttons and sticks.
    state:      ControllerState,
    /// The button designated as the control/modifier button.
    controlkey: ButtonState,
}

impl ControllerControl {
    /// Creates a new ControllerControl instance from the controller state
    /// at this instant. Build one per driver-loop iteration so button edges
    /// are seen.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let master = Controller::new(ControllerId::Primary);
    /// let control = ControllerControl::new(&master, ControllerButton::ButtonY);
    /// ```
    pub fn new(controller: &Controller, button: ControllerButton) -> Self {
        let state = get_state(controller);
        let control_button = get_button_state(state, button);

        ControllerControl {
            state,
            controlkey: control_button,
        }
    }

    /// Maps 2 buttons to one or more motors. The High Button outputs the
    /// high power to the motors, the Low Button the low power, and with
    /// neither pressed the motors run at passive power. A maximum of 8
    /// motors can be controlled at a time.
    ///
    /// # Arguments
    /// - `button_high`: The button that applies `high_pwr`.
    /// - `button_low`: The button that applies `low_pwr`.
    /// - `motors`: A `heapless::Vec` of motors to control.
    /// - `high_pwr`: Power (in volts) while the high button is held.
    /// - `low_pwr`: Power (in volts) while the low button is held.
    /// - `passive_pwr`: Power (in volts) while neither button is held.
    /// - `ctrl`: Whether the control button must also be held.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let control = ControllerControl::new(&master, ControllerButton::ButtonY);
    /// control.dual_button_to_motors(
    ///     ControllerButton::ButtonA,
    ///     ControllerButton::ButtonB,
    ///     heapless::Vec::from_array([&mut intake]),
    ///     -9.4,
    ///     9.4,
    ///     0.0,
    ///     false,
    /// );
    /// // Button A pulls the intake inward, Button B pushes outward,
    /// // releasing both stops it.
    /// ```
    pub fn dual_button_to_motors(
        &self,
        button_high: ControllerButton,
        button_low: ControllerButton,
        motors: Vec<&mut Motor, 8>,
        high_pwr: f64,
        low_pwr: f64,
        passive_pwr: f64,
        ctrl: bool,
    ) {
        let button_high_state = get_button_state(self.state, button_high);
        let button_low_state = get_button_state(self.state, button_low);

        if self.controlkey.is_pressed() == ctrl {
            if button_high_state.is_pressed() {
                for motor in motors {
                    motor.set_voltage(high_pwr).unwrap_or_else(|e| {
                        warn!("Motor Set Voltage Error: {}", e);
                    });
                }
            } else if button_low_state.is_pressed() {
                for motor in motors {
                    motor.set_voltage(low_pwr).unwrap_or_else(|e| {
                        warn!("Motor Set Voltage Error: {}", e);
                    });
                }
            } else {
                for motor in motors {
                    motor.set_voltage(passive_pwr).unwrap_or_else(|e| {
                        warn!("Motor Set Voltage Error: {}", e);
                    });
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// A list of Controller Buttons.
///
/// # Example
///
/// ```ignore
/// let control = ControllerControl::new(&master, ControllerButton::ButtonY);
/// ```
pub enum ControllerButton {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    ButtonL1,
    ButtonL2,
    ButtonR1,
    ButtonR2,
}

fn get_button_state(state: ControllerState, button: ControllerButton) -> ButtonState {
    match button {
        ControllerButton::ButtonA => state.button_a,
        ControllerButton::ButtonB => state.button_b,
        ControllerButton::ButtonX => state.button_x,
        ControllerButton::ButtonY => state.button_y,
        ControllerButton::ButtonUp => state.button_up,
        ControllerButton::ButtonDown => state.button_down,
        ControllerButton::ButtonLeft => state.button_left,
        ControllerButton::ButtonRight => state.button_right,
        ControllerButton::ButtonL1 => state.button_l1,
        ControllerButton::ButtonL2 => state.button_l2,
        ControllerButton::ButtonR1 => state.button_r1,
        ControllerButton::ButtonR2 => state.button_r2,
    }
}

fn get_state(controller: &Controller) -> ControllerState {
    controller.state().unwrap_or_else(|e| {
        warn!("Controller State Error: {}", e);
        ControllerState::default()
    })
}
