//! Sensor reads for the control loop.
//!
//! Three synchronous reads, taken once per tick: line reflectivity, heading,
//! and distance. Every read is fallible on real hardware (unplugged cable,
//! calibrating IMU), so each returns an `Option`: `None` means "no reading
//! this tick" and the control loop holds its last decision instead of
//! acting on garbage.

use log::warn;
use vexide::prelude::{AdiAnalogIn, DistanceSensor, InertialSensor};

/// Distance reported when the sensor sees nothing in front of it.
///
/// Far past every threshold the routine compares against, so "no object"
/// reads as "nothing nearby" rather than as a failed sensor.
pub const NO_OBJECT_MM: i32 = 9999;

/// Per-tick sensor reads for the autonomous routine.
pub trait Sensors {
    /// Line tracker reflectivity. Lower means the guide line is under the
    /// sensor. `None` if the read failed.
    fn line(&mut self) -> Option<i32>;

    /// Heading in degrees, normalized into `[0, 360)`. `None` while the
    /// IMU is calibrating or if the read failed.
    fn heading(&mut self) -> Option<f64>;

    /// Distance to the nearest object in millimeters, larger is farther.
    /// [`NO_OBJECT_MM`] when nothing is in view, `None` if the read failed.
    fn distance(&mut self) -> Option<i32>;
}

/// The competition sensor set: ADI line tracker, inertial sensor, and
/// distance sensor.
pub struct V5Sensors {
    pub line_tracker: AdiAnalogIn,
    pub imu:          InertialSensor,
    pub range:        DistanceSensor,
}

impl Sensors for V5Sensors {
    fn line(&mut self) -> Option<i32> {
        match self.line_tracker.value() {
            Ok(value) => Some(i32::from(value)),
            Err(e) => {
                warn!("Line Tracker Error: {}", e);
                None
            }
        }
    }

    fn heading(&mut self) -> Option<f64> {
        let calibrating = self.imu.is_calibrating().unwrap_or_else(|e| {
            warn!("IMU Calibration State Error: {}", e);
            true
        });
        if calibrating {
            return None;
        }
        match self.imu.euler() {
            Ok(angles) => Some(wrap_heading(angles.b.as_degrees())),
            Err(e) => {
                warn!("IMU Error: {}", e);
                None
            }
        }
    }

    fn distance(&mut self) -> Option<i32> {
        match self.range.object() {
            Ok(Some(object)) => Some(object.distance as i32),
            Ok(None) => Some(NO_OBJECT_MM),
            Err(e) => {
                warn!("Distance Sensor Error: {}", e);
                None
            }
        }
    }
}

/// Folds an angle in degrees into `[0, 360)`.
///
/// The IMU reports Euler angles in `(-180, 180]`; every heading comparison
/// in the routine is written against compass-style degrees, so the
/// wraparound at 0/360 has to be folded here, once, and nowhere else.
pub fn wrap_heading(degrees: f64) -> f64 { degrees.rem_euclid(360.0) }
