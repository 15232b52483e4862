//! The cooperative control loop for the autonomous period.
//!
//! One task, one fixed-period loop: read the sensors into a snapshot, step
//! the phase state machine, write the actuators, sleep. The only awaits are
//! the inter-tick sleeps, so the run can be cancelled at every tick
//! boundary; a drop guard makes sure cancellation leaves the drive and the
//! intake at zero.

use std::time::Duration;

use log::info;
use vexide::time::{sleep, user_uptime};

use crate::{
    auton::phase::{Command, ControlTick, PhaseController, CRUISE_POWER},
    peripherals::{actuators::Actuators, sensors::Sensors},
};

/// Nominal loop period. Best effort, not hard real-time; all timing
/// decisions in the state machine use monotonic elapsed time instead of
/// counting ticks.
const TICK: Duration = Duration::from_millis(10);
/// Settling delay at run start, rolled through at cruise power.
const WARMUP: Duration = Duration::from_millis(500);

/// Stops everything when the run future is dropped, which is how the
/// competition switch cancels autonomous.
struct Halt<A: Actuators>(A);

impl<A: Actuators> Drop for Halt<A> {
    fn drop(&mut self) {
        self.0.drive(0, 0);
        self.0.intake(0);
    }
}

/// Runs the retrieval routine until the future is cancelled.
///
/// Sensor reads happen before any actuator write in a tick, so each tick
/// works from a consistent snapshot.
///
/// # Example
///
/// ```ignore
/// use argos::auton::runner;
///
/// async fn autonomous(robot: &mut Robot) {
///     runner::run(&mut robot.sensors, &robot.actuators.clone()).await;
/// }
/// ```
pub async fn run<S: Sensors, A: Actuators + Clone>(sensors: &mut S, actuators: &A) {
    info!("Autonomous Run Started");
    let _halt = Halt(actuators.clone());
    let start = user_uptime();

    let mut control = PhaseController::new();
    control.engage(Duration::ZERO);

    // Roll forward while the sensors settle.
    actuators.drive(CRUISE_POWER, CRUISE_POWER);
    sleep(WARMUP).await;

    loop {
        let tick = ControlTick {
            line:     sensors.line(),
            heading:  sensors.heading(),
            distance: sensors.distance(),
            elapsed:  user_uptime() - start,
        };
        apply(actuators, control.step(&tick));
        sleep(TICK).await;
    }
}

/// Writes a tick's command out. Unset outputs are left alone, which gives
/// the motors last-write-wins hold behavior.
fn apply<A: Actuators>(actuators: &A, command: Command) {
    if let Some((left, right)) = command.drive {
        actuators.drive(left, right);
    }
    if let Some(velocity) = command.intake {
        actuators.intake(velocity);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[derive(Clone, Default)]
    struct Recorder {
        drives:  Rc<RefCell<Vec<(i32, i32)>>>,
        intakes: Rc<RefCell<Vec<i32>>>,
    }

    impl Actuators for Recorder {
        fn drive(&self, left: i32, right: i32) { self.drives.borrow_mut().push((left, right)); }

        fn intake(&self, velocity: i32) { self.intakes.borrow_mut().push(velocity); }
    }

    #[test]
    fn halt_guard_zeroes_everything() {
        let recorder = Recorder::default();
        {
            let _halt = Halt(recorder.clone());
        }
        assert_eq!(*recorder.drives.borrow(), vec![(0, 0)]);
        assert_eq!(*recorder.intakes.borrow(), vec![0]);
    }

    #[test]
    fn apply_skips_unset_outputs() {
        let recorder = Recorder::default();
        apply(
            &recorder,
            Command {
                drive:  Some((80, 80)),
                intake: None,
            },
        );
        apply(&recorder, Command::default());
        assert_eq!(*recorder.drives.borrow(), vec![(80, 80)]);
        assert!(recorder.intakes.borrow().is_empty());
    }
}
