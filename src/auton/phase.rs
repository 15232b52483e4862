//! Phase state machine for the autonomous retrieval routine.
//!
//! The routine follows a guide line out to the far end of the field, scoops
//! up the game object with the intake, turns around, and drives back toward
//! the starting wall. Each of those maneuvers is a phase of one state
//! machine that is advanced exactly once per control tick.
//!
//! # Architecture
//!
//! [`PhaseController::step`] is a pure transition function: it takes the
//! sensor snapshot for the current tick and returns the next actuator
//! command, mutating only the controller's own phase, timer, and flag
//! fields. Nothing in this module touches hardware, which is what makes the
//! whole routine testable on a desktop.
//!
//! # Usage
//!
//! ```ignore
//! use argos::auton::phase::{ControlTick, PhaseController};
//! use std::time::Duration;
//!
//! let mut control = PhaseController::new();
//! control.engage(Duration::ZERO);
//!
//! // Once per tick:
//! let command = control.step(&ControlTick {
//!     line:     Some(1200),
//!     heading:  Some(12.5),
//!     distance: Some(1400),
//!     elapsed:  Duration::from_millis(350),
//! });
//! ```

use std::time::Duration;

use log::info;

/// Drive power for both sides while tracking the line or chasing the object.
pub const CRUISE_POWER: i32 = 80;
/// Drive power for the inside/outside wheels while pivoting in place.
pub const TURN_POWER: i32 = 20;
/// Line tracker readings below this mean the line is under the sensor.
pub const LINE_THRESHOLD: i32 = 2750;
/// How long the robot must have been running before a close distance
/// reading is trusted to be the object and not a leg of the goal.
pub const MIN_ENGAGE: Duration = Duration::from_millis(20_000);
/// Distance readings under this arm the capture chase.
pub const FAR_THRESHOLD_MM: i32 = 200;
/// Distance readings at or under this mean the object is at the intake.
pub const GRASP_THRESHOLD_MM: i32 = 20;
/// Intake velocity while pulling the object in, negative = inward.
pub const INTAKE_CAPTURE_RPM: i32 = -150;
/// Intake velocity that keeps a captured object seated.
pub const INTAKE_HOLD_RPM: i32 = -50;
/// Intake velocity that pushes the object back out at the end of the run.
pub const INTAKE_EJECT_RPM: i32 = 200;
/// Full drive power for the timed run back home.
pub const RETURN_POWER: i32 = 127;
/// Duration of the full-power run back home.
pub const RETURN_DRIVE: Duration = Duration::from_millis(1500);

/// Headings in this band (inclusive) flip the turn bias away from left.
const BIAS_RIGHT_MIN: f64 = 180.0;
const BIAS_RIGHT_MAX: f64 = 325.0;
/// Headings in `[BIAS_LEFT_MIN, BIAS_LEFT_MAX)` flip the turn bias to left.
const BIAS_LEFT_MIN: f64 = 35.0;
const BIAS_LEFT_MAX: f64 = 180.0;
/// Headings in this band (inclusive) count as facing back toward the start.
const HOME_MIN: f64 = 170.0;
const HOME_MAX: f64 = 190.0;

/// One tick's worth of sensor readings.
///
/// Produced once per loop iteration, before any actuator write, so every
/// decision in that tick works from a consistent snapshot. A `None` field
/// means the read failed this tick; the state machine treats it as "no new
/// information" and will not make a threshold decision from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlTick {
    /// Line tracker reflectivity. Lower is darker.
    pub line:     Option<i32>,
    /// Heading in degrees, normalized into `[0, 360)`.
    pub heading:  Option<f64>,
    /// Distance to the nearest object in millimeters. Larger is farther.
    pub distance: Option<i32>,
    /// Monotonic time since the run started.
    pub elapsed:  Duration,
}

/// Actuator outputs decided for one tick.
///
/// `None` means "leave that actuator on its current command". Writes are
/// last-write-wins at the motors, so holding is just not writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Command {
    /// Left and right drive power, `[-127, 127]`, positive forward.
    pub drive:  Option<(i32, i32)>,
    /// Intake velocity in RPM, negative inward.
    pub intake: Option<i32>,
}

impl Command {
    /// Full stop on every actuator.
    pub const STOP: Command = Command {
        drive:  Some((0, 0)),
        intake: Some(0),
    };
}

/// The phases of the retrieval routine.
///
/// Exactly one is active at a time. The pivot and the timed return drive
/// are their own phases rather than inner loops so that the tick boundary
/// stays uniform and the run can be cancelled between any two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not running; everything commanded to a stop.
    Idle,
    /// Following the guide line toward the far zone.
    LineFollow,
    /// Chasing the object with the intake running. `grasped` latches once
    /// the object has closed to the intake; the chase ends when the
    /// distance reading climbs back out past it.
    Capture { grasped: bool },
    /// Object captured: drive stopped, intake holding it seated.
    Secure,
    /// Pivoting in place until the heading faces back toward the start.
    TurnAround,
    /// Timed full-power drive back toward the start.
    ReturnDrive,
    /// Terminal: drive left on its last command, intake expelling.
    Home,
}

/// The autonomous phase controller.
///
/// Owns every piece of autonomous-mode state: the active phase, the turn
/// bias, the reversed latch, and the phase timer. Construct one per run and
/// drop it when the run ends; nothing persists across runs.
pub struct PhaseController {
    /// The currently active phase.
    pub phase:     Phase,
    /// Preferred pivot direction when the line is momentarily lost.
    pub turn_left: bool,
    /// Latched once the turn-around maneuver has run.
    pub reversed:  bool,
    /// `elapsed` value at which the active phase was entered.
    phase_entered: Duration,
}

impl PhaseController {
    /// Creates a controller in [`Phase::Idle`] with a leftward turn bias.
    pub fn new() -> Self {
        PhaseController {
            phase:         Phase::Idle,
            turn_left:     true,
            reversed:      false,
            phase_entered: Duration::ZERO,
        }
    }

    /// Starts the routine. Does nothing unless the controller is idle.
    pub fn engage(&mut self, now: Duration) {
        if self.phase == Phase::Idle {
            self.goto(Phase::LineFollow, now);
        }
    }

    /// Advances the state machine by one tick and returns the actuator
    /// command for it.
    ///
    /// At most one phase transition happens per call. Readings that are
    /// `None` never trigger a transition; the current phase's command is
    /// held instead.
    pub fn step(&mut self, tick: &ControlTick) -> Command {
        match self.phase {
            Phase::Idle => Command::STOP,
            Phase::LineFollow => self.line_follow(tick),
            Phase::Capture { grasped } => self.capture(tick, grasped),
            Phase::Secure => self.secure(tick),
            Phase::TurnAround => self.turn_around(tick),
            Phase::ReturnDrive => self.return_drive(tick),
            Phase::Home => Command {
                drive:  None,
                intake: Some(INTAKE_EJECT_RPM),
            },
        }
    }

    fn line_follow(&mut self, tick: &ControlTick) -> Command {
        if let Some(heading) = tick.heading {
            self.update_bias(heading);
        }

        if let Some(distance) = tick.distance {
            // Object already at the intake: no chase needed, go straight to
            // the turn-around.
            if distance < GRASP_THRESHOLD_MM && !self.reversed {
                self.goto(Phase::TurnAround, tick.elapsed);
                return pivot();
            }
            if self.in_phase(tick.elapsed) >= MIN_ENGAGE && distance < FAR_THRESHOLD_MM {
                self.goto(Phase::Capture { grasped: false }, tick.elapsed);
                return Command {
                    drive:  Some((CRUISE_POWER, CRUISE_POWER)),
                    intake: Some(INTAKE_CAPTURE_RPM),
                };
            }
        }

        match tick.line {
            Some(line) if line < LINE_THRESHOLD => Command {
                drive:  Some((CRUISE_POWER, CRUISE_POWER)),
                intake: None,
            },
            Some(_) => {
                let sides = if self.turn_left {
                    (TURN_POWER, -TURN_POWER)
                } else {
                    (-TURN_POWER, TURN_POWER)
                };
                Command {
                    drive:  Some(sides),
                    intake: None,
                }
            }
            // Stale line reading: hold the current drive command.
            None => Command::default(),
        }
    }

    fn capture(&mut self, tick: &ControlTick, grasped: bool) -> Command {
        if let Some(distance) = tick.distance {
            if !grasped && distance <= GRASP_THRESHOLD_MM {
                // Object reached the intake; not a phase change, the chase
                // keeps running until it is swallowed past the sensor.
                self.phase = Phase::Capture { grasped: true };
            } else if grasped && distance > GRASP_THRESHOLD_MM {
                self.goto(Phase::Secure, tick.elapsed);
                return Command {
                    drive:  Some((0, 0)),
                    intake: Some(INTAKE_HOLD_RPM),
                };
            }
        }
        Command {
            drive:  Some((CRUISE_POWER, CRUISE_POWER)),
            intake: Some(INTAKE_CAPTURE_RPM),
        }
    }

    fn secure(&mut self, tick: &ControlTick) -> Command {
        if let Some(distance) = tick.distance {
            if distance < GRASP_THRESHOLD_MM && !self.reversed {
                self.goto(Phase::TurnAround, tick.elapsed);
                return pivot();
            }
        }
        Command {
            drive:  Some((0, 0)),
            intake: Some(INTAKE_HOLD_RPM),
        }
    }

    fn turn_around(&mut self, tick: &ControlTick) -> Command {
        if let Some(heading) = tick.heading {
            if (HOME_MIN..=HOME_MAX).contains(&heading) {
                self.reversed = true;
                self.goto(Phase::ReturnDrive, tick.elapsed);
                return Command {
                    drive:  Some((RETURN_POWER, RETURN_POWER)),
                    intake: Some(0),
                };
            }
        }
        pivot()
    }

    fn return_drive(&mut self, tick: &ControlTick) -> Command {
        if self.in_phase(tick.elapsed) >= RETURN_DRIVE {
            self.goto(Phase::Home, tick.elapsed);
            return Command {
                drive:  None,
                intake: Some(INTAKE_EJECT_RPM),
            };
        }
        Command {
            drive:  Some((RETURN_POWER, RETURN_POWER)),
            intake: Some(0),
        }
    }

    /// Remembers which way to swing when the line drops out. The two bands
    /// leave a gap around 0 degrees so the bias does not flap while the
    /// robot is pointed up-field.
    fn update_bias(&mut self, heading: f64) {
        if (BIAS_RIGHT_MIN..=BIAS_RIGHT_MAX).contains(&heading) {
            self.turn_left = false;
        } else if (BIAS_LEFT_MIN..BIAS_LEFT_MAX).contains(&heading) {
            self.turn_left = true;
        }
    }

    fn in_phase(&self, now: Duration) -> Duration { now.saturating_sub(self.phase_entered) }

    fn goto(&mut self, next: Phase, now: Duration) {
        info!("phase change: {:?} -> {:?}", self.phase, next);
        self.phase = next;
        self.phase_entered = now;
    }
}

impl Default for PhaseController {
    fn default() -> Self { PhaseController::new() }
}

/// The in-place pivot used to swing the robot around toward home. Left
/// side forward, right side back.
fn pivot() -> Command {
    Command {
        drive:  Some((TURN_POWER, -TURN_POWER)),
        intake: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(line: i32, heading: f64, distance: i32, ms: u64) -> ControlTick {
        ControlTick {
            line:     Some(line),
            heading:  Some(heading),
            distance: Some(distance),
            elapsed:  Duration::from_millis(ms),
        }
    }

    /// A controller already running, as it is after `engage`.
    fn running() -> PhaseController {
        let mut control = PhaseController::new();
        control.engage(Duration::ZERO);
        control
    }

    /// A controller that has finished the capture chase.
    fn secured(ms: u64) -> PhaseController {
        let mut control = running();
        control.step(&snap(1000, 10.0, 150, 25_000));
        control.step(&snap(1000, 10.0, 18, ms - 20));
        control.step(&snap(1000, 10.0, 30, ms));
        assert_eq!(control.phase, Phase::Secure);
        control
    }

    #[test]
    fn idle_commands_full_stop() {
        let mut control = PhaseController::new();
        assert_eq!(control.step(&snap(1000, 0.0, 1500, 0)), Command::STOP);
        assert_eq!(control.phase, Phase::Idle);
    }

    #[test]
    fn engage_enters_line_follow_once() {
        let mut control = PhaseController::new();
        control.engage(Duration::ZERO);
        assert_eq!(control.phase, Phase::LineFollow);
        // A second engage mid-run must not reset the routine.
        control.step(&snap(1000, 10.0, 150, 25_000));
        control.engage(Duration::from_millis(25_010));
        assert_eq!(control.phase, Phase::Capture { grasped: false });
    }

    #[test]
    fn drives_straight_while_line_under_sensor() {
        let mut control = running();
        for ms in (0..100).step_by(10) {
            let command = control.step(&snap(1200, 10.0, 1500, ms));
            assert_eq!(command.drive, Some((CRUISE_POWER, CRUISE_POWER)));
            assert_eq!(command.intake, None);
        }
    }

    #[test]
    fn pivots_left_when_line_lost() {
        let mut control = running();
        let command = control.step(&snap(3000, 10.0, 1500, 100));
        assert_eq!(command.drive, Some((TURN_POWER, -TURN_POWER)));
    }

    #[test]
    fn bias_flips_within_the_same_tick() {
        // Heading 200 is in the rightward band, so even the first pivot
        // after losing the line must already be mirrored.
        let mut control = running();
        for ms in (0..100).step_by(10) {
            let command = control.step(&snap(3000, 200.0, 1500, ms));
            assert!(!control.turn_left);
            assert_eq!(command.drive, Some((-TURN_POWER, TURN_POWER)));
        }
    }

    #[test]
    fn bias_band_edges() {
        let cases = [
            (180.0, Some(false)),
            (325.0, Some(false)),
            (200.0, Some(false)),
            (35.0, Some(true)),
            (179.9, Some(true)),
            (90.0, Some(true)),
            (34.9, None),
            (325.1, None),
            (0.0, None),
            (359.9, None),
        ];
        for (heading, expected) in cases {
            for initial in [true, false] {
                let mut control = running();
                control.turn_left = initial;
                control.step(&snap(1000, heading, 1500, 0));
                let want = expected.unwrap_or(initial);
                assert_eq!(control.turn_left, want, "heading {heading}, initial {initial}");
            }
        }
    }

    #[test]
    fn bias_updates_even_while_line_is_found() {
        let mut control = running();
        control.step(&snap(1000, 200.0, 1500, 0));
        assert!(!control.turn_left);
    }

    #[test]
    fn gate_needs_both_time_and_range() {
        let mut control = running();
        control.step(&snap(1000, 10.0, 199, 19_999));
        assert_eq!(control.phase, Phase::LineFollow);
        control.step(&snap(1000, 10.0, 200, 20_000));
        assert_eq!(control.phase, Phase::LineFollow);
        let command = control.step(&snap(1000, 10.0, 199, 20_000));
        assert_eq!(control.phase, Phase::Capture { grasped: false });
        assert_eq!(command.drive, Some((CRUISE_POWER, CRUISE_POWER)));
        assert_eq!(command.intake, Some(INTAKE_CAPTURE_RPM));
    }

    #[test]
    fn capture_chases_until_object_swallowed() {
        let mut control = running();
        control.step(&snap(1000, 10.0, 150, 25_000));

        // Still closing in: reading above the grasp threshold, no exit.
        let command = control.step(&snap(1000, 10.0, 60, 25_010));
        assert_eq!(control.phase, Phase::Capture { grasped: false });
        assert_eq!(command.intake, Some(INTAKE_CAPTURE_RPM));

        // Object at the intake: latch, keep chasing.
        let command = control.step(&snap(1000, 10.0, 20, 25_020));
        assert_eq!(control.phase, Phase::Capture { grasped: true });
        assert_eq!(command.drive, Some((CRUISE_POWER, CRUISE_POWER)));

        // Swallowed past the sensor: stop and hold.
        let command = control.step(&snap(1000, 10.0, 21, 25_030));
        assert_eq!(control.phase, Phase::Secure);
        assert_eq!(command.drive, Some((0, 0)));
        assert_eq!(command.intake, Some(INTAKE_HOLD_RPM));
    }

    #[test]
    fn capture_does_not_exit_before_the_object_arrives() {
        let mut control = running();
        control.step(&snap(1000, 10.0, 150, 25_000));
        for ms in (25_010..26_000).step_by(10) {
            control.step(&snap(1000, 10.0, 80, ms));
            assert_eq!(control.phase, Phase::Capture { grasped: false });
        }
    }

    #[test]
    fn secured_object_triggers_turn_around() {
        let mut control = secured(26_000);
        let command = control.step(&snap(1000, 10.0, 15, 26_010));
        assert_eq!(control.phase, Phase::TurnAround);
        assert_eq!(command.drive, Some((TURN_POWER, -TURN_POWER)));
        // Intake holds its previous command through the pivot.
        assert_eq!(command.intake, None);
    }

    #[test]
    fn close_object_during_line_follow_skips_the_gate() {
        let mut control = running();
        let command = control.step(&snap(1000, 10.0, 15, 25_000));
        assert_eq!(control.phase, Phase::TurnAround);
        assert_eq!(command.drive, Some((TURN_POWER, -TURN_POWER)));
    }

    #[test]
    fn turn_around_pivots_until_home_band() {
        let mut control = secured(26_000);
        control.step(&snap(1000, 10.0, 15, 26_010));

        let mut ms = 26_020;
        for heading in [20.0, 60.0, 120.0, 169.9] {
            let command = control.step(&snap(1000, heading, 15, ms));
            assert_eq!(control.phase, Phase::TurnAround);
            assert_eq!(command.drive, Some((TURN_POWER, -TURN_POWER)));
            ms += 10;
        }

        let command = control.step(&snap(1000, 170.0, 15, ms));
        assert_eq!(control.phase, Phase::ReturnDrive);
        assert!(control.reversed);
        assert_eq!(command.drive, Some((RETURN_POWER, RETURN_POWER)));
        assert_eq!(command.intake, Some(0));
    }

    #[test]
    fn home_band_is_inclusive_on_both_ends() {
        for (heading, turned) in [(169.9, false), (170.0, true), (190.0, true), (190.1, false)] {
            let mut control = secured(26_000);
            control.step(&snap(1000, 10.0, 15, 26_010));
            control.step(&snap(1000, heading, 15, 26_020));
            assert_eq!(control.phase == Phase::ReturnDrive, turned, "heading {heading}");
        }
    }

    #[test]
    fn return_drive_runs_full_power_for_its_duration() {
        let mut control = secured(26_000);
        control.step(&snap(1000, 10.0, 15, 26_010));
        control.step(&snap(1000, 180.0, 15, 26_020));

        for ms in (26_030..27_520).step_by(10) {
            let command = control.step(&snap(1000, 180.0, 15, ms));
            assert_eq!(control.phase, Phase::ReturnDrive, "at {ms}");
            assert_eq!(command.drive, Some((RETURN_POWER, RETURN_POWER)));
        }

        // 1500 ms after entry the intake switches to eject and the drive is
        // left on its last command.
        let command = control.step(&snap(1000, 180.0, 15, 27_520));
        assert_eq!(control.phase, Phase::Home);
        assert_eq!(command.drive, None);
        assert_eq!(command.intake, Some(INTAKE_EJECT_RPM));
    }

    #[test]
    fn reversal_latches_for_the_rest_of_the_run() {
        let mut control = secured(26_000);
        control.step(&snap(1000, 10.0, 15, 26_010));
        control.step(&snap(1000, 180.0, 15, 26_020));
        control.step(&snap(1000, 180.0, 15, 27_530));
        assert_eq!(control.phase, Phase::Home);

        // A close reading after the turn-around must never re-trigger it.
        for ms in (27_540..27_640).step_by(10) {
            let command = control.step(&snap(1000, 10.0, 15, ms));
            assert_eq!(control.phase, Phase::Home);
            assert_eq!(command.intake, Some(INTAKE_EJECT_RPM));
        }
        assert!(control.reversed);
    }

    #[test]
    fn stale_readings_never_make_decisions() {
        // Lost line sensor: hold the drive, stay put.
        let mut control = running();
        let command = control.step(&ControlTick {
            line:     None,
            heading:  Some(10.0),
            distance: Some(1500),
            elapsed:  Duration::from_millis(100),
        });
        assert_eq!(command, Command::default());
        assert_eq!(control.phase, Phase::LineFollow);

        // Lost distance sensor mid-chase: keep chasing.
        let mut control = running();
        control.step(&snap(1000, 10.0, 150, 25_000));
        let command = control.step(&ControlTick {
            line:     Some(1000),
            heading:  Some(10.0),
            distance: None,
            elapsed:  Duration::from_millis(25_010),
        });
        assert_eq!(control.phase, Phase::Capture { grasped: false });
        assert_eq!(command.intake, Some(INTAKE_CAPTURE_RPM));

        // Lost heading mid-pivot: keep pivoting.
        let mut control = secured(26_000);
        control.step(&snap(1000, 10.0, 15, 26_010));
        let command = control.step(&ControlTick {
            line:     Some(1000),
            heading:  None,
            distance: Some(15),
            elapsed:  Duration::from_millis(26_020),
        });
        assert_eq!(control.phase, Phase::TurnAround);
        assert_eq!(command.drive, Some((TURN_POWER, -TURN_POWER)));
    }

    #[test]
    fn full_retrieval_cycle() {
        let mut control = running();
        let mut ms = 0;

        // Out along the line, losing and re-finding it.
        for line in [1000, 1200, 3000, 3100, 900] {
            control.step(&snap(line, 210.0, 1500, ms));
            assert_eq!(control.phase, Phase::LineFollow);
            ms += 10;
        }
        assert!(!control.turn_left);

        // Gate arms late in the run, chase, grasp, swallow.
        control.step(&snap(1000, 210.0, 180, 25_000));
        control.step(&snap(1000, 210.0, 19, 25_010));
        control.step(&snap(1000, 210.0, 40, 25_020));
        assert_eq!(control.phase, Phase::Secure);

        // Held object settles in front of the sensor.
        control.step(&snap(1000, 210.0, 12, 25_030));
        assert_eq!(control.phase, Phase::TurnAround);

        // Pivot around to face home, then drive back and expel.
        control.step(&snap(1000, 250.0, 12, 25_040));
        assert_eq!(control.phase, Phase::TurnAround);
        control.step(&snap(1000, 185.0, 12, 25_050));
        assert_eq!(control.phase, Phase::ReturnDrive);
        control.step(&snap(1000, 185.0, 12, 26_540));
        assert_eq!(control.phase, Phase::ReturnDrive);
        let command = control.step(&snap(1000, 185.0, 12, 26_550));
        assert_eq!(control.phase, Phase::Home);
        assert_eq!(command.intake, Some(INTAKE_EJECT_RPM));
    }
}
