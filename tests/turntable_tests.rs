//! Integration tests for the turntable controller

use rs_turntable::{
    hal::{MockIndicator, MockIo, MockRemote},
    Command, CommandOutcome, DigitalIo, ElevationStatus, RejectReason, SensorLine,
    TurntableController,
};

type Controller = TurntableController<MockIo, MockRemote, MockIndicator>;

/// A controller homed to the canonical state: platform lowered on the
/// bottom endstop, resting against the right rotation endstop.
fn homed_controller() -> Controller {
    let mut io = MockIo::new();
    io.set_sensor(SensorLine::BottomEndstop, true);
    io.set_sensor(SensorLine::RightEndstop, true);

    let mut controller =
        TurntableController::new(Default::default(), io, MockRemote::new(), MockIndicator::new());
    assert_eq!(
        controller.reset_mechanisms().unwrap(),
        CommandOutcome::Completed
    );
    controller
}

/// Script a clockwise rotation away from the right endstop: right clears
/// after one sample, then the left endstop asserts.
fn script_rotation_from_right(io: &mut MockIo) {
    io.script_sensor(SensorLine::RightEndstop, &[true, false, false]);
    io.script_sensor(SensorLine::LeftEndstop, &[false, false, false, true]);
}

#[test]
fn homing_reaches_known_state() {
    // Unknown start: platform mid-air, not at any rotation limit.
    let mut io = MockIo::new();
    io.script_sensor(SensorLine::BottomEndstop, &[false, false, true]);
    io.script_sensor(SensorLine::LeftEndstop, &[false, false]);
    io.script_sensor(SensorLine::RightEndstop, &[false, true]);

    let mut controller =
        TurntableController::new(Default::default(), io, MockRemote::new(), MockIndicator::new());
    let outcome = controller.reset_mechanisms().unwrap();

    assert_eq!(outcome, CommandOutcome::Completed);
    assert_eq!(controller.elevation_status(), ElevationStatus::Lowered);
    // Rotation axis reads at the forward limit.
    assert!(controller
        .io_mut()
        .read_sensor(SensorLine::RightEndstop)
        .unwrap());
    assert!(!controller.io().any_output_high());
    assert_eq!(controller.indicator().toggle_count, 1);
}

#[test]
fn homing_sets_configured_duties() {
    let controller = homed_controller();
    assert_eq!(controller.io().duty(rs_turntable::PwmChannel::Rotation), 100);
    assert_eq!(
        controller.io().duty(rs_turntable::PwmChannel::Elevation),
        100
    );
}

#[test]
fn rotation_completes_at_opposite_limit() {
    let mut controller = homed_controller();
    script_rotation_from_right(controller.io_mut());

    let outcome = controller.dispatch(Command::RotateCw).unwrap();

    assert_eq!(outcome, CommandOutcome::Completed);
    // Exactly one HIGH then LOW on the selected line, nothing on the other.
    assert_eq!(
        controller
            .io()
            .writes_to(rs_turntable::OutputLine::RotateCw),
        [true, false]
    );
    assert!(controller
        .io()
        .writes_to(rs_turntable::OutputLine::RotateCcw)
        .is_empty());
    controller.io().assert_mutual_exclusion();
}

#[test]
fn rotation_refused_while_raised() {
    let mut controller = homed_controller();

    // Raise the platform.
    controller
        .io_mut()
        .set_sensor(SensorLine::BottomEndstop, false);
    controller
        .io_mut()
        .script_sensor(SensorLine::TopEndstop, &[false, false, true]);
    assert_eq!(
        controller.dispatch(Command::ElevateUp).unwrap(),
        CommandOutcome::Completed
    );
    assert_eq!(controller.elevation_status(), ElevationStatus::Raised);

    let writes_before = controller.io().writes.len();
    let outcome = controller.dispatch(Command::RotateCw).unwrap();

    assert_eq!(outcome, CommandOutcome::Refused(RejectReason::Elevated));
    // Interlock: no output-line changes at all.
    assert_eq!(controller.io().writes.len(), writes_before);
}

#[test]
fn elevate_up_twice_is_idempotent() {
    let mut controller = homed_controller();
    controller
        .io_mut()
        .set_sensor(SensorLine::BottomEndstop, false);
    controller
        .io_mut()
        .script_sensor(SensorLine::TopEndstop, &[false, false, true]);

    assert_eq!(
        controller.dispatch(Command::ElevateUp).unwrap(),
        CommandOutcome::Completed
    );
    let writes_before = controller.io().writes.len();

    // Second request: top endstop already asserted, no output changes.
    assert_eq!(
        controller.dispatch(Command::ElevateUp).unwrap(),
        CommandOutcome::Completed
    );
    assert_eq!(controller.io().writes.len(), writes_before);
    assert_eq!(controller.elevation_status(), ElevationStatus::Raised);
}

#[test]
fn estop_during_wait_halts_everything() {
    let mut controller = homed_controller();
    controller
        .io_mut()
        .set_sensor(SensorLine::BottomEndstop, false);
    // Top endstop never asserts; the e-stop lands on the third poll of
    // the wait loop.
    controller.remote_mut().queue_silence(2);
    controller.remote_mut().queue_command(Command::EmergencyStop);

    let outcome = controller.dispatch(Command::ElevateUp).unwrap();

    assert_eq!(outcome, CommandOutcome::Halted);
    assert!(controller.is_halted());
    assert!(!controller.io().any_output_high());
    assert_eq!(controller.io().duty(rs_turntable::PwmChannel::Rotation), 0);
    assert_eq!(controller.io().duty(rs_turntable::PwmChannel::Elevation), 0);
    // Status untouched: the primitive never completed.
    assert_eq!(controller.elevation_status(), ElevationStatus::Lowered);

    // Terminal: every subsequent command refused with no output changes.
    let writes_before = controller.io().writes.len();
    for command in [
        Command::RotateCw,
        Command::RotateCcw,
        Command::ElevateUp,
        Command::ElevateDown,
        Command::Reset,
        Command::EmergencyStop,
    ] {
        assert_eq!(
            controller.dispatch(command).unwrap(),
            CommandOutcome::Refused(RejectReason::Halted)
        );
    }
    assert_eq!(controller.io().writes.len(), writes_before);
}

#[test]
fn mutual_exclusion_across_command_sequence() {
    let mut controller = homed_controller();

    controller
        .io_mut()
        .set_sensor(SensorLine::BottomEndstop, false);
    controller
        .io_mut()
        .script_sensor(SensorLine::TopEndstop, &[false, false, true]);
    controller.dispatch(Command::ElevateUp).unwrap();

    controller
        .io_mut()
        .set_sensor(SensorLine::TopEndstop, false);
    controller
        .io_mut()
        .script_sensor(SensorLine::BottomEndstop, &[false, true]);
    controller.dispatch(Command::ElevateDown).unwrap();

    script_rotation_from_right(controller.io_mut());
    controller.dispatch(Command::RotateCw).unwrap();

    // At most one of a given axis's direction outputs HIGH at any
    // sampled instant.
    controller.io().assert_mutual_exclusion();
}

#[test]
fn round_trip_scenario() {
    // Unknown start.
    let mut io = MockIo::new();
    io.script_sensor(SensorLine::BottomEndstop, &[false, false, true]);
    io.script_sensor(SensorLine::LeftEndstop, &[false, false]);
    io.script_sensor(SensorLine::RightEndstop, &[false, true]);
    let mut controller =
        TurntableController::new(Default::default(), io, MockRemote::new(), MockIndicator::new());

    // Home.
    assert_eq!(
        controller.reset_mechanisms().unwrap(),
        CommandOutcome::Completed
    );
    assert_eq!(controller.elevation_status(), ElevationStatus::Lowered);

    // Raise.
    controller
        .io_mut()
        .set_sensor(SensorLine::BottomEndstop, false);
    controller
        .io_mut()
        .script_sensor(SensorLine::TopEndstop, &[false, false, true]);
    assert_eq!(
        controller.dispatch(Command::ElevateUp).unwrap(),
        CommandOutcome::Completed
    );
    assert_eq!(controller.elevation_status(), ElevationStatus::Raised);

    // Rotate while raised: must no-op, outputs unchanged.
    let writes_before = controller.io().writes.len();
    assert_eq!(
        controller.dispatch(Command::RotateCw).unwrap(),
        CommandOutcome::Refused(RejectReason::Elevated)
    );
    assert_eq!(controller.io().writes.len(), writes_before);

    // Lower.
    controller
        .io_mut()
        .set_sensor(SensorLine::TopEndstop, false);
    controller
        .io_mut()
        .script_sensor(SensorLine::BottomEndstop, &[false, true]);
    assert_eq!(
        controller.dispatch(Command::ElevateDown).unwrap(),
        CommandOutcome::Completed
    );
    assert_eq!(controller.elevation_status(), ElevationStatus::Lowered);

    // Rotation now succeeds: CW output HIGH then LOW, terminal sensor
    // asserted. Homing already pulsed the CW line once, so only the
    // writes from this dispatch count.
    let writes_before = controller.io().writes.len();
    script_rotation_from_right(controller.io_mut());
    assert_eq!(
        controller.dispatch(Command::RotateCw).unwrap(),
        CommandOutcome::Completed
    );
    assert_eq!(
        &controller.io().writes[writes_before..],
        &[
            (rs_turntable::OutputLine::RotateCw, true),
            (rs_turntable::OutputLine::RotateCw, false),
        ]
    );
    assert!(controller
        .io_mut()
        .read_sensor(SensorLine::LeftEndstop)
        .unwrap());
    controller.io().assert_mutual_exclusion();
}

#[test]
fn run_loop_exits_only_on_halt() {
    let mut io = MockIo::new();
    io.set_sensor(SensorLine::BottomEndstop, true);
    io.set_sensor(SensorLine::RightEndstop, true);
    // Top endstop held asserted so the elevate command no-ops without
    // consuming the queued e-stop from inside a wait loop.
    io.set_sensor(SensorLine::TopEndstop, true);

    let mut remote = MockRemote::new();
    remote.queue_command(Command::ElevateUp);
    remote.queue_silence(1);
    remote.queue_command(Command::EmergencyStop);

    let mut controller =
        TurntableController::new(Default::default(), io, remote, MockIndicator::new());
    controller.run().unwrap();

    assert!(controller.is_halted());
    assert!(!controller.io().any_output_high());
    // The elevate completed before the halt landed.
    assert_eq!(controller.elevation_status(), ElevationStatus::Raised);
    assert!(controller.remote_mut().is_exhausted());
}
