//! Edge case and boundary condition tests for the turntable controller

use rs_turntable::{
    hal::{MockIndicator, MockIo, MockRemote},
    Command, CommandOutcome, ElevationStatus, OutputLine, PwmChannel, SensorLine, SystemState,
    TurntableController,
};

type Controller = TurntableController<MockIo, MockRemote, MockIndicator>;

fn homed_controller() -> Controller {
    let mut io = MockIo::new();
    io.set_sensor(SensorLine::BottomEndstop, true);
    io.set_sensor(SensorLine::RightEndstop, true);

    let mut controller =
        TurntableController::new(Default::default(), io, MockRemote::new(), MockIndicator::new());
    controller.reset_mechanisms().unwrap();
    controller
}

// ============================================================================
// Two-Phase Rotation Wait
// ============================================================================

#[test]
fn stale_asserted_sensor_must_clear_before_arrival_counts() {
    let mut controller = homed_controller();

    // The right endstop stays asserted for three samples after the motor
    // starts. The wait must not treat that stale assert as arrival: it
    // has to observe the clear first, then a fresh assert.
    controller.io_mut().script_sensor(
        SensorLine::RightEndstop,
        &[true, true, true, false, false, true],
    );

    let outcome = controller.dispatch(Command::RotateCw).unwrap();

    assert_eq!(outcome, CommandOutcome::Completed);
    assert_eq!(
        controller.io().writes_to(OutputLine::RotateCw),
        [true, false]
    );
}

#[test]
fn rotation_terminates_on_either_endstop() {
    // The two rotation sensors are one ORed at-limit condition; arrival
    // on the right endstop terminates a rotation just as the left does.
    let mut controller = homed_controller();
    controller
        .io_mut()
        .script_sensor(SensorLine::RightEndstop, &[true, false, false, true]);

    let outcome = controller.dispatch(Command::RotateCcw).unwrap();

    assert_eq!(outcome, CommandOutcome::Completed);
    assert_eq!(
        controller.io().writes_to(OutputLine::RotateCcw),
        [true, false]
    );
}

// ============================================================================
// Elevation No-Op Paths
// ============================================================================

#[test]
fn elevate_down_when_already_lowered_is_noop() {
    let mut controller = homed_controller();
    let writes_before = controller.io().writes.len();

    let outcome = controller.dispatch(Command::ElevateDown).unwrap();

    assert_eq!(outcome, CommandOutcome::Completed);
    assert_eq!(controller.io().writes.len(), writes_before);
    assert_eq!(controller.elevation_status(), ElevationStatus::Lowered);
}

#[test]
fn estop_mid_elevation_leaves_status_untouched() {
    let mut controller = homed_controller();
    controller
        .io_mut()
        .set_sensor(SensorLine::BottomEndstop, false);
    controller.remote_mut().queue_command(Command::EmergencyStop);

    let outcome = controller.dispatch(Command::ElevateUp).unwrap();

    assert_eq!(outcome, CommandOutcome::Halted);
    // The primitive never completed, so the dispatcher never marked the
    // platform raised.
    assert_eq!(controller.elevation_status(), ElevationStatus::Lowered);
}

// ============================================================================
// Homing Idempotence
// ============================================================================

#[test]
fn homing_twice_makes_no_further_output_writes() {
    let mut controller = homed_controller();
    let writes_before = controller.io().writes.len();
    let toggles_before = controller.indicator().toggle_count;

    let outcome = controller.reset_mechanisms().unwrap();

    assert_eq!(outcome, CommandOutcome::Completed);
    // Both axes take their no-op paths; only the duties are re-asserted.
    assert_eq!(controller.io().writes.len(), writes_before);
    assert_eq!(controller.io().duty(PwmChannel::Rotation), 100);
    assert_eq!(controller.io().duty(PwmChannel::Elevation), 100);
    assert_eq!(controller.indicator().toggle_count, toggles_before + 1);
    assert_eq!(controller.elevation_status(), ElevationStatus::Lowered);
}

#[test]
fn reset_forces_lowered_from_raised() {
    let mut controller = homed_controller();

    // Raise the platform.
    controller
        .io_mut()
        .set_sensor(SensorLine::BottomEndstop, false);
    controller
        .io_mut()
        .script_sensor(SensorLine::TopEndstop, &[false, false, true]);
    controller.dispatch(Command::ElevateUp).unwrap();
    assert_eq!(controller.elevation_status(), ElevationStatus::Raised);

    // Reset lowers it regardless; rotation is already at a limit and is
    // skipped.
    controller
        .io_mut()
        .script_sensor(SensorLine::BottomEndstop, &[false, false, true]);
    let outcome = controller.dispatch(Command::Reset).unwrap();

    assert_eq!(outcome, CommandOutcome::Completed);
    assert_eq!(controller.elevation_status(), ElevationStatus::Lowered);
    assert_eq!(
        controller.io().writes_to(OutputLine::ElevateDown),
        [true, false]
    );
    controller.io().assert_mutual_exclusion();
}

// ============================================================================
// Emergency Stop Edges
// ============================================================================

#[test]
fn estop_on_first_poll_of_rotation_departure() {
    let mut controller = homed_controller();
    controller.remote_mut().queue_command(Command::EmergencyStop);

    let outcome = controller.dispatch(Command::RotateCw).unwrap();

    assert_eq!(outcome, CommandOutcome::Halted);
    // The CW line did go HIGH before the e-stop landed; the halt drove
    // it LOW again along with everything else.
    assert_eq!(
        controller.io().writes_to(OutputLine::RotateCw),
        [true, false]
    );
    assert!(!controller.io().any_output_high());
    assert_eq!(controller.state(), SystemState::Halted);
}

#[test]
fn estop_as_direct_command() {
    let mut controller = homed_controller();

    let outcome = controller.dispatch(Command::EmergencyStop).unwrap();

    assert_eq!(outcome, CommandOutcome::Halted);
    assert!(controller.is_halted());
    assert!(!controller.io().any_output_high());
    assert_eq!(controller.io().duty(PwmChannel::Rotation), 0);
    assert_eq!(controller.io().duty(PwmChannel::Elevation), 0);
}

#[test]
fn estop_during_homing_descent() {
    // Platform mid-air; the descent wait never sees the bottom endstop
    // before the e-stop lands.
    let mut remote = MockRemote::new();
    remote.queue_silence(1);
    remote.queue_command(Command::EmergencyStop);

    let mut controller =
        TurntableController::new(Default::default(), MockIo::new(), remote, MockIndicator::new());
    let outcome = controller.reset_mechanisms().unwrap();

    assert_eq!(outcome, CommandOutcome::Halted);
    assert!(controller.is_halted());
    assert!(!controller.io().any_output_high());
    // Halt never toggles the completion indicator.
    assert_eq!(controller.indicator().toggle_count, 0);
}

// ============================================================================
// Non-E-Stop Commands During Motion
// ============================================================================

#[test]
fn commands_arriving_mid_motion_are_discarded() {
    let mut controller = homed_controller();
    controller
        .io_mut()
        .set_sensor(SensorLine::BottomEndstop, false);
    controller
        .io_mut()
        .script_sensor(SensorLine::TopEndstop, &[false, false, true]);
    // A rotate request arrives while the platform is mid-raise. It is
    // consumed by the supervision poll and never dispatched.
    controller.remote_mut().queue_command(Command::RotateCw);

    let outcome = controller.dispatch(Command::ElevateUp).unwrap();

    assert_eq!(outcome, CommandOutcome::Completed);
    assert!(controller.remote_mut().is_exhausted());
    assert!(controller.io().writes_to(OutputLine::RotateCw).is_empty());
    assert!(controller.io().writes_to(OutputLine::RotateCcw).is_empty());
}

// ============================================================================
// Snapshot
// ============================================================================

#[test]
fn snapshot_reflects_state_and_elevation() {
    let mut controller = homed_controller();
    let snap = controller.snapshot();
    assert_eq!(snap.state, SystemState::Idle);
    assert_eq!(snap.elevation, ElevationStatus::Lowered);

    controller.dispatch(Command::EmergencyStop).unwrap();
    let snap = controller.snapshot();
    assert_eq!(snap.state, SystemState::Halted);
}
