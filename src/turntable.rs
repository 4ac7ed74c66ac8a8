//! Main turntable controller that ties everything together.
//!
//! This module provides [`TurntableController`], the central component
//! that owns the I/O, the remote receiver, and the indicator, and runs
//! the motion state machine.
//!
//! # Overview
//!
//! The controller:
//! - Dispatches decoded remote commands to motion primitives
//! - Terminates every motion on physical limit sensors, never on timing
//! - Polls for an emergency stop inside every blocking wait
//! - Enforces the never-rotate-while-elevated interlock
//! - Homes to the lowered, forward-facing state on request
//!
//! # Control Flow
//!
//! All control is a single cooperative thread. A motion primitive's
//! blocking wait is a tight loop that polls the remote receiver once per
//! iteration; receiving [`Command::EmergencyStop`] there executes the
//! halt procedure - every drive output LOW, both PWM duties zero - and
//! the system enters the terminal [`SystemState::Halted`]. Nothing
//! leaves `Halted` short of a full restart.
//!
//! # Example
//!
//! ```rust
//! use rs_turntable::{
//!     Command, CommandOutcome, SensorLine, TurntableController,
//!     hal::{MockIndicator, MockIo, MockRemote},
//! };
//!
//! let mut io = MockIo::new();
//! io.set_sensor(SensorLine::BottomEndstop, true);
//! io.set_sensor(SensorLine::RightEndstop, true);
//!
//! let mut controller =
//!     TurntableController::new(Default::default(), io, MockRemote::new(), MockIndicator::new());
//! controller.reset_mechanisms().unwrap();
//!
//! // Rotate away from the forward limit: sensors clear, then the far
//! // endstop asserts.
//! controller.io_mut().script_sensor(SensorLine::RightEndstop, &[true, false]);
//! controller.io_mut().script_sensor(SensorLine::LeftEndstop, &[false, false, false, true]);
//! let outcome = controller.dispatch(Command::RotateCcw).unwrap();
//! assert_eq!(outcome, CommandOutcome::Completed);
//! ```

use crate::commands::{Command, CommandOutcome, RejectReason};
use crate::config::TurntableConfig;
use crate::traits::{
    DigitalIo, ElevationDirection, Indicator, OutputLine, PwmChannel, RemoteReceiver,
    RotationDirection, SensorLine,
};

/// Whether the platform is currently lowered or raised.
///
/// Mutated only by the command dispatcher after an elevation completes
/// and by the homing sequencer, which forces `Lowered`. The safety
/// interlock refuses every rotation request while this is `Raised`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElevationStatus {
    /// Platform at or heading for the bottom endstop (initial state).
    #[default]
    Lowered,
    /// Platform raised to the top endstop.
    Raised,
}

/// Controller state machine.
///
/// Motion commands are synchronous, so `Rotating`/`Elevating`/`Homing`
/// are only ever observed from inside the controller; externally the
/// interesting distinction is `Idle` versus the terminal `Halted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SystemState {
    /// Waiting for a command, no motor engaged.
    #[default]
    Idle,
    /// Running the homing sequence.
    Homing,
    /// Driving the rotation axis toward its opposite limit.
    Rotating(RotationDirection),
    /// Driving the elevation axis toward an endstop.
    Elevating(ElevationDirection),
    /// Emergency stop executed. Terminal: no transition leaves this
    /// state short of a full restart of the process.
    Halted,
}

/// Main turntable controller.
///
/// Owns the digital I/O, the remote receiver, and the status indicator,
/// and is the single writer of all output lines and of
/// [`ElevationStatus`] - there is no other actor, so no locking
/// discipline is needed. Anyone porting this onto a platform with real
/// interrupts must either keep these single-threaded polling semantics
/// or check an atomic stop flag at the same poll points.
///
/// # Type Parameters
///
/// - `G`: digital I/O implementation ([`DigitalIo`] trait)
/// - `R`: remote receiver ([`RemoteReceiver`] trait)
/// - `I`: status indicator ([`Indicator`] trait)
pub struct TurntableController<G: DigitalIo, R: RemoteReceiver, I: Indicator> {
    config: TurntableConfig,
    io: G,
    remote: R,
    indicator: I,
    elevation: ElevationStatus,
    state: SystemState,
}

/// How a blocking wait ended: the endstop condition was met, or the
/// emergency stop landed mid-wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WaitEnd {
    LimitReached,
    Halted,
}

impl<G: DigitalIo, R: RemoteReceiver, I: Indicator> TurntableController<G, R, I> {
    /// Create a new controller.
    ///
    /// The platform position is unknown until [`reset_mechanisms`] runs;
    /// callers should home before dispatching motion commands.
    ///
    /// [`reset_mechanisms`]: Self::reset_mechanisms
    pub fn new(config: TurntableConfig, io: G, remote: R, indicator: I) -> Self {
        Self {
            config,
            io,
            remote,
            indicator,
            elevation: ElevationStatus::Lowered,
            state: SystemState::Idle,
        }
    }

    // ========================================================================
    // Motion primitives
    // ========================================================================

    /// Rotate the platform to the opposite limit.
    ///
    /// Refused (no output changes) while the platform is raised or after
    /// a halt. Otherwise drives the selected direction line HIGH and
    /// waits in two phases: first until both rotation endstops read
    /// clear, confirming the platform has fully left the start position
    /// (and defusing a stale asserted sensor at the moment motion
    /// starts), then until either endstop asserts again. The line is
    /// driven LOW before returning, so on normal return exactly one
    /// direction output went HIGH then LOW and the axis sits at a limit.
    pub fn rotate(&mut self, direction: RotationDirection) -> Result<CommandOutcome, G::Error> {
        if self.state == SystemState::Halted {
            return Ok(CommandOutcome::Refused(RejectReason::Halted));
        }
        // Never rotate while elevated.
        if self.elevation == ElevationStatus::Raised {
            return Ok(CommandOutcome::Refused(RejectReason::Elevated));
        }

        self.state = SystemState::Rotating(direction);
        let line = direction.output();
        self.io.write_output(line, true)?;

        // Departure: wait for both endstops to clear.
        if self.wait_while(|io| rotation_at_limit(io))? == WaitEnd::Halted {
            return Ok(CommandOutcome::Halted);
        }
        // Arrival: wait for either endstop to assert.
        if self.wait_while(|io| Ok(!rotation_at_limit(io)?))? == WaitEnd::Halted {
            return Ok(CommandOutcome::Halted);
        }

        self.io.write_output(line, false)?;
        self.state = SystemState::Idle;
        Ok(CommandOutcome::Completed)
    }

    /// Raise or lower the platform to the requested endstop.
    ///
    /// No-op if the target endstop is already asserted. Otherwise drives
    /// the elevation line for the requested direction HIGH (moving both
    /// mechanically paired motors in lockstep) until the target endstop
    /// asserts, then LOW.
    ///
    /// This primitive does **not** update [`ElevationStatus`]; that is
    /// the caller's responsibility (the dispatcher's, normally), so the
    /// homing sequencer can reuse the drive sequence while owning the
    /// status itself.
    pub fn elevate(&mut self, direction: ElevationDirection) -> Result<CommandOutcome, G::Error> {
        if self.state == SystemState::Halted {
            return Ok(CommandOutcome::Refused(RejectReason::Halted));
        }

        let target = direction.target_sensor();
        if self.io.read_sensor(target)? {
            // Already at the requested limit.
            return Ok(CommandOutcome::Completed);
        }

        self.state = SystemState::Elevating(direction);
        let line = direction.output();
        self.io.write_output(line, true)?;

        if self.wait_while(|io| Ok(!io.read_sensor(target)?))? == WaitEnd::Halted {
            return Ok(CommandOutcome::Halted);
        }

        self.io.write_output(line, false)?;
        self.state = SystemState::Idle;
        Ok(CommandOutcome::Completed)
    }

    // ========================================================================
    // Homing
    // ========================================================================

    /// Drive the mechanism to its canonical known state: platform
    /// lowered, opening facing forward.
    ///
    /// Used both at startup (the platform position is unknown at power
    /// on) and on an explicit `Reset` command. Sets both PWM duties to
    /// their configured operating speeds, lowers the platform, rotates
    /// clockwise until a rotation endstop asserts (skipped entirely when
    /// one already is - which is what makes the routine idempotent),
    /// forces [`ElevationStatus::Lowered`], and toggles the indicator to
    /// signal completion.
    pub fn reset_mechanisms(&mut self) -> Result<CommandOutcome, G::Error> {
        if self.state == SystemState::Halted {
            return Ok(CommandOutcome::Refused(RejectReason::Halted));
        }
        self.state = SystemState::Homing;

        self.io
            .set_duty(PwmChannel::Rotation, self.config.motion.rotation_duty)?;
        self.io
            .set_duty(PwmChannel::Elevation, self.config.motion.elevation_duty)?;

        // Lower the platform. The elevate primitive leaves status alone;
        // the sequencer owns it.
        match self.elevate(ElevationDirection::Down)? {
            CommandOutcome::Halted => return Ok(CommandOutcome::Halted),
            _ => self.elevation = ElevationStatus::Lowered,
        }

        // Rotate until the opening faces forward. The two endstops are
        // one ORed at-limit condition, so already-at-a-limit means homed
        // and the drive is skipped.
        self.state = SystemState::Homing;
        if !rotation_at_limit(&mut self.io)? {
            let line = RotationDirection::Clockwise.output();
            self.io.write_output(line, true)?;
            if self.wait_while(|io| Ok(!rotation_at_limit(io)?))? == WaitEnd::Halted {
                return Ok(CommandOutcome::Halted);
            }
            self.io.write_output(line, false)?;
        }

        self.indicator.toggle();
        self.state = SystemState::Idle;
        Ok(CommandOutcome::Completed)
    }

    // ========================================================================
    // Emergency stop
    // ========================================================================

    /// Execute the halt procedure: both PWM duties to zero, every drive
    /// output LOW, state terminally [`SystemState::Halted`].
    ///
    /// Fail-safe by design: no attempt is made to reach a home position,
    /// because the triggering condition is presumed urgent and further
    /// motion unsafe. There is no recovery short of a full power cycle.
    pub fn halt(&mut self) -> Result<(), G::Error> {
        self.io.set_duty(PwmChannel::Rotation, 0)?;
        self.io.set_duty(PwmChannel::Elevation, 0)?;
        for line in OutputLine::ALL {
            self.io.write_output(line, false)?;
        }
        self.state = SystemState::Halted;
        Ok(())
    }

    /// Poll the remote once for a pending emergency stop.
    ///
    /// Invoked from inside every blocking wait. Non-blocking: returns
    /// immediately when nothing is pending. Commands other than the
    /// emergency stop arriving while a motor is engaged are consumed and
    /// discarded - there is no queueing of motion during motion.
    fn poll_emergency_stop(&mut self) -> Result<bool, G::Error> {
        if let Some(Command::EmergencyStop) = self.remote.try_next() {
            self.halt()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Busy-wait while `condition` holds, polling for an emergency stop
    /// on every iteration.
    ///
    /// This is the system's only suspension point. There is deliberately
    /// no timeout: a limit that never trips blocks forever (see the
    /// crate documentation on accepted limitations).
    fn wait_while<F>(&mut self, mut condition: F) -> Result<WaitEnd, G::Error>
    where
        F: FnMut(&mut G) -> Result<bool, G::Error>,
    {
        loop {
            if self.poll_emergency_stop()? {
                return Ok(WaitEnd::Halted);
            }
            if !condition(&mut self.io)? {
                return Ok(WaitEnd::LimitReached);
            }
        }
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Dispatch one decoded command.
    ///
    /// | Command | Action |
    /// |---|---|
    /// | `RotateCw` | `rotate(Clockwise)` |
    /// | `RotateCcw` | `rotate(CounterClockwise)` |
    /// | `ElevateUp` | `elevate(Up)`, then status `Raised` |
    /// | `ElevateDown` | `elevate(Down)`, then status `Lowered` |
    /// | `Reset` | `reset_mechanisms()` |
    /// | `EmergencyStop` | halt procedure |
    ///
    /// After a halt - whether commanded here or landed mid-motion -
    /// every further command is refused with no output changes.
    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutcome, G::Error> {
        if self.state == SystemState::Halted {
            return Ok(CommandOutcome::Refused(RejectReason::Halted));
        }

        match command {
            Command::RotateCw => self.rotate(RotationDirection::Clockwise),
            Command::RotateCcw => self.rotate(RotationDirection::CounterClockwise),
            Command::ElevateUp => {
                let outcome = self.elevate(ElevationDirection::Up)?;
                if outcome == CommandOutcome::Completed {
                    self.elevation = ElevationStatus::Raised;
                }
                Ok(outcome)
            }
            Command::ElevateDown => {
                let outcome = self.elevate(ElevationDirection::Down)?;
                if outcome == CommandOutcome::Completed {
                    self.elevation = ElevationStatus::Lowered;
                }
                Ok(outcome)
            }
            Command::Reset => self.reset_mechanisms(),
            Command::EmergencyStop => {
                self.halt()?;
                Ok(CommandOutcome::Halted)
            }
        }
    }

    /// Top-level polling loop: consume commands from the receiver until
    /// the system halts.
    ///
    /// Busy-polls the receiver between commands; with no motor engaged
    /// that is acceptable, and it keeps the loop identical in shape to
    /// the in-motion supervision. Never exits except via `Halted`.
    pub fn run(&mut self) -> Result<(), G::Error> {
        loop {
            if self.state == SystemState::Halted {
                return Ok(());
            }
            if let Some(command) = self.remote.try_next() {
                self.dispatch(command)?;
            }
        }
    }

    // ========================================================================
    // State access
    // ========================================================================

    /// Current state machine value.
    pub fn state(&self) -> SystemState {
        self.state
    }

    /// Whether the halt procedure has executed.
    pub fn is_halted(&self) -> bool {
        self.state == SystemState::Halted
    }

    /// Current elevation status.
    pub fn elevation_status(&self) -> ElevationStatus {
        self.elevation
    }

    /// Full state snapshot for UI/diagnostics.
    pub fn snapshot(&self) -> TurntableState {
        TurntableState {
            state: self.state,
            elevation: self.elevation,
        }
    }

    /// Borrow the digital I/O.
    pub fn io(&self) -> &G {
        &self.io
    }

    /// Mutably borrow the digital I/O (sensor scripting in tests).
    pub fn io_mut(&mut self) -> &mut G {
        &mut self.io
    }

    /// Mutably borrow the remote receiver (command queueing in tests).
    pub fn remote_mut(&mut self) -> &mut R {
        &mut self.remote
    }

    /// Borrow the indicator.
    pub fn indicator(&self) -> &I {
        &self.indicator
    }
}

/// Whether the rotation axis is at a travel extreme.
///
/// The two rotation endstops are logically ORed into a single at-limit
/// condition spanning both physical switches.
fn rotation_at_limit<G: DigitalIo>(io: &mut G) -> Result<bool, G::Error> {
    for sensor in SensorLine::ROTATION {
        if io.read_sensor(sensor)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Full state snapshot for UI/diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurntableState {
    /// Current state machine value.
    pub state: SystemState,
    /// Current elevation status.
    pub elevation: ElevationStatus,
}
