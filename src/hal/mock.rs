//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every trait seam, enabling
//! development and testing on desktop without a physical turntable.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockIo`] | [`DigitalIo`] | Scripted sensors, logged output writes |
//! | [`MockRemote`] | [`RemoteReceiver`] | Queued command sequence |
//! | [`MockIndicator`] | [`Indicator`] | Counts toggles, tracks level |
//!
//! # Scripted Sensors
//!
//! The controller's wait loops poll sensors until an endstop condition is
//! met, so a mock sensor has to change value *over successive reads* for
//! a test to terminate. [`MockIo::script_sensor`] queues per-read values;
//! each read pops the next one and the last popped value then holds. A
//! sensor with no script simply holds its [`MockIo::set_sensor`] level.
//!
//! # Example
//!
//! ```rust
//! use rs_turntable::hal::MockIo;
//! use rs_turntable::traits::{DigitalIo, OutputLine, SensorLine};
//!
//! let mut io = MockIo::new();
//! io.script_sensor(SensorLine::TopEndstop, &[false, false, true]);
//!
//! assert!(!io.read_sensor(SensorLine::TopEndstop).unwrap());
//! assert!(!io.read_sensor(SensorLine::TopEndstop).unwrap());
//! assert!(io.read_sensor(SensorLine::TopEndstop).unwrap());
//! // Script exhausted: the last value holds.
//! assert!(io.read_sensor(SensorLine::TopEndstop).unwrap());
//!
//! io.write_output(OutputLine::ElevateUp, true).unwrap();
//! assert!(io.output(OutputLine::ElevateUp));
//! ```

use crate::commands::Command;
use crate::traits::{
    DigitalIo, Indicator, OutputLine, PwmChannel, RemoteReceiver, SensorLine,
};

extern crate alloc;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

// ============================================================================
// Digital I/O Mock
// ============================================================================

/// Mock digital I/O for testing.
///
/// Sensors are scripted per read; every output write is logged, and a
/// snapshot of all four drive lines is recorded after each write so tests
/// can assert the per-axis mutual exclusion invariant at every sampled
/// instant.
#[derive(Debug, Default)]
pub struct MockIo {
    sensors: [bool; 4],
    scripts: [VecDeque<bool>; 4],
    outputs: [bool; 4],
    duties: [u8; 2],
    /// Every `write_output` call in order (line, level).
    pub writes: Vec<(OutputLine, bool)>,
    /// Snapshot of all drive lines after each write, indexed by
    /// [`OutputLine::index`].
    pub output_history: Vec<[bool; 4]>,
    /// Every `set_duty` call in order (channel, duty).
    pub duty_writes: Vec<(PwmChannel, u8)>,
    /// Total number of sensor reads.
    pub sensor_reads: usize,
}

impl MockIo {
    /// Creates a new mock with all sensors clear and all outputs LOW.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a sensor's held level (used until a script overrides it).
    pub fn set_sensor(&mut self, sensor: SensorLine, asserted: bool) {
        self.sensors[sensor.index()] = asserted;
    }

    /// Queue per-read values for a sensor.
    ///
    /// Each read pops the front of the queue; once the queue drains, the
    /// last popped value holds for further reads.
    pub fn script_sensor(&mut self, sensor: SensorLine, values: &[bool]) {
        self.scripts[sensor.index()].extend(values.iter().copied());
    }

    /// Current level of a drive line.
    pub fn output(&self, line: OutputLine) -> bool {
        self.outputs[line.index()]
    }

    /// Whether any drive line is currently HIGH.
    pub fn any_output_high(&self) -> bool {
        self.outputs.iter().any(|&level| level)
    }

    /// Current duty of a PWM channel.
    pub fn duty(&self, channel: PwmChannel) -> u8 {
        self.duties[channel.index()]
    }

    /// The sequence of levels written to one line.
    pub fn writes_to(&self, line: OutputLine) -> Vec<bool> {
        self.writes
            .iter()
            .filter(|(l, _)| *l == line)
            .map(|&(_, level)| level)
            .collect()
    }

    /// Asserts that at no sampled instant were both drive lines of one
    /// axis HIGH together.
    ///
    /// # Panics
    ///
    /// Panics with the offending snapshot if the invariant was violated.
    pub fn assert_mutual_exclusion(&self) {
        for (i, snap) in self.output_history.iter().enumerate() {
            let rotation = snap[OutputLine::RotateCw.index()] && snap[OutputLine::RotateCcw.index()];
            let elevation =
                snap[OutputLine::ElevateUp.index()] && snap[OutputLine::ElevateDown.index()];
            assert!(
                !rotation && !elevation,
                "opposing drive lines HIGH together at write {}: {:?}",
                i,
                snap
            );
        }
    }
}

impl DigitalIo for MockIo {
    type Error = ();

    fn read_sensor(&mut self, sensor: SensorLine) -> Result<bool, ()> {
        self.sensor_reads += 1;
        if let Some(value) = self.scripts[sensor.index()].pop_front() {
            self.sensors[sensor.index()] = value;
        }
        Ok(self.sensors[sensor.index()])
    }

    fn write_output(&mut self, line: OutputLine, high: bool) -> Result<(), ()> {
        self.outputs[line.index()] = high;
        self.writes.push((line, high));
        self.output_history.push(self.outputs);
        Ok(())
    }

    fn set_duty(&mut self, channel: PwmChannel, duty: u8) -> Result<(), ()> {
        self.duties[channel.index()] = duty;
        self.duty_writes.push((channel, duty));
        Ok(())
    }
}

// ============================================================================
// Remote Receiver Mock
// ============================================================================

/// Mock remote receiver for testing.
///
/// Queue decoded commands, or explicit empty polls to delay a command by
/// a known number of wait-loop iterations - that is how tests land an
/// emergency stop in the middle of a motion wait.
///
/// # Example
///
/// ```rust
/// use rs_turntable::hal::MockRemote;
/// use rs_turntable::traits::RemoteReceiver;
/// use rs_turntable::Command;
///
/// let mut remote = MockRemote::new();
/// remote.queue_silence(2);
/// remote.queue_command(Command::EmergencyStop);
///
/// assert_eq!(remote.try_next(), None);
/// assert_eq!(remote.try_next(), None);
/// assert_eq!(remote.try_next(), Some(Command::EmergencyStop));
/// assert_eq!(remote.try_next(), None); // exhausted
/// ```
#[derive(Debug, Default)]
pub struct MockRemote {
    queue: VecDeque<Option<Command>>,
    /// Number of times `try_next` was polled.
    pub polls: usize,
}

impl MockRemote {
    /// Creates a new mock remote with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one decoded command.
    pub fn queue_command(&mut self, command: Command) {
        self.queue.push_back(Some(command));
    }

    /// Queue several decoded commands in order.
    pub fn queue_commands(&mut self, commands: &[Command]) {
        for &command in commands {
            self.queue.push_back(Some(command));
        }
    }

    /// Queue `polls` empty polls before whatever is queued next.
    pub fn queue_silence(&mut self, polls: usize) {
        for _ in 0..polls {
            self.queue.push_back(None);
        }
    }

    /// Whether every queued entry has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

impl RemoteReceiver for MockRemote {
    fn try_next(&mut self) -> Option<Command> {
        self.polls += 1;
        self.queue.pop_front().flatten()
    }
}

// ============================================================================
// Indicator Mock
// ============================================================================

/// Mock status indicator for testing.
#[derive(Debug, Default)]
pub struct MockIndicator {
    /// Current level.
    pub lit: bool,
    /// Number of `toggle` calls.
    pub toggle_count: usize,
    /// Number of `set` calls.
    pub set_count: usize,
}

impl MockIndicator {
    /// Creates a new mock indicator, dark.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Indicator for MockIndicator {
    fn set(&mut self, lit: bool) {
        self.lit = lit;
        self.set_count += 1;
    }

    fn toggle(&mut self) {
        self.lit = !self.lit;
        self.toggle_count += 1;
    }
}

// ============================================================================
// Tests
// ============================================================================
