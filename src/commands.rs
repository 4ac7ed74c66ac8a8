//! Command types and dispatch outcomes for the turntable controller.
//!
//! This module defines the command vocabulary for controlling the
//! turntable: the decoded [`Command`] variants the remote receiver
//! produces, the [`CommandOutcome`] a dispatch returns, and the
//! [`RejectReason`] attached to refused commands.
//!
//! # Command Flow
//!
//! 1. The receiver decodes raw remote signals into [`Command`] values
//! 2. The dispatcher maps each command to a motion primitive, the homing
//!    sequencer, or the halt procedure
//! 3. Each dispatch reports what happened via [`CommandOutcome`]
//!
//! Refusals are not errors: a rotate request while the platform is raised
//! is silently refused by the safety interlock, and any command after an
//! emergency stop is refused because [`Halted`] is terminal. Both are
//! reported as [`CommandOutcome::Refused`] with no output-line changes.
//!
//! [`Halted`]: crate::SystemState::Halted

/// A decoded remote-control command.
///
/// Produced by the [`RemoteReceiver`](crate::traits::RemoteReceiver) and
/// consumed once per dispatch cycle. The "no command pending" case is
/// `Option::<Command>::None` at the receiver boundary rather than a
/// variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Command {
    /// Rotate the platform clockwise to the opposite limit.
    RotateCw,
    /// Rotate the platform counter-clockwise to the opposite limit.
    RotateCcw,
    /// Raise the platform to the top endstop.
    ElevateUp,
    /// Lower the platform to the bottom endstop.
    ElevateDown,
    /// Re-home: lowered, forward-facing, known state.
    Reset,
    /// Emergency stop - de-energize everything and halt for good.
    EmergencyStop,
}

impl Command {
    /// Returns the command as a lowercase string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_turntable::Command;
    ///
    /// assert_eq!(Command::RotateCw.as_str(), "rotate_cw");
    /// assert_eq!(Command::EmergencyStop.as_str(), "emergency_stop");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Command::RotateCw => "rotate_cw",
            Command::RotateCcw => "rotate_ccw",
            Command::ElevateUp => "elevate_up",
            Command::ElevateDown => "elevate_down",
            Command::Reset => "reset",
            Command::EmergencyStop => "emergency_stop",
        }
    }

    /// Parse a command from text input.
    ///
    /// Supports multiple text formats for flexibility:
    /// - Single letters as the original serial protocol used them:
    ///   `"l"`, `"r"`, `"u"`, `"d"`, `"o"` (stop), `"*"` (reset)
    /// - Remote button names: `"left"`, `"right"`, `"up"`, `"down"`,
    ///   `"ok"`, `"star"`
    /// - Full words: `"cw"`, `"ccw"`, `"raise"`, `"lower"`, `"reset"`,
    ///   `"stop"`, `"estop"`
    ///
    /// Input is trimmed and case-insensitive. Unrecognized input returns
    /// `None` and is ignored by the dispatcher, never reported as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_turntable::Command;
    ///
    /// assert_eq!(Command::from_text("l"), Some(Command::RotateCcw));
    /// assert_eq!(Command::from_text("r"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_text("u"), Some(Command::ElevateUp));
    /// assert_eq!(Command::from_text("d"), Some(Command::ElevateDown));
    /// assert_eq!(Command::from_text("o"), Some(Command::EmergencyStop));
    /// assert_eq!(Command::from_text("*"), Some(Command::Reset));
    ///
    /// assert_eq!(Command::from_text("  LEFT  "), Some(Command::RotateCcw));
    /// assert_eq!(Command::from_text("estop"), Some(Command::EmergencyStop));
    ///
    /// assert_eq!(Command::from_text("spin"), None);
    /// assert_eq!(Command::from_text(""), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" | "ccw" => Some(Command::RotateCcw),
            "r" | "right" | "cw" => Some(Command::RotateCw),
            "u" | "up" | "raise" => Some(Command::ElevateUp),
            "d" | "down" | "lower" => Some(Command::ElevateDown),
            "*" | "star" | "reset" | "home" => Some(Command::Reset),
            "o" | "ok" | "stop" | "estop" => Some(Command::EmergencyStop),
            _ => None,
        }
    }
}

/// What happened when a command was dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommandOutcome {
    /// The action ran to its natural completion.
    Completed,

    /// The command was refused with no output-line changes.
    ///
    /// Refusals are interlocks, not faults; the dispatcher resumes
    /// polling as if nothing happened.
    Refused(RejectReason),

    /// The emergency stop fired - either this command was the e-stop
    /// itself, or the e-stop landed mid-motion while this command's
    /// action was waiting on an endstop. All outputs are LOW and the
    /// system is terminally halted.
    Halted,
}

/// Why a command was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RejectReason {
    /// Rotation requested while the platform is raised.
    ///
    /// Never rotate while elevated: the request is a silent no-op by
    /// design, not a fault.
    Elevated,

    /// The system has executed its halt procedure.
    ///
    /// Nothing re-arms the outputs short of a full restart.
    Halted,
}
