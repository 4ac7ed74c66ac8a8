//! Digital I/O abstraction for motor drive, PWM speed, and limit sensors.
//!
//! This module defines the hardware interface the turntable controller
//! drives. Implement [`DigitalIo`] for your platform; the controller never
//! touches pins directly.
//!
//! # Logical Lines
//!
//! | Kind | Lines |
//! |------|-------|
//! | [`OutputLine`] | `RotateCw`, `RotateCcw`, `ElevateUp`, `ElevateDown` |
//! | [`SensorLine`] | `TopEndstop`, `BottomEndstop`, `LeftEndstop`, `RightEndstop` |
//! | [`PwmChannel`] | `Rotation`, `Elevation` |
//!
//! Which physical pin backs which logical line is deployment configuration
//! (see [`PinConfig`](crate::config::PinConfig)), not part of this contract.
//!
//! # Sensor Polarity
//!
//! [`DigitalIo::read_sensor`] returns `true` when the sensor is asserted,
//! i.e. the moving part is at that travel extreme. Endstop switches are
//! typically wired active-low against an internal pull-up; translating the
//! electrical level into this convention is the implementation's job.
//!
//! # Implementation
//!
//! For testing and desktop development, use [`MockIo`](crate::hal::MockIo).

/// Direction of platform rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RotationDirection {
    /// Clockwise, toward the canonical forward-facing limit.
    Clockwise,
    /// Counter-clockwise.
    CounterClockwise,
}

impl RotationDirection {
    /// Returns the direction as a lowercase string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_turntable::RotationDirection;
    ///
    /// assert_eq!(RotationDirection::Clockwise.as_str(), "cw");
    /// assert_eq!(RotationDirection::CounterClockwise.as_str(), "ccw");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "cw",
            RotationDirection::CounterClockwise => "ccw",
        }
    }

    /// The drive line energized for this direction.
    #[inline]
    pub const fn output(&self) -> OutputLine {
        match self {
            RotationDirection::Clockwise => OutputLine::RotateCw,
            RotationDirection::CounterClockwise => OutputLine::RotateCcw,
        }
    }
}

/// Direction of platform elevation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElevationDirection {
    /// Raise the platform toward the top endstop.
    Up,
    /// Lower the platform toward the bottom endstop.
    Down,
}

impl ElevationDirection {
    /// Returns the direction as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ElevationDirection::Up => "up",
            ElevationDirection::Down => "down",
        }
    }

    /// The drive line energized for this direction.
    ///
    /// The two physical elevator motors are mechanically paired and share
    /// each drive line, so one logical output moves both in lockstep.
    #[inline]
    pub const fn output(&self) -> OutputLine {
        match self {
            ElevationDirection::Up => OutputLine::ElevateUp,
            ElevationDirection::Down => OutputLine::ElevateDown,
        }
    }

    /// The endstop that terminates travel in this direction.
    #[inline]
    pub const fn target_sensor(&self) -> SensorLine {
        match self {
            ElevationDirection::Up => SensorLine::TopEndstop,
            ElevationDirection::Down => SensorLine::BottomEndstop,
        }
    }
}

/// Motor drive output lines.
///
/// Per axis, at most one of the two opposed lines may be HIGH at any
/// instant. The controller maintains this invariant; implementations only
/// have to apply writes faithfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutputLine {
    /// Rotation axis, clockwise drive.
    RotateCw,
    /// Rotation axis, counter-clockwise drive.
    RotateCcw,
    /// Elevation axis, upward drive (both paired motors).
    ElevateUp,
    /// Elevation axis, downward drive (both paired motors).
    ElevateDown,
}

impl OutputLine {
    /// All drive lines, in a fixed order.
    ///
    /// The halt procedure iterates this to de-energize every motor.
    pub const ALL: [OutputLine; 4] = [
        OutputLine::RotateCw,
        OutputLine::RotateCcw,
        OutputLine::ElevateUp,
        OutputLine::ElevateDown,
    ];

    /// Dense index for array-backed line state (mocks, pin maps).
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Limit sensor input lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorLine {
    /// Elevation travel extreme, raised.
    TopEndstop,
    /// Elevation travel extreme, lowered.
    BottomEndstop,
    /// Rotation travel extreme, counter-clockwise side.
    LeftEndstop,
    /// Rotation travel extreme, clockwise side.
    RightEndstop,
}

impl SensorLine {
    /// The rotation axis's two endstops.
    ///
    /// These are logically ORed into a single "at limit" condition: the
    /// rotation axis is at a limit when either one is asserted.
    pub const ROTATION: [SensorLine; 2] = [SensorLine::LeftEndstop, SensorLine::RightEndstop];

    /// Dense index for array-backed sensor state.
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// PWM speed channels, one per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PwmChannel {
    /// Speed duty for the rotation motors.
    Rotation,
    /// Speed duty for the paired elevation motors.
    Elevation,
}

impl PwmChannel {
    /// Dense index for array-backed duty state.
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Digital I/O trait - abstracts limit sensors, motor drive, and PWM lines.
///
/// Calls are synchronous and take immediate physical effect; there is no
/// internal state beyond the pins themselves.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_turntable::traits::{DigitalIo, OutputLine, PwmChannel, SensorLine};
///
/// struct BoardIo { /* pin handles */ }
///
/// impl DigitalIo for BoardIo {
///     type Error = ();
///
///     fn read_sensor(&mut self, sensor: SensorLine) -> Result<bool, ()> {
///         // Active-low pull-up switch: pressed reads LOW.
///         Ok(!self.pin_level(sensor))
///     }
///
///     fn write_output(&mut self, line: OutputLine, high: bool) -> Result<(), ()> {
///         // Drive the mapped pin...
///         Ok(())
///     }
///
///     fn set_duty(&mut self, channel: PwmChannel, duty: u8) -> Result<(), ()> {
///         // Set PWM duty cycle 0..=255...
///         Ok(())
///     }
/// }
/// ```
pub trait DigitalIo {
    /// Error type for I/O operations.
    type Error;

    /// Read a limit sensor. `true` means asserted: at the travel extreme.
    fn read_sensor(&mut self, sensor: SensorLine) -> Result<bool, Self::Error>;

    /// Drive a motor output line HIGH (`true`) or LOW (`false`).
    fn write_output(&mut self, line: OutputLine, high: bool) -> Result<(), Self::Error>;

    /// Set a PWM speed duty cycle, 0 (stopped) to 255 (full speed).
    fn set_duty(&mut self, channel: PwmChannel, duty: u8) -> Result<(), Self::Error>;
}
