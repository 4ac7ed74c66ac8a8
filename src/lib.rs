//! # rs-turntable
//!
//! Controller for a two-axis motorized display turntable: one axis rotates
//! the platform between two sensed positions, the other raises and lowers it
//! between two sensed positions. Motion is commanded by discrete remote
//! events and terminates on physical limit sensors, never on timing.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for digital I/O, the remote-control
//!   receiver, and the status indicator
//! - **Endstop-terminated motion**: Two-phase rotation waits and
//!   already-at-limit elevation no-ops, driven entirely by limit sensors
//! - **Emergency stop supervision**: Every blocking wait polls the receiver,
//!   so an e-stop lands even mid-travel; the halt is total and terminal
//! - **Safety interlock**: Rotation is refused while the platform is raised
//! - **Homing**: Deterministic recovery to the lowered, forward-facing state
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Digital I/O, remote receiver, and indicator abstractions
//! - `commands` - Command decoding and dispatch outcomes
//! - `turntable` - Main controller that ties everything together
//! - `config` - Pin assignments and motor speeds
//! - `hal` - Concrete implementations (mock for testing)
//!
//! ## Example
//!
//! ```rust
//! use rs_turntable::{
//!     Command, CommandOutcome, ElevationStatus, SensorLine, TurntableController,
//!     hal::{MockIndicator, MockIo, MockRemote},
//! };
//!
//! let mut io = MockIo::new();
//! // Platform starts lowered and at the forward rotation limit.
//! io.set_sensor(SensorLine::BottomEndstop, true);
//! io.set_sensor(SensorLine::RightEndstop, true);
//!
//! let mut controller =
//!     TurntableController::new(Default::default(), io, MockRemote::new(), MockIndicator::new());
//!
//! // Home, then raise the platform.
//! controller.reset_mechanisms().unwrap();
//! assert_eq!(controller.elevation_status(), ElevationStatus::Lowered);
//!
//! controller.io_mut().script_sensor(SensorLine::TopEndstop, &[false, true]);
//! let outcome = controller.dispatch(Command::ElevateUp).unwrap();
//! assert_eq!(outcome, CommandOutcome::Completed);
//! assert_eq!(controller.elevation_status(), ElevationStatus::Raised);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Command types, dispatch outcomes, and remote text decoding.
pub mod commands;
/// Pin assignments and motor speed configuration.
pub mod config;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Core traits for digital I/O, the remote receiver, and the indicator.
pub mod traits;
/// Main turntable controller: motion primitives, homing, and dispatch.
pub mod turntable;

// Re-exports for convenience
pub use commands::{Command, CommandOutcome, RejectReason};
pub use config::{DeviceConfig, MotionConfig, PinConfig, TurntableConfig};
pub use traits::{
    DigitalIo, ElevationDirection, Indicator, OutputLine, PwmChannel, RemoteReceiver,
    RotationDirection, SensorLine,
};
pub use turntable::{ElevationStatus, SystemState, TurntableController, TurntableState};
