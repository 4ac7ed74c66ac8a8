//! Trait definitions for the turntable's hardware and collaborator seams.
//!
//! This module defines the abstractions that allow rs-turntable to:
//! - Run on different hardware (real pins, desktop mock)
//! - Consume commands from any remote receiver/decoder
//! - Signal state transitions on any status indicator
//!
//! # Submodules
//!
//! - `hardware`: Digital I/O over sensors, motor drive, and PWM lines
//! - `remote`: Remote-control receiver producing decoded commands
//! - `indicator`: Fire-and-forget status light
//!
//! # Hardware Abstraction
//!
//! The key trait is [`DigitalIo`]: everything the controller does to the
//! physical machine goes through `read_sensor`, `write_output`, and
//! `set_duty`. The [`RemoteReceiver`] is the controller's only input and
//! the [`Indicator`] its only non-motor output.

pub mod hardware;
pub mod indicator;
pub mod remote;

pub use hardware::*;
pub use indicator::*;
pub use remote::*;
