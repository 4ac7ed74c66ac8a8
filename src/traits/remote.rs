//! Remote-control receiver abstraction.
//!
//! The receiver/decoder is an external collaborator: it translates raw
//! remote signals (IR bursts, serial bytes, a test script) into decoded
//! [`Command`] values. The controller only ever consumes the decoded
//! stream, one command per poll.
//!
//! The mapping from raw signal codes to logical commands
//! (up/down/left/right/ok/star) is configuration owned by the decoder,
//! not by this crate's core.

use crate::commands::Command;

/// Remote-control receiver trait.
///
/// Produces a lazy, infinite, non-restartable sequence of decoded commands.
/// The controller polls it both from the dispatcher's idle loop and from
/// inside every blocking motion wait, which is how an emergency stop lands
/// while a motor is engaged.
///
/// # Implementation Notes
///
/// - `try_next` must never block; return `None` when nothing is pending
/// - Each decoded command is delivered exactly once
/// - Decode failures should be swallowed (unrecognized input is ignored
///   by design, not surfaced as an error)
///
/// # Example
///
/// ```rust
/// use rs_turntable::hal::MockRemote;
/// use rs_turntable::traits::RemoteReceiver;
/// use rs_turntable::Command;
///
/// let mut remote = MockRemote::new();
/// remote.queue_command(Command::RotateCw);
///
/// assert_eq!(remote.try_next(), Some(Command::RotateCw));
/// assert_eq!(remote.try_next(), None);
/// ```
pub trait RemoteReceiver {
    /// Poll for the next decoded command (non-blocking).
    ///
    /// Returns `None` if no command is pending. This must never block:
    /// it is called from inside motion wait loops where blocking would
    /// stall the emergency stop check.
    fn try_next(&mut self) -> Option<Command>;
}
