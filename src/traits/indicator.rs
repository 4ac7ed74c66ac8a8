//! Status indicator abstraction.
//!
//! This module defines the [`Indicator`] trait for the fire-and-forget
//! status light the controller pulses on state transitions (homing
//! complete, motion in progress).

/// Status indicator trait.
///
/// The indicator is a side-effect sink with no state machine of its own.
/// Calls are fire-and-forget and infallible by contract: an indicator
/// that cannot light must swallow the failure internally, because nothing
/// about motion correctness may depend on it and the motion routines must
/// never block or fail on its account.
///
/// # Example
///
/// ```rust
/// use rs_turntable::hal::MockIndicator;
/// use rs_turntable::traits::Indicator;
///
/// let mut indicator = MockIndicator::new();
/// indicator.toggle();
/// assert!(indicator.lit);
/// assert_eq!(indicator.toggle_count, 1);
/// ```
pub trait Indicator {
    /// Set the indicator on or off.
    fn set(&mut self, lit: bool);

    /// Flip the indicator state.
    ///
    /// Implementations that cannot read the current level back from
    /// hardware should track it themselves.
    fn toggle(&mut self);
}
