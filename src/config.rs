//! Configuration for pin assignment, motor speeds, and device identity.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! Pin identity (which physical pin backs which logical line) is
//! deployment configuration: the controller core only ever speaks logical
//! [`OutputLine`](crate::traits::OutputLine) /
//! [`SensorLine`](crate::traits::SensorLine) names, and a `DigitalIo`
//! implementation consults [`PinConfig`] to resolve them. Defaults match
//! the reference turntable wiring.
//!
//! # Example
//!
//! ```rust
//! use rs_turntable::config::{MotionConfig, TurntableConfig};
//!
//! // Use defaults
//! let config = TurntableConfig::default();
//!
//! // Or customize
//! let config = TurntableConfig::default()
//!     .with_motion(MotionConfig::default().with_rotation_duty(140));
//! ```

use heapless::String as HString;

/// Maximum length for short config strings (device names)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Take only what fits, backing off to a valid UTF-8 boundary so a
    // multibyte character straddling the capacity is dropped whole.
    let mut take = s.len().min(MAX_SHORT_STRING);
    while !s.is_char_boundary(take) {
        take -= 1;
    }
    let _ = hs.push_str(&s[..take]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete turntable configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurntableConfig {
    /// Physical pin assignment
    pub pins: PinConfig,
    /// Motor operating speeds
    pub motion: MotionConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl TurntableConfig {
    /// Set pin assignment
    pub fn with_pins(mut self, pins: PinConfig) -> Self {
        self.pins = pins;
        self
    }

    /// Set motor speeds
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Pin Config
// ============================================================================

/// Physical pin numbers for every logical line.
///
/// Defaults are the reference wiring: the right-hand motor pair drives
/// rotation, the left-hand pair drives elevation, endstops sit on the
/// low-numbered input pins with internal pull-ups enabled.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinConfig {
    /// Top elevation endstop input
    pub top_endstop: u8,
    /// Bottom elevation endstop input
    pub bottom_endstop: u8,
    /// Left rotation endstop input
    pub left_endstop: u8,
    /// Right rotation endstop input
    pub right_endstop: u8,
    /// Clockwise rotation drive output
    pub rotate_cw: u8,
    /// Counter-clockwise rotation drive output
    pub rotate_ccw: u8,
    /// Upward elevation drive output (both paired motors)
    pub elevate_up: u8,
    /// Downward elevation drive output (both paired motors)
    pub elevate_down: u8,
    /// Rotation PWM speed output
    pub rotation_pwm: u8,
    /// Elevation PWM speed output
    pub elevation_pwm: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            top_endstop: 0,
            bottom_endstop: 1,
            left_endstop: 2,
            right_endstop: 3,
            rotate_cw: 7,
            rotate_ccw: 8,
            elevate_up: 11,
            elevate_down: 12,
            rotation_pwm: 6,
            elevation_pwm: 9,
        }
    }
}

// ============================================================================
// Motion Config
// ============================================================================

/// Motor operating speeds as PWM duty cycles (0-255).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionConfig {
    /// Duty cycle for the turntable rotation motors
    pub rotation_duty: u8,
    /// Duty cycle for the paired elevation motors
    pub elevation_duty: u8,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            rotation_duty: 100,
            elevation_duty: 100,
        }
    }
}

impl MotionConfig {
    /// Set the rotation duty cycle
    pub fn with_rotation_duty(mut self, duty: u8) -> Self {
        self.rotation_duty = duty;
        self
    }

    /// Set the elevation duty cycle
    pub fn with_elevation_duty(mut self, duty: u8) -> Self {
        self.elevation_duty = duty;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name (banners, diagnostics)
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("display-turntable"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}
