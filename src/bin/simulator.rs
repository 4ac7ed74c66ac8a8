//! Desktop turntable simulator.
//!
//! Drives the controller against the mock HAL with a tiny plant model
//! that scripts sensor timelines the way the physical machine would
//! produce them. Commands come from stdin, one per line, using the same
//! letters the original serial protocol used:
//!
//! ```text
//! l - rotate counter-clockwise     u - raise platform
//! r - rotate clockwise             d - lower platform
//! * - reset / home                 o - emergency stop
//! ```
//!
//! Full words (`left`, `up`, `estop`, ...) work too; anything else is
//! ignored, as the real dispatcher ignores unrecognized remote codes.
//!
//! # Run
//!
//! ```bash
//! cargo run --bin simulator
//! ```

use std::io::{self, BufRead, Write};

use rs_turntable::hal::{MockIndicator, MockIo, MockRemote};
use rs_turntable::{Command, SensorLine, TurntableConfig, TurntableController};

/// Which rotation endstop the platform currently rests against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Minimal plant model: remembers where the platform is and scripts the
/// sensor timeline a motion command will observe before it is dispatched.
///
/// The wait loops sample sensors once per iteration, so each script
/// below is written against the exact read order of the controller:
/// rotation checks read left then right and short-circuit on the first
/// asserted sensor.
struct Plant {
    side: Option<Side>,
    lowered: bool,
}

impl Plant {
    fn unknown() -> Self {
        Self {
            side: None,
            lowered: false,
        }
    }

    /// Script the homing sequence: lower to the bottom endstop, then
    /// rotate clockwise onto the right endstop.
    fn script_homing(&mut self, io: &mut MockIo) {
        if !self.lowered {
            io.script_sensor(SensorLine::BottomEndstop, &[false, false, false, true]);
            self.lowered = true;
        }
        if self.side.is_none() {
            // Arrival-only wait: left stays clear, right asserts.
            io.script_sensor(SensorLine::LeftEndstop, &[false, false]);
            io.script_sensor(SensorLine::RightEndstop, &[false, true]);
            self.side = Some(Side::Right);
        }
    }

    /// Script a full rotation: the current side's endstop clears, the
    /// platform travels, the opposite endstop asserts.
    ///
    /// Skipped while the platform is raised - the controller refuses the
    /// command without reading a single sensor, so the plant must not
    /// queue a timeline nothing will consume.
    fn script_rotation(&mut self, io: &mut MockIo) {
        if !self.lowered {
            return;
        }
        let from = self.side.unwrap_or(Side::Right);
        let (leaving, arriving) = match from {
            Side::Left => (SensorLine::LeftEndstop, SensorLine::RightEndstop),
            Side::Right => (SensorLine::RightEndstop, SensorLine::LeftEndstop),
        };
        match from {
            Side::Left => {
                // Left is read first and short-circuits while asserted.
                io.script_sensor(leaving, &[true, false, false, false]);
                io.script_sensor(arriving, &[false, false, true]);
            }
            Side::Right => {
                io.script_sensor(SensorLine::LeftEndstop, &[false, false, false, true]);
                io.script_sensor(leaving, &[true, false, false]);
            }
        }
        self.side = Some(match from {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        });
    }

    /// Script an elevation: target endstop clear for a few samples, then
    /// asserted. The opposite endstop clears as the platform leaves it.
    fn script_elevation(&mut self, io: &mut MockIo, up: bool) {
        if up != self.lowered {
            // Already at the requested extreme: the controller's
            // already-at-limit check reads the held sensor and no-ops.
            return;
        }
        let (target, other) = if up {
            (SensorLine::TopEndstop, SensorLine::BottomEndstop)
        } else {
            (SensorLine::BottomEndstop, SensorLine::TopEndstop)
        };
        io.script_sensor(target, &[false, false, false, true]);
        io.set_sensor(other, false);
        self.lowered = !up;
    }
}

fn main() -> anyhow::Result<()> {
    println!();
    println!("==================================");
    println!("  rs-turntable desktop simulator");
    println!("==================================");
    println!();

    let config = TurntableConfig::default();
    println!("[OK] Config: device '{}'", config.device.name);
    println!(
        "[OK] Duties: rotation {}, elevation {}",
        config.motion.rotation_duty, config.motion.elevation_duty
    );

    let mut plant = Plant::unknown();
    let mut mock_io = MockIo::new();
    plant.script_homing(&mut mock_io);

    let mut controller =
        TurntableController::new(config, mock_io, MockRemote::new(), MockIndicator::new());

    // Startup homing, as the firmware does in setup().
    controller.reset_mechanisms().map_err(io_error)?;
    println!("[OK] Homed: {:?}", controller.snapshot());
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("L,R,U,D,*,O: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let Some(command) = Command::from_text(&line) else {
            println!("(ignored)");
            continue;
        };

        // Let the plant produce the sensor timeline this motion will see.
        match command {
            Command::RotateCw | Command::RotateCcw => plant.script_rotation(controller.io_mut()),
            Command::ElevateUp => plant.script_elevation(controller.io_mut(), true),
            Command::ElevateDown => plant.script_elevation(controller.io_mut(), false),
            Command::Reset => plant.script_homing(controller.io_mut()),
            Command::EmergencyStop => {}
        }

        let outcome = controller.dispatch(command).map_err(io_error)?;
        println!(
            "{} -> {:?}, state {:?}",
            command.as_str(),
            outcome,
            controller.snapshot()
        );

        if controller.is_halted() {
            println!("Emergency stop: all outputs LOW. Restart to re-arm.");
            break;
        }
    }

    Ok(())
}

/// The mock I/O is infallible; this only exists to satisfy `?`.
fn io_error(_: ()) -> anyhow::Error {
    anyhow::anyhow!("mock I/O error")
}
