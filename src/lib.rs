// Gamepad teleoperation runtime for a tracked UGV base.
//
// A gamepad listener, a fixed-rate drive loop and a serial command writer
// run as parallel units of work, sharing only `ControllerState` and the
// command queue. `runtime::run` wires them together.

pub mod config;
pub mod gamepad;
pub mod messages;
pub mod range;
pub mod runtime;
pub mod state;
pub mod tracks;
pub mod transport;
