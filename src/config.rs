// Timings and serial defaults for the teleop runtime
use std::time::Duration;

// Drive loop frequency
pub const LOOP_HZ: u64 = 100;

// Minimum spacing between drive diagnostic log lines
pub const LOG_INTERVAL: Duration = Duration::from_millis(500);

// Serial link to the motor control board
pub const SERIAL_PORT: &str = "/dev/ttyAMA0";
pub const BAUD_RATE: u32 = 115_200;
pub const SERIAL_TIMEOUT: Duration = Duration::from_secs(1);

// How long the listener waits for a controller to pair before giving up
pub const PAIRING_TIMEOUT: Duration = Duration::from_secs(60);

// Poll granularity of the blocking event loop; bounds how quickly the
// pairing timeout is noticed
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);
