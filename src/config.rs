// Serial defaults and motion timing
use std::time::Duration;

// Serial port for the robot's OI connector
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

// OI default line settings: 115200 baud, 8 data bits, no parity, 1 stop bit
pub const BAUD_RATE: u32 = 115_200;

// Open-loop half-turn: spin at this speed for this long, then stop.
// Tuned on hard floor; accuracy varies with surface and battery.
pub const HALF_TURN_SPEED: i16 = 226;
pub const HALF_TURN_DURATION: Duration = Duration::from_millis(1600);

// Default speed used by the CLI motion subcommands (mm/s)
pub const DEFAULT_SPEED: i16 = 200;
