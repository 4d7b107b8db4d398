// Open Interface module
//
// Provides:
// - Wire protocol: opcodes, frame building, velocity and sensor codecs
// - High-level driver API (modes, maneuvers, battery telemetry)

mod driver;
pub mod protocol;

pub use driver::{OiMode, RoombaDriver};
pub use protocol::{Opcode, SensorPacket};
