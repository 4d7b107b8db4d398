// Serial driver for the Roomba Open Interface (OI)
//
// Provides:
// - OI command frame construction and fixed-width sensor decoding
// - Serial transport (115200 8N1) plus a scripted mock for tests
// - High-level driver API: operating modes, motion maneuvers, battery telemetry

pub mod config;
pub mod error;
pub mod oi;
pub mod status;
pub mod transport;

pub use error::{OiError, Result};
pub use oi::{OiMode, RoombaDriver};
pub use status::BatteryStatus;
pub use transport::{MockTransport, SerialTransport, Transport};
