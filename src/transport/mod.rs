// Byte-level transport abstraction
//
// The OI driver owns exactly one transport for its lifetime and drives it
// synchronously: every command is a blocking write, every sensor reply a
// blocking read. The trait keeps the driver testable without hardware.

mod mock;
mod serial;

pub use mock::MockTransport;
pub use serial::SerialTransport;

use crate::error::Result;

/// Blocking byte-level serial capability
pub trait Transport {
    /// Write all bytes, flushing before returning
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Read a single byte, blocking until one arrives
    fn read_byte(&mut self) -> Result<u8>;
}
