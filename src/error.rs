// Error types for OI communication

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, OiError>;

/// Errors raised by the OI driver
#[derive(Debug, thiserror::Error)]
pub enum OiError {
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Velocity {value} outside [-500, 500] mm/s")]
    VelocityOutOfRange { value: i16 },

    #[error("Opcode {opcode} expects {expected} payload bytes, got {actual}")]
    PayloadLength {
        opcode: u8,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid OI mode value: {value}")]
    InvalidMode { value: u8 },

    #[error("Battery capacity is zero, percentage undefined")]
    ZeroCapacity,
}
