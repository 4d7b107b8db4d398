// Roomba Open Interface wire protocol
//
// Every command is one opcode byte followed by a fixed-length payload:
// [Opcode, Param1, ..., ParamN]
// Multi-byte parameters are 16-bit big-endian; velocities and radii are
// two's complement, sensor replies are unsigned.

use crate::error::{OiError, Result};

/// Velocity/radius limits accepted by the Drive commands (mm/s, mm)
pub const VELOCITY_MIN: i16 = -500;
pub const VELOCITY_MAX: i16 = 500;

/// Drive radius bytes for straight-line motion, as the device accepts them
pub const STRAIGHT_RADIUS: [u8; 2] = [100, 0];

/// Reserved Drive radius: spin in place, counter-clockwise
pub const SPIN_CCW_RADIUS: i16 = 1;

/// Reserved Drive radius bytes meaning "stop" (the 0x8000 sentinel)
pub const STOP_RADIUS: [u8; 2] = [0x80, 0x00];

/// LED select bits and power-LED intensity used by the driver
pub const LED_SELECT: u8 = 4;
pub const LED_INTENSITY: u8 = 128;

/// OI command opcodes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Start = 128,
    Safe = 131,
    Full = 132,
    Power = 133,
    Spot = 134,
    Clean = 135,
    Max = 136,
    Drive = 137,
    Leds = 139,
    Sensors = 142,
    SeekDock = 143,
    DriveDirect = 145,
}

impl Opcode {
    /// Declared payload arity in bytes
    pub fn payload_len(self) -> usize {
        match self {
            Opcode::Drive | Opcode::DriveDirect => 4,
            Opcode::Leds => 3,
            Opcode::Sensors => 1,
            _ => 0,
        }
    }
}

/// Sensor packet ids understood by the Sensors query
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorPacket {
    BatteryCharge = 25,
    BatteryCapacity = 26,
    OiMode = 35,
}

impl SensorPacket {
    /// Fixed width of the device's reply in bytes
    pub fn reply_len(self) -> usize {
        match self {
            SensorPacket::OiMode => 1,
            SensorPacket::BatteryCharge | SensorPacket::BatteryCapacity => 2,
        }
    }
}

/// Build a command frame: opcode byte followed by its payload
///
/// Rejects the frame before transmission when the payload length does not
/// match the opcode's declared arity. Output is byte-exact, no padding.
pub fn build_frame(opcode: Opcode, payload: &[u8]) -> Result<Vec<u8>> {
    let expected = opcode.payload_len();
    if payload.len() != expected {
        return Err(OiError::PayloadLength {
            opcode: opcode as u8,
            expected,
            actual: payload.len(),
        });
    }

    let mut frame = Vec::with_capacity(1 + payload.len());
    frame.push(opcode as u8);
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Encode a velocity or radius as 16-bit big-endian two's complement
pub fn encode_velocity(value: i16) -> Result<[u8; 2]> {
    if !(VELOCITY_MIN..=VELOCITY_MAX).contains(&value) {
        return Err(OiError::VelocityOutOfRange { value });
    }
    Ok(value.to_be_bytes())
}

/// Decode a 16-bit big-endian two's-complement velocity
pub fn decode_velocity(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Decode a 16-bit big-endian unsigned sensor reply
pub fn decode_u16_be(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

/// Battery charge as a percentage of capacity
///
/// A zero capacity is reported as an error rather than relying on float
/// division semantics.
pub fn battery_percentage(charge: u16, capacity: u16) -> Result<f32> {
    if capacity == 0 {
        return Err(OiError::ZeroCapacity);
    }
    Ok(f32::from(charge) / f32::from(capacity) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_round_trips_over_full_range() {
        for v in VELOCITY_MIN..=VELOCITY_MAX {
            let bytes = encode_velocity(v).unwrap();
            assert_eq!(decode_velocity(bytes), v, "round trip failed for {}", v);
        }
    }

    #[test]
    fn velocity_bounds() {
        assert!(encode_velocity(500).is_ok());
        assert!(encode_velocity(-500).is_ok());
        assert!(matches!(
            encode_velocity(501),
            Err(OiError::VelocityOutOfRange { value: 501 })
        ));
        assert!(matches!(
            encode_velocity(-501),
            Err(OiError::VelocityOutOfRange { value: -501 })
        ));
    }

    #[test]
    fn velocity_twos_complement_bytes() {
        assert_eq!(encode_velocity(0).unwrap(), [0, 0]);
        assert_eq!(encode_velocity(200).unwrap(), [0, 200]);
        // -200 = 0xFF38 as a 16-bit word
        assert_eq!(encode_velocity(-200).unwrap(), [255, 56]);
        assert_eq!(encode_velocity(-1).unwrap(), [0xFF, 0xFF]);
        assert_eq!(encode_velocity(500).unwrap(), [0x01, 0xF4]);
        assert_eq!(encode_velocity(-500).unwrap(), [0xFE, 0x0C]);
    }

    #[test]
    fn frame_arity_is_enforced() {
        assert!(build_frame(Opcode::Drive, &[0, 0, 128]).is_err());
        assert!(build_frame(Opcode::Drive, &[0, 0, 128, 0, 0]).is_err());
        assert!(build_frame(Opcode::Start, &[1]).is_err());

        let err = build_frame(Opcode::DriveDirect, &[1, 2]).unwrap_err();
        match err {
            OiError::PayloadLength {
                opcode,
                expected,
                actual,
            } => {
                assert_eq!(opcode, 145);
                assert_eq!(expected, 4);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn frame_is_opcode_then_payload() {
        assert_eq!(
            build_frame(Opcode::Drive, &[0, 200, 0, 100]).unwrap(),
            vec![137, 0, 200, 0, 100]
        );
        assert_eq!(build_frame(Opcode::Start, &[]).unwrap(), vec![128]);
        assert_eq!(build_frame(Opcode::Sensors, &[35]).unwrap(), vec![142, 35]);
    }

    #[test]
    fn sensor_decode_is_big_endian_unsigned() {
        assert_eq!(decode_u16_be([0x01, 0x2C]), 300);
        assert_eq!(decode_u16_be([0x00, 0x00]), 0);
        assert_eq!(decode_u16_be([0xFF, 0xFF]), 65535);
        // High values stay unsigned, not reinterpreted as negative
        assert_eq!(decode_u16_be([0x80, 0x00]), 32768);
    }

    #[test]
    fn percentage_math() {
        assert_eq!(battery_percentage(50, 100).unwrap(), 50.0);
        assert_eq!(battery_percentage(2600, 2600).unwrap(), 100.0);
        assert!(matches!(
            battery_percentage(1, 0),
            Err(OiError::ZeroCapacity)
        ));
    }

    #[test]
    fn opcode_wire_values() {
        assert_eq!(Opcode::Start as u8, 128);
        assert_eq!(Opcode::Safe as u8, 131);
        assert_eq!(Opcode::Full as u8, 132);
        assert_eq!(Opcode::Power as u8, 133);
        assert_eq!(Opcode::Drive as u8, 137);
        assert_eq!(Opcode::DriveDirect as u8, 145);
        assert_eq!(SensorPacket::OiMode as u8, 35);
        assert_eq!(SensorPacket::BatteryCharge as u8, 25);
        assert_eq!(SensorPacket::BatteryCapacity as u8, 26);
    }

    #[test]
    fn reply_widths() {
        assert_eq!(SensorPacket::OiMode.reply_len(), 1);
        assert_eq!(SensorPacket::BatteryCharge.reply_len(), 2);
        assert_eq!(SensorPacket::BatteryCapacity.reply_len(), 2);
    }
}
