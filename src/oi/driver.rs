// High-level OI driver
//
// Composes the wire protocol with an owned transport to provide named
// operations: mode changes, cleaning cycles, motion maneuvers, and battery
// telemetry. All I/O is synchronous and blocking; the driver owns its
// transport exclusively for its whole lifetime.

use std::thread;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::protocol::{
    self, LED_INTENSITY, LED_SELECT, Opcode, SPIN_CCW_RADIUS, STOP_RADIUS, STRAIGHT_RADIUS,
    SensorPacket,
};
use crate::config::{BAUD_RATE, HALF_TURN_DURATION, HALF_TURN_SPEED};
use crate::error::{OiError, Result};
use crate::status::BatteryStatus;
use crate::transport::{SerialTransport, Transport};

/// OI operating modes, with the values the mode sensor reports
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OiMode {
    Off = 0,
    Passive = 1,
    Safe = 2,
    Full = 3,
}

impl OiMode {
    /// Single-byte command that requests this mode
    fn command(self) -> Opcode {
        match self {
            OiMode::Off => Opcode::Power,
            OiMode::Passive => Opcode::Start,
            OiMode::Safe => Opcode::Safe,
            OiMode::Full => Opcode::Full,
        }
    }
}

impl TryFrom<u8> for OiMode {
    type Error = OiError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(OiMode::Off),
            1 => Ok(OiMode::Passive),
            2 => Ok(OiMode::Safe),
            3 => Ok(OiMode::Full),
            value => Err(OiError::InvalidMode { value }),
        }
    }
}

/// Driver for a robot speaking the OI protocol over a serial transport
///
/// The device ignores everything until it has seen Start (opcode 128), so
/// [`start`](Self::start) must be the first call after power-on; the driver
/// documents this contract rather than enforcing it. Actuator commands
/// additionally require SAFE or FULL mode.
pub struct RoombaDriver<T: Transport> {
    transport: T,
    // Last mode command issued; never read back from the device
    mode: OiMode,
}

impl RoombaDriver<SerialTransport> {
    /// Open the default serial configuration on the given port
    pub fn open(port: &str) -> Result<Self> {
        Self::open_with_baudrate(port, BAUD_RATE)
    }

    /// Open with a custom baud rate
    pub fn open_with_baudrate(port: &str, baud_rate: u32) -> Result<Self> {
        Ok(Self::new(SerialTransport::open(port, baud_rate)?))
    }
}

impl<T: Transport> RoombaDriver<T> {
    /// Wrap an already-open transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            mode: OiMode::Off,
        }
    }

    /// Validate and write one command frame
    fn send(&mut self, opcode: Opcode, payload: &[u8]) -> Result<()> {
        let frame = protocol::build_frame(opcode, payload)?;
        debug!("OI write {:?}: {:?}", opcode, frame);
        self.transport.write(&frame)
    }

    // === Operating modes ===

    /// Enter PASSIVE mode. Must be the first command after power-on.
    pub fn start(&mut self) -> Result<()> {
        self.set_mode(OiMode::Passive)
    }

    /// Issue the single-byte command for the requested mode
    pub fn set_mode(&mut self, mode: OiMode) -> Result<()> {
        info!("Setting OI mode: {:?}", mode);
        self.send(mode.command(), &[])?;
        self.mode = mode;
        Ok(())
    }

    /// Power the robot down
    pub fn power_off(&mut self) -> Result<()> {
        self.set_mode(OiMode::Off)
    }

    /// Last mode command issued (not verified against the device)
    pub fn last_mode(&self) -> OiMode {
        self.mode
    }

    // === Cleaning cycles ===

    /// Start a standard cleaning cycle
    pub fn clean(&mut self) -> Result<()> {
        self.send(Opcode::Clean, &[])
    }

    /// Start a spot cleaning cycle
    pub fn spot(&mut self) -> Result<()> {
        self.send(Opcode::Spot, &[])
    }

    /// Start a max-duration cleaning cycle
    pub fn max_clean(&mut self) -> Result<()> {
        self.send(Opcode::Max, &[])
    }

    /// Drive to the charging dock
    pub fn seek_dock(&mut self) -> Result<()> {
        self.send(Opcode::SeekDock, &[])
    }

    // === Motion ===

    /// Drive along an arc: velocity in mm/s, turning radius in mm
    ///
    /// Both arguments are range-checked to [-500, 500] before any bytes are
    /// written.
    pub fn drive(&mut self, velocity: i16, radius: i16) -> Result<()> {
        let v = protocol::encode_velocity(velocity)?;
        let r = protocol::encode_velocity(radius)?;
        self.send(Opcode::Drive, &[v[0], v[1], r[0], r[1]])
    }

    /// Drive the wheels independently: velocities in mm/s
    pub fn drive_direct(&mut self, right: i16, left: i16) -> Result<()> {
        let r = protocol::encode_velocity(right)?;
        let l = protocol::encode_velocity(left)?;
        self.send(Opcode::DriveDirect, &[r[0], r[1], l[0], l[1]])
    }

    /// Stop the wheels using the reserved stop radius
    pub fn stop(&mut self) -> Result<()> {
        self.send(Opcode::Drive, &[0, 0, STOP_RADIUS[0], STOP_RADIUS[1]])
    }

    /// Drive straight ahead at `speed` mm/s
    pub fn go_ahead(&mut self, speed: i16) -> Result<()> {
        let v = protocol::encode_velocity(speed)?;
        self.send(
            Opcode::Drive,
            &[v[0], v[1], STRAIGHT_RADIUS[0], STRAIGHT_RADIUS[1]],
        )
    }

    /// Drive straight back at `speed` mm/s
    pub fn go_back(&mut self, speed: i16) -> Result<()> {
        self.go_ahead(speed.saturating_neg())
    }

    /// Turn left in place: right wheel forward, left wheel back
    pub fn turn_left(&mut self, speed: i16) -> Result<()> {
        self.drive_direct(speed, speed.saturating_neg())
    }

    /// Turn right in place: left wheel forward, right wheel back
    pub fn turn_right(&mut self, speed: i16) -> Result<()> {
        self.drive_direct(speed.saturating_neg(), speed)
    }

    /// Rotate roughly 180 degrees, open loop
    ///
    /// Spins counter-clockwise for a fixed interval and stops. The whole
    /// call blocks the current thread; accuracy depends on surface and
    /// battery condition.
    pub fn turn_in_place(&mut self) -> Result<()> {
        self.drive(HALF_TURN_SPEED, SPIN_CCW_RADIUS)?;
        thread::sleep(HALF_TURN_DURATION);
        self.stop()
    }

    /// Set the power LED color (0 = green, 255 = red)
    ///
    /// LED select bits and intensity keep fixed values.
    pub fn set_leds(&mut self, color: u8) -> Result<()> {
        self.send(Opcode::Leds, &[LED_SELECT, color, LED_INTENSITY])
    }

    // === Telemetry ===

    /// Send a sensor query and block-read its fixed-width reply
    fn query(&mut self, packet: SensorPacket) -> Result<Vec<u8>> {
        self.send(Opcode::Sensors, &[packet as u8])?;
        let mut reply = Vec::with_capacity(packet.reply_len());
        for _ in 0..packet.reply_len() {
            reply.push(self.transport.read_byte()?);
        }
        Ok(reply)
    }

    fn query_u16(&mut self, packet: SensorPacket) -> Result<u16> {
        let reply = self.query(packet)?;
        Ok(protocol::decode_u16_be([reply[0], reply[1]]))
    }

    /// Query the mode the device itself reports
    pub fn oi_mode(&mut self) -> Result<OiMode> {
        let reply = self.query(SensorPacket::OiMode)?;
        OiMode::try_from(reply[0])
    }

    /// Current battery charge in mAh
    pub fn battery_charge(&mut self) -> Result<u16> {
        self.query_u16(SensorPacket::BatteryCharge)
    }

    /// Battery capacity in mAh
    pub fn battery_capacity(&mut self) -> Result<u16> {
        self.query_u16(SensorPacket::BatteryCapacity)
    }

    /// Battery charge as a percentage of capacity
    pub fn battery_percentage(&mut self) -> Result<f32> {
        let charge = self.battery_charge()?;
        let capacity = self.battery_capacity()?;
        protocol::battery_percentage(charge, capacity)
    }

    /// Snapshot of charge, capacity and percentage
    pub fn battery_status(&mut self) -> Result<BatteryStatus> {
        let charge = self.battery_charge()?;
        let capacity = self.battery_capacity()?;
        let percentage = protocol::battery_percentage(charge, capacity)?;
        Ok(BatteryStatus {
            charge_mah: charge,
            capacity_mah: capacity,
            percentage,
        })
    }

    // === Lifecycle ===

    /// Ordered shutdown: stop the wheels, power down, release the transport
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()?;
        self.power_off()
    }
}

impl<T: Transport> Drop for RoombaDriver<T> {
    fn drop(&mut self) {
        // No mode command ever issued (or already powered down): the device
        // is not acting on our behalf, nothing to undo.
        if self.mode == OiMode::Off {
            return;
        }
        // Best effort: never leave the wheels running
        if let Err(e) = self.stop() {
            warn!("Failed to stop wheels on drop: {}", e);
        }
    }
}
