// Telemetry report types emitted by the CLI

use serde::Serialize;

/// Battery snapshot: raw charge/capacity readings plus the derived percentage
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BatteryStatus {
    pub charge_mah: u16,
    pub capacity_mah: u16,
    pub percentage: f32,
}
