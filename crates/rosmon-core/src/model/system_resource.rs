// ── System resource telemetry ──

use serde::{Deserialize, Serialize};

/// Usage above this percentage is critical (strictly greater than).
pub const CRITICAL_USAGE_PERCENT: f64 = 90.0;

/// CPU load above this percentage is critical (strictly greater than).
pub const CRITICAL_CPU_LOAD_PERCENT: u8 = 90;

/// Point-in-time snapshot of a router's `/system/resource` counters.
///
/// Built once per successful fetch by the normalizer and never mutated.
/// Byte and count fields are already converted from the device's display
/// strings; anything the device reported in an unparsable form is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Device-formatted duration, e.g. `"1w2d3h4m5s"`.
    pub uptime: String,
    pub version: String,
    pub build_time: String,
    pub factory_firmware: String,
    pub free_memory_bytes: u64,
    pub total_memory_bytes: u64,
    pub cpu_model: String,
    pub cpu_count: u32,
    /// MHz.
    pub cpu_frequency: f64,
    /// 0-100 on well-formed input; not clamped.
    pub cpu_load_percent: u8,
    pub free_disk_bytes: u64,
    pub total_disk_bytes: u64,
    pub write_sectors_total: u64,
    pub write_sectors_since_reboot: u64,
    pub bad_blocks: u64,
    pub architecture: String,
    pub board_name: String,
    pub platform: String,
}

impl TelemetrySnapshot {
    /// Share of memory in use, 0-100. Zero when total is unknown.
    pub fn memory_usage_percent(&self) -> f64 {
        usage_percent(self.total_memory_bytes, self.free_memory_bytes)
    }

    /// Share of storage in use, 0-100. Zero when total is unknown.
    pub fn disk_usage_percent(&self) -> f64 {
        usage_percent(self.total_disk_bytes, self.free_disk_bytes)
    }

    pub fn is_memory_critical(&self) -> bool {
        self.memory_usage_percent() > CRITICAL_USAGE_PERCENT
    }

    pub fn is_cpu_critical(&self) -> bool {
        self.cpu_load_percent > CRITICAL_CPU_LOAD_PERCENT
    }

    pub fn used_memory_bytes(&self) -> u64 {
        self.total_memory_bytes.saturating_sub(self.free_memory_bytes)
    }

    pub fn used_disk_bytes(&self) -> u64 {
        self.total_disk_bytes.saturating_sub(self.free_disk_bytes)
    }
}

/// `(total - free) / total * 100`, saturating so that a free figure larger
/// than the total reads as 0% rather than underflowing.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn usage_percent(total: u64, free: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let used = total.saturating_sub(free);
    used as f64 * 100.0 / total as f64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot(free_mem: u64, total_mem: u64, cpu: u8) -> TelemetrySnapshot {
        TelemetrySnapshot {
            free_memory_bytes: free_mem,
            total_memory_bytes: total_mem,
            cpu_load_percent: cpu,
            ..TelemetrySnapshot::default()
        }
    }

    #[test]
    fn memory_usage_from_stored_fields() {
        let s = snapshot(250, 1000, 0);
        assert!((s.memory_usage_percent() - 75.0).abs() < 1e-9);
        assert_eq!(s.used_memory_bytes(), 750);
    }

    #[test]
    fn zero_total_means_zero_usage() {
        let s = snapshot(0, 0, 0);
        assert!(s.memory_usage_percent().abs() < f64::EPSILON);
        assert!(s.disk_usage_percent().abs() < f64::EPSILON);
        assert!(!s.is_memory_critical());
    }

    #[test]
    fn free_above_total_stays_in_range() {
        let s = snapshot(2000, 1000, 0);
        assert!(s.memory_usage_percent().abs() < f64::EPSILON);
        assert_eq!(s.used_memory_bytes(), 0);
    }

    #[test]
    fn memory_critical_boundary() {
        // Exactly 90% is not critical.
        assert!(!snapshot(100, 1000, 0).is_memory_critical());
        // 90.1% is.
        assert!(snapshot(99, 1000, 0).is_memory_critical());
    }

    #[test]
    fn cpu_critical_boundary() {
        assert!(!snapshot(0, 0, 90).is_cpu_critical());
        assert!(snapshot(0, 0, 91).is_cpu_critical());
    }

    #[test]
    fn disk_usage() {
        let s = TelemetrySnapshot {
            free_disk_bytes: 16 * 1024 * 1024,
            total_disk_bytes: 128 * 1024 * 1024,
            ..TelemetrySnapshot::default()
        };
        assert!((s.disk_usage_percent() - 87.5).abs() < 1e-9);
        assert_eq!(s.used_disk_bytes(), 112 * 1024 * 1024);
    }
}
