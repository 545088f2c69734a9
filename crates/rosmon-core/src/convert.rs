// ── Record-to-domain conversion ──
//
// Bridges raw `rosmon_api::Record`s (attribute name -> display string)
// into `TelemetrySnapshot`. Every field is looked up with an empty-string
// default and routed through the matching unit parser, so normalization
// is total: a degenerate record still yields a fully populated snapshot.

use rosmon_api::Record;

use crate::model::TelemetrySnapshot;
use crate::parse::{parse_byte_size, parse_float, parse_percent, parse_uint};

/// RouterOS attribute names under `/system/resource`.
///
/// Where firmware versions disagree on spelling, the first name listed is
/// preferred and the rest are fallbacks.
mod keys {
    pub const UPTIME: &[&str] = &["uptime"];
    pub const VERSION: &[&str] = &["version"];
    pub const BUILD_TIME: &[&str] = &["build-time"];
    pub const FACTORY_FIRMWARE: &[&str] = &["factory-firmware", "factory-software"];
    pub const FREE_MEMORY: &[&str] = &["free-memory"];
    pub const TOTAL_MEMORY: &[&str] = &["total-memory"];
    pub const CPU: &[&str] = &["cpu"];
    pub const CPU_COUNT: &[&str] = &["cpu-count"];
    pub const CPU_FREQUENCY: &[&str] = &["cpu-frequency"];
    pub const CPU_LOAD: &[&str] = &["cpu-load"];
    pub const FREE_HDD: &[&str] = &["free-hdd-space"];
    pub const TOTAL_HDD: &[&str] = &["total-hdd-space"];
    pub const WRITE_SECT_TOTAL: &[&str] = &["write-sector-total", "write-sect-total"];
    pub const WRITE_SECT_SINCE_REBOOT: &[&str] =
        &["write-sector-since-reboot", "write-sect-since-reboot"];
    pub const BAD_BLOCKS: &[&str] = &["bad-blocks"];
    pub const ARCHITECTURE: &[&str] = &["architecture-name"];
    pub const BOARD_NAME: &[&str] = &["board-name"];
    pub const PLATFORM: &[&str] = &["platform"];
}

/// First present value among `names`, or `""`.
fn field<'a>(record: &'a Record, names: &[&str]) -> &'a str {
    names
        .iter()
        .find_map(|name| record.get(*name))
        .map_or("", String::as_str)
}

fn text(record: &Record, names: &[&str]) -> String {
    field(record, names).to_owned()
}

/// Map a `/system/resource` record into a snapshot. Never fails.
pub fn normalize(record: &Record) -> TelemetrySnapshot {
    TelemetrySnapshot {
        uptime: text(record, keys::UPTIME),
        version: text(record, keys::VERSION),
        build_time: text(record, keys::BUILD_TIME),
        factory_firmware: text(record, keys::FACTORY_FIRMWARE),
        free_memory_bytes: parse_byte_size(field(record, keys::FREE_MEMORY)),
        total_memory_bytes: parse_byte_size(field(record, keys::TOTAL_MEMORY)),
        cpu_model: text(record, keys::CPU),
        cpu_count: u32::try_from(parse_uint(field(record, keys::CPU_COUNT))).unwrap_or(0),
        cpu_frequency: parse_float(field(record, keys::CPU_FREQUENCY)),
        cpu_load_percent: parse_percent(field(record, keys::CPU_LOAD)),
        free_disk_bytes: parse_byte_size(field(record, keys::FREE_HDD)),
        total_disk_bytes: parse_byte_size(field(record, keys::TOTAL_HDD)),
        write_sectors_total: parse_uint(field(record, keys::WRITE_SECT_TOTAL)),
        write_sectors_since_reboot: parse_uint(field(record, keys::WRITE_SECT_SINCE_REBOOT)),
        bad_blocks: parse_uint(field(record, keys::BAD_BLOCKS)),
        architecture: text(record, keys::ARCHITECTURE),
        board_name: text(record, keys::BOARD_NAME),
        platform: text(record, keys::PLATFORM),
    }
}

impl From<&Record> for TelemetrySnapshot {
    fn from(record: &Record) -> Self {
        normalize(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn hap_ac2() -> Record {
        record(&[
            ("uptime", "3d7h12m40s"),
            ("version", "7.14.3 (stable)"),
            ("build-time", "2024-04-17 12:47:58"),
            ("factory-firmware", "6.44.6"),
            ("free-memory", "96.5MiB"),
            ("total-memory", "128MiB"),
            ("cpu", "ARMv7"),
            ("cpu-count", "4"),
            ("cpu-frequency", "716"),
            ("cpu-load", "15%"),
            ("free-hdd-space", "1224KiB"),
            ("total-hdd-space", "16MiB"),
            ("write-sector-total", "142231"),
            ("write-sector-since-reboot", "2042"),
            ("bad-blocks", "0"),
            ("architecture-name", "arm"),
            ("board-name", "hAP ac^2"),
            ("platform", "MikroTik"),
        ])
    }

    #[test]
    fn well_formed_record() {
        let s = normalize(&hap_ac2());

        assert_eq!(s.uptime, "3d7h12m40s");
        assert_eq!(s.version, "7.14.3 (stable)");
        assert_eq!(s.build_time, "2024-04-17 12:47:58");
        assert_eq!(s.factory_firmware, "6.44.6");
        assert_eq!(s.free_memory_bytes, 101_187_584);
        assert_eq!(s.total_memory_bytes, 128 * 1024 * 1024);
        assert_eq!(s.cpu_model, "ARMv7");
        assert_eq!(s.cpu_count, 4);
        assert!((s.cpu_frequency - 716.0).abs() < f64::EPSILON);
        assert_eq!(s.cpu_load_percent, 15);
        assert_eq!(s.free_disk_bytes, 1224 * 1024);
        assert_eq!(s.total_disk_bytes, 16 * 1024 * 1024);
        assert_eq!(s.write_sectors_total, 142_231);
        assert_eq!(s.write_sectors_since_reboot, 2042);
        assert_eq!(s.bad_blocks, 0);
        assert_eq!(s.architecture, "arm");
        assert_eq!(s.board_name, "hAP ac^2");
        assert_eq!(s.platform, "MikroTik");
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn derived_percentages_follow_stored_fields() {
        let s = normalize(&hap_ac2());
        let expected = (s.total_memory_bytes - s.free_memory_bytes) as f64 * 100.0
            / s.total_memory_bytes as f64;
        assert!((s.memory_usage_percent() - expected).abs() < 1e-9);
        assert!(s.disk_usage_percent() > 0.0 && s.disk_usage_percent() < 100.0);
    }

    #[test]
    fn normalization_is_idempotent() {
        let r = hap_ac2();
        assert_eq!(normalize(&r), normalize(&r));
        assert_eq!(TelemetrySnapshot::from(&r), normalize(&r));
    }

    #[test]
    fn empty_record_yields_zeroed_snapshot() {
        let s = normalize(&Record::new());
        assert_eq!(s, TelemetrySnapshot::default());
        assert!(s.memory_usage_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn garbage_values_default_to_zero() {
        let s = normalize(&record(&[
            ("free-memory", "lots"),
            ("total-memory", "??"),
            ("cpu-load", "high"),
            ("cpu-count", "-1"),
            ("bad-blocks", "0%"),
            ("board-name", "RB4011"),
        ]));

        assert_eq!(s.free_memory_bytes, 0);
        assert_eq!(s.total_memory_bytes, 0);
        assert_eq!(s.cpu_load_percent, 0);
        assert_eq!(s.cpu_count, 0);
        assert_eq!(s.bad_blocks, 0);
        assert_eq!(s.board_name, "RB4011");
    }

    #[test]
    fn plain_byte_counts_from_rest_api() {
        let s = normalize(&record(&[
            ("free-memory", "912482304"),
            ("total-memory", "1073741824"),
        ]));
        assert_eq!(s.free_memory_bytes, 912_482_304);
        assert_eq!(s.total_memory_bytes, 1_073_741_824);
    }

    #[test]
    fn alternate_attribute_spellings() {
        let s = normalize(&record(&[
            ("factory-software", "7.2"),
            ("write-sect-total", "99"),
            ("write-sect-since-reboot", "5"),
        ]));
        assert_eq!(s.factory_firmware, "7.2");
        assert_eq!(s.write_sectors_total, 99);
        assert_eq!(s.write_sectors_since_reboot, 5);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut r = hap_ac2();
        r.insert("bogus".into(), "value".into());
        assert_eq!(normalize(&r), normalize(&hap_ac2()));
    }
}
