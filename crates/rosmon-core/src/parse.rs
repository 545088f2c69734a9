// ── Unit parsing ──
//
// RouterOS reports every attribute as a display string. These converters
// are total: malformed or empty input yields zero instead of an error.

/// Binary size suffixes and their multipliers. Case-sensitive.
const BINARY_UNITS: &[(&str, u64)] = &[
    ("KiB", 1024),
    ("MiB", 1024 * 1024),
    ("GiB", 1024 * 1024 * 1024),
];

/// Parse a byte size such as `"128MiB"`, `"1.5GiB"` or `"4096"`.
///
/// Suffixed values may be fractional and are truncated after scaling.
/// Negative, empty or unparsable input yields `0`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
pub fn parse_byte_size(raw: &str) -> u64 {
    let value = raw.trim();
    if value.is_empty() {
        return 0;
    }

    for (suffix, multiplier) in BINARY_UNITS {
        if let Some(number) = value.strip_suffix(suffix) {
            return match number.trim().parse::<f64>() {
                Ok(n) if n.is_finite() && n >= 0.0 => (n * *multiplier as f64) as u64,
                _ => 0,
            };
        }
    }

    parse_uint(value)
}

/// Parse a percentage such as `"15%"` or `"15"`.
///
/// Not clamped: `"150%"` yields 150. Anything outside `u8` (negative
/// or above 255) is treated as unparsable and yields `0`.
pub fn parse_percent(raw: &str) -> u8 {
    raw.trim().trim_matches('%').trim().parse().unwrap_or(0)
}

/// Parse an unsigned integer count. Empty or unparsable input yields `0`.
pub fn parse_uint(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

/// Parse a float such as a CPU frequency (`"800"`, `"1400MHz"`).
/// Empty, unparsable or non-finite input yields `0.0`.
pub fn parse_float(raw: &str) -> f64 {
    let value = raw.trim();
    let value = value.strip_suffix("MHz").unwrap_or(value);
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}
