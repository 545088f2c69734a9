//! Output formatting: table, JSON, YAML.
//!
//! Renders use-case results in the format selected by `--output`. Table
//! uses `tabled`; structured formats serialize the `ResponseEnvelope`.

use std::io::{self, IsTerminal, Write};

use bytesize::ByteSize;
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use rosmon_core::{ResponseEnvelope, TelemetrySnapshot, UseCaseResult};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn paint_warning(text: &str, color: bool) -> String {
    if color {
        text.yellow().bold().to_string()
    } else {
        text.to_owned()
    }
}

fn paint_ok(text: &str, color: bool) -> String {
    if color {
        text.green().to_string()
    } else {
        text.to_owned()
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a use-case result in the chosen format.
///
/// Structured formats always emit the full envelope, including failures.
/// Table format renders successes only; failures surface as errors.
pub fn render_result(
    format: OutputFormat,
    result: &UseCaseResult,
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(match result {
            UseCaseResult::Success { data, warnings } => render_detail(data, warnings, color),
            UseCaseResult::Failure(_) => String::new(),
        }),
        OutputFormat::Json => render_json(&ResponseEnvelope::from(result.clone()), false),
        OutputFormat::JsonCompact => render_json(&ResponseEnvelope::from(result.clone()), true),
        OutputFormat::Yaml => render_yaml(&ResponseEnvelope::from(result.clone())),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Table renderers ──────────────────────────────────────────────────

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(field: &'static str, value: impl Into<String>) -> FieldRow {
    FieldRow {
        field,
        value: value.into(),
    }
}

/// Used / total with the derived percentage, e.g. `96.5 MiB / 128.0 MiB (75.4%)`.
fn usage(used: u64, total: u64, percent: f64) -> String {
    format!("{} / {} ({percent:.1}%)", ByteSize::b(used), ByteSize::b(total))
}

fn render_detail(snapshot: &TelemetrySnapshot, warnings: &[String], color: bool) -> String {
    let rows = vec![
        row("Board", &snapshot.board_name),
        row("Platform", &snapshot.platform),
        row("Architecture", &snapshot.architecture),
        row("Version", &snapshot.version),
        row("Build time", &snapshot.build_time),
        row("Factory firmware", &snapshot.factory_firmware),
        row("Uptime", &snapshot.uptime),
        row(
            "CPU",
            format!(
                "{} x{} @ {} MHz",
                snapshot.cpu_model, snapshot.cpu_count, snapshot.cpu_frequency
            ),
        ),
        row("CPU load", format!("{}%", snapshot.cpu_load_percent)),
        row(
            "Memory",
            usage(
                snapshot.used_memory_bytes(),
                snapshot.total_memory_bytes,
                snapshot.memory_usage_percent(),
            ),
        ),
        row(
            "Disk",
            usage(
                snapshot.used_disk_bytes(),
                snapshot.total_disk_bytes,
                snapshot.disk_usage_percent(),
            ),
        ),
        row(
            "Sectors written",
            format!(
                "{} total, {} since reboot",
                snapshot.write_sectors_total, snapshot.write_sectors_since_reboot
            ),
        ),
        row("Bad blocks", snapshot.bad_blocks.to_string()),
    ];

    let mut out = Table::new(rows).with(Style::rounded()).to_string();
    for warning in warnings {
        out.push('\n');
        out.push_str(&paint_warning(&format!("! {warning}"), color));
    }
    out
}

/// One line per poll for `watch`.
pub fn render_tick(host: &str, result: &UseCaseResult, color: bool) -> String {
    let stamp = chrono::Local::now().format("%H:%M:%S");
    match result {
        UseCaseResult::Success { data, warnings } => {
            let status = if warnings.is_empty() {
                paint_ok("ok", color)
            } else {
                paint_warning(&warnings.join("; "), color)
            };
            format!(
                "{stamp}  {host}  cpu {:>3}%  mem {:>5.1}%  disk {:>5.1}%  up {}  {status}",
                data.cpu_load_percent,
                data.memory_usage_percent(),
                data.disk_usage_percent(),
                data.uptime,
            )
        }
        UseCaseResult::Failure(failure) => {
            let reason = if color {
                failure.reason.red().to_string()
            } else {
                failure.reason.clone()
            };
            format!("{stamp}  {host}  {reason}")
        }
    }
}

#[derive(Tabled)]
struct RouterRow {
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Board")]
    board: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
    #[tabled(rename = "Last seen")]
    last_seen: String,
}

/// Summary table of known routers.
pub fn render_routers(routers: &[rosmon_core::RouterInfo]) -> String {
    let rows: Vec<RouterRow> = routers
        .iter()
        .map(|r| RouterRow {
            host: r.host.clone(),
            board: r.board_name.clone(),
            version: r.version.clone(),
            uptime: r.uptime.clone(),
            last_seen: r
                .last_updated
                .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Render {
        message: e.to_string(),
    })
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render {
        message: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rosmon_core::FailureKind;

    use super::*;

    fn snapshot() -> TelemetrySnapshot {
        TelemetrySnapshot {
            board_name: "hAP ac^2".into(),
            version: "7.14.3".into(),
            free_memory_bytes: 32 * 1024 * 1024,
            total_memory_bytes: 128 * 1024 * 1024,
            cpu_load_percent: 15,
            ..TelemetrySnapshot::default()
        }
    }

    #[test]
    fn table_lists_fields_and_warnings() {
        let result = UseCaseResult::success(snapshot(), vec!["critical cpu usage: 95%".into()]);
        let out = render_result(OutputFormat::Table, &result, false).unwrap();

        assert!(out.contains("hAP ac^2"));
        assert!(out.contains("96.0 MiB / 128.0 MiB (75.0%)"));
        assert!(out.contains("! critical cpu usage: 95%"));
    }

    #[test]
    fn table_failure_renders_nothing() {
        let result = UseCaseResult::failure(FailureKind::Connection, "unable to connect to router at x");
        assert!(render_result(OutputFormat::Table, &result, false).unwrap().is_empty());
    }

    #[test]
    fn json_emits_envelope() {
        let result = UseCaseResult::success(snapshot(), Vec::new());
        let out = render_result(OutputFormat::JsonCompact, &result, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["board_name"], "hAP ac^2");
        assert_eq!(value["data"]["memory_usage_percent"], 75.0);
        assert!(value["error_message"].is_null());
    }

    #[test]
    fn yaml_emits_failure_envelope() {
        let result = UseCaseResult::failure(FailureKind::Transport, "failed to retrieve system resource data");
        let out = render_result(OutputFormat::Yaml, &result, false).unwrap();

        assert!(out.contains("success: false"));
        assert!(out.contains("error_message: failed to retrieve system resource data"));
        assert!(out.contains("failure_kind: transport"));
    }

    #[test]
    fn tick_line() {
        let ok = UseCaseResult::success(snapshot(), Vec::new());
        let line = render_tick("10.0.0.1", &ok, false);
        assert!(line.contains("10.0.0.1"));
        assert!(line.contains("cpu  15%"));
        assert!(line.ends_with("ok"));

        let failed = UseCaseResult::failure(FailureKind::Connection, "unable to connect to router at 10.0.0.1");
        assert!(render_tick("10.0.0.1", &failed, false).ends_with("unable to connect to router at 10.0.0.1"));
    }
}
