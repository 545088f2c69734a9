//! Clap derive structures for the `rosmon` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rosmon -- telemetry and health checks for MikroTik RouterOS devices
#[derive(Debug, Parser)]
#[command(
    name = "rosmon",
    version,
    about = "Monitor MikroTik RouterOS devices from the command line",
    long_about = "Reads /system/resource telemetry from MikroTik routers over the\n\
        RouterOS REST API and flags critical memory and CPU usage.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Router profile to use
    #[arg(long, short = 'p', env = "ROSMON_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Router hostname or IP address (overrides profile)
    #[arg(long, short = 'H', env = "ROSMON_HOST", global = true)]
    pub host: Option<String>,

    /// REST API port (default: 80, or 443 with --tls)
    #[arg(long, env = "ROSMON_PORT", global = true)]
    pub port: Option<u16>,

    /// Username (overrides profile)
    #[arg(long, short = 'u', env = "ROSMON_USERNAME", global = true)]
    pub username: Option<String>,

    /// Name of an environment variable holding the password
    #[arg(long, value_name = "VAR", global = true)]
    pub password_env: Option<String>,

    /// Connect over HTTPS (www-ssl service)
    #[arg(long, env = "ROSMON_TLS", global = true)]
    pub tls: bool,

    /// Verify the router's TLS certificate (with --tls or a TLS profile)
    #[arg(long, env = "ROSMON_VERIFY_TLS", global = true)]
    pub verify_tls: bool,

    /// Connect + fetch timeout in seconds
    #[arg(long, env = "ROSMON_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ROSMON_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show /system/resource telemetry
    #[command(alias = "res", alias = "r")]
    Resource,

    /// Check memory and CPU usage against critical thresholds
    Health(HealthArgs),

    /// Poll a router repeatedly and report health on every tick
    Watch(WatchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Exit non-zero when any warning is raised
    #[arg(long)]
    pub fail_on_warning: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between polls
    #[arg(long, short = 'i', default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Stop after this many polls (default: run until Ctrl-C)
    #[arg(long, short = 'n')]
    pub count: Option<u64>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
