//! CLI error types with miette diagnostics.
//!
//! Maps config errors and use-case failures into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use rosmon_config::ConfigError;
use rosmon_core::{Failure, FailureKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const FETCH: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const UNHEALTHY: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Router ───────────────────────────────────────────────────────

    #[error("{reason}")]
    #[diagnostic(
        code(rosmon::connection_failed),
        help(
            "Check that the router is reachable and the REST API is enabled\n\
             (IP > Services > www, or www-ssl with --tls), and that the\n\
             credentials are correct. Rerun with -v for the underlying cause."
        )
    )]
    ConnectionFailed { reason: String },

    #[error("{reason}")]
    #[diagnostic(
        code(rosmon::fetch_failed),
        help("The session opened but /system/resource could not be read. Rerun with -v for details.")
    )]
    FetchFailed { reason: String },

    #[error("{reason}")]
    #[diagnostic(code(rosmon::unexpected))]
    Unexpected { reason: String },

    #[error("{count} health warning(s) raised")]
    #[diagnostic(
        code(rosmon::unhealthy),
        help("Reported because --fail-on-warning was given.")
    )]
    Unhealthy { count: usize },

    // ── Credentials ──────────────────────────────────────────────────

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(rosmon::no_credentials),
        help(
            "Set a username and password in the profile, store the password in\n\
             the system keyring (service 'rosmon', entry '{profile}/password'),\n\
             or set ROUTEROS_USERNAME and ROUTEROS_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(rosmon::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(rosmon::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No router configured")]
    #[diagnostic(
        code(rosmon::no_config),
        help(
            "Pass --host, set ROUTEROS_HOST, or add a profile to the config file.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("{message}")]
    #[diagnostic(code(rosmon::config))]
    Config { message: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(rosmon::render))]
    Render { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::FetchFailed { .. } => exit_code::FETCH,
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Unhealthy { .. } => exit_code::UNHEALTHY,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── Failure → CliError mapping ───────────────────────────────────────

impl From<Failure> for CliError {
    fn from(failure: Failure) -> Self {
        let Failure { kind, reason } = failure;
        match kind {
            FailureKind::Connection => Self::ConnectionFailed { reason },
            FailureKind::Transport => Self::FetchFailed { reason },
            FailureKind::Unexpected => Self::Unexpected { reason },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn failures_map_to_distinct_exit_codes() {
        let connection = CliError::from(Failure {
            kind: FailureKind::Connection,
            reason: "unable to connect to router at 10.0.0.1".into(),
        });
        assert_eq!(connection.exit_code(), exit_code::CONNECTION);
        assert_eq!(connection.to_string(), "unable to connect to router at 10.0.0.1");

        let transport = CliError::from(Failure {
            kind: FailureKind::Transport,
            reason: "failed to retrieve system resource data".into(),
        });
        assert_eq!(transport.exit_code(), exit_code::FETCH);

        let unexpected = CliError::from(Failure {
            kind: FailureKind::Unexpected,
            reason: "health monitoring failed: boom".into(),
        });
        assert_eq!(unexpected.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn config_errors_keep_their_shape() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "lab".into(),
        });
        assert!(matches!(err, CliError::NoCredentials { ref profile } if profile == "lab"));
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
