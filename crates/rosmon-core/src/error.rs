// ── Core error types ──
//
// Errors from rosmon-core. These are NOT transport-specific -- callers
// never see HTTP status codes or JSON parse failures directly. The
// `connect` / `fetch` constructors translate `rosmon_api::Error` into
// host- or path-qualified variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to router at {host}: {reason}")]
    ConnectionFailed { host: String, reason: String },

    #[error("Authentication failed for router at {host}: {message}")]
    AuthenticationFailed { host: String, message: String },

    #[error("Router connection timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Transport errors ─────────────────────────────────────────────
    #[error("Fetching {path} failed: {reason}")]
    TransportFailed { path: String, reason: String },

    #[error("Router returned no records for {path}")]
    EmptyResponse { path: String },

    // ── Storage errors ───────────────────────────────────────────────
    #[error("Router info store rejected update for {host}: {reason}")]
    Storage { host: String, reason: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Translate a failure to open a session with `host`.
    pub fn connect(host: &str, err: rosmon_api::Error) -> Self {
        match err {
            rosmon_api::Error::Authentication { message } => Self::AuthenticationFailed {
                host: host.to_owned(),
                message,
            },
            rosmon_api::Error::Timeout { timeout_secs } => Self::Timeout { timeout_secs },
            other => Self::ConnectionFailed {
                host: host.to_owned(),
                reason: other.to_string(),
            },
        }
    }

    /// Translate a failure while reading `path` over an open session.
    pub fn fetch(path: &str, err: rosmon_api::Error) -> Self {
        match err {
            rosmon_api::Error::Timeout { timeout_secs } => Self::Timeout { timeout_secs },
            other => Self::TransportFailed {
                path: path.to_owned(),
                reason: other.to_string(),
            },
        }
    }

    /// Returns `true` if no session could be established.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::AuthenticationFailed { .. } | Self::Timeout { .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn connect_maps_auth_and_timeout() {
        let err = CoreError::connect(
            "10.0.0.1",
            rosmon_api::Error::Authentication {
                message: "nope".into(),
            },
        );
        assert!(matches!(err, CoreError::AuthenticationFailed { ref host, .. } if host == "10.0.0.1"));
        assert!(err.is_connection());

        let err = CoreError::connect("10.0.0.1", rosmon_api::Error::Timeout { timeout_secs: 5 });
        assert!(matches!(err, CoreError::Timeout { timeout_secs: 5 }));
    }

    #[test]
    fn connect_qualifies_other_failures_with_host() {
        let err = CoreError::connect("10.0.0.1", rosmon_api::Error::Tls("bad cert".into()));
        assert!(err.to_string().contains("10.0.0.1"));
        assert!(err.to_string().contains("bad cert"));
    }

    #[test]
    fn fetch_keeps_path() {
        let err = CoreError::fetch(
            "/system/resource",
            rosmon_api::Error::Api {
                status: 500,
                message: "oops".into(),
            },
        );
        assert!(matches!(err, CoreError::TransportFailed { ref path, .. } if path == "/system/resource"));
        assert!(!err.is_connection());
    }
}
