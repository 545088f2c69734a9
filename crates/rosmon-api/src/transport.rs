// Shared transport configuration for building reqwest::Client instances.
//
// Every device session gets its own client built from this config, so
// TLS and timeout handling live in one place.

use std::time::Duration;

/// TLS mode for a device session (api-level mirror of the core's
/// `use_tls` / `verify_tls` flags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Plain HTTP (`www` service on the device).
    #[default]
    Plain,
    /// HTTPS with certificate verification against the system store.
    Verified,
    /// HTTPS accepting any certificate (self-signed `www-ssl` service).
    DangerAcceptInvalid,
}

impl TlsMode {
    /// Derive the mode from the two config flags.
    ///
    /// `verify` is ignored when TLS is disabled.
    pub fn from_flags(use_tls: bool, verify: bool) -> Self {
        match (use_tls, verify) {
            (false, _) => Self::Plain,
            (true, true) => Self::Verified,
            (true, false) => Self::DangerAcceptInvalid,
        }
    }

    /// URL scheme for this mode.
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Plain => "http",
            Self::Verified | Self::DangerAcceptInvalid => "https",
        }
    }
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Budget for a single request, connect included.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::Plain,
            timeout: Duration::from_secs(5),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .user_agent(concat!("rosmon/", env!("CARGO_PKG_VERSION")));

        match self.tls {
            TlsMode::Plain | TlsMode::Verified => {}
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tls_mode_from_flags() {
        assert_eq!(TlsMode::from_flags(false, true), TlsMode::Plain);
        assert_eq!(TlsMode::from_flags(false, false), TlsMode::Plain);
        assert_eq!(TlsMode::from_flags(true, true), TlsMode::Verified);
        assert_eq!(
            TlsMode::from_flags(true, false),
            TlsMode::DangerAcceptInvalid
        );
    }

    #[test]
    fn scheme_follows_tls() {
        assert_eq!(TlsMode::Plain.scheme(), "http");
        assert_eq!(TlsMode::Verified.scheme(), "https");
        assert_eq!(TlsMode::DangerAcceptInvalid.scheme(), "https");
    }
}
