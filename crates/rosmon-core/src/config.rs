// ── Runtime connection configuration ──
//
// Describes *how* to reach one RouterOS device. Carries credential data
// and connection tuning, but never touches disk: the CLI (or any other
// caller) builds a `ConnectionConfig` and threads it into the repository.

use std::time::Duration;

use secrecy::SecretString;

use rosmon_api::{Endpoint, TlsMode};

/// Port of the plain-HTTP `www` service.
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Port of the `www-ssl` service.
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// Default budget for connect + fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for a single device.
///
/// Immutable once built; owned by the caller and borrowed by the
/// repository and use cases.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Hostname or IP address of the device.
    pub host: String,
    pub username: String,
    /// Never printed by `Debug`.
    pub password: SecretString,
    pub port: u16,
    pub use_tls: bool,
    /// Only meaningful with `use_tls`.
    pub verify_tls: bool,
    /// Single shared budget for connect + fetch.
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Plain-HTTP config on the default port with a 5s timeout.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password,
            port: DEFAULT_HTTP_PORT,
            use_tls: false,
            verify_tls: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Switch to HTTPS. Moves the port to 443 unless a custom port was set.
    pub fn with_tls(mut self, verify: bool) -> Self {
        if self.port == DEFAULT_HTTP_PORT {
            self.port = DEFAULT_HTTPS_PORT;
        }
        self.use_tls = true;
        self.verify_tls = verify;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn tls_mode(&self) -> TlsMode {
        TlsMode::from_flags(self.use_tls, self.verify_tls)
    }

    /// Translate into the transport-level endpoint.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            tls: self.tls_mode(),
            timeout: self.timeout,
        }
    }
}
