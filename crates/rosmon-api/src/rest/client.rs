// RouterOS REST API session
//
// Wraps `reqwest::Client` with RouterOS-specific URL construction, HTTP
// basic auth on every request, and error-envelope unwrapping. One
// `RestSession` talks to exactly one device and is never shared across
// polls.

use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::resource;
use crate::rest::models::{ErrorBody, records_from_json};
use crate::session::{Connector, Endpoint, Record, Session};

/// Opens [`RestSession`]s against the RouterOS v7 REST API (`/rest/...`).
///
/// Stateless: each [`open`](Connector::open) builds a fresh HTTP client.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestConnector;

impl RestConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Connector for RestConnector {
    type Session = RestSession;

    /// Build a client for `endpoint` and verify the credentials by reading
    /// `/system/identity`. Any failure here means no session exists.
    async fn open(&self, endpoint: &Endpoint) -> Result<RestSession, Error> {
        let session = RestSession::new(endpoint)?;
        debug!(device = %endpoint.authority(), "probing credentials");
        session.get(resource::SYSTEM_IDENTITY).await?;
        debug!(device = %endpoint.authority(), "session open");
        Ok(session)
    }
}

/// Raw HTTP session for the RouterOS REST API.
///
/// Every request carries basic-auth credentials; RouterOS keeps no
/// server-side session state for REST, so closing only drops the client.
///
/// The endpoint timeout is one budget for the whole session: the
/// credential probe and every later request draw from the same deadline.
pub struct RestSession {
    http: Option<reqwest::Client>,
    base_url: Url,
    username: String,
    password: SecretString,
    timeout_secs: u64,
    deadline: Instant,
}

impl std::fmt::Debug for RestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestSession")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("open", &self.http.is_some())
            .finish_non_exhaustive()
    }
}

impl RestSession {
    /// Create a session without probing the device.
    pub fn new(endpoint: &Endpoint) -> Result<Self, Error> {
        let http = endpoint.transport().build_client()?;
        Ok(Self::with_client(http, rest_base_url(endpoint)?, endpoint))
    }

    /// Create a session with a pre-built `reqwest::Client` and base URL.
    ///
    /// `base_url` must point at the REST root and end in a slash
    /// (e.g. `http://192.168.88.1/rest/`).
    pub fn with_client(http: reqwest::Client, base_url: Url, endpoint: &Endpoint) -> Self {
        Self {
            http: Some(http),
            base_url,
            username: endpoint.username.clone(),
            password: endpoint.password.clone(),
            timeout_secs: endpoint.timeout.as_secs(),
            deadline: Instant::now() + endpoint.timeout,
        }
    }

    /// The REST root this session talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Time left before the session deadline.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Whether [`close`](Session::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a menu path: `/system/resource` ->
    /// `{base}/rest/system/resource`.
    pub(crate) fn menu_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Map a reqwest failure, folding timeouts into [`Error::Timeout`].
    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Turn an HTTP response into records, or the matching error.
    async fn parse_response(&self, resp: reqwest::Response) -> Result<Vec<Record>, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                message: format!("device rejected credentials for '{}'", self.username),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body).map_or_else(
                |_| {
                    status
                        .canonical_reason()
                        .map_or_else(|| body.clone(), str::to_owned)
                },
                |envelope| envelope.summary(),
            );
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        records_from_json(value).ok_or_else(|| Error::Deserialization {
            message: "expected a JSON object or array of objects".into(),
            body,
        })
    }
}

impl Session for RestSession {
    async fn get(&self, path: &str) -> Result<Vec<Record>, Error> {
        let http = self.http.as_ref().ok_or(Error::SessionClosed)?;
        let url = self.menu_url(path)?;

        let remaining = self.remaining();
        if remaining.is_zero() {
            return Err(Error::Timeout {
                timeout_secs: self.timeout_secs,
            });
        }
        debug!(remaining_ms = remaining.as_millis(), "GET {}", url);

        let resp = http
            .get(url)
            .timeout(remaining)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.parse_response(resp).await
    }

    fn close(&mut self) {
        if self.http.take().is_some() {
            debug!(base_url = %self.base_url, "session closed");
        }
    }
}

/// `{scheme}://{host}:{port}/rest/` for an endpoint. IPv6 literals are
/// bracketed.
pub fn rest_base_url(endpoint: &Endpoint) -> Result<Url, Error> {
    let host = if endpoint.host.contains(':') && !endpoint.host.starts_with('[') {
        format!("[{}]", endpoint.host)
    } else {
        endpoint.host.clone()
    };
    let raw = format!("{}://{host}:{}/rest/", endpoint.tls.scheme(), endpoint.port);
    Ok(Url::parse(&raw)?)
}
