// Device session capability traits
//
// The seam between the core and a concrete wire transport. A `Connector`
// opens a `Session` to one device; the session fetches resource records
// by path and is closed exactly once by its owner.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::Error;
use crate::transport::{TlsMode, TransportConfig};

/// One record as returned by the device: attribute name -> display string.
///
/// RouterOS reports every attribute as text (`"128MiB"`, `"15%"`), so no
/// typing happens at this layer.
pub type Record = HashMap<String, String>;

/// Everything needed to reach and authenticate against one device.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Endpoint {
    /// Transport settings derived from this endpoint.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls,
            timeout: self.timeout,
        }
    }

    /// `host:port`, for log lines and error messages.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Opens sessions to devices.
///
/// Implementations hold no per-device state: every `open` call yields an
/// independent session.
pub trait Connector: Send + Sync {
    type Session: Session;

    /// Establish and authenticate a session.
    fn open(&self, endpoint: &Endpoint) -> impl Future<Output = Result<Self::Session, Error>> + Send;
}

/// A live session to one device.
pub trait Session: Send + Sync {
    /// Fetch all records under `path` (e.g. `/system/resource`).
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<Record>, Error>> + Send;

    /// Release the session. Must be idempotent.
    fn close(&mut self);
}
