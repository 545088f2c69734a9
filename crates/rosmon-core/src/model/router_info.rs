// ── Router identity record ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::system_resource::TelemetrySnapshot;

/// Last known identity of a monitored router, keyed by host.
///
/// One entry per host; each successful fetch overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterInfo {
    pub host: String,
    pub board_name: String,
    pub platform: String,
    pub version: String,
    pub uptime: String,
    pub last_updated: Option<DateTime<Utc>>,
}

impl RouterInfo {
    /// Capture the identity fields of a fresh snapshot.
    pub fn from_snapshot(
        host: impl Into<String>,
        snapshot: &TelemetrySnapshot,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            host: host.into(),
            board_name: snapshot.board_name.clone(),
            platform: snapshot.platform.clone(),
            version: snapshot.version.clone(),
            uptime: snapshot.uptime.clone(),
            last_updated: Some(observed_at),
        }
    }
}
