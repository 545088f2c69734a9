// ── RouterInfo storage ──
//
// Last-write-wins per host, no history. `InMemoryRouterInfoStore` keys a
// `DashMap` by host: writers for the same host serialize on that shard's
// lock, writers for different hosts do not block each other.

use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use crate::error::CoreError;
use crate::model::RouterInfo;

/// Keyed storage for [`RouterInfo`] records.
pub trait RouterInfoStore: Send + Sync {
    fn get(&self, host: &str) -> Option<RouterInfo>;

    /// Insert or replace the entry for `info.host`.
    fn upsert(&self, info: RouterInfo) -> Result<(), CoreError>;

    /// All entries, ordered by host.
    fn list(&self) -> Vec<RouterInfo>;
}

/// Process-local [`RouterInfoStore`].
#[derive(Debug, Default)]
pub struct InMemoryRouterInfoStore {
    routers: DashMap<String, RouterInfo>,
}

impl InMemoryRouterInfoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }
}

impl RouterInfoStore for InMemoryRouterInfoStore {
    fn get(&self, host: &str) -> Option<RouterInfo> {
        self.routers.get(host).map(|entry| entry.value().clone())
    }

    fn upsert(&self, mut info: RouterInfo) -> Result<(), CoreError> {
        if info.host.is_empty() {
            return Err(CoreError::Storage {
                host: info.host,
                reason: "host must not be empty".into(),
            });
        }
        if info.last_updated.is_none() {
            info.last_updated = Some(Utc::now());
        }
        debug!(host = %info.host, board = %info.board_name, "router info updated");
        self.routers.insert(info.host.clone(), info);
        Ok(())
    }

    fn list(&self) -> Vec<RouterInfo> {
        let mut all: Vec<RouterInfo> = self
            .routers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.host.cmp(&b.host));
        all
    }
}
