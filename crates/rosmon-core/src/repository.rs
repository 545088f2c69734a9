// ── System resource repository ──
//
// Capability interface the use cases depend on, plus the RouterOS-backed
// implementation. Transport and connection failures stop here: they are
// logged and collapsed into `false` / `None`, never propagated.

use std::future::Future;

use rosmon_api::resource::SYSTEM_RESOURCE;
use rosmon_api::{Connector, RestConnector};
use tracing::{debug, warn};

use crate::config::ConnectionConfig;
use crate::connection::ConnectionManager;
use crate::convert::normalize;
use crate::error::CoreError;
use crate::model::TelemetrySnapshot;

/// Read access to one device's `/system/resource` telemetry.
pub trait SystemResourceRepository: Send + Sync {
    /// `true` if a session can be opened and the resource listing read.
    fn check_connection(&self) -> impl Future<Output = bool> + Send;

    /// Latest snapshot, or `None` if the device could not be read.
    fn fetch_resource(&self) -> impl Future<Output = Option<TelemetrySnapshot>> + Send;
}

/// [`SystemResourceRepository`] over a RouterOS [`Connector`].
///
/// Every call opens and closes its own session, so one repository can be
/// shared by concurrent callers.
#[derive(Debug)]
pub struct RouterOsRepository<C = RestConnector> {
    manager: ConnectionManager<C>,
}

impl RouterOsRepository<RestConnector> {
    /// Repository over the RouterOS REST API.
    pub fn new(config: &ConnectionConfig) -> Self {
        Self::with_connector(RestConnector::new(), config)
    }
}

impl<C: Connector> RouterOsRepository<C> {
    pub fn with_connector(connector: C, config: &ConnectionConfig) -> Self {
        Self {
            manager: ConnectionManager::new(connector, config),
        }
    }

    pub fn host(&self) -> &str {
        &self.manager.endpoint().host
    }

    /// Fetch and normalize, keeping the failure cause.
    pub async fn fetch_snapshot(&self) -> Result<TelemetrySnapshot, CoreError> {
        let records = self
            .manager
            .with_connection(|conn| {
                Box::pin(async move { conn.get_resource(SYSTEM_RESOURCE).get().await })
            })
            .await?;

        let first = records.first().ok_or_else(|| CoreError::EmptyResponse {
            path: SYSTEM_RESOURCE.to_owned(),
        })?;
        debug!(host = self.host(), fields = first.len(), "normalizing resource record");
        Ok(normalize(first))
    }
}

impl<C: Connector> SystemResourceRepository for RouterOsRepository<C> {
    async fn check_connection(&self) -> bool {
        let probe = self
            .manager
            .with_connection(|conn| {
                Box::pin(async move { conn.get_resource(SYSTEM_RESOURCE).get().await })
            })
            .await;

        match probe {
            Ok(_) => true,
            Err(e) => {
                warn!(host = self.host(), error = %e, "connection check failed");
                false
            }
        }
    }

    async fn fetch_resource(&self) -> Option<TelemetrySnapshot> {
        match self.fetch_snapshot().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(host = self.host(), error = %e, "resource fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::connection::testing::{FakeConnector, record};

    fn config() -> ConnectionConfig {
        ConnectionConfig::new("10.0.0.1", "admin", SecretString::from("pw".to_string()))
    }

    fn repo(connector: FakeConnector) -> RouterOsRepository<FakeConnector> {
        RouterOsRepository::with_connector(connector, &config())
    }

    #[tokio::test]
    async fn check_connection_true_when_readable() {
        let connector = FakeConnector::replying(vec![record(&[("uptime", "1d")])]);
        let counters = connector.counters.clone();

        assert!(repo(connector).check_connection().await);
        assert_eq!(counters.opens(), 1);
        assert_eq!(counters.closes(), 1);
    }

    #[tokio::test]
    async fn check_connection_false_when_open_fails() {
        let connector = FakeConnector::refusing();
        let counters = connector.counters.clone();

        assert!(!repo(connector).check_connection().await);
        assert_eq!(counters.closes(), 0);
    }

    #[tokio::test]
    async fn check_connection_false_when_fetch_fails() {
        let connector = FakeConnector::failing_fetch();
        let counters = connector.counters.clone();

        assert!(!repo(connector).check_connection().await);
        assert_eq!(counters.closes(), 1);
    }

    #[tokio::test]
    async fn fetch_takes_first_record() {
        let connector = FakeConnector::replying(vec![
            record(&[("board-name", "RB5009"), ("cpu-load", "7%")]),
            record(&[("board-name", "ignored")]),
        ]);

        let snapshot = repo(connector).fetch_resource().await.unwrap();
        assert_eq!(snapshot.board_name, "RB5009");
        assert_eq!(snapshot.cpu_load_percent, 7);
    }

    #[tokio::test]
    async fn degenerate_record_still_yields_snapshot() {
        let connector = FakeConnector::replying(vec![record(&[("cpu-load", "??")])]);

        let snapshot = repo(connector).fetch_resource().await.unwrap();
        assert_eq!(snapshot, TelemetrySnapshot::default());
    }

    #[tokio::test]
    async fn empty_response_is_absent() {
        let connector = FakeConnector::replying(Vec::new());
        let counters = connector.counters.clone();
        let repo = repo(connector);

        assert!(repo.fetch_resource().await.is_none());
        assert!(matches!(
            repo.fetch_snapshot().await,
            Err(CoreError::EmptyResponse { .. })
        ));
        assert_eq!(counters.opens(), counters.closes());
    }

    #[tokio::test]
    async fn transport_failure_is_absent() {
        assert!(repo(FakeConnector::failing_fetch()).fetch_resource().await.is_none());
        assert!(repo(FakeConnector::refusing()).fetch_resource().await.is_none());
    }

    #[test]
    fn rest_repository_targets_configured_host() {
        let repo = RouterOsRepository::new(&config());
        assert_eq!(repo.host(), "10.0.0.1");
    }
}
