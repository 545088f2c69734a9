// ── Use cases ──
//
// `FetchTelemetry` and `EvaluateHealth` drive a repository through
// connect -> fetch (-> evaluate) and turn every outcome into a
// `UseCaseResult`. No retries: one attempt per invocation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::ConnectionConfig;
use crate::error::CoreError;
use crate::model::{RouterInfo, TelemetrySnapshot};
use crate::repository::SystemResourceRepository;
use crate::result::{Failure, FailureKind, UseCaseResult};
use crate::store::RouterInfoStore;

/// Connect, then fetch. Stops at the first failing step.
async fn acquire<R: SystemResourceRepository>(
    repository: &R,
    config: &ConnectionConfig,
) -> Result<TelemetrySnapshot, Failure> {
    debug!(host = %config.host, "checking connection");
    if !repository.check_connection().await {
        return Err(Failure {
            kind: FailureKind::Connection,
            reason: format!("unable to connect to router at {}", config.host),
        });
    }

    debug!(host = %config.host, "fetching system resource");
    repository.fetch_resource().await.ok_or_else(|| Failure {
        kind: FailureKind::Transport,
        reason: "failed to retrieve system resource data".into(),
    })
}

// ── FetchTelemetry ───────────────────────────────────────────────

/// Read one snapshot from a device, optionally recording its identity.
pub struct FetchTelemetry<R> {
    repository: R,
    store: Option<Arc<dyn RouterInfoStore>>,
}

impl<R: SystemResourceRepository> FetchTelemetry<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            store: None,
        }
    }

    /// Record a [`RouterInfo`] in `store` after each successful fetch.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn RouterInfoStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn execute(&self, config: &ConnectionConfig) -> UseCaseResult {
        let snapshot = match acquire(&self.repository, config).await {
            Ok(snapshot) => snapshot,
            Err(failure) => return UseCaseResult::Failure(failure),
        };

        if let Some(store) = &self.store {
            let router = RouterInfo::from_snapshot(&config.host, &snapshot, Utc::now());
            // Persistence is best-effort; the fetch itself succeeded.
            if let Err(e) = store.upsert(router) {
                warn!(host = %config.host, error = %e, "failed to record router info");
            }
        }

        info!(
            host = %config.host,
            board = %snapshot.board_name,
            version = %snapshot.version,
            "telemetry fetched"
        );
        UseCaseResult::success(snapshot, Vec::new())
    }
}

// ── EvaluateHealth ───────────────────────────────────────────────

/// One evaluation pass over a fetched snapshot.
///
/// An `Err` is a fault in the evaluation itself, not an unhealthy device;
/// critical conditions are reported as warnings.
pub trait HealthRule: Send + Sync {
    fn evaluate(&self, snapshot: &TelemetrySnapshot) -> Result<Vec<String>, CoreError>;
}

/// Memory usage or CPU load above 90% is critical.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalThresholds;

impl HealthRule for CriticalThresholds {
    fn evaluate(&self, snapshot: &TelemetrySnapshot) -> Result<Vec<String>, CoreError> {
        Ok(health_warnings(snapshot))
    }
}

/// Read one snapshot and flag critical memory and CPU usage.
///
/// Critical conditions are reported as warnings on a successful result;
/// alerting policy belongs to the caller.
pub struct EvaluateHealth<R, H = CriticalThresholds> {
    repository: R,
    rule: H,
}

impl<R: SystemResourceRepository> EvaluateHealth<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            rule: CriticalThresholds,
        }
    }
}

impl<R: SystemResourceRepository, H: HealthRule> EvaluateHealth<R, H> {
    /// Evaluate with `rule` instead of the default thresholds.
    pub fn with_rule<H2: HealthRule>(self, rule: H2) -> EvaluateHealth<R, H2> {
        EvaluateHealth {
            repository: self.repository,
            rule,
        }
    }

    pub async fn execute(&self, config: &ConnectionConfig) -> UseCaseResult {
        match acquire(&self.repository, config).await {
            Ok(snapshot) => {
                let fetched = UseCaseResult::success(snapshot, Vec::new());
                assess(&self.rule, &config.host, fetched)
            }
            Err(failure) => UseCaseResult::Failure(failure),
        }
    }
}

/// Apply `rule` to a successful result. Failures pass through untouched.
///
/// A fault raised by the rule becomes an `Unexpected` failure.
pub fn assess<H: HealthRule + ?Sized>(
    rule: &H,
    host: &str,
    result: UseCaseResult,
) -> UseCaseResult {
    let data = match result {
        UseCaseResult::Success { data, .. } => data,
        failure @ UseCaseResult::Failure(_) => return failure,
    };

    match rule.evaluate(&data) {
        Ok(warnings) => {
            if warnings.is_empty() {
                info!(host, "health nominal");
            } else {
                info!(host, count = warnings.len(), "health warnings raised");
            }
            UseCaseResult::success(data, warnings)
        }
        Err(e) => {
            warn!(host, error = %e, "health evaluation failed");
            UseCaseResult::failure(FailureKind::Unexpected, format!("health monitoring failed: {e}"))
        }
    }
}

/// Advisory warnings for `snapshot`, memory before CPU.
pub fn health_warnings(snapshot: &TelemetrySnapshot) -> Vec<String> {
    let mut warnings = Vec::new();
    if snapshot.is_memory_critical() {
        warnings.push(format!(
            "critical memory usage: {:.1}%",
            snapshot.memory_usage_percent()
        ));
    }
    if snapshot.is_cpu_critical() {
        warnings.push(format!("critical cpu usage: {}%", snapshot.cpu_load_percent));
    }
    warnings
}
