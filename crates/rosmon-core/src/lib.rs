// rosmon-core: Telemetry acquisition and health evaluation between rosmon-api and consumers (CLI).

pub mod config;
pub mod connection;
pub mod convert;
pub mod error;
pub mod model;
pub mod parse;
pub mod repository;
pub mod result;
pub mod store;
pub mod usecase;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ConnectionConfig;
pub use connection::{Connection, ConnectionManager, Resource, ScopedFuture};
pub use convert::normalize;
pub use error::CoreError;
pub use repository::{RouterOsRepository, SystemResourceRepository};
pub use result::{Failure, FailureKind, ResponseEnvelope, SnapshotReport, UseCaseResult};
pub use store::{InMemoryRouterInfoStore, RouterInfoStore};
pub use usecase::{
    CriticalThresholds, EvaluateHealth, FetchTelemetry, HealthRule, assess, health_warnings,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{CRITICAL_CPU_LOAD_PERCENT, CRITICAL_USAGE_PERCENT, RouterInfo, TelemetrySnapshot};
