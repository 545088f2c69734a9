// ── Use-case outcomes ──
//
// Typed result of a use-case invocation and the envelope presentation
// layers render it into. Failures carry a closed `FailureKind` so callers
// can branch on the cause instead of matching message text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::model::TelemetrySnapshot;

// ── Failure taxonomy ─────────────────────────────────────────────

/// Why a use case failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No session could be opened (unreachable, rejected credentials,
    /// timeout).
    Connection,
    /// A session was open but the resource could not be read, or came
    /// back empty.
    Transport,
    /// Any other fault inside the use case.
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    /// Human-readable, host-qualified where a host is involved.
    pub reason: String,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

// ── UseCaseResult ────────────────────────────────────────────────

/// Outcome of `FetchTelemetry` / `EvaluateHealth`.
///
/// Warnings are advisory and never turn a success into a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum UseCaseResult {
    Success {
        data: TelemetrySnapshot,
        warnings: Vec<String>,
    },
    Failure(Failure),
}

impl UseCaseResult {
    pub fn success(data: TelemetrySnapshot, warnings: Vec<String>) -> Self {
        Self::Success { data, warnings }
    }

    pub fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self::Failure(Failure {
            kind,
            reason: reason.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn snapshot(&self) -> Option<&TelemetrySnapshot> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Advisory warnings; empty on failure.
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Success { warnings, .. } => warnings,
            Self::Failure(_) => &[],
        }
    }

    pub fn failure_ref(&self) -> Option<&Failure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

// ── Presentation ─────────────────────────────────────────────────

/// A snapshot plus its derived health figures, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotReport {
    #[serde(flatten)]
    pub snapshot: TelemetrySnapshot,
    pub memory_usage_percent: f64,
    pub disk_usage_percent: f64,
    pub memory_critical: bool,
    pub cpu_critical: bool,
}

impl From<&TelemetrySnapshot> for SnapshotReport {
    fn from(snapshot: &TelemetrySnapshot) -> Self {
        Self {
            memory_usage_percent: snapshot.memory_usage_percent(),
            disk_usage_percent: snapshot.disk_usage_percent(),
            memory_critical: snapshot.is_memory_critical(),
            cpu_critical: snapshot.is_cpu_critical(),
            snapshot: snapshot.clone(),
        }
    }
}

/// Transport-neutral response body: `{success, data, error_message,
/// warnings, timestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub data: Option<SnapshotReport>,
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ResponseEnvelope {
    /// Build an envelope stamped with `timestamp`.
    pub fn at(result: UseCaseResult, timestamp: DateTime<Utc>) -> Self {
        match result {
            UseCaseResult::Success { data, warnings } => Self {
                success: true,
                data: Some(SnapshotReport::from(&data)),
                error_message: None,
                failure_kind: None,
                warnings,
                timestamp,
            },
            UseCaseResult::Failure(Failure { kind, reason }) => Self {
                success: false,
                data: None,
                error_message: Some(reason),
                failure_kind: Some(kind),
                warnings: Vec::new(),
                timestamp,
            },
        }
    }
}

impl From<UseCaseResult> for ResponseEnvelope {
    fn from(result: UseCaseResult) -> Self {
        Self::at(result, Utc::now())
    }
}
