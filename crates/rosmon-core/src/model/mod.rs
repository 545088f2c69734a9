// ── Domain model ──
//
// Canonical, transport-independent representations of what a router
// reports. Consumers (use cases, CLI) depend on these, never on raw
// records.

pub mod router_info;
pub mod system_resource;

// ── Re-exports ──────────────────────────────────────────────────────

pub use router_info::RouterInfo;
pub use system_resource::{CRITICAL_CPU_LOAD_PERCENT, CRITICAL_USAGE_PERCENT, TelemetrySnapshot};
