// Well-known RouterOS resource paths.

/// CPU, memory, storage and firmware counters (single record).
pub const SYSTEM_RESOURCE: &str = "/system/resource";

/// Device identity (single record with a `name` attribute). Cheap to
/// fetch, so it doubles as the authentication probe when opening a session.
pub const SYSTEM_IDENTITY: &str = "/system/identity";

