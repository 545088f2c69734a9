// ── Router info store ──
//
// Last-known identity per monitored host. The use cases write one entry
// per successful fetch; the persistence medium is up to the implementor.

mod router_info;

pub use router_info::{InMemoryRouterInfoStore, RouterInfoStore};
