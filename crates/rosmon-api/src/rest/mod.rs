// RouterOS REST transport
//
// Session implementation for the `/rest` HTTP interface that RouterOS v7
// exposes through its `www` / `www-ssl` services.

pub mod client;
pub mod models;

pub use client::{RestConnector, RestSession, rest_base_url};
