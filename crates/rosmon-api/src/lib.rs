// rosmon-api: Async session transport for MikroTik RouterOS devices

pub mod error;
pub mod resource;
pub mod rest;
pub mod session;
pub mod transport;

pub use error::Error;
pub use rest::{RestConnector, RestSession};
pub use session::{Connector, Endpoint, Record, Session};
pub use transport::{TlsMode, TransportConfig};
