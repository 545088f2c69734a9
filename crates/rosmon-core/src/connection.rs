// ── Scoped device connections ──
//
// Opens one transport session per call and guarantees it is closed on
// every exit path. `Connection` is an RAII guard: dropping it closes the
// session exactly once. No pooling: every `connect` opens a fresh session.

use std::future::Future;
use std::pin::Pin;

use rosmon_api::{Connector, Endpoint, Record, Session};
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::error::CoreError;

/// Boxed future borrowed from a live [`Connection`].
pub type ScopedFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, CoreError>> + Send + 'c>>;

// ── ConnectionManager ────────────────────────────────────────────

/// Acquires sessions to a single device.
#[derive(Debug)]
pub struct ConnectionManager<C> {
    connector: C,
    endpoint: Endpoint,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, config: &ConnectionConfig) -> Self {
        Self {
            connector,
            endpoint: config.endpoint(),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Open a session. The returned guard closes it when dropped.
    pub async fn connect(&self) -> Result<Connection<C::Session>, CoreError> {
        debug!(endpoint = %self.endpoint.authority(), "opening session");
        let session = self
            .connector
            .open(&self.endpoint)
            .await
            .map_err(|e| CoreError::connect(&self.endpoint.host, e))?;
        debug!(endpoint = %self.endpoint.authority(), "session open");

        Ok(Connection {
            session,
            host: self.endpoint.host.clone(),
        })
    }

    /// Run `body` against a freshly opened session.
    ///
    /// If the session cannot be opened, `body` is never invoked. Otherwise
    /// the session is closed once `body` finishes, before its result
    /// (success or error) is returned.
    ///
    /// ```ignore
    /// let records = manager
    ///     .with_connection(|conn| {
    ///         Box::pin(async move { conn.get_resource("/system/resource").get().await })
    ///     })
    ///     .await?;
    /// ```
    pub async fn with_connection<T, F>(&self, body: F) -> Result<T, CoreError>
    where
        F: for<'c> FnOnce(&'c Connection<C::Session>) -> ScopedFuture<'c, T> + Send,
        T: Send,
    {
        let conn = self.connect().await?;
        let result = body(&conn).await;
        drop(conn);
        result
    }
}

// ── Connection ───────────────────────────────────────────────────

/// A live session. Closed on drop.
#[derive(Debug)]
pub struct Connection<S: Session> {
    session: S,
    host: String,
}

impl<S: Session> Connection<S> {
    /// Handle to the records under `path`. Nothing is fetched until
    /// [`Resource::get`] is awaited.
    pub fn get_resource<'a>(&'a self, path: &'a str) -> Resource<'a, S> {
        Resource {
            session: &self.session,
            path,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

// The only release path. `Drop` runs once per guard, so every session is
// closed exactly once.
impl<S: Session> Drop for Connection<S> {
    fn drop(&mut self) {
        self.session.close();
        debug!(host = %self.host, "session closed");
    }
}

// ── Resource ─────────────────────────────────────────────────────

/// Records under one menu path of an open connection.
#[derive(Debug)]
pub struct Resource<'a, S> {
    session: &'a S,
    path: &'a str,
}

impl<S: Session> Resource<'_, S> {
    pub fn path(&self) -> &str {
        self.path
    }

    /// Fetch every record under this path, in device order.
    pub async fn get(&self) -> Result<Vec<Record>, CoreError> {
        debug!(path = self.path, "fetching resource");
        self.session
            .get(self.path)
            .await
            .map_err(|e| CoreError::fetch(self.path, e))
    }
}
