//! bb8 pool of `diesel-async` PostgreSQL connections.
//!
//! Connections open lazily. Checkout waits at most the configured timeout,
//! which the server sets to the store timeout so a saturated pool surfaces
//! as a connection failure rather than a stalled submission.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Pool construction or checkout failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("connection checkout failed: {message}")]
    Checkout { message: String },
    #[error("pool construction failed: {message}")]
    Build { message: String },
}

/// Where to connect and how many connections to hold.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Ten connections and a five second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(5),
        }
    }

    #[must_use]
    pub fn with_max_size(self, max_size: u32) -> Self {
        Self { max_size, ..self }
    }

    #[must_use]
    pub fn with_connection_timeout(self, connection_timeout: Duration) -> Self {
        Self {
            connection_timeout,
            ..self
        }
    }
}

/// Cloneable handle to the shared pool.
#[derive(Clone)]
pub struct DbPool(Pool<AsyncPgConnection>);

impl DbPool {
    /// # Errors
    /// [`PoolError::Build`] when bb8 rejects the configuration.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_size,
            connection_timeout,
        } = config;
        Pool::builder()
            .max_size(max_size)
            .connection_timeout(connection_timeout)
            .build(AsyncDieselConnectionManager::<AsyncPgConnection>::new(
                database_url,
            ))
            .await
            .map(Self)
            .map_err(|err| PoolError::Build {
                message: err.to_string(),
            })
    }

    /// Check out a connection, waiting at most the configured timeout.
    ///
    /// # Errors
    /// [`PoolError::Checkout`] when no connection becomes available in time
    /// or a new one cannot be opened.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.0.get().await.map_err(|err| PoolError::Checkout {
            message: err.to_string(),
        })
    }
}
