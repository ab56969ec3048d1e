//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::Key;
use registration::domain::registration::DEFAULT_IO_TIMEOUT;
use registration::outbound::hashing::BcryptPasswordHasher;
use registration::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) hasher: BcryptPasswordHasher,
    pub(crate) store_timeout: Duration,
}

impl ServerConfig {
    /// Construct a server configuration with the in-memory store, the default
    /// bcrypt cost and the default store timeout.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            db_pool: None,
            hasher: BcryptPasswordHasher::default(),
            store_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, users are stored in PostgreSQL; otherwise they live in
    /// process memory and vanish on restart.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Use a specific password hasher.
    #[must_use]
    pub fn with_hasher(mut self, hasher: BcryptPasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Bound every store and hasher call by `timeout`.
    #[must_use]
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}
