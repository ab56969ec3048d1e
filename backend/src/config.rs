//! Service configuration loaded via OrthoConfig.
//!
//! Values layer CLI arguments over `REGISTRATION_*` environment variables over
//! configuration files. Unset optional values fall back to the defaults
//! returned by the accessors below.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::registration::DEFAULT_IO_TIMEOUT;
use crate::outbound::hashing::DEFAULT_BCRYPT_COST;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 3000);
const DEFAULT_DB_POOL_SIZE: u32 = 10;
const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";

/// Settings that load but cannot drive a server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A zero store timeout would fail every call and breaks pool checkout.
    #[error("store_timeout_ms must be greater than zero")]
    ZeroStoreTimeout,
    /// A pool without connections cannot serve requests.
    #[error("db_pool_size must be greater than zero")]
    ZeroPoolSize,
}

/// Configuration values controlling the registration server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRATION")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// bcrypt work factor.
    pub bcrypt_cost: Option<u32>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`. Defaults to `true`.
    pub cookie_secure: Option<bool>,
    /// Permit a generated session key when the key file is unreadable.
    pub allow_ephemeral_session_key: Option<bool>,
    /// Upper bound on each store and hasher call, in milliseconds.
    pub store_timeout_ms: Option<u64>,
}

impl AppSettings {
    /// Reject values that parse but leave the server unusable.
    ///
    /// # Errors
    /// [`SettingsError::ZeroStoreTimeout`] when `store_timeout_ms` is `0`;
    /// [`SettingsError::ZeroPoolSize`] when `db_pool_size` is `0`.
    pub fn validate(self) -> Result<Self, SettingsError> {
        if self.store_timeout_ms == Some(0) {
            return Err(SettingsError::ZeroStoreTimeout);
        }
        if self.db_pool_size == Some(0) {
            return Err(SettingsError::ZeroPoolSize);
        }
        Ok(self)
    }

    /// Return the bind address, falling back to `0.0.0.0:3000`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured database URL, if any.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Return the pool size, falling back to the pool default.
    #[must_use]
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_DB_POOL_SIZE)
    }

    /// Return the bcrypt cost, falling back to the hasher default.
    #[must_use]
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    /// Return the session key path, falling back to the mounted secret.
    #[must_use]
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH))
    }

    /// Whether session cookies carry the `Secure` attribute.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Whether a generated session key may replace a missing or short one.
    #[must_use]
    pub fn allow_ephemeral_session_key(&self) -> bool {
        self.allow_ephemeral_session_key.unwrap_or(false)
    }

    /// Return the per-call store timeout.
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout_ms
            .map_or(DEFAULT_IO_TIMEOUT, Duration::from_millis)
    }
}
