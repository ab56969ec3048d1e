//! User persistence adapters.
//!
//! - [`DieselUserRepository`]: PostgreSQL via Diesel, `diesel-async` and a
//!   `bb8` pool. Row structs and the schema stay private to this module.
//! - [`InMemoryUserRepository`]: process-local fallback with the same
//!   unique-email rule.
//!
//! # Example
//!
//! ```ignore
//! use registration::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registration")).await?;
//! let repo = DieselUserRepository::new(pool, std::sync::Arc::new(mockable::DefaultClock));
//! ```

mod diesel_user_repository;
mod memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use memory_user_repository::InMemoryUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
