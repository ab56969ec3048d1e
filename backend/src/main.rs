//! Registration server entry-point: loads configuration, prepares the user
//! store and session key, then serves the registration pages.

mod server;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use registration::config::AppSettings;
use registration::inbound::http::session_config::{BuildMode, session_settings};
use registration::outbound::hashing::BcryptPasswordHasher;
use registration::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?
        .validate()
        .map_err(std::io::Error::other)?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let hasher =
        BcryptPasswordHasher::with_cost(settings.bcrypt_cost()).map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session.key, session.cookie_secure, settings.bind_addr())
        .with_hasher(hasher)
        .with_store_timeout(settings.store_timeout());

    match settings.database_url() {
        Some(url) => {
            run_migrations(url).await.map_err(std::io::Error::other)?;
            let pool = DbPool::new(
                PoolConfig::new(url)
                    .with_max_size(settings.db_pool_size())
                    .with_connection_timeout(settings.store_timeout()),
            )
            .await
            .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; registered users are kept in memory"),
    }

    info!(bind_addr = %settings.bind_addr(), "starting registration server");
    create_server(config)?.await
}
