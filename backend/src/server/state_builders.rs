//! Builds the HTTP state from the configured store and hasher.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use registration::domain::ports::UserRepository;
use registration::domain::{RegisteredUsers, RegistrationService};
use registration::inbound::http::render::JsonRenderer;
use registration::inbound::http::state::HttpState;
use registration::outbound::persistence::{DieselUserRepository, InMemoryUserRepository};

use super::ServerConfig;

fn build_with_store<R>(users: Arc<R>, config: &ServerConfig) -> web::Data<HttpState>
where
    R: UserRepository + 'static,
{
    let registration =
        RegistrationService::new(users.clone(), Arc::new(config.hasher))
            .with_io_timeout(config.store_timeout);
    web::Data::new(HttpState::new(
        Arc::new(registration),
        Arc::new(RegisteredUsers::new(users)),
        Arc::new(JsonRenderer),
    ))
}

/// Wire the registration service and users query over PostgreSQL when a pool
/// is configured, otherwise over the in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => build_with_store(
            Arc::new(DieselUserRepository::new(pool.clone(), clock)),
            config,
        ),
        None => build_with_store(Arc::new(InMemoryUserRepository::new(clock)), config),
    }
}
