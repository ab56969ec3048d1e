//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` so they depend only on domain ports
//! and the renderer, and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{RegistrationCommand, UsersQuery};
use crate::inbound::http::render::Renderer;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub renderer: Arc<dyn Renderer>,
}

impl HttpState {
    /// Bundle the ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use registration::domain::{RegisteredUsers, RegistrationService};
    /// use registration::inbound::http::render::JsonRenderer;
    /// use registration::inbound::http::state::HttpState;
    /// use registration::outbound::hashing::BcryptPasswordHasher;
    /// use registration::outbound::persistence::InMemoryUserRepository;
    ///
    /// let users = Arc::new(InMemoryUserRepository::new(Arc::new(DefaultClock)));
    /// let state = HttpState::new(
    ///     Arc::new(RegistrationService::new(
    ///         users.clone(),
    ///         Arc::new(BcryptPasswordHasher::default()),
    ///     )),
    ///     Arc::new(RegisteredUsers::new(users)),
    ///     Arc::new(JsonRenderer),
    /// );
    /// # let _ = state;
    /// ```
    pub fn new(
        registration: Arc<dyn RegistrationCommand>,
        users: Arc<dyn UsersQuery>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            registration,
            users,
            renderer,
        }
    }
}
