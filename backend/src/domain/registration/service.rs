//! Registration orchestrator.
//!
//! Sequences validation, the uniqueness pre-check, hashing and persistence.
//! Nothing is hashed or written unless validation passed and the pre-check
//! found the email free. The pre-check races with concurrent submissions; the
//! store's unique constraint settles the race and a rejected write is
//! reported as a duplicate.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::outcome::{InfrastructureFailure, RegistrationFailure, RegistrationOutcome};
use super::{RegistrationRequest, validate};
use crate::domain::{NewUser, User};
use crate::domain::ports::{
    PasswordHasher, RegistrationCommand, UserPersistenceError, UserRepository,
};

/// Upper bound on each store or hasher call.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Registration service backed by a user repository and a password hasher.
#[derive(Clone)]
pub struct RegistrationService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
    io_timeout: Duration,
}

impl<R, H> RegistrationService<R, H> {
    /// Create a service using [`DEFAULT_IO_TIMEOUT`].
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            users,
            hasher,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    /// Override the per-call timeout.
    #[must_use]
    pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }
}

impl<R, H> RegistrationService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn bounded<T, E, F>(
        &self,
        operation: &'static str,
        fut: F,
    ) -> Result<T, InfrastructureFailure>
    where
        F: Future<Output = Result<T, E>>,
        InfrastructureFailure: From<E>,
    {
        match tokio::time::timeout(self.io_timeout, fut).await {
            Ok(result) => result.map_err(InfrastructureFailure::from),
            Err(_) => Err(InfrastructureFailure::Timeout { operation }),
        }
    }

    async fn run(&self, request: RegistrationRequest) -> Result<User, RegistrationFailure> {
        let validated = validate(&request).map_err(RegistrationFailure::Invalid)?;
        drop(request);

        if self
            .bounded("email_exists", self.users.email_exists(&validated.email))
            .await?
        {
            return Err(RegistrationFailure::DuplicateEmail(validated.email));
        }

        let password_hash = self
            .bounded("hash", self.hasher.hash(validated.password.as_str()))
            .await?;

        let new_user = NewUser {
            name: validated.name,
            email: validated.email,
            password_hash,
        };
        self.bounded("save_user", self.users.save_user(&new_user))
            .await
            .map_err(|failure| match failure {
                InfrastructureFailure::Store(UserPersistenceError::DuplicateEmail { .. }) => {
                    RegistrationFailure::DuplicateEmail(new_user.email.clone())
                }
                other => RegistrationFailure::Infrastructure(other),
            })
    }
}

#[async_trait]
impl<R, H> RegistrationCommand for RegistrationService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, request: RegistrationRequest) -> RegistrationOutcome {
        let result = self.run(request).await;
        match &result {
            Ok(user) => info!(user_id = %user.id(), "user registered"),
            Err(RegistrationFailure::Invalid(errors)) => {
                debug!(failures = errors.len(), "registration failed validation");
            }
            Err(RegistrationFailure::DuplicateEmail(_)) => {
                info!("registration rejected: email already registered");
            }
            Err(RegistrationFailure::Infrastructure(failure)) => {
                error!(error = %failure, "registration failed");
            }
        }
        RegistrationOutcome::from(result)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
