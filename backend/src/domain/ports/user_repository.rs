//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique constraint on `email` rejected a write.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Store of registered users, keyed by normalized email.
///
/// The store's unique constraint on email is authoritative. Callers may
/// pre-check with [`UserRepository::email_exists`] but must still handle
/// [`UserPersistenceError::DuplicateEmail`] from [`UserRepository::save_user`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether a user with this normalized email is already stored.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;

    /// Insert a new user, returning the stored record.
    async fn save_user(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// All stored users, oldest first.
    async fn list_users(&self) -> Result<Vec<User>, UserPersistenceError>;
}
