//! Read-side use-case listing registered users.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersQuery};
use crate::domain::{Error, User};

/// [`UsersQuery`] backed by a [`UserRepository`].
pub struct RegisteredUsers<R> {
    users: Arc<R>,
}

impl<R> RegisteredUsers<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store query failed: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::internal(format!("unexpected duplicate email on read: {email}"))
        }
    }
}

#[async_trait]
impl<R> UsersQuery for RegisteredUsers<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list_users().await.map_err(map_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn maps_store_errors(#[case] failure: UserPersistenceError, #[case] expected: ErrorCode) {
        let mut repo = MockUserRepository::new();
        repo.expect_list_users()
            .times(1)
            .return_once(move || Err(failure));
        let query = RegisteredUsers::new(Arc::new(repo));

        let error = query.list_users().await.expect_err("store failure");
        assert_eq!(error.code(), expected);
    }

    #[tokio::test]
    async fn passes_users_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_list_users().return_once(|| Ok(Vec::new()));
        let query = RegisteredUsers::new(Arc::new(repo));

        assert!(query.list_users().await.expect("users").is_empty());
    }
}
