//! In-process `UserRepository` used when no database is configured.
//!
//! Enforces the same unique-email constraint as the PostgreSQL schema. Data
//! is lost on restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId};

#[derive(Default)]
struct Store {
    by_email: HashMap<EmailAddress, User>,
    order: Vec<EmailAddress>,
}

/// Mutex-guarded user map keyed by normalized email.
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(Store::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.by_email.contains_key(email))
    }

    async fn save_user(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        if store.by_email.contains_key(&user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let stored = User::new(
            UserId::random(),
            user.name.clone(),
            user.email.clone(),
            user.password_hash.clone(),
            self.clock.utc(),
        );
        store.order.push(user.email.clone());
        store.by_email.insert(user.email.clone(), stored.clone());
        Ok(stored)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserPersistenceError> {
        let store = self.lock()?;
        Ok(store
            .order
            .iter()
            .filter_map(|email| store.by_email.get(email).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    use crate::domain::{PasswordHash, UserName};

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        let mut clock = MockClock::new();
        clock
            .expect_utc()
            .returning(|| Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).single().unwrap_or_default());
        InMemoryUserRepository::new(Arc::new(clock))
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: UserName::new(name).expect("valid name"),
            email: EmailAddress::parse(email).expect("valid email"),
            password_hash: PasswordHash::new("$2b$04$hash"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn saved_users_exist_and_list_in_insertion_order(repo: InMemoryUserRepository) {
        repo.save_user(&new_user("Ann Lee", "ann@x.com"))
            .await
            .expect("save ann");
        repo.save_user(&new_user("Bob Ray", "bob@x.com"))
            .await
            .expect("save bob");

        let ann = EmailAddress::parse("ANN@x.com").expect("valid");
        assert!(repo.email_exists(&ann).await.expect("lookup"));

        let names: Vec<_> = repo
            .list_users()
            .await
            .expect("list")
            .iter()
            .map(|u| u.name().to_string())
            .collect();
        assert_eq!(names, ["Ann Lee", "Bob Ray"]);
    }

    #[rstest]
    #[tokio::test]
    async fn second_save_with_same_email_is_rejected(repo: InMemoryUserRepository) {
        repo.save_user(&new_user("Ann Lee", "ann@x.com"))
            .await
            .expect("first save");

        let error = repo
            .save_user(&new_user("Ann Other", "Ann@X.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(error, UserPersistenceError::duplicate_email("ann@x.com"));
        assert_eq!(repo.list_users().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn created_at_comes_from_the_clock(repo: InMemoryUserRepository) {
        let user = repo
            .save_user(&new_user("Ann Lee", "ann@x.com"))
            .await
            .expect("save");
        assert_eq!(user.created_at().to_rfc3339(), "2026-01-12T09:30:00+00:00");
    }
}
