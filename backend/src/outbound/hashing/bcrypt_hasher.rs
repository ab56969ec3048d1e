//! bcrypt-backed [`PasswordHasher`].
//!
//! bcrypt is CPU-bound, so each call runs on Tokio's blocking pool. The
//! plaintext is copied into a zeroizing buffer before it crosses threads.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Returned when a configured cost is outside bcrypt's accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("bcrypt cost must be between {min} and {max}, got {cost}")]
pub struct InvalidBcryptCost {
    pub cost: u32,
    pub min: u32,
    pub max: u32,
}

/// bcrypt password hasher with a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl BcryptPasswordHasher {
    const MIN_COST: u32 = 4;
    const MAX_COST: u32 = 31;

    /// Build a hasher, rejecting costs bcrypt would refuse.
    ///
    /// # Examples
    /// ```
    /// use registration::outbound::hashing::BcryptPasswordHasher;
    ///
    /// assert!(BcryptPasswordHasher::with_cost(12).is_ok());
    /// assert!(BcryptPasswordHasher::with_cost(3).is_err());
    /// ```
    pub fn with_cost(cost: u32) -> Result<Self, InvalidBcryptCost> {
        if (Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            Ok(Self { cost })
        } else {
            Err(InvalidBcryptCost {
                cost,
                min: Self::MIN_COST,
                max: Self::MAX_COST,
            })
        }
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

fn worker_error(error: &tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::worker(error.to_string())
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let cost = self.cost;
        let plaintext = Zeroizing::new(plaintext.to_owned());
        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext.as_bytes(), cost))
            .await
            .map_err(|err| worker_error(&err))?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        plaintext: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext.as_bytes(), &encoded))
            .await
            .map_err(|err| worker_error(&err))?
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }
}
