//! Driving port for the registration use-case.

use async_trait::async_trait;

use crate::domain::registration::{RegistrationOutcome, RegistrationRequest};

/// Runs one registration submission end to end.
///
/// The call never fails: every terminal state, including infrastructure
/// failures, is reported through the returned [`RegistrationOutcome`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Validate, de-duplicate, hash and persist a submission.
    async fn register(&self, request: RegistrationRequest) -> RegistrationOutcome;
}
