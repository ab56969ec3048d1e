//! Terminal states of a registration and the feedback each one produces.

use crate::domain::ports::{PasswordHashError, UserPersistenceError};
use crate::domain::{EmailAddress, FlashMessage, FlashMessages, User};

use super::ValidationError;

/// Warning shown when the email is already registered.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already registered";
/// Error shown for any infrastructure failure. Causes stay in the logs.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred during registration. Please try again.";
/// Success message shown on the login page.
pub const SUCCESS_MESSAGE: &str = "Registration successful! You can now log in.";

/// A backing service failed or did not answer in time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InfrastructureFailure {
    #[error(transparent)]
    Store(#[from] UserPersistenceError),
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
    #[error("{operation} timed out")]
    Timeout { operation: &'static str },
}

/// Why a submission did not produce a user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationFailure {
    #[error("submission failed {} validation rule(s)", .0.len())]
    Invalid(Vec<ValidationError>),
    #[error("email already registered")]
    DuplicateEmail(EmailAddress),
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureFailure),
}

/// Where the submitter is sent next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    RegistrationForm,
    Login,
}

impl RedirectTarget {
    /// Path for the `Location` header.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::RegistrationForm => "/register",
            Self::Login => "/login",
        }
    }
}

/// Result of one submission: the terminal state, the flash messages to queue
/// and the redirect target.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub result: Result<User, RegistrationFailure>,
    pub messages: FlashMessages,
    pub redirect: RedirectTarget,
}

impl From<Result<User, RegistrationFailure>> for RegistrationOutcome {
    fn from(result: Result<User, RegistrationFailure>) -> Self {
        let (messages, redirect) = match &result {
            Ok(_) => (
                FlashMessages::from(vec![FlashMessage::success(SUCCESS_MESSAGE)]),
                RedirectTarget::Login,
            ),
            Err(RegistrationFailure::Invalid(errors)) => (
                errors
                    .iter()
                    .map(|error| FlashMessage::error(error.message))
                    .collect(),
                RedirectTarget::RegistrationForm,
            ),
            Err(RegistrationFailure::DuplicateEmail(_)) => (
                FlashMessages::from(vec![FlashMessage::warning(DUPLICATE_EMAIL_MESSAGE)]),
                RedirectTarget::RegistrationForm,
            ),
            Err(RegistrationFailure::Infrastructure(_)) => (
                FlashMessages::from(vec![FlashMessage::error(GENERIC_FAILURE_MESSAGE)]),
                RedirectTarget::RegistrationForm,
            ),
        };
        Self {
            result,
            messages,
            redirect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlashSeverity;

    #[test]
    fn infrastructure_failures_hide_their_cause() {
        let outcome = RegistrationOutcome::from(Err(RegistrationFailure::from(
            InfrastructureFailure::from(UserPersistenceError::connection("db password wrong")),
        )));
        assert_eq!(outcome.redirect, RedirectTarget::RegistrationForm);
        let texts: Vec<_> = outcome.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, [GENERIC_FAILURE_MESSAGE]);
    }

    #[test]
    fn invalid_submissions_map_each_error_to_an_error_flash() {
        let outcome = RegistrationOutcome::from(Err(RegistrationFailure::Invalid(vec![
            ValidationError::NAME_TOO_SHORT,
            ValidationError::PASSWORD_MISMATCH,
        ])));
        assert_eq!(outcome.messages.len(), 2);
        assert!(
            outcome
                .messages
                .iter()
                .all(|m| m.severity == FlashSeverity::Error)
        );
    }

    #[test]
    fn redirect_paths() {
        assert_eq!(RedirectTarget::Login.path(), "/login");
        assert_eq!(RedirectTarget::RegistrationForm.path(), "/register");
    }
}
