//! User registration: input record, validation rules and the orchestrating
//! service.
//!
//! A submission flows through [`validate`] and then
//! [`RegistrationService`], which checks uniqueness, hashes the password and
//! persists the user. Every terminal state becomes a
//! [`RegistrationOutcome`] carrying the flash messages and redirect target.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{EmailAddress, UserName};

mod outcome;
mod service;
mod validation;

pub use outcome::{
    DUPLICATE_EMAIL_MESSAGE, GENERIC_FAILURE_MESSAGE, InfrastructureFailure, RedirectTarget,
    RegistrationFailure, RegistrationOutcome, SUCCESS_MESSAGE,
};
pub use service::{DEFAULT_IO_TIMEOUT, RegistrationService};
pub use validation::{RULES, Rule, ValidationCode, ValidationError, validate};

/// Raw registration submission, exactly as posted.
///
/// Nothing is trimmed or normalized here; [`validate`] decides what flows
/// forward. Password fields are wiped from memory on drop.
#[derive(Clone, Default)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub email_confirm: String,
    pub password: Zeroizing<String>,
    pub password_confirm: Zeroizing<String>,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("email_confirm", &self.email_confirm)
            .field("password", &"<redacted>")
            .field("password_confirm", &"<redacted>")
            .finish()
    }
}

/// A submission that passed every rule.
///
/// `email` is the normalized form used for the uniqueness check and storage.
pub struct ValidatedRegistration {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: Zeroizing<String>,
}

impl fmt::Debug for ValidatedRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedRegistration")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
