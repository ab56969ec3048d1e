//! Declarative, non-short-circuiting validation of registration input.
//!
//! Each rule is a pure function over the raw request. [`validate`] runs every
//! rule in [`RULES`] order and concatenates their findings, so a submission
//! with several problems reports all of them at once.

use serde::Serialize;
use utoipa::ToSchema;

use super::{RegistrationRequest, ValidatedRegistration};
use crate::domain::{EmailAddress, UserName};

/// Minimum password length in characters.
pub const PASSWORD_MIN: usize = 8;

/// Characters accepted as the required "special" password character.
pub const PASSWORD_SPECIALS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

/// Machine-readable rule failure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    MinLength,
    InvalidFormat,
    Mismatch,
    TooShort,
    MissingDigit,
    MissingSpecial,
}

/// A single rule failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationError {
    /// Submitted field name, as it appears in the form.
    pub field: &'static str,
    pub code: ValidationCode,
    /// User-facing message, shown verbatim.
    pub message: &'static str,
}

impl ValidationError {
    const fn new(field: &'static str, code: ValidationCode, message: &'static str) -> Self {
        Self {
            field,
            code,
            message,
        }
    }

    pub(crate) const NAME_TOO_SHORT: Self = Self::new(
        "name",
        ValidationCode::MinLength,
        "Name must be at least 2 characters",
    );
    pub(crate) const EMAIL_INVALID: Self = Self::new(
        "email",
        ValidationCode::InvalidFormat,
        "Must be a valid email address",
    );
    pub(crate) const EMAIL_MISMATCH: Self = Self::new(
        "emailConfirm",
        ValidationCode::Mismatch,
        "Email addresses must match",
    );
    pub(crate) const PASSWORD_TOO_SHORT: Self = Self::new(
        "password",
        ValidationCode::TooShort,
        "Password must be at least 8 characters",
    );
    pub(crate) const PASSWORD_MISSING_DIGIT: Self = Self::new(
        "password",
        ValidationCode::MissingDigit,
        "Password must contain at least one number",
    );
    pub(crate) const PASSWORD_MISSING_SPECIAL: Self = Self::new(
        "password",
        ValidationCode::MissingSpecial,
        "Password must contain at least one special character",
    );
    pub(crate) const PASSWORD_MISMATCH: Self = Self::new(
        "passwordConfirm",
        ValidationCode::Mismatch,
        "Passwords must match",
    );
}

/// A validation rule.
pub type Rule = fn(&RegistrationRequest) -> Vec<ValidationError>;

/// Every rule, in output order.
pub const RULES: [Rule; 5] = [
    name_rule,
    email_rule,
    email_confirm_rule,
    password_rule,
    password_confirm_rule,
];

fn name_rule(request: &RegistrationRequest) -> Vec<ValidationError> {
    match UserName::new(&request.name) {
        Ok(_) => Vec::new(),
        Err(_) => vec![ValidationError::NAME_TOO_SHORT],
    }
}

fn email_rule(request: &RegistrationRequest) -> Vec<ValidationError> {
    match EmailAddress::parse(&request.email) {
        Ok(_) => Vec::new(),
        Err(_) => vec![ValidationError::EMAIL_INVALID],
    }
}

// Compares against the raw email, so " Ada@x.io" confirmed as "ada@x.io"
// is a mismatch even though both normalize identically.
fn email_confirm_rule(request: &RegistrationRequest) -> Vec<ValidationError> {
    if request.email_confirm == request.email {
        Vec::new()
    } else {
        vec![ValidationError::EMAIL_MISMATCH]
    }
}

fn password_rule(request: &RegistrationRequest) -> Vec<ValidationError> {
    let password = request.password.as_str();
    let mut errors = Vec::new();
    if password.chars().count() < PASSWORD_MIN {
        errors.push(ValidationError::PASSWORD_TOO_SHORT);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(ValidationError::PASSWORD_MISSING_DIGIT);
    }
    if !password.contains(PASSWORD_SPECIALS) {
        errors.push(ValidationError::PASSWORD_MISSING_SPECIAL);
    }
    errors
}

fn password_confirm_rule(request: &RegistrationRequest) -> Vec<ValidationError> {
    if request.password_confirm.as_str() == request.password.as_str() {
        Vec::new()
    } else {
        vec![ValidationError::PASSWORD_MISMATCH]
    }
}

/// Run every rule against `request`.
///
/// Returns the normalized values when no rule fails, otherwise every failure
/// in rule order.
///
/// # Examples
/// ```
/// use registration::domain::registration::{validate, RegistrationRequest};
///
/// let request = RegistrationRequest {
///     name: "A".into(),
///     email: "nope".into(),
///     ..RegistrationRequest::default()
/// };
/// let errors = validate(&request).expect_err("invalid input");
/// assert_eq!(errors[0].message, "Name must be at least 2 characters");
/// ```
pub fn validate(request: &RegistrationRequest) -> Result<ValidatedRegistration, Vec<ValidationError>> {
    let errors: Vec<ValidationError> = RULES.iter().flat_map(|rule| rule(request)).collect();
    if !errors.is_empty() {
        return Err(errors);
    }
    let name = UserName::new(&request.name).map_err(|_| vec![ValidationError::NAME_TOO_SHORT])?;
    let email =
        EmailAddress::parse(&request.email).map_err(|_| vec![ValidationError::EMAIL_INVALID])?;
    Ok(ValidatedRegistration {
        name,
        email,
        password: request.password.clone(),
    })
}
