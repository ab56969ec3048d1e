//! Domain types, rules, ports and services.
//!
//! Purpose: keep the registration pipeline free of transport and storage
//! concerns. Inbound adapters drive it through [`ports::RegistrationCommand`]
//! and [`ports::UsersQuery`]; outbound adapters implement
//! [`ports::UserRepository`] and [`ports::PasswordHasher`].

pub mod error;
pub mod flash;
pub mod ports;
pub mod registered_users;
pub mod registration;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::flash::{FlashMessage, FlashMessages, FlashSeverity};
pub use self::registered_users::RegisteredUsers;
pub use self::registration::{RegistrationOutcome, RegistrationRequest, RegistrationService};
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, NewUser, PasswordHash, User, UserId, UserName, UserValidationError,
};
