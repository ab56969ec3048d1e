//! User registration service.
//!
//! A submitted form is validated by independent rules, checked for an already
//! registered email, hashed with bcrypt and stored. Every outcome is reported
//! through session-scoped flash messages and a redirect.
//!
//! - [`domain`]: value types, validation rules, ports and the orchestrating
//!   services.
//! - [`inbound::http`]: actix-web handlers, flash queue and rendering.
//! - [`outbound`]: PostgreSQL and in-memory user stores, bcrypt hasher.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
