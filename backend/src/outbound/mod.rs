//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: user stores (PostgreSQL via Diesel, or in-memory)
//! - **hashing**: bcrypt password hashing
//!
//! Adapters translate between domain types and infrastructure. They contain
//! no business logic.

pub mod hashing;
pub mod persistence;
