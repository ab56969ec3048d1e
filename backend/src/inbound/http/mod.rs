//! HTTP inbound adapter: registration pages, the session-backed flash queue,
//! view rendering and error mapping.

pub mod error;
pub mod flash;
pub mod registration;
pub mod render;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
