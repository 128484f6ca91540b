//! Common test utilities and helpers
//!
//! - Per-test database and application fixtures
//! - Authentication helpers that go through the real endpoints
//! - Envelope assertions

pub mod assertions;
pub mod database;

// Re-export commonly used utilities
pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;
