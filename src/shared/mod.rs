//! Shared Module
//!
//! Types that are not tied to a particular HTTP handler: the fixed portal
//! vocabularies (tracks, statuses, roles), input validation errors and the
//! application configuration.

/// Shared error types
pub mod error;

/// Track, status and role enumerations
pub mod types;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{FieldError, SharedError, Validator};
pub use types::{Role, StudentStatus, Track};
