//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are returned from HTTP handlers and guards and are converted
//! to the portal's JSON failure envelope.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - ApiError and its status mapping
//! └── conversion.rs - IntoResponse and the panic fallback
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::{panic_response, ErrorBody};
pub use types::{ApiError, GENERIC_SERVER_ERROR, RATE_LIMIT_MESSAGE};

/// Result alias used by handlers and stores
pub type ApiResult<T> = Result<T, ApiError>;
