//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - Student registration handler
//! ├── login.rs    - Student and admin login handlers
//! └── me.rs       - Current student handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register
//! - **`login`** - POST /api/auth/login
//! - **`get_me`** - GET /api/auth/me
//! - **`admin_login`** - POST /api/admin/login

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handlers
pub mod login;

/// Get current student handler
pub mod me;

pub use login::{admin_login, login};
pub use me::get_me;
pub use register::register;
pub use types::{AdminSummary, AuthPayload, LoginRequest, RegisterRequest, StudentProfile, StudentSummary};
