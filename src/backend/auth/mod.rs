//! Authentication Module
//!
//! This module handles identities, credentials and sessions: student and
//! admin records, password hashing, session tokens, and the HTTP handlers
//! for registration and login.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Student model and database operations
//! ├── admins.rs       - Admin model and database operations
//! ├── identity.rs     - Identity enum resolved by the guard
//! ├── passwords.rs    - bcrypt hashing on the blocking pool
//! ├── sessions.rs     - Session token issue/verify
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: student details → student created → student token returned
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Guarded request**: token verified → identity loaded → handler runs
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Read models never carry the hash
//! - Tokens are stateless and expire after the configured window
//! - Invalid credentials return 401 with no hint about which part was wrong

/// Student model and database operations
pub mod users;

/// Admin model and database operations
pub mod admins;

/// Authenticated identity
pub mod identity;

/// Password hashing
pub mod passwords;

/// Session tokens
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use admins::Admin;
pub use handlers::{admin_login, get_me, login, register};
pub use identity::Identity;
pub use sessions::{Claims, TokenError, TokenService};
pub use users::Student;
