//! Backend Module
//!
//! This module contains all server-side code for SkillForge: an Axum HTTP
//! server over a SQLite database.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, seeding
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Accounts, passwords, session tokens, login handlers
//! - **`middleware`** - Role guard, rate limiter, visitor tracker
//! - **`handbooks`** - Handbook catalog and PDF storage
//! - **`progress`** - Reading progress
//! - **`student`** - Track-scoped student endpoints
//! - **`admin`** - Student management and analytics
//! - **`email`** - Welcome email
//! - **`error`** - `ApiError` and the failure envelope
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── handbooks/      - Catalog
//! ├── progress/       - Reading progress
//! ├── student/        - Student portal
//! ├── admin/          - Admin portal
//! ├── email/          - Outbound mail
//! ├── error/          - Error types
//! ├── extract.rs      - Request extractors
//! ├── response.rs     - Success envelope
//! └── visitors.rs     - Visitor counters
//! ```
//!
//! # State Management
//!
//! `AppState` holds the connection pool, the token service, the
//! configuration, the mailer and the rate limiter. It is cloned into every
//! handler; nothing in it is mutated after startup except the limiter's
//! buckets.
//!
//! # Error Handling
//!
//! Handlers return `ApiResult<T>`. Every `ApiError` becomes
//! `{ "success": false, "message": .., "errors"?: [..] }` with the matching
//! status code; internal details are logged, never sent.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Handbook catalog
pub mod handbooks;

/// Reading progress
pub mod progress;

/// Student portal endpoints
pub mod student;

/// Admin portal endpoints
pub mod admin;

/// Outbound email
pub mod email;

/// Request extractors
pub mod extract;

/// Success envelope
pub mod response;

/// Landing page visitor counters
pub mod visitors;

pub use error::{ApiError, ApiResult};
pub use server::create_app;
