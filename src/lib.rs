//! SkillForge - Main Library
//!
//! SkillForge is the backend of a student learning portal. Students register
//! for one of three program tracks, read the PDF handbooks published for
//! that track and have their reading progress recorded. Admins manage
//! students, upload handbooks and look at portal analytics.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no HTTP dependency
//!   - Track, status and role enumerations
//!   - Field validation errors
//!   - Application configuration
//!
//! - **`backend`** - The Axum server
//!   - Session tokens, password hashing and the role guard
//!   - Student, admin, handbook and progress persistence (SQLite)
//!   - Rate limiting, visitor tracking, welcome email
//!
//! # Usage
//!
//! ```rust,no_run
//! use skillforge::backend::server::create_app;
//! use skillforge::shared::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error` - validation and parsing errors
//! - `backend::error` - `ApiError`, rendered as the JSON failure envelope
//! - `backend::server::ServerError` - startup failures

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
