//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Database connection and migrations
//! - **`seed`** - First-run admin account
//! - **`init`** - Server initialization and app creation
//! - **`error`** - Startup errors
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database pool and migrations
//! ├── seed.rs         - Admin seeding
//! ├── init.rs         - Server initialization and app creation
//! └── error.rs        - ServerError
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `AppConfig::from_env` (done by the binary)
//! 2. **Database**: connect and migrate
//! 3. **Seeding**: create the admin account if configured and missing
//! 4. **State Creation**: token service, mailer, rate limiter
//! 5. **Background Tasks**: rate limiter cleanup
//! 6. **Router Creation**: routes and middleware
//!
//! # Example
//!
//! ```rust,no_run
//! use skillforge::backend::server::create_app;
//! use skillforge::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database connection and migrations
pub mod config;

/// Admin seeding
pub mod seed;

/// Server initialization
pub mod init;

/// Startup errors
pub mod error;

// Re-export commonly used types
pub use error::ServerError;
pub use init::{build_app, create_app};
pub use state::AppState;
