//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, static files, global layers
//! - **`api_routes`** - `/api` endpoints with their guards and rate limit
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint groups
//! ```
//!
//! # Guards
//!
//! Protected groups carry a `route_layer` built from
//! `GuardState::new(state, Role::..)` and `require_role`, so unmatched
//! paths fall through to the `Route not found` envelope instead of a 401.

/// Main router creation
pub mod router;

/// API endpoint groups
pub mod api_routes;

pub use router::create_router;
