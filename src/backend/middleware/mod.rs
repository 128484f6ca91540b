//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//! Middleware functions run before requests reach handlers.
//!
//! # Architecture
//!
//! - **`auth`** - Role-parameterized authorization guard and the
//!   `CurrentStudent` / `CurrentAdmin` extractors
//! - **`rate_limit`** - Per-IP request limiting for `/api`
//! - **`visitors`** - Landing page visit counting
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use skillforge::backend::middleware::{require_role, GuardState};
//! use skillforge::shared::Role;
//!
//! let guarded = routes.route_layer(from_fn_with_state(
//!     GuardState::new(state.clone(), Role::Student),
//!     require_role,
//! ));
//! ```

pub mod auth;
pub mod rate_limit;
pub mod visitors;

pub use auth::{authorize, bearer_token, require_role, CurrentAdmin, CurrentStudent, GuardState};
pub use rate_limit::{build_limiter, peer_ip, rate_limit, IpRateLimiter, RateLimitState, TrustedProxies};
pub use visitors::track_visit;
