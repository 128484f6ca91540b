//! Student Portal Module
//!
//! Read-side endpoints for logged-in students, all scoped to the caller's
//! track. Progress writes live in `backend::progress`.

pub mod catalog;
pub mod dashboard;

pub use catalog::{accessible_handbook, get_handbook, get_track_handbooks};
pub use dashboard::get_dashboard;
