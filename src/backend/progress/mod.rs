//! Reading Progress Module
//!
//! Per-student, per-handbook reading position, completion and time spent.

pub mod db;
pub mod handlers;

pub use db::{completion_percentage, ProgressDetail, ReadingProgress};
pub use handlers::{get_progress, update_progress};
