//! Admin Module
//!
//! Student management and portal analytics behind the admin guard. Catalog
//! management lives in `backend::handbooks`, admin login in `backend::auth`.

pub mod analytics;
pub mod students;

pub use analytics::get_analytics;
pub use students::{delete_student, get_student, get_students, update_student};
