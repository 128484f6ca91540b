//! Handbook Catalog Module
//!
//! PDF handbooks uploaded by admins and read by students of the matching
//! track.
//!
//! # Module Structure
//!
//! ```text
//! handbooks/
//! ├── mod.rs       - Module exports and documentation
//! ├── db.rs        - Handbook model and queries
//! ├── storage.rs   - PDF files on disk
//! └── handlers.rs  - Admin catalog endpoints
//! ```

pub mod db;
pub mod handlers;
pub mod storage;

pub use db::{Handbook, HandbookSummary};
pub use handlers::{delete_handbook, get_handbooks, update_handbook, upload_handbook};
