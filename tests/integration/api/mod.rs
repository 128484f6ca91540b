//! API integration tests
//!
//! Integration tests for all API endpoints

mod admin_test;
mod guard_test;
mod student_test;
