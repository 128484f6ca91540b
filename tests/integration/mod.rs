//! Integration tests driving the full router against in-memory SQLite

mod api;
