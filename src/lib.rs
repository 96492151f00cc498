//! Bookmark store: a SQLite-backed bookmark tree with a mirror table for
//! records received from a sync server.
//!
//! This library crate exposes all modules for use by the demo binary and integration tests.

pub mod database;
pub mod logging;
pub mod managers;
pub mod services;
pub mod types;
