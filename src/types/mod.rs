// Bookmark store shared type definitions
// Each submodule defines types used across the crate.

pub mod bookmark;
pub mod cursor;
pub mod errors;
pub mod mirror;
pub mod model;
pub mod settings;
