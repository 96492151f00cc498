//! Bookmark store database layer.
//!
//! Provides SQLite connection management, schema migrations, and the row
//! dispatch that turns query rows into bookmark nodes.
//!
//! # Usage
//!
//! ```no_run
//! use bookmark_store::database::Database;
//!
//! # async fn demo() -> Result<(), bookmark_store::types::errors::DatabaseError> {
//! // Open a persistent database
//! let db = Database::open("bookmarks.db")?;
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory()?;
//!
//! // Run a query on the blocking pool
//! let count: i64 = db
//!     .with_reader(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod factory;
pub mod migrations;

pub use connection::Database;
pub use factory::BookmarkFactory;
