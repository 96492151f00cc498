//! SQLite connection management for the bookmark store.
//!
//! Provides the [`Database`] handle that owns a `rusqlite::Connection`,
//! runs schema migrations on open, and exposes the scoped reader, writer
//! and transaction primitives every manager goes through.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, error, info};
use rusqlite::{Connection, Transaction};

use super::migrations;
use crate::types::errors::DatabaseError;

/// Shared handle to the bookmark database.
///
/// Cloning is cheap; all clones serialize on the same connection. Each scoped
/// call runs on tokio's blocking pool and releases the connection on every
/// exit path.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) a SQLite database at the given file path and runs migrations.
    ///
    /// # Errors
    /// Returns `DatabaseError::Sqlite` if the connection cannot be established or migrations fail.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start mode=file");
        let conn = Connection::open(path).map_err(|err| {
            error!("event=db_open module=db status=error mode=file error={}", err);
            DatabaseError::from(err)
        })?;
        let db = Self::bootstrap(conn)?;
        info!(
            "event=db_open module=db status=ok mode=file duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(db)
    }

    /// Opens an in-memory SQLite database and runs migrations.
    ///
    /// The database is discarded when the last clone of the handle is dropped.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self::bootstrap(conn)?;
        debug!("event=db_open module=db status=ok mode=memory");
        Ok(db)
    }

    fn bootstrap(conn: Connection) -> Result<Self, DatabaseError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        migrations::run_all(&conn).map_err(|err| {
            error!("event=db_migrate module=db status=error error={}", err);
            DatabaseError::from(err)
        })?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        conn.lock()
            .map_err(|_| DatabaseError::message("connection lock poisoned"))
    }

    /// Runs `f` with read access to the connection.
    pub async fn with_reader<T, F>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = Self::lock(&conn)?;
            f(&guard)
        })
        .await
        .map_err(|e| DatabaseError::message(format!("reader task failed: {}", e)))?
    }

    /// Runs `f` with exclusive write access to the connection.
    pub async fn with_writer<T, F>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&mut Connection) -> Result<T, DatabaseError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = Self::lock(&conn)?;
            f(&mut guard)
        })
        .await
        .map_err(|e| DatabaseError::message(format!("writer task failed: {}", e)))?
    }

    /// Runs `f` inside one transaction.
    ///
    /// Commits when `f` returns `Ok`. Any error, whether from `f` or from the
    /// commit, leaves the database untouched: the transaction rolls back when dropped.
    pub async fn transaction<T, F>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, DatabaseError> + Send + 'static,
        T: Send + 'static,
    {
        self.with_writer(move |conn| {
            let tx = conn.transaction()?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await
    }
}
