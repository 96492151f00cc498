//! Status-carrying cursor over bookmark query results.
//!
//! A query materializes its raw rows once; turning a row into a typed node is
//! deferred until the row is indexed. The cursor records whether the query
//! succeeded, so a failed query yields an empty, failed cursor rather than an
//! error halfway through iteration.

use std::fmt;
use std::sync::Arc;

use super::errors::{DatabaseError, NodeError};

/// Raw columns of one bookmark query row, before dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkRow {
    pub id: i64,
    pub node_type: Option<i64>,
    pub guid: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub icon_url: Option<String>,
    pub icon_date: Option<i64>,
    pub icon_type: Option<i64>,
}

/// Turns one raw row into a typed value.
pub type RowFactory<T> = Arc<dyn Fn(&BookmarkRow) -> Result<T, NodeError> + Send + Sync>;

/// Outcome of the query that produced a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorStatus {
    Success,
    Failure(String),
}

/// Indexable, sized view over query results.
pub struct Cursor<T> {
    status: CursorStatus,
    rows: Vec<BookmarkRow>,
    factory: Option<RowFactory<T>>,
}

impl<T> Cursor<T> {
    /// Builds a cursor from a query result. A query error becomes a failed cursor.
    pub fn new(rows: Result<Vec<BookmarkRow>, DatabaseError>, factory: RowFactory<T>) -> Self {
        match rows {
            Ok(rows) => Self {
                status: CursorStatus::Success,
                rows,
                factory: Some(factory),
            },
            Err(DatabaseError::Sqlite(err)) => Self::failed(err.to_string()),
            Err(DatabaseError::Message(message)) => Self::failed(message),
        }
    }

    /// A cursor that failed before producing any rows.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: CursorStatus::Failure(message.into()),
            rows: Vec::new(),
            factory: None,
        }
    }

    pub fn status(&self) -> &CursorStatus {
        &self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == CursorStatus::Success
    }

    /// "Success", or the failure message.
    pub fn status_message(&self) -> &str {
        match &self.status {
            CursorStatus::Success => "Success",
            CursorStatus::Failure(message) => message,
        }
    }

    /// Converts a failed cursor into the error it carries.
    pub fn check(self) -> Result<Self, DatabaseError> {
        match &self.status {
            CursorStatus::Success => Ok(self),
            CursorStatus::Failure(message) => Err(DatabaseError::Message(message.clone())),
        }
    }

    /// Number of rows. Always zero for a failed cursor.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dispatches the row at `index`. `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Result<T, NodeError>> {
        let factory = self.factory.as_ref()?;
        self.rows.get(index).map(|row| factory(row))
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<T, NodeError>> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("status", &self.status)
            .field("rows", &self.rows.len())
            .finish()
    }
}
