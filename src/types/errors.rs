use std::fmt;

use super::bookmark::BookmarkNodeType;

// === DatabaseError ===

/// Errors surfaced by store operations: a failed SQLite call or a
/// descriptive message (for example, a failed cursor's status).
#[derive(Debug)]
pub enum DatabaseError {
    /// The underlying SQLite call failed.
    Sqlite(rusqlite::Error),
    /// A descriptive failure that did not originate in SQLite.
    Message(String),
}

impl DatabaseError {
    pub fn message(msg: impl Into<String>) -> Self {
        DatabaseError::Message(msg.into())
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::Sqlite(err) => write!(f, "Database error: {}", err),
            DatabaseError::Message(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatabaseError::Sqlite(err) => Some(err),
            DatabaseError::Message(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(value: rusqlite::Error) -> Self {
        DatabaseError::Sqlite(value)
    }
}

// === NodeError ===

/// A stored row that cannot become a bookmark node.
///
/// These indicate malformed or unsupported data, not a failed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The row is a known kind this store does not materialize.
    UnsupportedType(BookmarkNodeType),
    /// The type discriminant is missing or outside the known set.
    UnknownType(Option<i64>),
    /// A bookmark row has no URL. Carries the row's GUID.
    MissingUrl(String),
    /// An item was expected but the row is a folder. Carries the row's GUID.
    NotAnItem(String),
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::UnsupportedType(kind) => {
                write!(f, "Unsupported bookmark node type: {:?}", kind)
            }
            NodeError::UnknownType(Some(value)) => {
                write!(f, "Unknown bookmark node type: {}", value)
            }
            NodeError::UnknownType(None) => write!(f, "Missing bookmark node type"),
            NodeError::MissingUrl(guid) => write!(f, "Bookmark has no URL: {}", guid),
            NodeError::NotAnItem(guid) => write!(f, "Bookmark node is a folder, not an item: {}", guid),
        }
    }
}

impl std::error::Error for NodeError {}

// === SettingsError ===

/// Errors related to loading or saving bookmark settings.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
