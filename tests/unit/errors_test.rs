use std::error::Error;

use bookmark_store::types::bookmark::BookmarkNodeType;
use bookmark_store::types::errors::*;

// === DatabaseError Tests ===

#[test]
fn database_error_message_display() {
    let err = DatabaseError::message("Null model");
    assert_eq!(err.to_string(), "Database error: Null model");
    assert!(err.source().is_none());
}

#[test]
fn database_error_wraps_sqlite_error() {
    let err = DatabaseError::from(rusqlite::Error::QueryReturnedNoRows);
    assert!(matches!(err, DatabaseError::Sqlite(_)));
    assert!(err.to_string().starts_with("Database error: "));
    assert!(err.source().is_some(), "SQLite error should be exposed as the source");
}

#[test]
fn database_error_implements_error_trait() {
    let err: Box<dyn Error> = Box::new(DatabaseError::message("boom"));
    assert_eq!(err.to_string(), "Database error: boom");
}

// === NodeError Tests ===

#[test]
fn node_error_display_variants() {
    assert_eq!(
        NodeError::UnsupportedType(BookmarkNodeType::Separator).to_string(),
        "Unsupported bookmark node type: Separator"
    );
    assert_eq!(
        NodeError::UnknownType(Some(9)).to_string(),
        "Unknown bookmark node type: 9"
    );
    assert_eq!(
        NodeError::UnknownType(None).to_string(),
        "Missing bookmark node type"
    );
    assert_eq!(
        NodeError::MissingUrl("abcdefghijkl".to_string()).to_string(),
        "Bookmark has no URL: abcdefghijkl"
    );
    assert_eq!(
        NodeError::NotAnItem("menu________".to_string()).to_string(),
        "Bookmark node is a folder, not an item: menu________"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("permission denied".to_string()).to_string(),
        "Settings I/O error: permission denied"
    );
    assert_eq!(
        SettingsError::SerializationError("expected value".to_string()).to_string(),
        "Settings serialization error: expected value"
    );
}
