//! Schema migrations for the bookmark store.
//!
//! Uses a `schema_version` table to track which migrations have been applied.
//! Each migration runs exactly once and is recorded with a timestamp.

use log::info;
use rusqlite::Connection;

use crate::types::bookmark::{
    BookmarkNodeType, MENU_GUID, MOBILE_GUID, MOBILE_ID, ROOT_GUID, ROOT_ID, TOOLBAR_GUID,
    UNFILED_GUID,
};

/// Current schema version. Bump this when adding a new migration.
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Returns the current schema version from the database (0 if none applied).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

/// Runs all pending schema migrations against the provided connection.
///
/// Migrations are versioned: each runs exactly once and is recorded in
/// the `schema_version` table. Safe to call on every startup.
///
/// # Errors
/// Returns `rusqlite::Error` if any SQL statement fails.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    // Foreign keys drive `faviconID ... ON DELETE SET NULL`.
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at INTEGER NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    let current = get_schema_version(conn);

    if current < 1 {
        migration_v1(conn)?;
        record_version(conn, 1, "Bookmarks, favicons, history icons")?;
    }

    if current < 2 {
        migration_v2(conn)?;
        record_version(conn, 2, "Bookmarks mirror table")?;
    }

    if current < CURRENT_SCHEMA_VERSION {
        info!(
            "event=db_migrate module=db status=ok from_version={} to_version={}",
            current, CURRENT_SCHEMA_VERSION
        );
    }

    Ok(())
}

fn record_version(conn: &Connection, version: i32, description: &str) -> Result<(), rusqlite::Error> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
        rusqlite::params![version, now, description],
    )?;
    Ok(())
}

/// V1: the live bookmark tree, favicons, and the history-to-icon view.
fn migration_v1(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS favicons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url TEXT NOT NULL UNIQUE,
            type INTEGER NOT NULL,
            date INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS bookmarks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            guid TEXT NOT NULL UNIQUE,
            type TINYINT NOT NULL,
            url TEXT,
            title TEXT,
            parent INTEGER NOT NULL,
            faviconID INTEGER REFERENCES favicons(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_bookmarks_parent ON bookmarks(parent);
        CREATE INDEX IF NOT EXISTS idx_bookmarks_url ON bookmarks(url);

        CREATE TABLE IF NOT EXISTS history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            guid TEXT NOT NULL UNIQUE,
            url TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS favicon_sites (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            siteID INTEGER NOT NULL REFERENCES history(id) ON DELETE CASCADE,
            faviconID INTEGER NOT NULL REFERENCES favicons(id) ON DELETE CASCADE,
            UNIQUE (siteID, faviconID)
        );

        CREATE VIEW IF NOT EXISTS view_icon_for_url AS
            SELECT history.url AS url, favicons.id AS iconID, favicons.date AS iconDate
            FROM history
            INNER JOIN favicon_sites ON favicon_sites.siteID = history.id
            INNER JOIN favicons ON favicons.id = favicon_sites.faviconID;
        ",
    )?;

    seed_roots(conn)
}

/// Inserts the root folder and its four children.
fn seed_roots(conn: &Connection) -> Result<(), rusqlite::Error> {
    let folder = BookmarkNodeType::Folder.as_i64();
    let roots: [(i64, &str, &str); 5] = [
        (ROOT_ID, ROOT_GUID, ""),
        (MOBILE_ID, MOBILE_GUID, "Mobile Bookmarks"),
        (2, MENU_GUID, "Bookmarks Menu"),
        (3, TOOLBAR_GUID, "Bookmarks Toolbar"),
        (4, UNFILED_GUID, "Unsorted Bookmarks"),
    ];
    for (id, guid, title) in roots {
        conn.execute(
            "INSERT OR IGNORE INTO bookmarks (id, guid, type, url, title, parent) VALUES (?1, ?2, ?3, NULL, ?4, ?5)",
            rusqlite::params![id, guid, folder, title, ROOT_ID],
        )?;
    }
    Ok(())
}

/// V2: the mirror of server-side bookmark records.
fn migration_v2(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS bookmarks_mirror (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            guid TEXT NOT NULL UNIQUE,
            type TINYINT NOT NULL,
            server_modified INTEGER NOT NULL,
            is_deleted TINYINT NOT NULL DEFAULT 0,
            has_dupe TINYINT NOT NULL DEFAULT 0,
            parentid TEXT,
            parent_name TEXT,
            feed_uri TEXT,
            site_uri TEXT,
            pos INTEGER,
            title TEXT,
            description TEXT,
            bmk_uri TEXT,
            tags TEXT,
            keyword TEXT,
            folder_name TEXT,
            query_id TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_bookmarks_mirror_parentid ON bookmarks_mirror(parentid);
        ",
    )
}
