//! Mirror Manager for the bookmark store.
//!
//! Implements `MirrorManagerTrait`: applying batches of server records to the
//! `bookmarks_mirror` table as update-else-insert, all or nothing.

use async_trait::async_trait;
use log::{info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::database::connection::Database;
use crate::types::bookmark::BookmarkNodeType;
use crate::types::errors::DatabaseError;
use crate::types::mirror::BookmarkMirrorItem;

/// Payload columns in bind order. `guid` is always bound last.
const MIRROR_COLUMNS: [&str; 16] = [
    "type",
    "server_modified",
    "is_deleted",
    "has_dupe",
    "parentid",
    "parent_name",
    "feed_uri",
    "site_uri",
    "pos",
    "title",
    "description",
    "bmk_uri",
    "tags",
    "keyword",
    "folder_name",
    "query_id",
];

fn update_sql() -> String {
    let assignments: Vec<String> = MIRROR_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ?{}", column, i + 1))
        .collect();
    format!(
        "UPDATE bookmarks_mirror SET {} WHERE guid = ?{}",
        assignments.join(", "),
        MIRROR_COLUMNS.len() + 1
    )
}

fn insert_sql() -> String {
    let placeholders: Vec<String> = (1..=MIRROR_COLUMNS.len() + 1)
        .map(|i| format!("?{}", i))
        .collect();
    format!(
        "INSERT OR IGNORE INTO bookmarks_mirror ({}, guid) VALUES ({})",
        MIRROR_COLUMNS.join(", "),
        placeholders.join(", ")
    )
}

/// Bind values for one record, in `MIRROR_COLUMNS` order followed by the guid.
fn bind_values(record: &BookmarkMirrorItem) -> Result<Vec<Value>, DatabaseError> {
    let server_modified = i64::try_from(record.server_modified).map_err(|_| {
        DatabaseError::message(format!(
            "server_modified out of range for {}: {}",
            record.guid, record.server_modified
        ))
    })?;
    let text = |value: &Option<String>| value.clone().map_or(Value::Null, Value::Text);

    Ok(vec![
        Value::Integer(record.node_type.as_i64()),
        Value::Integer(server_modified),
        Value::Integer(i64::from(record.is_deleted)),
        Value::Integer(i64::from(record.has_dupe)),
        text(&record.parent_id),
        text(&record.parent_name),
        text(&record.feed_uri),
        text(&record.site_uri),
        record.pos.map_or(Value::Null, |pos| Value::Integer(i64::from(pos))),
        text(&record.title),
        text(&record.description),
        text(&record.bookmark_uri),
        text(&record.tags),
        text(&record.keyword),
        text(&record.folder_name),
        text(&record.query_id),
        Value::Text(record.guid.clone()),
    ])
}

/// Reads one mirror row selected with `MIRROR_COLUMNS` followed by `guid`.
fn row_to_mirror_item(row: &rusqlite::Row) -> rusqlite::Result<BookmarkMirrorItem> {
    let raw_type: i64 = row.get(0)?;
    let node_type = BookmarkNodeType::from_i64(raw_type).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Integer,
            format!("unknown mirror node type {}", raw_type).into(),
        )
    })?;
    let raw_modified: i64 = row.get(1)?;
    let server_modified = u64::try_from(raw_modified).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Integer,
            format!("negative server_modified {}", raw_modified).into(),
        )
    })?;
    Ok(BookmarkMirrorItem {
        node_type,
        server_modified,
        is_deleted: row.get(2)?,
        has_dupe: row.get(3)?,
        parent_id: row.get(4)?,
        parent_name: row.get(5)?,
        feed_uri: row.get(6)?,
        site_uri: row.get(7)?,
        pos: row.get(8)?,
        title: row.get(9)?,
        description: row.get(10)?,
        bookmark_uri: row.get(11)?,
        tags: row.get(12)?,
        keyword: row.get(13)?,
        folder_name: row.get(14)?,
        query_id: row.get(15)?,
        guid: row.get(16)?,
    })
}

/// Applies `records` in order on `conn`, stopping at the first failing statement.
///
/// The caller owns the transaction; an error here must leave it uncommitted.
fn apply_in_order(conn: &Connection, records: &[BookmarkMirrorItem]) -> Result<(), DatabaseError> {
    let update = update_sql();
    let insert = insert_sql();
    let mut update_stmt = conn.prepare(&update)?;
    let mut insert_stmt = conn.prepare(&insert)?;

    for (index, record) in records.iter().enumerate() {
        let values = bind_values(record)?;
        let changed = update_stmt.execute(params_from_iter(values.iter())).map_err(|err| {
            warn!(
                "event=mirror_apply module=mirror status=error step=update index={} guid={} error={}",
                index, record.guid, err
            );
            DatabaseError::from(err)
        })?;
        if changed > 0 {
            continue;
        }
        insert_stmt.execute(params_from_iter(values.iter())).map_err(|err| {
            warn!(
                "event=mirror_apply module=mirror status=error step=insert index={} guid={} error={}",
                index, record.guid, err
            );
            DatabaseError::from(err)
        })?;
    }
    Ok(())
}

/// Trait defining mirror table operations.
#[async_trait]
pub trait MirrorManagerTrait {
    async fn apply_records(&self, records: Vec<BookmarkMirrorItem>) -> Result<(), DatabaseError>;
    async fn mirror_item(&self, guid: &str) -> Result<Option<BookmarkMirrorItem>, DatabaseError>;
    async fn mirror_count(&self) -> Result<i64, DatabaseError>;
}

/// Mirror manager backed by the shared database handle.
pub struct MirrorManager {
    db: Database,
}

impl MirrorManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MirrorManagerTrait for MirrorManager {
    /// Updates each record by guid, inserting it when no row matched.
    ///
    /// Runs as one transaction: the first failing update or insert rolls back
    /// every record of the batch and is returned. A concurrent insert of the
    /// same guid between the update and the insert is dropped, not an error.
    async fn apply_records(&self, records: Vec<BookmarkMirrorItem>) -> Result<(), DatabaseError> {
        let count = records.len();
        self.db
            .transaction(move |tx| apply_in_order(tx, &records))
            .await?;
        info!("event=mirror_apply module=mirror status=ok records={}", count);
        Ok(())
    }

    async fn mirror_item(&self, guid: &str) -> Result<Option<BookmarkMirrorItem>, DatabaseError> {
        let sql = format!(
            "SELECT {}, guid FROM bookmarks_mirror WHERE guid = ?1",
            MIRROR_COLUMNS.join(", ")
        );
        let guid = guid.to_string();
        self.db
            .with_reader(move |conn| {
                Ok(conn
                    .query_row(&sql, params![guid], row_to_mirror_item)
                    .optional()?)
            })
            .await
    }

    async fn mirror_count(&self) -> Result<i64, DatabaseError> {
        self.db
            .with_reader(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM bookmarks_mirror", [], |row| row.get(0))?)
            })
            .await
    }
}
