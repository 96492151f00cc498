//! Row dispatch: turns one bookmark query row into exactly one typed node.
//!
//! Queries select `id, type, guid, url, title, faviconID` from `bookmarks`,
//! optionally joined to `favicons` as `iconURL, iconDate, iconType`.

use std::sync::Arc;

use rusqlite::{Connection, Params, Row};

use crate::types::bookmark::{
    BookmarkFolder, BookmarkItem, BookmarkNode, BookmarkNodeType, Favicon, IconType,
};
use crate::types::cursor::{BookmarkRow, RowFactory};
use crate::types::errors::{DatabaseError, NodeError};

/// Column list shared by every tree query.
pub const BOOKMARK_COLUMNS: &str = "b.id AS id, b.type AS type, b.guid AS guid, b.url AS url, \
     b.title AS title, b.faviconID AS faviconID, \
     f.url AS iconURL, f.date AS iconDate, f.type AS iconType";

impl BookmarkRow {
    /// Reads a row produced by a query selecting [`BOOKMARK_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            node_type: row.get("type")?,
            guid: row.get("guid")?,
            url: row.get("url")?,
            title: row.get("title")?,
            icon_url: row.get("iconURL")?,
            icon_date: row.get("iconDate")?,
            icon_type: row.get("iconType")?,
        })
    }
}

/// Runs `sql` and materializes every result row.
///
/// Rows are read eagerly so the connection is released before any node is built.
pub fn query_rows<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<BookmarkRow>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, BookmarkRow::from_row)?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Builds nodes from rows, falling back to configured titles.
#[derive(Debug, Clone)]
pub struct BookmarkFactory {
    default_folder_title: String,
}

impl BookmarkFactory {
    pub fn new(default_folder_title: impl Into<String>) -> Self {
        Self {
            default_folder_title: default_folder_title.into(),
        }
    }

    /// Dispatches on the stored type discriminant.
    pub fn node(&self, row: &BookmarkRow) -> Result<BookmarkNode, NodeError> {
        match Self::node_type(row)? {
            BookmarkNodeType::Bookmark => Self::item_from_row(row).map(BookmarkNode::Item),
            BookmarkNodeType::Folder => Ok(BookmarkNode::Folder(self.folder_from_row(row))),
            unsupported => Err(NodeError::UnsupportedType(unsupported)),
        }
    }

    /// Item-only dispatch, for queries already restricted to bookmarks.
    pub fn item(&self, row: &BookmarkRow) -> Result<BookmarkItem, NodeError> {
        match Self::node_type(row)? {
            BookmarkNodeType::Bookmark => Self::item_from_row(row),
            BookmarkNodeType::Folder => Err(NodeError::NotAnItem(row.guid.clone())),
            unsupported => Err(NodeError::UnsupportedType(unsupported)),
        }
    }

    /// Wraps [`BookmarkFactory::node`] for use by a cursor.
    pub fn node_factory(&self) -> RowFactory<BookmarkNode> {
        let factory = self.clone();
        Arc::new(move |row: &BookmarkRow| factory.node(row))
    }

    /// Wraps [`BookmarkFactory::item`] for use by a cursor.
    pub fn item_factory(&self) -> RowFactory<BookmarkItem> {
        let factory = self.clone();
        Arc::new(move |row: &BookmarkRow| factory.item(row))
    }

    fn node_type(row: &BookmarkRow) -> Result<BookmarkNodeType, NodeError> {
        row.node_type
            .and_then(BookmarkNodeType::from_i64)
            .ok_or(NodeError::UnknownType(row.node_type))
    }

    fn item_from_row(row: &BookmarkRow) -> Result<BookmarkItem, NodeError> {
        let url = row
            .url
            .clone()
            .ok_or_else(|| NodeError::MissingUrl(row.guid.clone()))?;
        let title = row.title.clone().unwrap_or_else(|| url.clone());
        Ok(BookmarkItem {
            guid: row.guid.clone(),
            title,
            url,
            editable: false,
            id: Some(row.id),
            favicon: Self::favicon_from_row(row),
        })
    }

    fn folder_from_row(&self, row: &BookmarkRow) -> BookmarkFolder {
        BookmarkFolder {
            guid: row.guid.clone(),
            title: row
                .title
                .clone()
                .unwrap_or_else(|| self.default_folder_title.clone()),
            editable: false,
            id: Some(row.id),
            favicon: None,
        }
    }

    /// Only a fully joined icon (URL, date and a known type) is attached.
    fn favicon_from_row(row: &BookmarkRow) -> Option<Favicon> {
        match (&row.icon_url, row.icon_date, row.icon_type) {
            (Some(url), Some(date), Some(kind)) => {
                IconType::from_i64(kind).map(|icon_type| Favicon::new(url.clone(), date, icon_type))
            }
            _ => None,
        }
    }
}
