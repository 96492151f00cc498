//! Bookmark Manager for the bookmark store.
//!
//! Implements `BookmarkManagerTrait`: the public surface for opening folder
//! models, URL lookups, sharing a page into mobile bookmarks, and deletion,
//! backed by SQLite via `rusqlite`.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use rusqlite::{params, OptionalExtension};

use crate::database::connection::Database;
use crate::database::factory::{query_rows, BookmarkFactory, BOOKMARK_COLUMNS};
use crate::managers::bookmark_tree::BookmarkTree;
use crate::managers::favicon_manager::insert_or_update_favicon;
use crate::services::guid_generator::{GuidGenerator, RandomGuidGenerator};
use crate::types::bookmark::{BookmarkFolder, BookmarkItem, BookmarkNode, BookmarkNodeType, Favicon, MOBILE_GUID, ROOT_ID};
use crate::types::cursor::Cursor;
use crate::types::errors::DatabaseError;
use crate::types::model::BookmarksModel;
use crate::types::settings::BookmarkSettings;

/// Trait defining bookmark store operations.
#[async_trait]
pub trait BookmarkManagerTrait {
    async fn model_for_folder(&self, guid: &str, title: &str) -> Result<BookmarksModel, DatabaseError>;
    async fn model_for_folder_node(&self, folder: &BookmarkFolder) -> Result<BookmarksModel, DatabaseError>;
    async fn model_for_root(&self) -> Result<BookmarksModel, DatabaseError>;
    fn null_model(&self) -> BookmarksModel;
    async fn is_bookmarked(&self, url: &str) -> Result<bool, DatabaseError>;
    async fn clear_bookmarks(&self) -> Result<(), DatabaseError>;
    async fn remove_by_url(&self, url: &str) -> Result<(), DatabaseError>;
    async fn remove(&self, node: &BookmarkNode) -> Result<(), DatabaseError>;
    async fn add_to_mobile_bookmarks(&self, url: &str, title: &str, favicon: Option<&Favicon>) -> Result<(), DatabaseError>;
    async fn bookmarks_by_url(&self, url: &str) -> Result<Cursor<BookmarkItem>, DatabaseError>;
}

/// Bookmark manager backed by the shared database handle.
pub struct BookmarkManager {
    db: Database,
    tree: BookmarkTree,
    factory: BookmarkFactory,
    guids: Arc<dyn GuidGenerator>,
}

impl BookmarkManager {
    /// Creates a `BookmarkManager` generating random GUIDs for new rows.
    pub fn new(db: Database, settings: Arc<BookmarkSettings>) -> Self {
        Self::with_guid_generator(db, settings, Arc::new(RandomGuidGenerator::new()))
    }

    /// Creates a `BookmarkManager` with a caller-supplied GUID source.
    pub fn with_guid_generator(
        db: Database,
        settings: Arc<BookmarkSettings>,
        guids: Arc<dyn GuidGenerator>,
    ) -> Self {
        let factory = BookmarkFactory::new(settings.default_folder_title.clone());
        let tree = BookmarkTree::new(db.clone(), settings);
        Self {
            db,
            tree,
            factory,
            guids,
        }
    }

    /// The tree builder this manager delegates model construction to.
    pub fn tree(&self) -> &BookmarkTree {
        &self.tree
    }
}

#[async_trait]
impl BookmarkManagerTrait for BookmarkManager {
    async fn model_for_folder(&self, guid: &str, title: &str) -> Result<BookmarksModel, DatabaseError> {
        self.tree.model_for(guid, title).await
    }

    async fn model_for_folder_node(&self, folder: &BookmarkFolder) -> Result<BookmarksModel, DatabaseError> {
        self.tree.model_for_folder(folder).await
    }

    async fn model_for_root(&self) -> Result<BookmarksModel, DatabaseError> {
        self.tree.model_for_root().await
    }

    fn null_model(&self) -> BookmarksModel {
        self.tree.null_model()
    }

    /// True when at least one bookmark has exactly this URL.
    async fn is_bookmarked(&self, url: &str) -> Result<bool, DatabaseError> {
        let url = url.to_string();
        self.db
            .with_reader(move |conn| {
                let found: bool = conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM bookmarks WHERE url = ?1 AND type = ?2)",
                    params![url, BookmarkNodeType::Bookmark.as_i64()],
                    |row| row.get(0),
                )?;
                Ok(found)
            })
            .await
    }

    /// Deletes everything but the root row, then drops favicons nothing
    /// references any more. Both steps commit together.
    async fn clear_bookmarks(&self) -> Result<(), DatabaseError> {
        let removed = self
            .db
            .transaction(|tx| {
                let removed = tx.execute("DELETE FROM bookmarks WHERE id <> ?1", params![ROOT_ID])?;
                tx.execute(
                    "DELETE FROM favicons WHERE id NOT IN ( \
                         SELECT faviconID FROM bookmarks WHERE faviconID IS NOT NULL \
                         UNION ALL \
                         SELECT faviconID FROM favicon_sites \
                     )",
                    [],
                )?;
                Ok(removed)
            })
            .await?;
        info!("event=bookmarks_clear module=bookmarks status=ok removed={}", removed);
        Ok(())
    }

    async fn remove_by_url(&self, url: &str) -> Result<(), DatabaseError> {
        let url = url.to_string();
        let removed = self
            .db
            .with_writer(move |conn| Ok(conn.execute("DELETE FROM bookmarks WHERE url = ?1", params![url])?))
            .await?;
        debug!("event=bookmark_remove module=bookmarks status=ok by=url removed={}", removed);
        Ok(())
    }

    /// Deletes the node's row, by numeric id when known, otherwise by GUID.
    async fn remove(&self, node: &BookmarkNode) -> Result<(), DatabaseError> {
        let removed = match node.id() {
            Some(id) => {
                self.db
                    .with_writer(move |conn| Ok(conn.execute("DELETE FROM bookmarks WHERE id = ?1", params![id])?))
                    .await?
            }
            None => {
                let guid = node.guid().to_string();
                self.db
                    .with_writer(move |conn| {
                        Ok(conn.execute("DELETE FROM bookmarks WHERE guid = ?1", params![guid])?)
                    })
                    .await?
            }
        };
        debug!("event=bookmark_remove module=bookmarks status=ok by=node removed={}", removed);
        Ok(())
    }

    /// Adds a bookmark to the mobile folder.
    ///
    /// An explicit favicon is stored first and referenced directly. Without
    /// one, the most recent icon recorded for the URL's history entry is
    /// used; no match leaves the bookmark without an icon.
    ///
    /// # Errors
    /// Returns `DatabaseError::Message` when the mobile folder row no longer
    /// exists, for example after [`clear_bookmarks`](Self::clear_bookmarks).
    async fn add_to_mobile_bookmarks(&self, url: &str, title: &str, favicon: Option<&Favicon>) -> Result<(), DatabaseError> {
        let guid = self.guids.generate();
        let url = url.to_string();
        let title = title.to_string();
        let favicon = favicon.cloned();
        let node_type = BookmarkNodeType::Bookmark.as_i64();

        self.db
            .transaction(move |tx| {
                let parent: i64 = tx
                    .query_row(
                        "SELECT id FROM bookmarks WHERE guid = ?1",
                        params![MOBILE_GUID],
                        |row| row.get(0),
                    )
                    .optional()?
                    .ok_or_else(|| DatabaseError::message("mobile bookmarks folder is missing"))?;
                match favicon {
                    Some(favicon) => {
                        let icon_id = insert_or_update_favicon(tx, &favicon)?;
                        tx.execute(
                            "INSERT INTO bookmarks (guid, type, url, title, parent, faviconID) \
                             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                            params![guid, node_type, url, title, parent, icon_id],
                        )?;
                    }
                    None => {
                        tx.execute(
                            "INSERT INTO bookmarks (guid, type, url, title, parent, faviconID) \
                             VALUES (?1, ?2, ?3, ?4, ?5, \
                                 (SELECT iconID FROM view_icon_for_url WHERE url = ?3 \
                                  ORDER BY iconDate DESC LIMIT 1))",
                            params![guid, node_type, url, title, parent],
                        )?;
                    }
                }
                Ok(())
            })
            .await?;
        info!("event=bookmark_add module=bookmarks status=ok parent=mobile");
        Ok(())
    }

    async fn bookmarks_by_url(&self, url: &str) -> Result<Cursor<BookmarkItem>, DatabaseError> {
        let sql = format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks b \
             LEFT OUTER JOIN favicons f ON b.faviconID = f.id \
             WHERE b.type = ?1 AND b.url = ?2 \
             ORDER BY b.id"
        );
        let url = url.to_string();
        let rows = self
            .db
            .with_reader(move |conn| {
                query_rows(conn, &sql, params![BookmarkNodeType::Bookmark.as_i64(), url])
            })
            .await?;
        Ok(Cursor::new(Ok(rows), self.factory.item_factory()))
    }
}
