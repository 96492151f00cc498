//! Bookmark tree builder.
//!
//! Opens folders as [`BookmarksModel`]s whose children are fetched by a
//! scoped child query and dispatched row by row when indexed. The mobile
//! bookmarks folder is the only folder that receives injected defaults.

use std::sync::Arc;

use log::{debug, warn};
use rusqlite::params;

use crate::database::connection::Database;
use crate::database::factory::{query_rows, BookmarkFactory, BOOKMARK_COLUMNS};
use crate::types::bookmark::{BookmarkFolder, BookmarkItem, BookmarkNode, MOBILE_GUID, ROOT_GUID, ROOT_ID};
use crate::types::cursor::Cursor;
use crate::types::errors::DatabaseError;
use crate::types::model::{BookmarksModel, FolderChildren, FolderModel};
use crate::types::settings::BookmarkSettings;

/// Builds folder models over the live `bookmarks` table.
#[derive(Clone)]
pub struct BookmarkTree {
    db: Database,
    settings: Arc<BookmarkSettings>,
    factory: BookmarkFactory,
}

impl BookmarkTree {
    pub fn new(db: Database, settings: Arc<BookmarkSettings>) -> Self {
        let factory = BookmarkFactory::new(settings.default_folder_title.clone());
        Self {
            db,
            settings,
            factory,
        }
    }

    /// Children of the folder identified by `guid`, in row order.
    ///
    /// A row that is its own parent (the root) is never listed.
    pub async fn children_of(&self, guid: &str) -> Cursor<BookmarkNode> {
        let sql = format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks b \
             LEFT OUTER JOIN favicons f ON b.faviconID = f.id \
             WHERE b.parent = (SELECT id FROM bookmarks WHERE guid = ?1) AND b.id <> b.parent \
             ORDER BY b.id"
        );
        let guid = guid.to_string();
        let rows = self
            .db
            .with_reader(move |conn| query_rows(conn, &sql, params![guid]))
            .await;
        Cursor::new(rows, self.factory.node_factory())
    }

    /// Children of the root folder, excluding the root row itself.
    pub async fn root_children(&self) -> Cursor<BookmarkNode> {
        let sql = format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks b \
             LEFT OUTER JOIN favicons f ON b.faviconID = f.id \
             WHERE b.parent = ?1 AND b.id <> ?1 \
             ORDER BY b.id"
        );
        let rows = self
            .db
            .with_reader(move |conn| query_rows(conn, &sql, params![ROOT_ID]))
            .await;
        Cursor::new(rows, self.factory.node_factory())
    }

    /// Opens the folder `guid` under the given display title.
    ///
    /// # Errors
    /// Returns `DatabaseError::Message` carrying the cursor's status when the
    /// child query failed.
    pub async fn model_for(&self, guid: &str, title: &str) -> Result<BookmarksModel, DatabaseError> {
        let stored = self.children_of(guid).await.check().map_err(|err| {
            warn!("event=model_build module=tree status=error guid={} error={}", guid, err);
            err
        })?;
        debug!(
            "event=model_build module=tree status=ok guid={} children={}",
            guid,
            stored.len()
        );

        let children = if guid == MOBILE_GUID {
            FolderChildren::WithDefaults {
                stored,
                defaults: self.suggested_items(),
            }
        } else {
            FolderChildren::Stored(stored)
        };
        Ok(BookmarksModel::new(FolderModel::new(guid, title, children)))
    }

    /// Opens a folder node taken from a parent's listing.
    pub async fn model_for_folder(&self, folder: &BookmarkFolder) -> Result<BookmarksModel, DatabaseError> {
        self.model_for(&folder.guid, &folder.title).await
    }

    /// Opens the root folder. Never augmented.
    pub async fn model_for_root(&self) -> Result<BookmarksModel, DatabaseError> {
        let stored = self.root_children().await.check()?;
        Ok(BookmarksModel::new(FolderModel::new(
            ROOT_GUID,
            self.settings.root_title.clone(),
            FolderChildren::Stored(stored),
        )))
    }

    /// A root-titled model over a failed cursor, for callers that need a
    /// model without touching storage.
    pub fn null_model(&self) -> BookmarksModel {
        BookmarksModel::new(FolderModel::new(
            ROOT_GUID,
            self.settings.root_title.clone(),
            FolderChildren::Stored(Cursor::failed("Null model")),
        ))
    }

    fn suggested_items(&self) -> Vec<BookmarkItem> {
        self.settings
            .suggested_sites
            .iter()
            .map(|site| site.to_item())
            .collect()
    }
}
