use serde::{Deserialize, Serialize};

use super::bookmark::BookmarkNodeType;

/// A bookmark, folder, or query record as received from the sync server.
///
/// `guid` is the merge key; every other field is payload that a later record
/// with the same `guid` replaces wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkMirrorItem {
    pub node_type: BookmarkNodeType,
    /// Server modification time in milliseconds.
    pub server_modified: u64,
    pub is_deleted: bool,
    pub has_dupe: bool,
    pub parent_id: Option<String>,
    pub parent_name: Option<String>,
    pub feed_uri: Option<String>,
    pub site_uri: Option<String>,
    pub pos: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub bookmark_uri: Option<String>,
    pub tags: Option<String>,
    pub keyword: Option<String>,
    pub folder_name: Option<String>,
    pub query_id: Option<String>,
    pub guid: String,
}

impl BookmarkMirrorItem {
    /// A plain bookmark record with every optional field left empty.
    pub fn bookmark(
        guid: impl Into<String>,
        server_modified: u64,
        parent_id: impl Into<String>,
        title: impl Into<String>,
        bookmark_uri: impl Into<String>,
    ) -> Self {
        Self {
            node_type: BookmarkNodeType::Bookmark,
            server_modified,
            is_deleted: false,
            has_dupe: false,
            parent_id: Some(parent_id.into()),
            parent_name: None,
            feed_uri: None,
            site_uri: None,
            pos: None,
            title: Some(title.into()),
            description: None,
            bookmark_uri: Some(bookmark_uri.into()),
            tags: None,
            keyword: None,
            folder_name: None,
            query_id: None,
            guid: guid.into(),
        }
    }

    /// A folder record.
    pub fn folder(
        guid: impl Into<String>,
        server_modified: u64,
        parent_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            node_type: BookmarkNodeType::Folder,
            server_modified,
            is_deleted: false,
            has_dupe: false,
            parent_id: Some(parent_id.into()),
            parent_name: None,
            feed_uri: None,
            site_uri: None,
            pos: None,
            title: Some(title.into()),
            description: None,
            bookmark_uri: None,
            tags: None,
            keyword: None,
            folder_name: None,
            query_id: None,
            guid: guid.into(),
        }
    }

    /// A tombstone: the server says this record was deleted.
    pub fn deleted(guid: impl Into<String>, server_modified: u64) -> Self {
        Self {
            node_type: BookmarkNodeType::Bookmark,
            server_modified,
            is_deleted: true,
            has_dupe: false,
            parent_id: None,
            parent_name: None,
            feed_uri: None,
            site_uri: None,
            pos: None,
            title: None,
            description: None,
            bookmark_uri: None,
            tags: None,
            keyword: None,
            folder_name: None,
            query_id: None,
            guid: guid.into(),
        }
    }
}
