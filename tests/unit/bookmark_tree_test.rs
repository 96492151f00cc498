//! Unit tests for the bookmark tree builder: child queries, root handling,
//! mobile folder augmentation, and the null model.

use std::sync::Arc;

use bookmark_store::database::Database;
use bookmark_store::managers::bookmark_tree::BookmarkTree;
use bookmark_store::types::bookmark::{
    BookmarkNode, BookmarkNodeType, MENU_GUID, MOBILE_GUID, MOBILE_ID, ROOT_GUID, TOOLBAR_GUID,
    UNFILED_GUID,
};
use bookmark_store::types::errors::{DatabaseError, NodeError};
use bookmark_store::types::settings::BookmarkSettings;
use rusqlite::params;

/// Inserts one row under `parent` and returns its id.
async fn insert_row(
    db: &Database,
    guid: &str,
    node_type: i64,
    url: Option<&str>,
    title: Option<&str>,
    parent: i64,
) -> i64 {
    let guid = guid.to_string();
    let url = url.map(str::to_string);
    let title = title.map(str::to_string);
    db.with_writer(move |conn| {
        conn.execute(
            "INSERT INTO bookmarks (guid, type, url, title, parent) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![guid, node_type, url, title, parent],
        )?;
        Ok(conn.last_insert_rowid())
    })
    .await
    .expect("insert should succeed")
}

fn tree_with(db: &Database, settings: BookmarkSettings) -> BookmarkTree {
    BookmarkTree::new(db.clone(), Arc::new(settings))
}

fn tree(db: &Database) -> BookmarkTree {
    tree_with(db, BookmarkSettings::default())
}

#[tokio::test]
async fn test_root_children_are_the_top_level_folders() {
    let db = Database::open_in_memory().unwrap();
    let cursor = tree(&db).root_children().await;

    assert!(cursor.is_success());
    let guids: Vec<String> = cursor
        .iter()
        .map(|node| node.unwrap().guid().to_string())
        .collect();
    assert_eq!(guids, vec![MOBILE_GUID, MENU_GUID, TOOLBAR_GUID, UNFILED_GUID]);
    assert!(!guids.iter().any(|guid| guid == ROOT_GUID), "root is never its own child");
}

#[tokio::test]
async fn test_children_of_returns_exactly_the_direct_children() {
    let db = Database::open_in_memory().unwrap();
    let folder_id = insert_row(&db, "folder______", 2, None, Some("Reading"), 2).await;
    insert_row(&db, "child_a_____", 1, Some("https://a.example/"), Some("A"), folder_id).await;
    insert_row(&db, "child_b_____", 1, Some("https://b.example/"), None, folder_id).await;
    insert_row(&db, "grandchild__", 1, Some("https://c.example/"), Some("C"), 3).await;

    let cursor = tree(&db).children_of("folder______").await;
    assert_eq!(cursor.len(), 2);

    let first = cursor.get(0).unwrap().unwrap();
    assert_eq!(first.guid(), "child_a_____");
    assert_eq!(first.title(), "A");
    assert!(!first.is_editable());

    let second = cursor.get(1).unwrap().unwrap();
    assert_eq!(second.title(), "https://b.example/", "item title falls back to URL");
    assert!(cursor.get(2).is_none());
}

#[tokio::test]
async fn test_children_of_unknown_guid_is_empty_success() {
    let db = Database::open_in_memory().unwrap();
    let cursor = tree(&db).children_of("does_not_exist").await;
    assert!(cursor.is_success());
    assert!(cursor.is_empty());
}

#[tokio::test]
async fn test_children_of_root_guid_excludes_root_row() {
    let db = Database::open_in_memory().unwrap();
    let cursor = tree(&db).children_of(ROOT_GUID).await;
    assert_eq!(cursor.len(), 4);
    assert!(cursor.iter().all(|node| node.unwrap().guid() != ROOT_GUID));
}

#[tokio::test]
async fn test_folder_title_falls_back_to_configured_default() {
    let db = Database::open_in_memory().unwrap();
    insert_row(&db, "untitled____", 2, None, None, 2).await;
    let settings = BookmarkSettings {
        default_folder_title: "Sans titre".to_string(),
        ..BookmarkSettings::default()
    };

    let model = tree_with(&db, settings).model_for(MENU_GUID, "Bookmarks Menu").await.unwrap();
    let node = model.current.get(0).unwrap().unwrap();
    assert!(matches!(node, BookmarkNode::Folder(_)));
    assert_eq!(node.title(), "Sans titre");
}

#[tokio::test]
async fn test_mobile_folder_is_augmented_with_suggested_sites() {
    let db = Database::open_in_memory().unwrap();
    insert_row(&db, "stored_a____", 1, Some("https://a.example/"), Some("A"), MOBILE_ID).await;
    insert_row(&db, "stored_b____", 1, Some("https://b.example/"), Some("B"), MOBILE_ID).await;

    let model = tree(&db).model_for(MOBILE_GUID, "Mobile Bookmarks").await.unwrap();
    let folder = &model.current;

    assert!(folder.is_augmented());
    assert_eq!(folder.stored().len(), 2);
    assert_eq!(folder.defaults().len(), 3);
    assert_eq!(folder.count(), 5);

    let guids: Vec<String> = folder
        .iter()
        .map(|node| node.unwrap().guid().to_string())
        .collect();
    assert_eq!(
        guids,
        vec![
            "stored_a____",
            "stored_b____",
            "default-mozilla",
            "default-wikipedia",
            "default-rust"
        ],
        "defaults follow the stored children"
    );
}

#[tokio::test]
async fn test_non_mobile_folders_are_not_augmented() {
    let db = Database::open_in_memory().unwrap();
    let model = tree(&db).model_for(MENU_GUID, "Bookmarks Menu").await.unwrap();
    assert!(!model.current.is_augmented());
    assert_eq!(model.current.count(), 0);
    assert_eq!(model.current.title, "Bookmarks Menu");
    assert_eq!(model.current.guid, MENU_GUID);
}

#[tokio::test]
async fn test_empty_suggested_sites_leave_mobile_count_unchanged() {
    let db = Database::open_in_memory().unwrap();
    insert_row(&db, "stored_a____", 1, Some("https://a.example/"), Some("A"), MOBILE_ID).await;
    let settings = BookmarkSettings {
        suggested_sites: Vec::new(),
        ..BookmarkSettings::default()
    };

    let model = tree_with(&db, settings).model_for(MOBILE_GUID, "Mobile").await.unwrap();
    assert_eq!(model.current.count(), 1);
}

#[tokio::test]
async fn test_model_for_root_uses_configured_title() {
    let db = Database::open_in_memory().unwrap();
    let model = tree(&db).model_for_root().await.unwrap();

    assert_eq!(model.current.title, "Root");
    assert_eq!(model.current.guid, ROOT_GUID);
    assert!(!model.current.is_augmented());
    assert_eq!(model.current.count(), 4);
    assert!(!model.is_null());
}

#[tokio::test]
async fn test_model_for_folder_node_navigates_into_folder() {
    let db = Database::open_in_memory().unwrap();
    let folder_id = insert_row(&db, "nested______", 2, None, Some("Nested"), 3).await;
    insert_row(&db, "leaf________", 1, Some("https://leaf.example/"), Some("Leaf"), folder_id).await;

    let tree = tree(&db);
    let toolbar = tree.model_for(TOOLBAR_GUID, "Toolbar").await.unwrap();
    let nested = toolbar.current.get(0).unwrap().unwrap();
    let folder = nested.as_folder().expect("expected a folder");

    let model = tree.model_for_folder(folder).await.unwrap();
    assert_eq!(model.current.title, "Nested");
    assert_eq!(model.current.count(), 1);
}

#[tokio::test]
async fn test_null_model_is_failed_and_empty() {
    let db = Database::open_in_memory().unwrap();
    let model = tree(&db).null_model();

    assert!(model.is_null());
    assert_eq!(model.current.title, "Root");
    assert_eq!(model.current.count(), 0);
    assert_eq!(model.current.stored().status_message(), "Null model");
}

#[tokio::test]
async fn test_unsupported_row_surfaces_error_on_get() {
    let db = Database::open_in_memory().unwrap();
    insert_row(&db, "separator___", BookmarkNodeType::Separator.as_i64(), None, None, 2).await;
    insert_row(&db, "after_______", 1, Some("https://after.example/"), Some("After"), 2).await;

    let model = tree(&db).model_for(MENU_GUID, "Menu").await.unwrap();
    assert_eq!(model.current.count(), 2, "unsupported rows are counted, not skipped");
    assert_eq!(
        model.current.get(0).unwrap(),
        Err(NodeError::UnsupportedType(BookmarkNodeType::Separator))
    );
    assert!(model.current.get(1).unwrap().is_ok(), "later rows stay readable");
}

#[tokio::test]
async fn test_failed_child_query_becomes_database_error() {
    let db = Database::open_in_memory().unwrap();
    db.with_writer(|conn| {
        conn.execute_batch("DROP TABLE bookmarks;")?;
        Ok(())
    })
    .await
    .unwrap();

    let tree = tree(&db);
    let cursor = tree.children_of(MENU_GUID).await;
    assert!(!cursor.is_success());
    assert!(cursor.status_message().contains("no such table"));
    assert_eq!(cursor.len(), 0);

    let err = tree.model_for(MENU_GUID, "Menu").await.unwrap_err();
    assert!(matches!(err, DatabaseError::Message(_)));
    assert!(err.to_string().contains("no such table"));
    assert_eq!(
        err.to_string().matches("Database error:").count(),
        1,
        "failure message is prefixed once"
    );
}
