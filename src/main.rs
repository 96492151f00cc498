//! Bookmark store console demo.
//!
//! Opens a database (in memory unless a path is given), shares a page into
//! mobile bookmarks, walks the tree, and applies a small mirror batch.

use std::sync::Arc;

use bookmark_store::database::Database;
use bookmark_store::logging::{default_log_level, init_logging};
use bookmark_store::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use bookmark_store::managers::mirror_manager::{MirrorManager, MirrorManagerTrait};
use bookmark_store::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use bookmark_store::types::bookmark::{BookmarkNode, MOBILE_GUID, MENU_GUID};
use bookmark_store::types::mirror::BookmarkMirrorItem;
use bookmark_store::types::model::BookmarksModel;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = init_logging(default_log_level()) {
        eprintln!("logging disabled: {}", err);
    }

    let mut args = std::env::args().skip(1);
    let db = match args.next() {
        Some(path) => Database::open(path)?,
        None => Database::open_in_memory()?,
    };
    let mut settings_engine = SettingsEngine::new(
        args.next().unwrap_or_else(|| "bookmark-settings.json".to_string()),
    );
    let settings = Arc::new(settings_engine.load()?);

    section("Bookmarks");
    let bookmarks = BookmarkManager::new(db.clone(), settings);
    bookmarks
        .add_to_mobile_bookmarks("https://www.rust-lang.org/learn", "Learn Rust", None)
        .await?;
    println!(
        "  is_bookmarked(https://www.rust-lang.org/learn) = {}",
        bookmarks.is_bookmarked("https://www.rust-lang.org/learn").await?
    );

    let root = bookmarks.model_for_root().await?;
    print_model(&root);
    let mobile = bookmarks.model_for_folder(MOBILE_GUID, "Mobile Bookmarks").await?;
    print_model(&mobile);

    section("Mirror");
    let mirror = MirrorManager::new(db);
    mirror
        .apply_records(vec![
            BookmarkMirrorItem::folder("folderAAAAAA", 1_700_000_000_000, MENU_GUID, "Reading"),
            BookmarkMirrorItem::bookmark(
                "bookmarkBBBB",
                1_700_000_000_500,
                "folderAAAAAA",
                "The Book",
                "https://doc.rust-lang.org/book/",
            ),
        ])
        .await?;
    println!("  mirror rows: {}", mirror.mirror_count().await?);

    Ok(())
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_model(model: &BookmarksModel) {
    let folder = &model.current;
    println!("  {} ({}): {} children", folder.title, folder.guid, folder.count());
    for child in folder.iter() {
        match child {
            Ok(BookmarkNode::Folder(f)) => println!("    [folder] {}", f.title),
            Ok(BookmarkNode::Item(i)) => println!("    [item]   {} <{}>", i.title, i.url),
            Err(err) => println!("    [error]  {}", err),
        }
    }
}
