//! Unit tests for the FaviconManager: icon upserts and site links.

use bookmark_store::database::Database;
use bookmark_store::managers::favicon_manager::{FaviconManager, FaviconManagerTrait};
use bookmark_store::types::bookmark::{Favicon, IconType};

#[tokio::test]
async fn test_insert_or_update_returns_stable_id() {
    let db = Database::open_in_memory().unwrap();
    let favicons = FaviconManager::new(db.clone());

    let first = favicons
        .insert_or_update(&Favicon::new("https://a.example/favicon.ico", 1, IconType::Icon))
        .await
        .unwrap();
    let second = favicons
        .insert_or_update(&Favicon::new("https://a.example/favicon.ico", 5, IconType::Guess))
        .await
        .unwrap();
    assert_eq!(first, second, "same icon URL keeps its row");

    let (icon_type, date): (i64, i64) = db
        .with_reader(move |conn| {
            Ok(conn.query_row(
                "SELECT type, date FROM favicons WHERE id = ?1",
                [first],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?)
        })
        .await
        .unwrap();
    assert_eq!(icon_type, IconType::Guess.as_i64());
    assert_eq!(date, 5, "upsert refreshes the payload");
}

#[tokio::test]
async fn test_distinct_urls_get_distinct_ids() {
    let db = Database::open_in_memory().unwrap();
    let favicons = FaviconManager::new(db);

    let a = favicons
        .insert_or_update(&Favicon::new("https://a.example/favicon.ico", 1, IconType::Icon))
        .await
        .unwrap();
    let b = favicons
        .insert_or_update(&Favicon::new("https://b.example/favicon.ico", 1, IconType::Icon))
        .await
        .unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_add_favicon_for_site_links_history_entry() {
    let db = Database::open_in_memory().unwrap();
    let favicons = FaviconManager::new(db.clone());
    let icon = Favicon::new("https://a.example/favicon.ico", 42, IconType::Icon);

    let icon_id = favicons.add_favicon_for_site("https://a.example/", &icon).await.unwrap();
    // Linking again is a no-op.
    let again = favicons.add_favicon_for_site("https://a.example/", &icon).await.unwrap();
    assert_eq!(icon_id, again);

    let (history_rows, link_rows, view_icon): (i64, i64, i64) = db
        .with_reader(|conn| {
            let history_rows: i64 = conn.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
            let link_rows: i64 = conn.query_row("SELECT COUNT(*) FROM favicon_sites", [], |row| row.get(0))?;
            let view_icon: i64 = conn.query_row(
                "SELECT iconID FROM view_icon_for_url WHERE url = 'https://a.example/'",
                [],
                |row| row.get(0),
            )?;
            Ok((history_rows, link_rows, view_icon))
        })
        .await
        .unwrap();
    assert_eq!(history_rows, 1);
    assert_eq!(link_rows, 1);
    assert_eq!(view_icon, icon_id);
}
