//! Favicon Manager for the bookmark store.
//!
//! Implements `FaviconManagerTrait`: upserting icons keyed by icon URL and
//! linking them to visited sites, which is what the reverse icon lookup on
//! bookmark insertion reads.

use async_trait::async_trait;
use log::debug;
use rusqlite::{params, Connection};

use crate::database::connection::Database;
use crate::services::guid_generator::{GuidGenerator, RandomGuidGenerator};
use crate::types::bookmark::Favicon;
use crate::types::errors::DatabaseError;

/// Inserts `favicon` or refreshes the existing row with the same URL.
/// Returns the row id either way.
pub fn insert_or_update_favicon(conn: &Connection, favicon: &Favicon) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO favicons (url, type, date) VALUES (?1, ?2, ?3) \
         ON CONFLICT(url) DO UPDATE SET type = excluded.type, date = excluded.date",
        params![favicon.url, favicon.icon_type.as_i64(), favicon.date],
    )?;
    conn.query_row(
        "SELECT id FROM favicons WHERE url = ?1",
        params![favicon.url],
        |row| row.get(0),
    )
}

/// Trait defining favicon storage operations.
#[async_trait]
pub trait FaviconManagerTrait {
    async fn insert_or_update(&self, favicon: &Favicon) -> Result<i64, DatabaseError>;
    async fn add_favicon_for_site(&self, site_url: &str, favicon: &Favicon) -> Result<i64, DatabaseError>;
}

/// Favicon manager backed by the shared database handle.
pub struct FaviconManager {
    db: Database,
    guids: RandomGuidGenerator,
}

impl FaviconManager {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            guids: RandomGuidGenerator::new(),
        }
    }
}

#[async_trait]
impl FaviconManagerTrait for FaviconManager {
    async fn insert_or_update(&self, favicon: &Favicon) -> Result<i64, DatabaseError> {
        let favicon = favicon.clone();
        self.db
            .with_writer(move |conn| Ok(insert_or_update_favicon(conn, &favicon)?))
            .await
    }

    /// Records `site_url` as a visited site (if new) and links the icon to it.
    /// Returns the favicon id.
    async fn add_favicon_for_site(&self, site_url: &str, favicon: &Favicon) -> Result<i64, DatabaseError> {
        let favicon = favicon.clone();
        let site_url = site_url.to_string();
        let guid = self.guids.generate();
        let icon_id = self
            .db
            .transaction(move |tx| {
                tx.execute(
                    "INSERT OR IGNORE INTO history (guid, url, title) VALUES (?1, ?2, '')",
                    params![guid, site_url],
                )?;
                let site_id: i64 = tx.query_row(
                    "SELECT id FROM history WHERE url = ?1",
                    params![site_url],
                    |row| row.get(0),
                )?;
                let icon_id = insert_or_update_favicon(tx, &favicon)?;
                tx.execute(
                    "INSERT OR IGNORE INTO favicon_sites (siteID, faviconID) VALUES (?1, ?2)",
                    params![site_id, icon_id],
                )?;
                Ok(icon_id)
            })
            .await?;
        debug!("event=favicon_site module=favicons status=ok icon_id={}", icon_id);
        Ok(icon_id)
    }
}
