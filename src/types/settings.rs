use serde::{Deserialize, Serialize};

use super::bookmark::{BookmarkItem, Favicon, IconType};

/// Configuration injected into the bookmark managers.
///
/// Holds the display strings the store falls back to and the default
/// content shown in the mobile bookmarks folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BookmarkSettings {
    /// Title of the model returned for the root folder.
    pub root_title: String,
    /// Title used for folders whose stored title is NULL.
    pub default_folder_title: String,
    /// Sites appended to the mobile bookmarks folder. Never persisted.
    pub suggested_sites: Vec<SuggestedSite>,
}

impl Default for BookmarkSettings {
    fn default() -> Self {
        Self {
            root_title: "Root".to_string(),
            default_folder_title: "Untitled".to_string(),
            suggested_sites: Self::default_suggested_sites(),
        }
    }
}

impl BookmarkSettings {
    /// Returns the built-in suggested sites.
    pub fn default_suggested_sites() -> Vec<SuggestedSite> {
        vec![
            SuggestedSite {
                guid: "default-mozilla".to_string(),
                url: "https://www.mozilla.org/".to_string(),
                title: "Mozilla".to_string(),
                icon_url: Some("https://www.mozilla.org/favicon.ico".to_string()),
            },
            SuggestedSite {
                guid: "default-wikipedia".to_string(),
                url: "https://www.wikipedia.org/".to_string(),
                title: "Wikipedia".to_string(),
                icon_url: Some("https://www.wikipedia.org/static/favicon/wikipedia.ico".to_string()),
            },
            SuggestedSite {
                guid: "default-rust".to_string(),
                url: "https://www.rust-lang.org/".to_string(),
                title: "Rust".to_string(),
                icon_url: None,
            },
        ]
    }
}

/// A site shown in the mobile folder without being stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestedSite {
    pub guid: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub icon_url: Option<String>,
}

impl SuggestedSite {
    /// Materializes the site as a read-only bookmark item.
    pub fn to_item(&self) -> BookmarkItem {
        BookmarkItem {
            guid: self.guid.clone(),
            title: self.title.clone(),
            url: self.url.clone(),
            editable: false,
            id: None,
            favicon: self
                .icon_url
                .as_ref()
                .map(|url| Favicon::new(url.clone(), 0, IconType::Local)),
        }
    }
}
