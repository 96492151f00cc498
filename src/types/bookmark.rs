use serde::{Deserialize, Serialize};

/// GUID of the designated root folder. Every other root hangs off it.
pub const ROOT_GUID: &str = "root________";
/// GUID of the mobile bookmarks folder, the target of "share to mobile".
pub const MOBILE_GUID: &str = "mobile______";
pub const MENU_GUID: &str = "menu________";
pub const TOOLBAR_GUID: &str = "toolbar_____";
pub const UNFILED_GUID: &str = "unfiled_____";

/// Row id of the root folder. The root is its own parent.
pub const ROOT_ID: i64 = 0;
/// Row id of the mobile bookmarks folder.
pub const MOBILE_ID: i64 = 1;

/// Stored type discriminant of a bookmark row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookmarkNodeType {
    Bookmark,
    Folder,
    Separator,
    DynamicContainer,
    Livemark,
    Query,
}

impl BookmarkNodeType {
    /// Integer value written to the `type` column.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Bookmark => 1,
            Self::Folder => 2,
            Self::Separator => 3,
            Self::DynamicContainer => 4,
            Self::Livemark => 5,
            Self::Query => 6,
        }
    }

    /// Parses a stored discriminant. Returns `None` for values outside the known set.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Bookmark),
            2 => Some(Self::Folder),
            3 => Some(Self::Separator),
            4 => Some(Self::DynamicContainer),
            5 => Some(Self::Livemark),
            6 => Some(Self::Query),
            _ => None,
        }
    }
}

/// Kind of icon a favicon row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconType {
    Icon,
    AppleIcon,
    AppleIconPrecomposed,
    Guess,
    Local,
    NoneFound,
}

impl IconType {
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Icon => 0,
            Self::AppleIcon => 1,
            Self::AppleIconPrecomposed => 2,
            Self::Guess => 3,
            Self::Local => 4,
            Self::NoneFound => 5,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Icon),
            1 => Some(Self::AppleIcon),
            2 => Some(Self::AppleIconPrecomposed),
            3 => Some(Self::Guess),
            4 => Some(Self::Local),
            5 => Some(Self::NoneFound),
            _ => None,
        }
    }
}

/// Icon metadata joined onto a bookmark from the `favicons` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favicon {
    pub url: String,
    /// Milliseconds since the UNIX epoch.
    pub date: i64,
    pub icon_type: IconType,
}

impl Favicon {
    pub fn new(url: impl Into<String>, date: i64, icon_type: IconType) -> Self {
        Self {
            url: url.into(),
            date,
            icon_type,
        }
    }
}

/// A single bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkItem {
    pub guid: String,
    pub title: String,
    pub url: String,
    pub editable: bool,
    pub id: Option<i64>,
    pub favicon: Option<Favicon>,
}

/// A bookmark folder as it appears inside its parent's listing.
///
/// Children are not carried here; the tree builder produces a
/// [`FolderModel`](crate::types::model::FolderModel) when a folder is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkFolder {
    pub guid: String,
    pub title: String,
    pub editable: bool,
    pub id: Option<i64>,
    pub favicon: Option<Favicon>,
}

/// A node of the bookmark tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookmarkNode {
    Item(BookmarkItem),
    Folder(BookmarkFolder),
}

impl BookmarkNode {
    pub fn guid(&self) -> &str {
        match self {
            Self::Item(item) => &item.guid,
            Self::Folder(folder) => &folder.guid,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Item(item) => &item.title,
            Self::Folder(folder) => &folder.title,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Item(item) => item.id,
            Self::Folder(folder) => folder.id,
        }
    }

    pub fn is_editable(&self) -> bool {
        match self {
            Self::Item(item) => item.editable,
            Self::Folder(folder) => folder.editable,
        }
    }

    pub fn favicon(&self) -> Option<&Favicon> {
        match self {
            Self::Item(item) => item.favicon.as_ref(),
            Self::Folder(folder) => folder.favicon.as_ref(),
        }
    }

    pub fn as_item(&self) -> Option<&BookmarkItem> {
        match self {
            Self::Item(item) => Some(item),
            Self::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&BookmarkFolder> {
        match self {
            Self::Item(_) => None,
            Self::Folder(folder) => Some(folder),
        }
    }
}

impl From<BookmarkItem> for BookmarkNode {
    fn from(item: BookmarkItem) -> Self {
        Self::Item(item)
    }
}

impl From<BookmarkFolder> for BookmarkNode {
    fn from(folder: BookmarkFolder) -> Self {
        Self::Folder(folder)
    }
}
