use super::bookmark::{BookmarkItem, BookmarkNode};
use super::cursor::Cursor;
use super::errors::NodeError;

/// Where a folder's children come from.
#[derive(Debug)]
pub enum FolderChildren {
    /// Exactly the rows of the folder's child query.
    Stored(Cursor<BookmarkNode>),
    /// Stored rows followed by fixed default items that are not persisted.
    WithDefaults {
        stored: Cursor<BookmarkNode>,
        defaults: Vec<BookmarkItem>,
    },
}

/// An opened folder: identity plus its lazily dispatched children.
#[derive(Debug)]
pub struct FolderModel {
    pub guid: String,
    pub title: String,
    children: FolderChildren,
}

impl FolderModel {
    pub fn new(guid: impl Into<String>, title: impl Into<String>, children: FolderChildren) -> Self {
        Self {
            guid: guid.into(),
            title: title.into(),
            children,
        }
    }

    pub fn children(&self) -> &FolderChildren {
        &self.children
    }

    /// The storage-backed part of the children.
    pub fn stored(&self) -> &Cursor<BookmarkNode> {
        match &self.children {
            FolderChildren::Stored(stored) => stored,
            FolderChildren::WithDefaults { stored, .. } => stored,
        }
    }

    /// Injected default items, empty for plain folders.
    pub fn defaults(&self) -> &[BookmarkItem] {
        match &self.children {
            FolderChildren::Stored(_) => &[],
            FolderChildren::WithDefaults { defaults, .. } => defaults,
        }
    }

    pub fn is_augmented(&self) -> bool {
        matches!(self.children, FolderChildren::WithDefaults { .. })
    }

    /// Stored children plus defaults.
    pub fn count(&self) -> usize {
        self.stored().len() + self.defaults().len()
    }

    /// Child at `index`; defaults follow the stored rows.
    pub fn get(&self, index: usize) -> Option<Result<BookmarkNode, NodeError>> {
        let stored = self.stored();
        if index < stored.len() {
            return stored.get(index);
        }
        self.defaults()
            .get(index - stored.len())
            .map(|item| Ok(BookmarkNode::Item(item.clone())))
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<BookmarkNode, NodeError>> + '_ {
        (0..self.count()).filter_map(move |index| self.get(index))
    }
}

/// What model-building operations hand back to callers.
#[derive(Debug)]
pub struct BookmarksModel {
    pub current: FolderModel,
}

impl BookmarksModel {
    pub fn new(current: FolderModel) -> Self {
        Self { current }
    }

    /// True when the model sits on a failed cursor (the null model).
    pub fn is_null(&self) -> bool {
        !self.current.stored().is_success()
    }
}
