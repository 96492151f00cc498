// Bookmark store managers
// Managers handle stateful operations against the database: the bookmark tree,
// bookmark mutations, favicons, and the sync mirror.

pub mod bookmark_manager;
pub mod bookmark_tree;
pub mod favicon_manager;
pub mod mirror_manager;
