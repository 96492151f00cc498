// Bookmark store services
// Services provide supporting functionality: configuration and GUID generation.

pub mod guid_generator;
pub mod settings_engine;
