/// Persistence for generated scripts and video details
///
/// Scripts are archived as one JSON file each and stored, together with their
/// YouTube metadata, in a SQLite database.

pub mod json;
pub mod sqlite;

pub use json::JsonArchive;
pub use sqlite::{ScriptStore, StoredRoteiro};
