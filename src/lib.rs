/// Roteiro Bíblico
///
/// Looks up real biblical verses from citations like `rm 5:3-5` and uses them
/// to generate YouTube scripts and video metadata, persisted as JSON files and
/// in SQLite.

pub mod bible;
pub mod config;
pub mod generation;
pub mod llm;
pub mod models;
pub mod storage;

// Re-export main types for easy access
pub use crate::bible::{BibleError, BibleLookupTool, BookRegistry, LookupResponse, LookupResult, Reference, Verse};
pub use crate::config::Config;
pub use crate::generation::{ScriptGenerator, VideoDetailGenerator};
pub use crate::llm::{LLMConfig, LLMProvider, LLM};
pub use crate::models::{DetailVideoYouTube, RoteiroBiblico, TipoRoteiro};
pub use crate::storage::{JsonArchive, ScriptStore};

/// Lookup tool wired to bibliaonline.com.br as configured
pub fn lookup_tool_from_config(config: &Config) -> anyhow::Result<BibleLookupTool> {
    let source = bible::BibliaOnlineSource::new(
        config.bible.base_url.clone(),
        config.bible.request_timeout_seconds,
    )?;

    Ok(BibleLookupTool::new(Box::new(source), BookRegistry::portuguese())
        .with_default_translation(config.bible.default_translation.clone()))
}
