/// Biblical verse lookup module
///
/// This module turns a free-form citation such as `rm 5:3-5` into the verses
/// scraped from bibliaonline.com.br, and exposes that lookup as a tool for the
/// generation layer.

pub mod books;
pub mod reference;
pub mod source;
pub mod extractor;
pub mod lookup;

// Re-export main types
pub use books::BookRegistry;
pub use reference::{ReferenceFormatter, ReferenceParser};
pub use source::{BibliaOnlineSource, VerseSource};
pub use extractor::VerseExtractor;
pub use lookup::{BibleLookupTool, LookupResponse};

use serde::{Deserialize, Serialize};

/// Translation used when the caller does not ask for one
pub const DEFAULT_TRANSLATION: &str = "ntlh";

/// A parsed citation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Book abbreviation, e.g. `rm` or `1co`
    pub book_key: String,
    /// Chapter digits, kept as text since it only feeds the source URL
    pub chapter: String,
    /// First requested verse; `None` means the whole chapter
    pub verse_start: Option<u32>,
    /// Last requested verse
    pub verse_end: Option<u32>,
}

impl Reference {
    /// Requested bounds with the end defaulted and reversed ranges swapped
    pub fn bounds(&self) -> Option<(u32, u32)> {
        normalize_range(self.verse_start, self.verse_end)
    }
}

/// A single verse extracted from a chapter page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    pub text: String,
}

/// Successful lookup payload handed to the generation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Display form, e.g. `Romanos 5:3-5 (NTLH)`
    pub reference: String,
    /// Verse texts joined by single spaces
    pub text: String,
    pub verses: Vec<Verse>,
}

impl LookupResult {
    pub fn new(reference: String, verses: Vec<Verse>) -> Self {
        let text = verses
            .iter()
            .map(|v| v.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            reference,
            text,
            verses,
        }
    }
}

/// Lookup failures
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BibleError {
    #[error("Formato inválido. Ex.: 'rm5', 'rm5:3', 'rm5:3-5'")]
    InvalidFormat,

    #[error("Erro ao buscar capítulo: {0}")]
    SourceUnavailable(String),

    #[error("Versículo não encontrado: {0}")]
    VerseNotFound(String),
}

/// `None` start means the whole chapter; a missing end collapses to the start
pub(crate) fn normalize_range(start: Option<u32>, end: Option<u32>) -> Option<(u32, u32)> {
    let start = start?;
    let end = end.unwrap_or(start);
    if end < start {
        Some((end, start))
    } else {
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize_range(None, Some(4)), None);
        assert_eq!(normalize_range(Some(3), None), Some((3, 3)));
        assert_eq!(normalize_range(Some(3), Some(5)), Some((3, 5)));
        assert_eq!(normalize_range(Some(7), Some(3)), Some((3, 7)));
    }

    #[test]
    fn test_lookup_result_joins_text() {
        let result = LookupResult::new(
            "Romanos 5:3-4 (NTLH)".to_string(),
            vec![
                Verse { number: 3, text: "E não somente isso.".to_string() },
                Verse { number: 4, text: "A perseverança produz caráter.".to_string() },
            ],
        );

        assert_eq!(result.text, "E não somente isso. A perseverança produz caráter.");
        assert_eq!(result.verses.len(), 2);
    }

    #[test]
    fn test_error_messages() {
        assert!(BibleError::InvalidFormat.to_string().to_lowercase().contains("formato inválido"));
        assert!(BibleError::SourceUnavailable("timeout".to_string()).to_string().to_lowercase().contains("erro"));
        assert!(BibleError::VerseNotFound("Romanos 5:999 (NTLH)".to_string()).to_string().contains("não encontrado"));
    }
}
