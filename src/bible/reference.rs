/// Citation parsing and display formatting
use super::{normalize_range, BibleError, BookRegistry, Reference};
use regex::Regex;
use tracing::{debug, warn};

/// `book chapter (":" verse ("-" verse)?)?` where book is `[1-3]?[a-z]{1,3}`
const REFERENCE_PATTERN: &str = r"^([1-3]?[a-z]{1,3})([0-9]+)(?::([0-9]+)(?:-([0-9]+))?)?$";

/// Parses citations like `rm 5`, `rm 5:3` and `rm 5:3-5`
#[derive(Debug, Clone)]
pub struct ReferenceParser {
    pattern: Regex,
}

impl ReferenceParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(REFERENCE_PATTERN).expect("reference pattern is valid"),
        }
    }

    /// Parse a citation. Whitespace is dropped and case ignored before matching.
    pub fn parse(&self, raw: &str) -> Result<Reference, BibleError> {
        let normalized = normalize(raw);

        let captures = match self.pattern.captures(&normalized) {
            Some(captures) => captures,
            None => {
                warn!("Invalid reference format: '{}'", raw);
                return Err(BibleError::InvalidFormat);
            }
        };

        let book_key = captures[1].to_string();
        let chapter = captures[2].to_string();
        let verse_start = parse_verse(captures.get(3).map(|m| m.as_str()))?;
        let verse_end = parse_verse(captures.get(4).map(|m| m.as_str()))?;

        let reference = Reference {
            book_key,
            chapter,
            verse_start,
            verse_end,
        };
        debug!("Parsed reference '{}' -> {:?}", raw, reference);
        Ok(reference)
    }
}

impl Default for ReferenceParser {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

// Digit groups are guaranteed by the pattern, so only overflow can fail here
fn parse_verse(digits: Option<&str>) -> Result<Option<u32>, BibleError> {
    digits
        .map(|d| d.parse::<u32>().map_err(|_| BibleError::InvalidFormat))
        .transpose()
}

/// Renders references back into their display form
#[derive(Debug, Clone)]
pub struct ReferenceFormatter {
    registry: BookRegistry,
}

impl ReferenceFormatter {
    pub fn new(registry: BookRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &BookRegistry {
        &self.registry
    }

    /// `João 3`, `João 3:16` or `João 3:16-18`, followed by the translation code
    pub fn format(
        &self,
        book_key: &str,
        chapter: &str,
        verse_start: Option<u32>,
        verse_end: Option<u32>,
        translation: &str,
    ) -> String {
        let book = self.registry.display_name(book_key);
        let translation = translation.to_uppercase();

        match normalize_range(verse_start, verse_end) {
            None => format!("{} {} ({})", book, chapter, translation),
            Some((start, end)) if start == end => {
                format!("{} {}:{} ({})", book, chapter, start, translation)
            }
            Some((start, end)) => {
                format!("{} {}:{}-{} ({})", book, chapter, start, end, translation)
            }
        }
    }

    pub fn format_reference(&self, reference: &Reference, translation: &str) -> String {
        self.format(
            &reference.book_key,
            &reference.chapter,
            reference.verse_start,
            reference.verse_end,
            translation,
        )
    }
}

impl Default for ReferenceFormatter {
    fn default() -> Self {
        Self::new(BookRegistry::portuguese())
    }
}
