/// Verse extraction from chapter markup
use super::{normalize_range, Verse};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Class marking a span that holds a verse number
const NUMBER_CLASS: &str = "v";
/// Class marking a span that holds verse body text
const TEXT_CLASS: &str = "t";

/// Role of a span inside the chapter page
#[derive(Debug, Clone, PartialEq, Eq)]
enum SpanRole {
    Number(u32),
    Text(String),
    Other,
}

/// Pairs verse-number spans with the text spans that follow them
#[derive(Debug, Clone)]
pub struct VerseExtractor {
    span_selector: Selector,
}

impl VerseExtractor {
    pub fn new() -> Self {
        Self {
            span_selector: Selector::parse("span").expect("span selector is valid"),
        }
    }

    /// Extract the verses of a chapter page, keeping only `[start, end]` when a
    /// start is given. Malformed or empty markup yields an empty list.
    pub fn extract(&self, html: &str, verse_start: Option<u32>, verse_end: Option<u32>) -> Vec<Verse> {
        debug!("Extracting verses: start={:?}, end={:?}", verse_start, verse_end);
        let verses = self.extract_all(html);
        let filtered = filter_range(verses, verse_start, verse_end);
        debug!("{} verses after range filter", filtered.len());
        filtered
    }

    /// Every verse on the page, in document order
    pub fn extract_all(&self, html: &str) -> Vec<Verse> {
        let document = Html::parse_document(html);
        let mut accumulator = VerseAccumulator::default();

        for span in document.select(&self.span_selector) {
            match classify(&span) {
                SpanRole::Number(number) => accumulator.open(number),
                SpanRole::Text(text) => accumulator.push_text(text),
                SpanRole::Other => {}
            }
        }

        let verses = accumulator.finish();
        debug!("Extracted {} verses from {} bytes of markup", verses.len(), html.len());
        verses
    }
}

impl Default for VerseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(span: &ElementRef) -> SpanRole {
    let element = span.value();
    let text = span.text().collect::<String>();
    let text = text.trim();

    if has_class(element, NUMBER_CLASS) && is_bare_integer(text) {
        if let Ok(number) = text.parse::<u32>() {
            return SpanRole::Number(number);
        }
    }

    if has_class(element, TEXT_CLASS) {
        return SpanRole::Text(text.to_string());
    }

    SpanRole::Other
}

fn has_class(element: &scraper::node::Element, class: &str) -> bool {
    element.classes().any(|c| c == class)
}

fn is_bare_integer(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Single open verse plus everything already closed.
///
/// A number seen twice replaces the text of its first occurrence, which keeps
/// its original position.
#[derive(Debug, Default)]
struct VerseAccumulator {
    verses: Vec<Verse>,
    current_number: Option<u32>,
    fragments: Vec<String>,
}

impl VerseAccumulator {
    fn open(&mut self, number: u32) {
        self.close();
        self.current_number = Some(number);
    }

    fn push_text(&mut self, text: String) {
        if self.current_number.is_some() {
            self.fragments.push(text);
        }
    }

    fn close(&mut self) {
        let Some(number) = self.current_number.take() else {
            return;
        };
        let text = self.fragments.join(" ").trim().to_string();
        self.fragments.clear();

        match self.verses.iter_mut().find(|v| v.number == number) {
            Some(existing) => {
                debug!("Verse {} repeated in markup, keeping the later text", number);
                existing.text = text;
            }
            None => self.verses.push(Verse { number, text }),
        }
    }

    fn finish(mut self) -> Vec<Verse> {
        self.close();
        self.verses
    }
}

/// Keep verses inside the requested bounds, preserving order
pub fn filter_range(verses: Vec<Verse>, verse_start: Option<u32>, verse_end: Option<u32>) -> Vec<Verse> {
    match normalize_range(verse_start, verse_end) {
        None => verses,
        Some((start, end)) => verses
            .into_iter()
            .filter(|v| v.number >= start && v.number <= end)
            .collect(),
    }
}
