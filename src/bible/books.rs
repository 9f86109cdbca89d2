use std::collections::HashMap;

/// Portuguese book abbreviations used by bibliaonline.com.br
const PORTUGUESE_BOOKS: &[(&str, &str)] = &[
    // Old Testament
    ("gn", "Gênesis"), ("ex", "Êxodo"), ("lv", "Levítico"), ("nm", "Números"),
    ("dt", "Deuteronômio"), ("js", "Josué"), ("jz", "Juízes"), ("rt", "Rute"),
    ("1sm", "1 Samuel"), ("2sm", "2 Samuel"), ("1rs", "1 Reis"), ("2rs", "2 Reis"),
    ("1cr", "1 Crônicas"), ("2cr", "2 Crônicas"), ("ed", "Esdras"), ("ne", "Neemias"),
    // Job keeps its accented site key; the parser only accepts ASCII keys, so it
    // is shown by the formatter but cannot be looked up from a citation.
    ("et", "Ester"), ("jó", "Jó"),
    ("sl", "Salmos"), ("pv", "Provérbios"), ("ec", "Eclesiastes"), ("ct", "Cânticos"),
    ("is", "Isaías"), ("jr", "Jeremias"), ("lm", "Lamentações"), ("ez", "Ezequiel"),
    ("dn", "Daniel"), ("os", "Oséias"), ("jl", "Joel"), ("am", "Amós"), ("ob", "Obadias"),
    ("jn", "Jonas"), ("mq", "Miquéias"), ("na", "Naum"), ("hc", "Habacuque"),
    ("sf", "Sofonias"), ("ag", "Ageu"), ("zc", "Zacarias"), ("ml", "Malaquias"),
    // New Testament
    ("mt", "Mateus"), ("mc", "Marcos"), ("lc", "Lucas"), ("jo", "João"),
    ("at", "Atos"), ("rm", "Romanos"), ("1co", "1 Coríntios"), ("2co", "2 Coríntios"),
    ("gl", "Gálatas"), ("ef", "Efésios"), ("fp", "Filipenses"), ("cl", "Colossenses"),
    ("1ts", "1 Tessalonicenses"), ("2ts", "2 Tessalonicenses"), ("1tm", "1 Timóteo"),
    ("2tm", "2 Timóteo"), ("tt", "Tito"), ("fm", "Filemom"), ("hb", "Hebreus"),
    ("tg", "Tiago"), ("1pe", "1 Pedro"), ("2pe", "2 Pedro"), ("1jo", "1 João"),
    ("2jo", "2 João"), ("3jo", "3 João"), ("jd", "Judas"), ("ap", "Apocalipse"),
];

/// Read-only mapping from book abbreviation to display name
#[derive(Debug, Clone)]
pub struct BookRegistry {
    books: HashMap<String, String>,
}

impl BookRegistry {
    /// Registry with the 66 Portuguese book names
    pub fn portuguese() -> Self {
        Self::from_entries(PORTUGUESE_BOOKS.iter().copied())
    }

    /// Build a registry from arbitrary `(key, name)` pairs
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let books = entries
            .into_iter()
            .map(|(key, name)| (key.to_lowercase(), name.to_string()))
            .collect();

        Self { books }
    }

    /// Display name for a key, or the key upper-cased when it is unknown
    pub fn display_name(&self, key: &str) -> String {
        self.books
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_uppercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.books.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl Default for BookRegistry {
    fn default() -> Self {
        Self::portuguese()
    }
}
