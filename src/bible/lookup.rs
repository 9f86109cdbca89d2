/// Verse lookup tool exposed to the generation layer
use super::{
    BibleError, BookRegistry, LookupResult, ReferenceFormatter, ReferenceParser, VerseExtractor,
    VerseSource, DEFAULT_TRANSLATION,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info};

/// Name the tool is registered under
pub const TOOL_NAME: &str = "lookup_verse";

/// Either the looked-up verses or an `{ "error": ... }` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupResponse {
    Found(LookupResult),
    Failed { error: String },
}

impl LookupResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, LookupResponse::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LookupResponse::Failed { error } => Some(error.as_str()),
            LookupResponse::Found(_) => None,
        }
    }

    pub fn into_result(self) -> Option<LookupResult> {
        match self {
            LookupResponse::Found(result) => Some(result),
            LookupResponse::Failed { .. } => None,
        }
    }
}

impl From<Result<LookupResult, BibleError>> for LookupResponse {
    fn from(result: Result<LookupResult, BibleError>) -> Self {
        match result {
            Ok(found) => LookupResponse::Found(found),
            Err(e) => LookupResponse::Failed { error: e.to_string() },
        }
    }
}

/// Arguments accepted by [`BibleLookupTool::call_tool`]
#[derive(Debug, Clone, Deserialize)]
pub struct LookupArgs {
    pub referencia: String,
    #[serde(default)]
    pub translation: Option<String>,
}

/// Looks up real verses for citations like `rm 5`, `rm 5:3` or `rm 5:3-5`.
/// Ranges must stay inside one chapter.
pub struct BibleLookupTool {
    parser: ReferenceParser,
    formatter: ReferenceFormatter,
    extractor: VerseExtractor,
    source: Box<dyn VerseSource>,
    default_translation: String,
}

impl BibleLookupTool {
    pub fn new(source: Box<dyn VerseSource>, registry: BookRegistry) -> Self {
        Self {
            parser: ReferenceParser::new(),
            formatter: ReferenceFormatter::new(registry),
            extractor: VerseExtractor::new(),
            source,
            default_translation: DEFAULT_TRANSLATION.to_string(),
        }
    }

    pub fn with_default_translation(mut self, translation: impl Into<String>) -> Self {
        self.default_translation = translation.into();
        self
    }

    pub fn default_translation(&self) -> &str {
        &self.default_translation
    }

    /// Look up a citation. Every failure comes back as `{ "error": ... }`.
    pub async fn lookup_verse(&self, referencia: &str, translation: Option<&str>) -> LookupResponse {
        let response = LookupResponse::from(self.try_lookup(referencia, translation).await);
        if let Some(message) = response.error() {
            error!("Lookup of '{}' failed: {}", referencia, message);
        }
        response
    }

    /// Same as [`lookup_verse`](Self::lookup_verse) but with typed errors
    pub async fn try_lookup(
        &self,
        referencia: &str,
        translation: Option<&str>,
    ) -> Result<LookupResult, BibleError> {
        let translation = self.resolve_translation(translation);
        info!("Looking up '{}' (translation: {})", referencia, translation);

        let reference = self.parser.parse(referencia)?;
        let html = self
            .source
            .fetch_chapter(&translation, &reference.book_key, &reference.chapter)
            .await?;

        let verses = self
            .extractor
            .extract(&html, reference.verse_start, reference.verse_end);
        let formatted = self.formatter.format_reference(&reference, &translation);

        if verses.is_empty() {
            return Err(BibleError::VerseNotFound(formatted));
        }

        debug!("{} verses found for {}", verses.len(), formatted);
        info!("Lookup finished: {}", formatted);
        Ok(LookupResult::new(formatted, verses))
    }

    /// Tool entry point taking the JSON arguments produced by a model
    pub async fn call_tool(&self, arguments: &str) -> Value {
        let args: LookupArgs = match serde_json::from_str(arguments) {
            Ok(args) => args,
            Err(e) => {
                error!("Invalid {} arguments '{}': {}", TOOL_NAME, arguments, e);
                return json!({ "error": format!("Argumentos inválidos para {}: {}", TOOL_NAME, e) });
            }
        };

        let response = self
            .lookup_verse(&args.referencia, args.translation.as_deref())
            .await;
        serde_json::to_value(&response)
            .unwrap_or_else(|e| json!({ "error": format!("Erro ao serializar resposta: {}", e) }))
    }

    /// Function schema advertised to chat-completion style models
    pub fn tool_definition(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": TOOL_NAME,
                "description": "Busca versículos reais na Bíblia Online. Aceita referências como 'rm 5', 'rm 5:3' ou 'rm 5:3-5' (intervalo no mesmo capítulo).",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "referencia": {
                            "type": "string",
                            "description": "Referência bíblica, ex.: 'jo 3:16'"
                        },
                        "translation": {
                            "type": "string",
                            "description": "Código da tradução",
                            "default": self.default_translation
                        }
                    },
                    "required": ["referencia"]
                }
            }
        })
    }

    fn resolve_translation(&self, translation: Option<&str>) -> String {
        translation
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(self.default_translation.as_str())
            .to_lowercase()
    }
}
