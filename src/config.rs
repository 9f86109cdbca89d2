use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::bible::source::BIBLIA_ONLINE_URL;
use crate::bible::DEFAULT_TRANSLATION;
use crate::llm::{LLMConfig, LLMProvider};

/// Configuration for the script generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Language model settings
    pub llm: GenerationConfig,

    /// Verse source settings
    pub bible: BibleConfig,

    /// Output and storage settings
    pub storage: StorageConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// LLM provider to use
    pub provider: LLMProvider,

    /// Chat completions endpoint (LM Studio or a proxy)
    pub endpoint: Option<String>,

    /// API key (required for OpenAI)
    pub api_key: Option<String>,

    /// Model to use
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Temperature for script generation
    pub script_temperature: f32,

    /// Temperature for YouTube metadata generation
    pub video_temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BibleConfig {
    /// Chapter URL template with `{translation}`, `{slug}` and `{chapter}`
    pub base_url: String,

    /// Translation used when none is requested
    pub default_translation: String,

    /// HTTP request timeout in seconds
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for script JSON files
    pub json_dir: PathBuf,

    /// SQLite database file
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set
    pub level: String,
}

impl GenerationConfig {
    /// Provider settings for script generation
    pub fn script_llm(&self) -> LLMConfig {
        self.llm_config().with_temperature(self.script_temperature)
    }

    /// Provider settings for video metadata generation
    pub fn video_llm(&self) -> LLMConfig {
        self.llm_config().with_temperature(self.video_temperature)
    }

    fn llm_config(&self) -> LLMConfig {
        LLMConfig {
            provider: self.provider,
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.script_temperature,
            timeout_seconds: self.timeout_seconds,
        }
    }
}

impl Config {
    /// Load configuration from the first file found, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_paths = [
            "roteiro-biblico.toml",
            "config/roteiro-biblico.toml",
        ];

        let mut config: Option<Config> = None;
        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(parsed) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        config = Some(parsed);
                        break;
                    }
                    Err(e) => {
                        return Err(anyhow!("Failed to parse config file {}: {}", path, e));
                    }
                }
            }
        }

        let mut config = config.unwrap_or_default();
        config.apply_env();
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override settings with environment variables
    pub fn apply_env(&mut self) {
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            self.llm.api_key = Some(api_key);
        }

        if let Ok(provider) = std::env::var("ROTEIRO_LLM_PROVIDER") {
            match provider.parse() {
                Ok(provider) => self.llm.provider = provider,
                Err(e) => tracing::warn!("Ignoring ROTEIRO_LLM_PROVIDER: {}", e),
            }
        }

        if let Ok(model) = std::env::var("ROTEIRO_LLM_MODEL") {
            self.llm.model = model;
        }

        if let Ok(endpoint) = std::env::var("ROTEIRO_LLM_ENDPOINT") {
            self.llm.endpoint = Some(endpoint);
        }

        if let Ok(db_path) = std::env::var("ROTEIRO_DB_PATH") {
            self.storage.database_path = PathBuf::from(db_path);
        }

        if let Ok(json_dir) = std::env::var("ROTEIRO_JSON_DIR") {
            self.storage.json_dir = PathBuf::from(json_dir);
        }

        if let Ok(log_level) = std::env::var("ROTEIRO_LOG_LEVEL") {
            self.logging.level = log_level;
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path);
        Ok(())
    }

    /// Checks needed before any lookup
    pub fn validate_bible(&self) -> Result<()> {
        if self.bible.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }

        if self.bible.default_translation.trim().is_empty() {
            return Err(anyhow!("default_translation must not be empty"));
        }

        for placeholder in ["{translation}", "{slug}", "{chapter}"] {
            if !self.bible.base_url.contains(placeholder) {
                return Err(anyhow!("base_url is missing the {} placeholder", placeholder));
            }
        }

        Ok(())
    }

    /// Validate configuration for script generation
    pub fn validate(&self) -> Result<()> {
        self.validate_bible()?;

        if self.llm.timeout_seconds == 0 {
            return Err(anyhow!("llm timeout_seconds must be greater than 0"));
        }

        if self.llm.provider == LLMProvider::OpenAI && self.llm.api_key.is_none() {
            return Err(anyhow!("API key required for OpenAI (set OPENAI_API_KEY)"));
        }

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Roteiro Bíblico Configuration:\n\
            - LLM Provider: {:?}\n\
            - Model: {}\n\
            - Translation: {}\n\
            - JSON Directory: {}\n\
            - Database: {}",
            self.llm.provider,
            self.llm.model,
            self.bible.default_translation,
            self.storage.json_dir.display(),
            self.storage.database_path.display()
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: GenerationConfig {
                provider: LLMProvider::OpenAI,
                endpoint: None,
                api_key: None,
                model: "gpt-4o-mini".to_string(),
                max_tokens: 4096,
                timeout_seconds: 120,
                script_temperature: 0.3,
                video_temperature: 0.7,
            },
            bible: BibleConfig {
                base_url: BIBLIA_ONLINE_URL.to_string(),
                default_translation: DEFAULT_TRANSLATION.to_string(),
                request_timeout_seconds: 10,
            },
            storage: StorageConfig {
                json_dir: PathBuf::from("roteiros_json"),
                database_path: PathBuf::from("roteiros.sqlite3"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_provider(mut self, provider: LLMProvider) -> Self {
        self.config.llm.provider = provider;
        self
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.config.llm.api_key = Some(api_key);
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.config.llm.model = model;
        self
    }

    pub fn with_translation(mut self, translation: String) -> Self {
        self.config.bible.default_translation = translation;
        self
    }

    pub fn with_json_dir(mut self, dir: PathBuf) -> Self {
        self.config.storage.json_dir = dir;
        self
    }

    pub fn with_database_path(mut self, path: PathBuf) -> Self {
        self.config.storage.database_path = path;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
