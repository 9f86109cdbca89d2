/// Remote chapter source
use super::BibleError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Default chapter page template on bibliaonline.com.br
pub const BIBLIA_ONLINE_URL: &str = "https://www.bibliaonline.com.br/{translation}/{slug}/{chapter}";

/// Anything that can hand back the raw markup of a chapter
#[async_trait]
pub trait VerseSource: Send + Sync {
    async fn fetch_chapter(
        &self,
        translation: &str,
        book_key: &str,
        chapter: &str,
    ) -> std::result::Result<String, BibleError>;
}

/// Fetches chapter pages over HTTP. One attempt per call, no retries.
#[derive(Clone)]
pub struct BibliaOnlineSource {
    client: Client,
    url_template: String,
    timeout: Duration,
}

impl BibliaOnlineSource {
    pub fn new(url_template: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_seconds);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()?;

        Ok(Self {
            client,
            url_template: url_template.into(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Substitute translation, slug and chapter into the template
    pub fn chapter_url(
        &self,
        translation: &str,
        book_key: &str,
        chapter: &str,
    ) -> std::result::Result<Url, BibleError> {
        let raw = self
            .url_template
            .replace("{translation}", &urlencoding::encode(translation))
            .replace("{slug}", &urlencoding::encode(book_key))
            .replace("{chapter}", &urlencoding::encode(chapter));

        Url::parse(&raw).map_err(|e| BibleError::SourceUnavailable(format!("URL inválida '{}': {}", raw, e)))
    }
}

#[async_trait]
impl VerseSource for BibliaOnlineSource {
    async fn fetch_chapter(
        &self,
        translation: &str,
        book_key: &str,
        chapter: &str,
    ) -> std::result::Result<String, BibleError> {
        let url = self.chapter_url(translation, book_key, chapter)?;
        info!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!("Request to {} failed: {}", url, e);
                BibleError::SourceUnavailable(e.to_string())
            })?;

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read body from {}: {}", url, e);
            BibleError::SourceUnavailable(e.to_string())
        })?;

        debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
