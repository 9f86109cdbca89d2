//! Prompt-in, record-out generation on top of any [`LLM`].

use super::{ChatMessage, LLM};
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Send a system + user prompt and decode the reply as a JSON record
pub async fn generate_structured<T>(llm: &dyn LLM, system_prompt: &str, prompt: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let messages = vec![ChatMessage::system(system_prompt), ChatMessage::user(prompt)];

    let response = llm.chat(messages).await?;
    if let Some(tokens) = response.tokens_used {
        info!("🤖 {:?} answered using {} tokens", llm.provider_type(), tokens);
    }
    debug!("LLM response received: {}", response.content);

    let cleaned = clean_llm_response(&response.content);
    let json = extract_json_object(&cleaned)
        .ok_or_else(|| anyhow!("LLM response does not contain a JSON object"))?;

    serde_json::from_str(json).context("LLM response does not match the expected record")
}

/// Strip markdown code fences and surrounding whitespace
pub fn clean_llm_response(content: &str) -> String {
    let content = content.trim();

    if content.starts_with("```") {
        if let Some(start) = content.find('\n') {
            if let Some(end) = content.rfind("```") {
                if end > start {
                    return content[start + 1..end].trim().to_string();
                }
            }
        }
    }

    content.replace("```", "").trim().to_string()
}

/// Outermost `{ ... }` span, tolerating prose before or after it
fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}
