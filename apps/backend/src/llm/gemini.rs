use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::{LlmError, TextGenerator};
use crate::config::settings::LlmSettings;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Generative Language `generateContent` over HTTPS.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl GeminiClient {
    /// Build a client; `NotConfigured` when no API key is set.
    pub fn new(settings: &LlmSettings) -> Result<Self, LlmError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(LlmError::NotConfigured)?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model: settings.model.clone(),
            max_output_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        })
    }

    /// The key travels in a header so it never shows up in a request URL.
    fn build_request(&self, prompt: &str) -> Result<reqwest::Request, LlmError> {
        let url = format!("{API_BASE}/models/{}:generateContent", self.model);
        Ok(self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&self.request_body(prompt))
            .build()?)
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "maxOutputTokens": self.max_output_tokens,
                "temperature": self.temperature,
            },
        })
    }
}

/// Concatenate the text parts of the first candidate.
fn candidate_text(body: &Value) -> Result<String, LlmError> {
    let parts = body["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| LlmError::Malformed("missing candidates[0].content.parts".into()))?;
    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim();
    if text.is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text.to_string())
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "calling text generator");

        let req = self.build_request(prompt)?;
        let res = self.client.execute(req).await?.error_for_status()?;
        let body: Value = res.json().await?;
        candidate_text(&body)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
