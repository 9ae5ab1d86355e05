//! Gemini client — one non-streaming `generateContent` call per question.
//!
//! Differences from the usual REST pattern worth knowing:
//! - API key goes in the `x-goog-api-key` header (keeps it out of URLs and logs)
//! - Text lives in `candidates[0].content.parts[*].text`
//! - A blocked prompt comes back as 200 with no candidates and a
//!   `promptFeedback.blockReason`
//! - Token usage is in `usageMetadata`

use super::{CompletionBackend, GenerateError};
use crate::config::Config;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone(), config.model.clone()).with_base_url(&config.base_url)
    }

    /// Point at a different endpoint root (proxies, tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

impl CompletionBackend for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        log::info!("[LLM] Model: {}", self.model);
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&serde_json::json!({
                "contents": [
                    {
                        "role": "user",
                        "parts": [{ "text": prompt }]
                    }
                ]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[LLM] Gemini API returned {}: {}", status, body);
            return Err(GenerateError::Status { status, body });
        }

        let parsed: GenerateResponse = response.json().await?;
        log::info!("[LLM] Response in {}ms", start.elapsed().as_millis());

        if let Some(usage) = &parsed.usage_metadata {
            log::info!("[LLM] Input tokens: {}", usage.prompt_token_count);
            log::info!("[LLM] Output tokens: {}", usage.candidates_token_count);
        }

        let Some(candidate) = parsed.candidates.into_iter().next() else {
            if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
                log::warn!("[LLM] Prompt blocked: {}", reason);
                return Err(GenerateError::Blocked(reason));
            }
            return Ok(String::new());
        };

        if let Some(reason) = &candidate.finish_reason {
            log::info!("[LLM] Finish reason: {}", reason);
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new("k", "gemini-2.0-flash").with_base_url("http://localhost:1234/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn response_parts_deserialize() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "```cpp\n"}, {"text": "int main() {}\n```"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 30, "totalTokenCount": 42}
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(parsed.usage_metadata.unwrap().candidates_token_count, 30);
        let parts = &parsed.candidates[0].content.as_ref().unwrap().parts;
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn blocked_response_deserializes() {
        let raw = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.candidates.is_empty());
        assert_eq!(parsed.prompt_feedback.unwrap().block_reason.as_deref(), Some("SAFETY"));
    }
}
