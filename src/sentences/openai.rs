use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    config::LlmConfig,
    error::{ApiError, ApiResult},
};

/// Minimal client for an OpenAI-compatible `/responses` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Default, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentPart {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ResponsesReply {
    /// Raw HTTP replies only carry the text inside `output[].content[]`;
    /// `output_text` is honoured when a proxy flattens it for us.
    fn into_text(self) -> Option<String> {
        if let Some(text) = self.output_text.filter(|t| !t.trim().is_empty()) {
            return Some(text);
        }

        self.output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .find_map(|part| part.text.filter(|t| !t.trim().is_empty()))
    }
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig, api_key: String) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("LLM HTTP client: {}", e)))?;

        Ok(OpenAiClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, prompt: &str) -> ApiResult<String> {
        debug!("Requesting completion from model {}", self.model);

        let response = self
            .http
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "input": prompt,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorReply>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.to_string());
            warn!("LLM provider returned {}: {}", status, message);
            return Err(ApiError::upstream(format!(
                "Sentence generation failed: {}",
                message
            )));
        }

        let reply: ResponsesReply = response.json().await?;
        reply
            .into_text()
            .ok_or_else(|| ApiError::upstream("Sentence generation returned no text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_text_from_output_items() {
        let reply: ResponsesReply = serde_json::from_str(
            r#"{
                "id": "resp_1",
                "output": [
                    {"type": "reasoning", "summary": []},
                    {"type": "message", "content": [
                        {"type": "output_text", "text": "Vamos al mercado."}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(reply.into_text().as_deref(), Some("Vamos al mercado."));
    }

    #[test]
    fn test_reply_prefers_flattened_output_text() {
        let reply: ResponsesReply =
            serde_json::from_str(r#"{"output_text": "Hello there.", "output": []}"#).unwrap();
        assert_eq!(reply.into_text().as_deref(), Some("Hello there."));
    }

    #[test]
    fn test_reply_without_text() {
        let reply: ResponsesReply = serde_json::from_str(
            r#"{"output": [{"type": "message", "content": [{"type": "refusal", "refusal": "no"}]}]}"#,
        )
        .unwrap();
        assert_eq!(reply.into_text(), None);
    }
}
