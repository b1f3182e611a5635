//! Minimal Gemini `generateContent` client
//!
//! One long-lived `reqwest::Client` is shared by every request so the
//! connection pool survives between messages.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{IntentError, Result};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: &str) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(4)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: format!("{}/{}:generateContent", API_BASE, model.trim()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask for a JSON answer to `text` under the given system instruction
    pub async fn generate_json(&self, system: &str, text: &str) -> Result<String> {
        let request = GenerateRequest::json(system, text);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini request failed: {}", e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Gemini API error {}: {}", status, message);
            return Err(IntentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        let answer = body.first_text().ok_or(IntentError::EmptyResponse)?;
        debug!("Gemini answered {} bytes", answer.len());
        Ok(answer)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn json(system: &str, text: &str) -> Self {
        Self {
            contents: vec![Content::user(text)],
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system.to_string() }],
            },
            generation_config: GenerationConfig {
                temperature: 0.1,
                max_output_tokens: 256,
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.to_string() }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it has any
    fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uses_model() {
        let client = GeminiClient::new("key", "gemini-2.0-flash").unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateRequest::json("system", "gastei 10");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "gastei 10");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "system");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 256);
    }

    #[test]
    fn test_first_text() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"intent\":"},{"text":"\"greeting\"}"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(body.first_text().as_deref(), Some(r#"{"intent":"greeting"}"#));
    }

    #[test]
    fn test_first_text_empty() {
        let body: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(body.first_text(), None);

        let body: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(body.first_text(), None);
    }
}
