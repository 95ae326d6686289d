//! OpenAI chat completions client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use riddler_common::Provider;

use super::{ProviderError, PuzzlePrompt, TextGenerator, truncate};
use crate::config::AiConfig;

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

pub struct OpenAiClient {
    http: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(http: Client, ai: &AiConfig, api_key: String) -> Self {
        Self {
            http,
            endpoint: ai.openai_endpoint.clone(),
            model: ai.openai_model.clone(),
            temperature: ai.temperature,
            api_key,
        }
    }

    fn payload(&self, prompt: &PuzzlePrompt) -> Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user },
            ],
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn generate(&self, prompt: &PuzzlePrompt) -> Result<String, ProviderError> {
        let provider = self.provider();

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.payload(prompt))
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed {
                provider,
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider,
                status,
                body: truncate(&body, 320),
            });
        }

        let body: OpenAiResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider,
                    message: e.to_string(),
                })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| extract_text(&content))
            .ok_or_else(|| ProviderError::InvalidResponse {
                provider,
                message: "response did not include choices".to_string(),
            })
    }
}

/// Message content is either a string or a list of text parts
fn extract_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let client = OpenAiClient::new(Client::new(), &AiConfig::default(), "sk-test".into());
        let prompt = PuzzlePrompt {
            system: "sys".into(),
            user: "usr".into(),
            count: 3,
        };
        let payload = client.payload(&prompt);

        assert_eq!(payload["model"], "gpt-4o-mini");
        assert_eq!(payload["response_format"]["type"], "json_object");
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][1]["content"], "usr");
        assert!(!payload.to_string().contains("sk-test"));
    }

    #[test]
    fn test_extract_text_parts() {
        assert_eq!(extract_text(&json!("plain")), "plain");
        assert_eq!(
            extract_text(&json!([{"type": "text", "text": "a"}, {"type": "text", "text": "b"}])),
            "a\nb"
        );
        assert_eq!(extract_text(&json!(null)), "");
    }
}
