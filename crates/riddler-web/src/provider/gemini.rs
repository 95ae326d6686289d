//! Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{Value, json};

use riddler_common::Provider;

use super::{ProviderError, PuzzlePrompt, TextGenerator, truncate};
use crate::config::AiConfig;

pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: Client, ai: &AiConfig, api_key: String) -> Self {
        Self {
            http,
            endpoint: ai.gemini_endpoint.clone(),
            model: ai.gemini_model.clone(),
            temperature: ai.temperature,
            api_key,
        }
    }

    fn url(&self) -> Result<Url, ProviderError> {
        resolve_endpoint(&self.endpoint, &self.model, &self.api_key)
    }

    fn payload(&self, prompt: &PuzzlePrompt) -> Value {
        json!({
            "systemInstruction": { "parts": [ { "text": prompt.system } ] },
            "contents": [ { "parts": [ { "text": prompt.user } ] } ],
            "generationConfig": {
                "temperature": self.temperature,
                "responseMimeType": "application/json",
            },
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn generate(&self, prompt: &PuzzlePrompt) -> Result<String, ProviderError> {
        let provider = self.provider();

        let response = self
            .http
            .post(self.url()?)
            .json(&self.payload(prompt))
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed {
                provider,
                // reqwest errors include the URL, which carries the key
                message: e.without_url().to_string(),
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

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse {
                provider,
                message: e.without_url().to_string(),
            })?;

        candidate_text(&body).ok_or_else(|| ProviderError::InvalidResponse {
            provider,
            message: "response did not include candidates".to_string(),
        })
    }
}

/// Build `{base}/v1beta/models/{model}:generateContent?key=...`
fn resolve_endpoint(endpoint: &str, model: &str, api_key: &str) -> Result<Url, ProviderError> {
    let raw = if endpoint.contains(":generateContent") {
        endpoint.to_string()
    } else {
        format!(
            "{}/v1beta/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            model
        )
    };

    let mut url = Url::parse(&raw).map_err(|e| ProviderError::RequestFailed {
        provider: Provider::Gemini,
        message: format!("invalid endpoint {}: {}", raw, e),
    })?;

    if !url.query_pairs().any(|(k, _)| k == "key") {
        url.query_pairs_mut().append_pair("key", api_key);
    }
    Ok(url)
}

/// Text parts of the first candidate, joined
fn candidate_text(body: &Value) -> Option<String> {
    let parts = body["candidates"]
        .as_array()?
        .first()?["content"]["parts"]
        .as_array()?;
    Some(
        parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_endpoint() {
        let url = resolve_endpoint("https://example.test/", "gemini-pro", "k1").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/v1beta/models/gemini-pro:generateContent?key=k1"
        );

        let url = resolve_endpoint(
            "https://example.test/v1/models/x:generateContent?key=preset",
            "ignored",
            "k2",
        )
        .unwrap();
        assert!(url.as_str().ends_with("key=preset"));
    }

    #[test]
    fn test_candidate_text() {
        let body = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"items\": []}" } ] } }
            ]
        });
        assert_eq!(candidate_text(&body).as_deref(), Some("{\"items\": []}"));
        assert!(candidate_text(&json!({"candidates": []})).is_none());
    }

    #[test]
    fn test_payload_requests_json() {
        let client = GeminiClient::new(Client::new(), &AiConfig::default(), "k".into());
        let prompt = PuzzlePrompt {
            system: "sys".into(),
            user: "usr".into(),
            count: 1,
        };
        let payload = client.payload(&prompt);
        assert_eq!(payload["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "usr");
    }
}
