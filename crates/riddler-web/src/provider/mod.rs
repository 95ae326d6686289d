//! Model provider clients.
//!
//! Each provider turns a [`PuzzlePrompt`] into raw text. Nothing here
//! interprets that text; see `riddler_common::normalize`.

mod gemini;
mod openai;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use riddler_common::{GenerationRequest, Provider, ProviderSettings};

use crate::config::AiConfig;

/// Errors from a provider call. Never shown to end users as errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} API key is not set")]
    MissingKey(Provider),

    #[error("{provider} request failed: {message}")]
    RequestFailed { provider: Provider, message: String },

    #[error("{provider} error {status}: {body}")]
    Api {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("invalid {provider} response: {message}")]
    InvalidResponse { provider: Provider, message: String },
}

/// System and user instructions for one puzzle request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzlePrompt {
    pub system: String,
    pub user: String,
    /// Number of puzzles asked for
    pub count: u32,
}

impl PuzzlePrompt {
    /// Prompt for a request, asking for at most `max_items` puzzles
    pub fn for_request(request: &GenerationRequest, max_items: u32) -> Self {
        let count = request.count.clamp(1, max_items.max(1));
        let system = "You create short, self-contained puzzles. \
            Return ONLY strict JSON (no markdown). Schema: {\"items\": [ {\"question\": str, \"answer\": str, \
            \"difficulty\": 'easy|medium|hard', \"category\": 'general|logic|math|wordplay' } ]}."
            .to_string();
        let user = format!(
            "Generate {} unique puzzles for category='{}' and difficulty='{}'. \
             Each question 1-2 sentences max. Respond as a JSON object with an 'items' array only.",
            count, request.category, request.difficulty
        );
        Self { system, user, count }
    }
}

/// Anything that can answer a puzzle prompt with free-form text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn provider(&self) -> Provider;

    async fn generate(&self, prompt: &PuzzlePrompt) -> Result<String, ProviderError>;
}

/// Build the client for the selected provider.
///
/// `Ok(None)` means no provider is selected.
pub fn build_generator(
    http: &Client,
    ai: &AiConfig,
    settings: &ProviderSettings,
) -> Result<Option<Box<dyn TextGenerator>>, ProviderError> {
    let provider = settings.provider;
    if !provider.is_remote() {
        return Ok(None);
    }

    let api_key = settings
        .active_key()
        .ok_or(ProviderError::MissingKey(provider))?
        .to_string();

    let generator: Box<dyn TextGenerator> = match provider {
        Provider::OpenAi => Box::new(OpenAiClient::new(http.clone(), ai, api_key)),
        Provider::Gemini => Box::new(GeminiClient::new(http.clone(), ai, api_key)),
        Provider::None => return Ok(None),
    };
    Ok(Some(generator))
}

/// Shorten an error body for logs and messages
pub(crate) fn truncate(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riddler_common::{Category, Difficulty};

    #[test]
    fn test_prompt_caps_count() {
        let request = GenerationRequest::new(50, Difficulty::Hard, Category::Math).unwrap();
        let prompt = PuzzlePrompt::for_request(&request, 20);
        assert_eq!(prompt.count, 20);
        assert!(prompt.user.contains("Generate 20 unique puzzles"));
        assert!(prompt.user.contains("category='math'"));
        assert!(prompt.user.contains("difficulty='hard'"));
        assert!(prompt.system.contains("\"items\""));
    }

    #[test]
    fn test_build_generator_selection() {
        let http = Client::new();
        let ai = AiConfig::default();

        let none = ProviderSettings::default();
        assert!(build_generator(&http, &ai, &none).unwrap().is_none());

        let missing = ProviderSettings {
            provider: Provider::OpenAi,
            ..Default::default()
        };
        assert!(matches!(
            build_generator(&http, &ai, &missing),
            Err(ProviderError::MissingKey(Provider::OpenAi))
        ));

        let gemini = ProviderSettings {
            provider: Provider::Gemini,
            google_api_key: Some("AIza-test".into()),
            ..Default::default()
        };
        let generator = build_generator(&http, &ai, &gemini).unwrap().unwrap();
        assert_eq!(generator.provider(), Provider::Gemini);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
