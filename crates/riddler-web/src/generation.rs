//! Puzzle generation service.
//!
//! Chooses between the template store and a model provider for each
//! request. Provider problems never reach the caller as errors: they end
//! in a template fallback plus a notice for the UI.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use riddler_common::normalize::normalize_response;
use riddler_common::{Generation, GenerationRequest, Provenance, ProviderSettings, TemplateStore};

use crate::config::AiConfig;
use crate::provider::{PuzzlePrompt, TextGenerator, build_generator};

/// Generation result plus an optional message for the user
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub generation: Generation,
    pub notice: Option<String>,
}

impl GenerationOutcome {
    fn quiet(generation: Generation) -> Self {
        Self {
            generation,
            notice: None,
        }
    }
}

/// Puzzle generation service
pub struct PuzzleService {
    store: &'static TemplateStore,
    http: Client,
    ai: AiConfig,
}

impl PuzzleService {
    pub fn new(ai: AiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(ai.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            store: TemplateStore::builtin(),
            http,
            ai,
        })
    }

    pub fn store(&self) -> &TemplateStore {
        self.store
    }

    /// Offline generation from the template store
    pub fn from_templates(&self, request: &GenerationRequest) -> Generation {
        let puzzles = self.store.select_many(request, &mut rand::rng());
        Generation::new(puzzles, Provenance::Templates, None)
    }

    /// Generate puzzles, using the session's provider when `use_ai` is set
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        use_ai: bool,
        settings: &ProviderSettings,
    ) -> GenerationOutcome {
        if !use_ai {
            return GenerationOutcome::quiet(self.from_templates(request));
        }

        match build_generator(&self.http, &self.ai, settings) {
            Ok(Some(generator)) => self.generate_with(generator.as_ref(), request).await,
            Ok(None) => {
                tracing::debug!("AI mode requested without a provider");
                self.fallback(
                    request,
                    "AI mode needs a model provider; using templates instead.".to_string(),
                )
            }
            Err(e) => {
                tracing::info!(error = %e, "AI provider unavailable, using templates");
                let check = settings.validate();
                self.fallback(
                    request,
                    format!("{} Falling back to templates.", check.message),
                )
            }
        }
    }

    /// Run one provider call and normalize whatever comes back
    pub async fn generate_with(
        &self,
        generator: &dyn TextGenerator,
        request: &GenerationRequest,
    ) -> GenerationOutcome {
        let provider = generator.provider();
        let prompt = PuzzlePrompt::for_request(request, self.ai.max_items);

        tracing::debug!(
            provider = %provider,
            requested = request.count,
            asked = prompt.count,
            "Requesting puzzles from provider"
        );

        let (text, failure) = match generator.generate(&prompt).await {
            Ok(text) => (Some(text), None),
            Err(e) => {
                tracing::warn!(provider = %provider, error = %e, "Provider call failed");
                (
                    None,
                    Some(format!("{} call failed: {}. Falling back to templates.", provider, e)),
                )
            }
        };

        let generation = normalize_response(
            text.as_deref(),
            request,
            provider,
            self.store,
            &mut rand::rng(),
        );

        let notice = match generation.provenance {
            Provenance::TemplatesFallback => failure.or_else(|| {
                Some(
                    "Couldn't parse a valid response from the model; using templates instead."
                        .to_string(),
                )
            }),
            _ => None,
        };

        GenerationOutcome { generation, notice }
    }

    fn fallback(&self, request: &GenerationRequest, notice: String) -> GenerationOutcome {
        let puzzles = self.store.select_many(request, &mut rand::rng());
        GenerationOutcome {
            generation: Generation::new(puzzles, Provenance::TemplatesFallback, None),
            notice: Some(notice),
        }
    }
}
