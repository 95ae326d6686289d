//! Configuration management for the Riddler web server.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use riddler_common::constants::{DEFAULT_LISTEN_ADDR, DEFAULT_UI_COUNT, MAX_AI_PUZZLE_COUNT};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Upper bound on a whole request, provider call included
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Puzzle count preselected in the UI
    #[serde(default = "default_count")]
    pub default_count: u32,

    /// Model provider configuration
    #[serde(default)]
    pub ai: AiConfig,
}

/// Model provider configuration.
///
/// Credentials are not part of this file; they come from the environment
/// or from the session.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI chat completions endpoint
    #[serde(default = "default_openai_endpoint")]
    pub openai_endpoint: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_endpoint")]
    pub gemini_endpoint: String,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Sampling temperature sent to the provider
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// HTTP timeout for one provider call
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,

    /// Largest number of puzzles asked of the model in one call
    #[serde(default = "default_max_items")]
    pub max_items: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_endpoint: default_openai_endpoint(),
            openai_model: default_openai_model(),
            gemini_endpoint: default_gemini_endpoint(),
            gemini_model: default_gemini_model(),
            temperature: default_temperature(),
            timeout_secs: default_ai_timeout(),
            max_items: default_max_items(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_request_timeout() -> u64 { 90 }
fn default_count() -> u32 { DEFAULT_UI_COUNT }
fn default_openai_endpoint() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "gpt-4o-mini".to_string() }
fn default_gemini_endpoint() -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_gemini_model() -> String { "gemini-1.5-flash".to_string() }
fn default_temperature() -> f32 { 0.9 }
fn default_ai_timeout() -> u64 { 60 }
fn default_max_items() -> u32 { MAX_AI_PUZZLE_COUNT }

impl AppConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            // Use defaults if config file doesn't exist
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }

        config.ai.max_items = config.ai.max_items.clamp(1, MAX_AI_PUZZLE_COUNT);

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            request_timeout_secs: default_request_timeout(),
            default_count: default_count(),
            ai: AiConfig::default(),
        }
    }
}
