//! Provider selection and credentials.
//!
//! Settings are read from the environment once (the binary loads `.env`
//! first) and then travel as plain values. A session may override the
//! provider or key for its own requests; nothing here writes to disk or
//! back into the environment.

use std::fmt;

use serde::Serialize;

use crate::constants::env_vars;
use crate::types::Provider;

/// Provider choice plus the credentials it may need
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderSettings {
    pub provider: Provider,
    pub openai_api_key: Option<String>,
    pub google_api_key: Option<String>,
}

/// Outcome of checking that the selected provider has its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCheck {
    pub ok: bool,
    pub message: String,
}

impl ProviderSettings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            provider: lookup(env_vars::MODEL_PROVIDER)
                .map(|v| Provider::parse_lenient(&v))
                .unwrap_or_default(),
            openai_api_key: non_empty(env_vars::OPENAI_API_KEY),
            google_api_key: non_empty(env_vars::GOOGLE_API_KEY),
        }
    }

    /// Apply a session's choices on top of these settings.
    ///
    /// A blank key leaves the configured key in place.
    pub fn with_session(&self, provider: Option<Provider>, api_key: Option<&str>) -> Self {
        let mut settings = self.clone();
        if let Some(provider) = provider {
            settings.provider = provider;
        }
        if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
            match settings.provider {
                Provider::OpenAi => settings.openai_api_key = Some(key.to_string()),
                Provider::Gemini => settings.google_api_key = Some(key.to_string()),
                Provider::None => {}
            }
        }
        settings
    }

    /// Key for the selected provider, if one is needed and present
    pub fn active_key(&self) -> Option<&str> {
        match self.provider {
            Provider::OpenAi => self.openai_api_key.as_deref(),
            Provider::Gemini => self.google_api_key.as_deref(),
            Provider::None => None,
        }
    }

    /// Whether any credential is present, whichever provider is selected
    pub fn any_key_present(&self) -> bool {
        self.openai_api_key.is_some() || self.google_api_key.is_some()
    }

    /// Check that the selected provider has the key it needs
    pub fn validate(&self) -> KeyCheck {
        let missing = match self.provider {
            Provider::OpenAi if self.openai_api_key.is_none() => Some(env_vars::OPENAI_API_KEY),
            Provider::Gemini if self.google_api_key.is_none() => Some(env_vars::GOOGLE_API_KEY),
            _ => None,
        };

        match missing {
            Some(var) => KeyCheck {
                ok: false,
                message: format!("{} is not set.", var),
            },
            None => KeyCheck {
                ok: true,
                message: "OK".to_string(),
            },
        }
    }

    /// AI generation needs a remote provider with its key
    pub fn ai_available(&self) -> bool {
        self.provider.is_remote() && self.validate().ok
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("ProviderSettings")
            .field("provider", &self.provider)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("google_api_key", &redact(&self.google_api_key))
            .finish()
    }
}
