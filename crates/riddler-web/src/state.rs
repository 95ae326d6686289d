//! Application state and shared resources.

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::generation::PuzzleService;
use riddler_common::ProviderSettings;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// Provider settings read from the environment at startup.
    /// Sessions layer their own choices on top per request.
    pub provider_defaults: Arc<ProviderSettings>,

    /// Puzzle generation service
    pub puzzles: Arc<PuzzleService>,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, provider_defaults: ProviderSettings) -> Result<Self> {
        let puzzles = Arc::new(PuzzleService::new(config.ai.clone())?);

        Ok(Self {
            config: Arc::new(config),
            provider_defaults: Arc::new(provider_defaults),
            puzzles,
            started_at: Instant::now(),
        })
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
