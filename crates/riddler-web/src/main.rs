//! # Riddler Web - Puzzle Generator
//!
//! Serves the puzzle generator UI and its JSON API. Puzzles come from the
//! built-in template table or, when a session asks for it, from a model
//! provider with template top-up.
//!
//! ## Architecture
//! ```text
//! Browser → Riddler Web → OpenAI / Gemini (optional)
//!                ↓
//!          Template Store
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod clue;
mod config;
mod generation;
mod provider;
mod routes;
mod state;

use config::AppConfig;
use riddler_common::ProviderSettings;
use state::AppState;

/// Riddler Web - puzzle generator server
#[derive(Parser, Debug)]
#[command(name = "riddler-web")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/riddler.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up MODEL_PROVIDER and API keys from a local .env, if any
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    info!("🧩 Starting Riddler Web v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load(&args.config, &args)?;
    info!("📋 Configuration loaded from {}", args.config);

    // Provider defaults; keys are never logged
    let provider_defaults = ProviderSettings::from_env();
    let key_check = provider_defaults.validate();
    if key_check.ok {
        info!(provider = %provider_defaults.provider, "🤖 Model provider configured");
    } else {
        warn!(
            provider = %provider_defaults.provider,
            "{} AI mode will fall back to templates until a key is supplied.",
            key_check.message
        );
    }

    // Initialize application state
    let listen_addr = config.listen_addr.clone();
    let state = AppState::new(config, provider_defaults)?;
    info!(
        "📚 Template store ready ({} puzzles)",
        state.puzzles.store().len()
    );

    // Build router
    let app = routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", listen_addr))?;
    info!("🚀 Riddler listening on http://{}", listen_addr);

    // Handle graceful shutdown
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("🛑 Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("👋 Riddler shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }

    Ok(())
}
