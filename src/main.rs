// =============================================================================
// FX Direction Predictor — Main Entry Point
// =============================================================================
//
// Fetches the daily close history and recent headlines for one currency pair
// on a fixed interval and logs a 24-hour directional estimate whenever there
// is unseen news or a significant price move.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod change_detector;
mod decision_policy;
mod engine;
mod error;
mod indicators;
mod report;
mod runtime_config;
mod scheduler;
mod sentiment;
mod sources;
mod types;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::engine::PredictionEngine;
use crate::runtime_config::RuntimeConfig;
use crate::scheduler::Scheduler;
use crate::sentiment::LexiconScorer;
use crate::sources::alpha_vantage::AlphaVantageClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var("PREDICTOR_CONFIG").unwrap_or_else(|_| "predictor_config.json".into());
    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });
    config.apply_env_overrides();
    config.validate().context("invalid configuration")?;

    if config.api_key.is_empty() {
        warn!("ALPHA_VANTAGE_API_KEY is not set; requests will be rejected by the provider");
    }

    info!(
        pair = %config.pair(),
        poll_interval_secs = config.poll_interval_secs,
        history_len = config.history_len,
        "FX direction predictor starting"
    );

    // ── 2. Collaborators & engine ────────────────────────────────────────
    let client = Arc::new(
        AlphaVantageClient::new(&config).context("failed to build Alpha Vantage client")?,
    );
    let engine = PredictionEngine::new(&config, Box::new(LexiconScorer::new()));
    let scheduler = Arc::new(Scheduler::new(
        engine,
        client.clone(),
        client,
        config.history_len,
    ));

    // ── 3. Scheduled cycles (first one immediately) ──────────────────────
    let period = Duration::from_secs(config.poll_interval_secs);
    let runner = tokio::spawn(scheduler.run(period));

    // ── 4. Graceful shutdown ─────────────────────────────────────────────
    tokio::signal::ctrl_c().await?;
    warn!("Shutdown signal received — stopping");
    runner.abort();

    info!("FX direction predictor shut down complete.");
    Ok(())
}
