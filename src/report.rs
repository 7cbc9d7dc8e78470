// =============================================================================
// Report — operator-facing rendering of cycle outcomes
// =============================================================================

use tracing::{info, warn};

use crate::types::{CycleOutcome, PredictionResult};

pub fn render(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::Idle => info!("=== Waiting for a new prediction... ==="),
        CycleOutcome::DataUnavailable { reason } => {
            warn!(reason = %reason, "historical data unavailable, prediction skipped")
        }
        CycleOutcome::Updated(result) => render_prediction(result),
    }
}

fn render_prediction(r: &PredictionResult) {
    info!(
        id = %r.id,
        pair = %r.pair,
        direction = %r.direction,
        price = r.price,
        estimated_price = r.estimated_price,
        avg_sentiment = r.avg_sentiment,
        news_ingested = r.news_ingested,
        sentiment_samples = r.sentiment_samples,
        processed_titles = r.processed_titles,
        "=== New prediction ==="
    );
    info!("Recommendation: {}", r.direction.recommendation());
    info!(
        "Estimated {} for the next 24 hours: {:.2}",
        r.pair, r.estimated_price
    );
    info!(
        "Support: {}, Resistance: {}",
        fmt_level(r.support),
        fmt_level(r.resistance)
    );
    info!(
        "RSI: {}, Bollinger Bands (U: {}, L: {})",
        fmt_level(r.rsi),
        fmt_level(r.bollinger_upper),
        fmt_level(r.bollinger_lower)
    );
}

/// Two-decimal rendering, "n/a" for an indicator that could not be computed.
fn fmt_level(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}
