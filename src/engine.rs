// =============================================================================
// Prediction Engine — one owned instance per process
// =============================================================================
//
// Owns every piece of state that survives between cycles:
//   - processed news titles (bounded)
//   - rolling sentiment FIFO
//   - last recorded price
//
// Only `run_cycle` mutates that state.  A cycle is either IDLE (nothing new:
// no unseen news and no significant price move) or RECOMPUTE (ingest news,
// compute indicators, apply the decision policy).  A cycle without a price
// series reports DataUnavailable and leaves state untouched.
// =============================================================================

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::change_detector::ChangeDetector;
use crate::decision_policy::decide;
use crate::error::FetchError;
use crate::indicators::IndicatorSet;
use crate::runtime_config::{IndicatorConfig, PolicyConfig, RuntimeConfig};
use crate::sentiment::{SentimentAggregator, SentimentScorer};
use crate::types::{CycleOutcome, NewsItem, PredictionResult, PriceSeries};

/// Collaborator output for one cycle, gathered by the scheduler.
#[derive(Debug)]
pub struct CycleInput {
    pub series: Result<PriceSeries, FetchError>,
    pub news: Vec<NewsItem>,
}

pub struct PredictionEngine {
    pair: String,
    indicators: IndicatorConfig,
    policy: PolicyConfig,
    change_detector: ChangeDetector,
    sentiment: SentimentAggregator,
    scorer: Box<dyn SentimentScorer>,
    last_price: Option<f64>,
}

impl PredictionEngine {
    pub fn new(config: &RuntimeConfig, scorer: Box<dyn SentimentScorer>) -> Self {
        Self {
            pair: config.pair(),
            indicators: config.indicators.clone(),
            policy: config.policy.clone(),
            change_detector: ChangeDetector::new(config.change_threshold_pct),
            sentiment: SentimentAggregator::new(
                config.sentiment_capacity,
                config.processed_titles_capacity,
            ),
            scorer,
            last_price: None,
        }
    }

    #[cfg(test)]
    pub fn last_price(&self) -> Option<f64> {
        self.last_price
    }

    #[cfg(test)]
    pub fn sentiment(&self) -> &SentimentAggregator {
        &self.sentiment
    }

    /// Run one cycle over already-fetched collaborator data.
    pub fn run_cycle(&mut self, input: CycleInput) -> CycleOutcome {
        let series = match input.series {
            Ok(series) => series,
            Err(e) => {
                warn!(pair = %self.pair, error = %e, "price series unavailable, skipping cycle");
                return CycleOutcome::DataUnavailable {
                    reason: e.to_string(),
                };
            }
        };
        let Some(price) = series.latest_close() else {
            return CycleOutcome::DataUnavailable {
                reason: "price series has no closes".to_string(),
            };
        };

        let unseen = self.unseen_titles(&input.news);
        let price_moved = self.change_detector.fires(&series, self.last_price);

        if unseen == 0 && !price_moved {
            debug!(pair = %self.pair, price, "no unseen news and no significant move");
            return CycleOutcome::Idle;
        }

        info!(pair = %self.pair, unseen_news = unseen, price_moved, "recomputing prediction");

        // ── 1. Ingest unseen news, scoring each title once ──────────────
        // A provider-supplied score wins over the local scorer.
        let mut news_ingested = 0;
        for item in &input.news {
            if self.sentiment.is_processed(&item.title) {
                continue;
            }
            let score = item
                .sentiment
                .unwrap_or_else(|| self.scorer.score(&item.snippet));
            if self.sentiment.ingest(item, score) {
                news_ingested += 1;
                debug!(title = %item.title, score, "news ingested");
            }
        }
        let avg_sentiment = self.sentiment.average();

        // ── 2. Indicators ───────────────────────────────────────────────
        let snapshot = IndicatorSet::compute(&series.closes(), &self.indicators).snapshot();

        // ── 3. Decision policy ──────────────────────────────────────────
        let decision = decide(price, avg_sentiment, &snapshot, &self.policy);
        self.last_price = Some(price);

        CycleOutcome::Updated(PredictionResult {
            id: uuid::Uuid::new_v4().to_string(),
            pair: self.pair.clone(),
            price,
            estimated_price: decision.estimated_price(price),
            direction: decision.direction,
            avg_sentiment,
            support: snapshot.support,
            resistance: snapshot.resistance,
            rsi: snapshot.rsi,
            bollinger_upper: snapshot.bollinger_upper,
            bollinger_lower: snapshot.bollinger_lower,
            news_ingested,
            sentiment_samples: self.sentiment.len(),
            processed_titles: self.sentiment.processed_count(),
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Distinct titles in `news` that have not been processed yet.
    fn unseen_titles(&self, news: &[NewsItem]) -> usize {
        news.iter()
            .map(|n| n.title.as_str())
            .filter(|t| !self.sentiment.is_processed(t))
            .collect::<HashSet<_>>()
            .len()
    }
}
