// =============================================================================
// Sentiment Module
// =============================================================================
//
// - Rolling, title-deduplicated sentiment FIFO
// - Bounded set of processed titles
// - Scorer seam turning a news snippet into a scalar, with a lexicon default

pub mod aggregator;
pub mod lexicon;
pub mod seen_titles;

pub use aggregator::SentimentAggregator;
pub use lexicon::LexiconScorer;

/// Turns free text into a sentiment scalar (positive = bullish for the quote).
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}
