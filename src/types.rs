// =============================================================================
// Shared types used across the predictor
// =============================================================================
//
// Price ordering convention: every price slice in this crate is OLDEST-FIRST.
// The most recent close is always the last element.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One daily close for the configured currency pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Normalized, date-ordered (oldest-first) window of daily closes.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Normalize raw collaborator output into a series.
    ///
    /// - Drops bars whose close is non-finite or non-positive.
    /// - Sorts ascending by date.
    /// - Removes duplicate dates; the record that came later in `bars` wins.
    /// - Keeps only the most recent `max_len` bars.
    ///
    /// Returns `FetchError::Empty` when nothing usable is left.
    pub fn from_bars(bars: Vec<PriceBar>, max_len: usize) -> Result<Self, FetchError> {
        let mut bars: Vec<PriceBar> = bars
            .into_iter()
            .filter(|b| b.close.is_finite() && b.close > 0.0)
            .collect();

        // Stable sort keeps input order among equal dates, so reversing before
        // dedup lets the later record survive.
        bars.reverse();
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);

        if bars.len() > max_len {
            bars.drain(..bars.len() - max_len);
        }

        if bars.is_empty() {
            return Err(FetchError::Empty);
        }

        Ok(Self { bars })
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Most recent close.
    pub fn latest_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Close immediately before the most recent one.
    pub fn previous_close(&self) -> Option<f64> {
        self.bars.len().checked_sub(2).map(|i| self.bars[i].close)
    }
}

/// A news headline with its summary text.  `title` is the dedup key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    /// Score already attached by the news provider, if any.  When absent the
    /// engine scores `snippet` itself.
    #[serde(default)]
    pub sentiment: Option<f64>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            sentiment: None,
        }
    }

    pub fn with_sentiment(mut self, score: f64) -> Self {
        self.sentiment = Some(score).filter(|s| s.is_finite());
        self
    }
}

/// Directional call produced by the decision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
    OverboughtCorrection,
    OversoldCorrection,
    Stable,
}

impl Direction {
    /// Operator-facing recommendation text.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Bullish => "Possible rise over the next 24 hours",
            Self::Bearish => "Possible fall over the next 24 hours",
            Self::OverboughtCorrection => "Possible downward correction (overbought)",
            Self::OversoldCorrection => "Possible upward correction (oversold)",
            Self::Stable => "Possible stability over the next 24 hours",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::OverboughtCorrection => write!(f, "OverboughtCorrection"),
            Self::OversoldCorrection => write!(f, "OversoldCorrection"),
            Self::Stable => write!(f, "Stable"),
        }
    }
}

/// Output of one recompute cycle.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// Unique identifier for this prediction (UUID v4).
    pub id: String,

    /// Currency pair, e.g. "USD/BRL".
    pub pair: String,

    /// Latest close the prediction was made from.
    pub price: f64,

    pub estimated_price: f64,
    pub direction: Direction,
    pub avg_sentiment: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub support: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger_upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger_lower: Option<f64>,

    /// Number of news items newly ingested during this cycle.
    pub news_ingested: usize,

    /// Scores currently held in the rolling sentiment window.
    pub sentiment_samples: usize,

    /// Titles currently remembered as processed.
    pub processed_titles: usize,

    /// ISO 8601 timestamp of when this prediction was created.
    pub created_at: String,
}

/// What a single engine cycle produced.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// Nothing new: no unseen news and no significant price move.
    Idle,
    Updated(PredictionResult),
    /// Price data could not be obtained; state untouched.
    DataUnavailable { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(y: i32, m: u32, d: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            close,
        }
    }

    #[test]
    fn series_sorts_oldest_first() {
        let series = PriceSeries::from_bars(
            vec![bar(2024, 1, 3, 5.3), bar(2024, 1, 1, 5.1), bar(2024, 1, 2, 5.2)],
            60,
        )
        .unwrap();
        assert_eq!(series.closes(), vec![5.1, 5.2, 5.3]);
        assert_eq!(series.latest_close(), Some(5.3));
        assert_eq!(series.previous_close(), Some(5.2));
    }

    #[test]
    fn series_dedups_dates_keeping_later_record() {
        let series = PriceSeries::from_bars(
            vec![bar(2024, 1, 1, 5.0), bar(2024, 1, 2, 5.1), bar(2024, 1, 2, 5.15)],
            60,
        )
        .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest_close(), Some(5.15));
    }

    #[test]
    fn series_trims_to_most_recent() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars: Vec<PriceBar> = (0..100)
            .map(|i| PriceBar {
                date: start + chrono::Duration::days(i),
                close: 1.0 + i as f64,
            })
            .collect();
        let series = PriceSeries::from_bars(bars, 60).unwrap();
        assert_eq!(series.len(), 60);
        assert_eq!(series.closes()[0], 41.0);
        assert_eq!(series.latest_close(), Some(100.0));
    }

    #[test]
    fn series_drops_bad_closes() {
        let series = PriceSeries::from_bars(
            vec![bar(2024, 1, 1, f64::NAN), bar(2024, 1, 2, -1.0), bar(2024, 1, 3, 5.0)],
            60,
        )
        .unwrap();
        assert_eq!(series.len(), 1);
        assert!(series.previous_close().is_none());
    }

    #[test]
    fn series_empty_is_error() {
        assert!(matches!(PriceSeries::from_bars(vec![], 60), Err(FetchError::Empty)));
    }
}
