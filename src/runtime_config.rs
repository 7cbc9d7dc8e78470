// =============================================================================
// Runtime Configuration — predictor settings loaded from JSON
// =============================================================================
//
// Every tunable parameter lives here.  All fields carry `#[serde(default)]`
// so that a partial (or empty) config file still loads, and adding new fields
// never breaks an older file.
//
// The file is only ever read.  Environment variables override a few fields
// after loading (see `apply_env_overrides`).
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_from_symbol() -> String {
    "USD".to_string()
}

fn default_to_symbol() -> String {
    "BRL".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30 * 60
}

fn default_history_len() -> usize {
    60
}

fn default_change_threshold_pct() -> f64 {
    0.5
}

fn default_sentiment_capacity() -> usize {
    10
}

fn default_processed_titles_capacity() -> usize {
    1000
}

fn default_news_limit() -> u32 {
    50
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_ma_period() -> usize {
    20
}

fn default_bollinger_std() -> f64 {
    2.0
}

fn default_rsi_period() -> usize {
    14
}

fn default_support_resistance_window() -> usize {
    60
}

fn default_step() -> f64 {
    0.01
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

// =============================================================================
// IndicatorConfig
// =============================================================================

/// Look-back windows for the indicator library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default = "default_ma_period")]
    pub sma_period: usize,

    #[serde(default = "default_ma_period")]
    pub ema_period: usize,

    #[serde(default = "default_ma_period")]
    pub bollinger_period: usize,

    /// Band half-width in standard deviations.
    #[serde(default = "default_bollinger_std")]
    pub bollinger_std: f64,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_support_resistance_window")]
    pub support_resistance_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_period: default_ma_period(),
            ema_period: default_ma_period(),
            bollinger_period: default_ma_period(),
            bollinger_std: default_bollinger_std(),
            rsi_period: default_rsi_period(),
            support_resistance_window: default_support_resistance_window(),
        }
    }
}

// =============================================================================
// PolicyConfig
// =============================================================================

/// Thresholds and step sizes for the decision policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Price move per unit of average sentiment.
    #[serde(default = "default_step")]
    pub sentiment_weight: f64,

    /// Fixed price move applied on a Bollinger band breach.
    #[serde(default = "default_step")]
    pub band_correction: f64,

    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            sentiment_weight: default_step(),
            band_correction: default_step(),
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
        }
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level configuration for the predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    // --- Pair & schedule ----------------------------------------------------

    #[serde(default = "default_from_symbol")]
    pub from_symbol: String,

    #[serde(default = "default_to_symbol")]
    pub to_symbol: String,

    /// Seconds between scheduled cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Number of most recent daily bars kept in the price series.
    #[serde(default = "default_history_len")]
    pub history_len: usize,

    // --- Engine state bounds ------------------------------------------------

    /// Percent move versus the last recorded price that forces a recompute.
    #[serde(default = "default_change_threshold_pct")]
    pub change_threshold_pct: f64,

    /// Capacity of the rolling sentiment FIFO.
    #[serde(default = "default_sentiment_capacity")]
    pub sentiment_capacity: usize,

    /// Maximum number of remembered news titles.
    #[serde(default = "default_processed_titles_capacity")]
    pub processed_titles_capacity: usize,

    // --- Collaborators ------------------------------------------------------

    /// Alpha Vantage API key.  Normally supplied via `ALPHA_VANTAGE_API_KEY`.
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Optional comma-separated Alpha Vantage news topics, narrowing the
    /// pair's ticker feed.  Empty sends no `topics` filter.
    #[serde(default)]
    pub news_topics: String,

    #[serde(default = "default_news_limit")]
    pub news_limit: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // --- Core parameters ----------------------------------------------------

    #[serde(default)]
    pub indicators: IndicatorConfig,

    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            from_symbol: default_from_symbol(),
            to_symbol: default_to_symbol(),
            poll_interval_secs: default_poll_interval_secs(),
            history_len: default_history_len(),
            change_threshold_pct: default_change_threshold_pct(),
            sentiment_capacity: default_sentiment_capacity(),
            processed_titles_capacity: default_processed_titles_capacity(),
            api_key: String::new(),
            news_topics: String::new(),
            news_limit: default_news_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            indicators: IndicatorConfig::default(),
            policy: PolicyConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults
    /// with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            pair = %config.pair(),
            poll_interval_secs = config.poll_interval_secs,
            "config loaded"
        );

        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("ALPHA_VANTAGE_API_KEY") {
            self.api_key = key.trim().to_string();
        }
        if let Some(sym) = lookup("FX_FROM").filter(|s| !s.trim().is_empty()) {
            self.from_symbol = sym.trim().to_uppercase();
        }
        if let Some(sym) = lookup("FX_TO").filter(|s| !s.trim().is_empty()) {
            self.to_symbol = sym.trim().to_uppercase();
        }
        if let Some(secs) = lookup("POLL_INTERVAL_SECS").and_then(|s| s.trim().parse().ok()) {
            self.poll_interval_secs = secs;
        }
    }

    /// Reject settings that would make the engine meaningless.
    pub fn validate(&self) -> Result<()> {
        let ind = &self.indicators;
        if ind.sma_period == 0
            || ind.ema_period == 0
            || ind.bollinger_period == 0
            || ind.rsi_period == 0
            || ind.support_resistance_window == 0
        {
            bail!("indicator periods must be at least 1");
        }
        if self.history_len == 0 {
            bail!("history_len must be at least 1");
        }
        if self.sentiment_capacity == 0 || self.processed_titles_capacity == 0 {
            bail!("sentiment and processed-title capacities must be at least 1");
        }
        if !(self.change_threshold_pct > 0.0) {
            bail!("change_threshold_pct must be positive");
        }
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be at least 1");
        }
        Ok(())
    }

    /// "FROM/TO" label, e.g. "USD/BRL".
    pub fn pair(&self) -> String {
        format!("{}/{}", self.from_symbol, self.to_symbol)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.pair(), "USD/BRL");
        assert_eq!(cfg.poll_interval_secs, 1800);
        assert_eq!(cfg.history_len, 60);
        assert_eq!(cfg.sentiment_capacity, 10);
        assert_eq!(cfg.indicators.sma_period, 20);
        assert_eq!(cfg.indicators.ema_period, 20);
        assert_eq!(cfg.indicators.bollinger_period, 20);
        assert_eq!(cfg.indicators.rsi_period, 14);
        assert_eq!(cfg.indicators.support_resistance_window, 60);
        assert!((cfg.change_threshold_pct - 0.5).abs() < f64::EPSILON);
        assert!((cfg.policy.sentiment_weight - 0.01).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.from_symbol, "USD");
        assert_eq!(cfg.processed_titles_capacity, 1000);
        assert!((cfg.policy.rsi_overbought - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "to_symbol": "EUR", "indicators": { "rsi_period": 9 } }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.pair(), "USD/EUR");
        assert_eq!(cfg.indicators.rsi_period, 9);
        assert_eq!(cfg.indicators.sma_period, 20);
    }

    #[test]
    fn api_key_is_never_serialised() {
        let mut cfg = RuntimeConfig::default();
        cfg.api_key = "secret".into();
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("ALPHA_VANTAGE_API_KEY", " abc "),
            ("FX_FROM", "eur"),
            ("POLL_INTERVAL_SECS", "60"),
        ]
        .into_iter()
        .collect();
        let mut cfg = RuntimeConfig::default();
        cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.api_key, "abc");
        assert_eq!(cfg.pair(), "EUR/BRL");
        assert_eq!(cfg.poll_interval_secs, 60);
    }

    #[test]
    fn validate_rejects_zero_period() {
        let mut cfg = RuntimeConfig::default();
        cfg.indicators.rsi_period = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = RuntimeConfig::default();
        cfg.change_threshold_pct = 0.0;
        assert!(cfg.validate().is_err());
    }
}
