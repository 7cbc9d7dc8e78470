// =============================================================================
// IndicatorSet — every indicator for one cycle
// =============================================================================
//
// Recomputed from scratch each cycle.  An indicator that cannot be computed is
// `None`; the decision policy treats it as "cannot decide".

use tracing::debug;

use crate::error::IndicatorError;
use crate::indicators::bollinger::{calculate_bollinger, BollingerBands};
use crate::indicators::ema::calculate_ema;
use crate::indicators::rsi::calculate_rsi;
use crate::indicators::sma::calculate_sma;
use crate::indicators::support_resistance::{calculate_support_resistance, SupportResistance};
use crate::runtime_config::IndicatorConfig;

#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    pub sma: Option<Vec<f64>>,
    pub ema: Option<Vec<f64>>,
    pub bollinger: Option<BollingerBands>,
    pub rsi: Option<f64>,
    pub support_resistance: Option<SupportResistance>,
}

/// Latest scalar of each indicator, as consumed by the decision policy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndicatorSnapshot {
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
}

impl IndicatorSet {
    /// Compute all indicators over oldest-first `closes`.
    pub fn compute(closes: &[f64], cfg: &IndicatorConfig) -> Self {
        Self {
            sma: available("sma", calculate_sma(closes, cfg.sma_period)),
            ema: available("ema", calculate_ema(closes, cfg.ema_period)),
            bollinger: available(
                "bollinger",
                calculate_bollinger(closes, cfg.bollinger_period, cfg.bollinger_std),
            ),
            rsi: available("rsi", calculate_rsi(closes, cfg.rsi_period)),
            support_resistance: available(
                "support_resistance",
                calculate_support_resistance(closes, cfg.support_resistance_window),
            ),
        }
    }

    pub fn snapshot(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            sma: self.sma.as_ref().and_then(|s| s.last().copied()),
            ema: self.ema.as_ref().and_then(|s| s.last().copied()),
            rsi: self.rsi,
            support: self.support_resistance.map(|sr| sr.support),
            resistance: self.support_resistance.map(|sr| sr.resistance),
            bollinger_upper: self.bollinger.as_ref().and_then(|b| b.latest_upper()),
            bollinger_lower: self.bollinger.as_ref().and_then(|b| b.latest_lower()),
        }
    }
}

fn available<T>(name: &str, result: Result<T, IndicatorError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(indicator = name, error = %e, "indicator unavailable this cycle");
            None
        }
    }
}
