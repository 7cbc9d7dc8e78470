// =============================================================================
// Decision Policy — priority-ordered rule table
// =============================================================================
//
// Rules are evaluated top to bottom; the first match wins:
//
//   1. Bullish     s > 0, price above SMA, EMA and support, RSI < overbought
//                  => delta = +s * sentiment_weight
//   2. Bearish     s < 0, price below SMA, EMA and resistance, RSI > oversold
//                  => delta = -|s| * sentiment_weight
//   3. Overbought  price above the upper Bollinger band => delta = -band_correction
//   4. Oversold    price below the lower Bollinger band => delta = +band_correction
//   5. Stable      delta = 0
//
// A rule that needs a missing indicator does not match.
// =============================================================================

use crate::indicators::IndicatorSnapshot;
use crate::runtime_config::PolicyConfig;
use crate::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub direction: Direction,
    /// Signed price adjustment applied to the latest close.
    pub delta: f64,
}

impl Decision {
    pub fn estimated_price(&self, price: f64) -> f64 {
        price + self.delta
    }
}

pub fn decide(
    price: f64,
    avg_sentiment: f64,
    ind: &IndicatorSnapshot,
    cfg: &PolicyConfig,
) -> Decision {
    if is_bullish(price, avg_sentiment, ind, cfg) {
        return Decision {
            direction: Direction::Bullish,
            delta: avg_sentiment * cfg.sentiment_weight,
        };
    }
    if is_bearish(price, avg_sentiment, ind, cfg) {
        return Decision {
            direction: Direction::Bearish,
            delta: -avg_sentiment.abs() * cfg.sentiment_weight,
        };
    }
    if ind.bollinger_upper.is_some_and(|upper| price > upper) {
        return Decision {
            direction: Direction::OverboughtCorrection,
            delta: -cfg.band_correction,
        };
    }
    if ind.bollinger_lower.is_some_and(|lower| price < lower) {
        return Decision {
            direction: Direction::OversoldCorrection,
            delta: cfg.band_correction,
        };
    }
    Decision {
        direction: Direction::Stable,
        delta: 0.0,
    }
}

fn is_bullish(price: f64, s: f64, ind: &IndicatorSnapshot, cfg: &PolicyConfig) -> bool {
    let (Some(sma), Some(ema), Some(support), Some(rsi)) = (ind.sma, ind.ema, ind.support, ind.rsi)
    else {
        return false;
    };
    s > 0.0 && price > sma && price > ema && price > support && rsi < cfg.rsi_overbought
}

fn is_bearish(price: f64, s: f64, ind: &IndicatorSnapshot, cfg: &PolicyConfig) -> bool {
    let (Some(sma), Some(ema), Some(resistance), Some(rsi)) =
        (ind.sma, ind.ema, ind.resistance, ind.rsi)
    else {
        return false;
    };
    s < 0.0 && price < sma && price < ema && price < resistance && rsi > cfg.rsi_oversold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            sma: Some(5.00),
            ema: Some(5.02),
            rsi: Some(50.0),
            support: Some(4.90),
            resistance: Some(5.40),
            bollinger_upper: Some(5.35),
            bollinger_lower: Some(4.80),
        }
    }

    #[test]
    fn bullish_example() {
        let d = decide(5.10, 0.3, &snapshot(), &PolicyConfig::default());
        assert_eq!(d.direction, Direction::Bullish);
        assert!((d.estimated_price(5.10) - 5.103).abs() < 1e-9);
    }

    #[test]
    fn bearish_example() {
        let ind = IndicatorSnapshot {
            sma: Some(5.10),
            ema: Some(5.08),
            ..snapshot()
        };
        let d = decide(5.00, -0.5, &ind, &PolicyConfig::default());
        assert_eq!(d.direction, Direction::Bearish);
        assert!((d.estimated_price(5.00) - 4.995).abs() < 1e-9);
    }

    #[test]
    fn overbought_example() {
        // Neutral sentiment rules out both sentiment-driven rules.
        let ind = IndicatorSnapshot {
            bollinger_upper: Some(5.20),
            ..snapshot()
        };
        let d = decide(5.30, 0.0, &ind, &PolicyConfig::default());
        assert_eq!(d.direction, Direction::OverboughtCorrection);
        assert!((d.estimated_price(5.30) - 5.29).abs() < 1e-9);
    }

    #[test]
    fn oversold_correction() {
        let d = decide(4.70, 0.0, &snapshot(), &PolicyConfig::default());
        assert_eq!(d.direction, Direction::OversoldCorrection);
        assert!((d.estimated_price(4.70) - 4.71).abs() < 1e-9);
    }

    #[test]
    fn overbought_rsi_blocks_bullish() {
        let ind = IndicatorSnapshot {
            rsi: Some(75.0),
            ..snapshot()
        };
        let d = decide(5.10, 0.3, &ind, &PolicyConfig::default());
        assert_eq!(d.direction, Direction::Stable);
        assert_eq!(d.delta, 0.0);
    }

    #[test]
    fn bullish_beats_band_correction() {
        let ind = IndicatorSnapshot {
            bollinger_upper: Some(5.05),
            ..snapshot()
        };
        let d = decide(5.10, 0.3, &ind, &PolicyConfig::default());
        assert_eq!(d.direction, Direction::Bullish);
    }

    #[test]
    fn missing_indicator_falls_through() {
        let ind = IndicatorSnapshot {
            ema: None,
            bollinger_upper: Some(5.05),
            ..snapshot()
        };
        let d = decide(5.10, 0.3, &ind, &PolicyConfig::default());
        assert_eq!(d.direction, Direction::OverboughtCorrection);

        let d = decide(5.10, 0.3, &IndicatorSnapshot::default(), &PolicyConfig::default());
        assert_eq!(d.direction, Direction::Stable);
    }
}
