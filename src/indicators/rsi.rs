// =============================================================================
// Relative Strength Index (RSI) — single-window average
// =============================================================================
//
// Step 1 — Take the most recent `period` deltas between consecutive closes.
// Step 2 — Average gain / average loss = plain mean over those `period` deltas.
//          There is no Wilder smoothing over older history.
// Step 3 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// avg_loss == 0 yields RSI = 100, including a perfectly flat window.
//
// Thresholds used by the decision policy: RSI > 70 overbought, RSI < 30
// oversold.
// =============================================================================

use crate::error::IndicatorError;

/// Compute the RSI of the most recent `period` deltas of `closes`.
///
/// Needs at least `period + 1` closes.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Result<f64, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }
    if closes.len() < period + 1 {
        return Err(IndicatorError::InsufficientData {
            required: period + 1,
            available: closes.len(),
        });
    }

    let window = &closes[closes.len() - (period + 1)..];
    let (sum_gain, sum_loss) = window.windows(2).map(|w| w[1] - w[0]).fold(
        (0.0_f64, 0.0_f64),
        |(g, l), d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l - d)
            }
        },
    );

    let period_f = period as f64;
    Ok(rsi_from_averages(sum_gain / period_f, sum_loss / period_f))
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input() {
        assert!(calculate_rsi(&[], 14).is_err());
    }

    #[test]
    fn rsi_period_zero() {
        assert_eq!(calculate_rsi(&[1.0, 2.0, 3.0], 0), Err(IndicatorError::InvalidPeriod));
    }

    #[test]
    fn rsi_insufficient_data() {
        // 14 closes give 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert_eq!(
            calculate_rsi(&closes, 14),
            Err(IndicatorError::InsufficientData {
                required: 15,
                available: 14
            })
        );
    }

    #[test]
    fn rsi_all_gains() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        assert!((calculate_rsi(&closes, 14).unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn rsi_all_losses() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        assert!(calculate_rsi(&closes, 14).unwrap().abs() < 1e-10);
    }

    #[test]
    fn rsi_flat_market_is_100() {
        let closes = vec![5.0; 30];
        assert!((calculate_rsi(&closes, 14).unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn rsi_known_value() {
        // Deltas: +1, -1, +2, -1 => avg gain 0.75, avg loss 0.5, RS 1.5, RSI 60.
        let closes = vec![10.0, 11.0, 10.0, 12.0, 11.0];
        assert!((calculate_rsi(&closes, 4).unwrap() - 60.0).abs() < 1e-10);
    }

    #[test]
    fn rsi_ignores_older_history() {
        // Early crash is outside the most recent 3 deltas, which are all gains.
        let closes = vec![50.0, 10.0, 11.0, 12.0, 13.0];
        assert!((calculate_rsi(&closes, 3).unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let v = calculate_rsi(&closes, 14).unwrap();
        assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
    }
}
