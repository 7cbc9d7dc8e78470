// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices than the SMA does.
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = (close_t - EMA_{t-1}) * multiplier + EMA_{t-1}
//
// The first EMA value is seeded with the SMA of the first `period` closes, so
// the output is index-aligned with `calculate_sma` for the same period.
// =============================================================================

use crate::error::IndicatorError;
use crate::indicators::sma::check_period;

/// Compute the EMA series for `closes` and look-back `period`.
///
/// Output length is `closes.len() - period + 1`; element 0 is the SMA seed.
pub fn calculate_ema(closes: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    check_period(closes.len(), period)?;

    let multiplier = 2.0 / (period + 1) as f64;
    let seed = closes[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(closes.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for &close in &closes[period..] {
        let ema = (close - prev) * multiplier + prev;
        result.push(ema);
        prev = ema;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::sma::calculate_sma;

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 5).is_err());
    }

    #[test]
    fn ema_period_zero() {
        assert_eq!(calculate_ema(&[1.0, 2.0, 3.0], 0), Err(IndicatorError::InvalidPeriod));
    }

    #[test]
    fn ema_period_equals_length() {
        let ema = calculate_ema(&[2.0, 4.0, 6.0], 3).unwrap();
        assert_eq!(ema.len(), 1);
        assert!((ema[0] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_seed_matches_sma() {
        let closes = vec![5.0, 5.1, 5.3, 5.2, 5.4, 5.6, 5.5];
        let ema = calculate_ema(&closes, 4).unwrap();
        let sma = calculate_sma(&closes, 4).unwrap();
        assert_eq!(ema.len(), sma.len());
        assert!((ema[0] - sma[0]).abs() < 1e-12);
    }

    #[test]
    fn ema_known_values() {
        // 5-period EMA of 1..=10: seed 3.0, multiplier 1/3.
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let ema = calculate_ema(&closes, 5).unwrap();
        assert_eq!(ema.len(), 6);

        let mut expected = 3.0;
        let mut expected_vec = vec![expected];
        for &c in &closes[5..] {
            expected = (c - expected) / 3.0 + expected;
            expected_vec.push(expected);
        }
        for (a, b) in ema.iter().zip(expected_vec.iter()) {
            assert!((a - b).abs() < 1e-10, "got {a}, expected {b}");
        }
    }

    #[test]
    fn ema_moves_strictly_toward_price() {
        let closes = vec![5.0, 5.2, 4.9, 5.1, 5.6, 4.8, 5.3, 5.0, 5.45, 4.95];
        let period = 3;
        let ema = calculate_ema(&closes, period).unwrap();
        for i in 1..ema.len() {
            let price = closes[period - 1 + i];
            let (prev, cur) = (ema[i - 1], ema[i]);
            let (lo, hi) = if prev < price { (prev, price) } else { (price, prev) };
            assert!(cur > lo && cur < hi, "ema {cur} not strictly between {lo} and {hi}");
        }
    }
}
