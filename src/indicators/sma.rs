// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
//   SMA_i = (close_i + close_{i+1} + ... + close_{i+period-1}) / period
//
// One value per full window; the last value covers the most recent closes.
// =============================================================================

use crate::error::IndicatorError;

/// Check that `period` is usable against `len` closes.
pub(crate) fn check_period(len: usize, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }
    if len < period {
        return Err(IndicatorError::InsufficientData {
            required: period,
            available: len,
        });
    }
    Ok(())
}

/// Compute the SMA series of `closes` for the given `period`.
///
/// Output length is `closes.len() - period + 1`.
pub fn calculate_sma(closes: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    check_period(closes.len(), period)?;

    let period_f = period as f64;
    Ok(closes
        .windows(period)
        .map(|w| w.iter().sum::<f64>() / period_f)
        .collect())
}
