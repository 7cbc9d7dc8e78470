// =============================================================================
// Bollinger Bands
// =============================================================================
//
// A volatility envelope around the SMA: upper = SMA + k*σ, lower = SMA - k*σ,
// where σ is the population standard deviation of the same window.  The band
// series are index-aligned with `calculate_sma(closes, period)`.

use crate::error::IndicatorError;
use crate::indicators::sma::calculate_sma;

/// Band series for every full window of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

impl BollingerBands {
    pub fn latest_upper(&self) -> Option<f64> {
        self.upper.last().copied()
    }

    pub fn latest_lower(&self) -> Option<f64> {
        self.lower.last().copied()
    }
}

/// Calculate Bollinger Bands over `closes` with window `period` and `num_std`
/// standard deviations.
pub fn calculate_bollinger(
    closes: &[f64],
    period: usize,
    num_std: f64,
) -> Result<BollingerBands, IndicatorError> {
    let middle = calculate_sma(closes, period)?;

    let (upper, lower): (Vec<f64>, Vec<f64>) = closes
        .windows(period)
        .zip(&middle)
        .map(|(window, &mean)| {
            let sigma = population_std_dev(window, mean);
            (mean + num_std * sigma, mean - num_std * sigma)
        })
        .unzip();

    Ok(BollingerBands {
        upper,
        middle,
        lower,
    })
}

fn population_std_dev(window: &[f64], mean: f64) -> f64 {
    let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / window.len() as f64;
    variance.sqrt()
}
