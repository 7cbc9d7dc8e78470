// =============================================================================
// Change Detector — percent-move trigger
// =============================================================================
//
//   change% = |current - reference| / reference * 100
//
// Fires when change% >= threshold.  The reference is the last price the
// engine recorded; before the first successful cycle it falls back to the
// second-most-recent close of the series.

use crate::types::PriceSeries;

/// True iff `current` moved at least `threshold_pct` percent from `reference`.
///
/// A non-positive or non-finite reference never fires.
pub fn significant_change(current: f64, reference: f64, threshold_pct: f64) -> bool {
    if !reference.is_finite() || reference <= 0.0 || !current.is_finite() {
        return false;
    }
    let change_pct = (current - reference).abs() / reference * 100.0;
    change_pct >= threshold_pct
}

/// Price to compare the latest close against.
pub fn reference_price(last_price: Option<f64>, series: &PriceSeries) -> Option<f64> {
    last_price.or_else(|| series.previous_close())
}

#[derive(Debug, Clone, Copy)]
pub struct ChangeDetector {
    threshold_pct: f64,
}

impl ChangeDetector {
    pub fn new(threshold_pct: f64) -> Self {
        Self { threshold_pct }
    }

    /// Whether the latest close of `series` is a significant move.
    pub fn fires(&self, series: &PriceSeries, last_price: Option<f64>) -> bool {
        match (series.latest_close(), reference_price(last_price, series)) {
            (Some(current), Some(reference)) => {
                significant_change(current, reference, self.threshold_pct)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceBar;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start + chrono::Duration::days(i as i64),
                close,
            })
            .collect();
        PriceSeries::from_bars(bars, 60).unwrap()
    }

    #[test]
    fn threshold_boundaries() {
        assert!(!significant_change(100.0, 100.4, 0.5));
        assert!(significant_change(100.0, 100.6, 0.5));
        assert!(significant_change(99.0, 100.0, 0.5));
    }

    #[test]
    fn degenerate_reference_never_fires() {
        assert!(!significant_change(5.0, 0.0, 0.5));
        assert!(!significant_change(5.0, f64::NAN, 0.5));
    }

    #[test]
    fn falls_back_to_previous_close() {
        let s = series(&[5.00, 5.10]);
        assert_eq!(reference_price(None, &s), Some(5.00));
        assert_eq!(reference_price(Some(5.09), &s), Some(5.09));

        let detector = ChangeDetector::new(0.5);
        assert!(detector.fires(&s, None)); // 2% move
        assert!(!detector.fires(&s, Some(5.09))); // ~0.2% move
    }

    #[test]
    fn single_bar_without_history_does_not_fire() {
        let s = series(&[5.0]);
        assert!(!ChangeDetector::new(0.5).fires(&s, None));
    }
}
