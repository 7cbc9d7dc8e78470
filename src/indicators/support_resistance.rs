// =============================================================================
// Support / Resistance
// =============================================================================
//
// Support is the lowest close and resistance the highest close over the
// trailing look-back window.  A series shorter than the window uses every
// available close.

use crate::error::IndicatorError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
}

pub fn calculate_support_resistance(
    closes: &[f64],
    window: usize,
) -> Result<SupportResistance, IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }
    if closes.is_empty() {
        return Err(IndicatorError::InsufficientData {
            required: 1,
            available: 0,
        });
    }

    let recent = &closes[closes.len().saturating_sub(window)..];
    let (support, resistance) = recent
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
            (lo.min(c), hi.max(c))
        });

    Ok(SupportResistance {
        support,
        resistance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_window_only() {
        let closes = vec![1.0, 9.0, 5.0, 4.0, 6.0];
        let sr = calculate_support_resistance(&closes, 3).unwrap();
        assert_eq!(sr.support, 4.0);
        assert_eq!(sr.resistance, 6.0);
    }

    #[test]
    fn short_series_uses_everything() {
        let closes = vec![5.2, 4.9, 5.4];
        let sr = calculate_support_resistance(&closes, 60).unwrap();
        assert_eq!(sr.support, 4.9);
        assert_eq!(sr.resistance, 5.4);
    }

    #[test]
    fn empty_is_error() {
        assert!(calculate_support_resistance(&[], 60).is_err());
        assert_eq!(
            calculate_support_resistance(&[1.0], 0),
            Err(IndicatorError::InvalidPeriod)
        );
    }
}
