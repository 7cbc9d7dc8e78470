// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators used by the
// prediction engine.  Every input slice is oldest-first.  Fallible functions
// return `Result<_, IndicatorError>` so callers must handle insufficient data.

pub mod bollinger;
pub mod ema;
pub mod indicator_set;
pub mod rsi;
pub mod sma;
pub mod support_resistance;

pub use indicator_set::{IndicatorSet, IndicatorSnapshot};
