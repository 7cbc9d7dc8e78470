// =============================================================================
// Data Sources — collaborator seams for prices and news
// =============================================================================
//
// The engine never performs I/O.  The scheduler pulls data through these
// traits and hands the results (success or failure) to the engine.

pub mod alpha_vantage;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::{NewsItem, PriceBar};

/// Daily close history for one currency pair.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Raw daily bars in any order; normalization happens in `PriceSeries`.
    async fn daily_closes(&self) -> Result<Vec<PriceBar>, FetchError>;

    fn name(&self) -> &str;
}

/// Recent headlines relevant to the pair.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn latest_news(&self) -> Result<Vec<NewsItem>, FetchError>;

    fn name(&self) -> &str;
}
