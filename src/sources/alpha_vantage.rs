// =============================================================================
// Alpha Vantage client — FX_DAILY closes and NEWS_SENTIMENT headlines
// =============================================================================
//
// Free tier: 25 calls/day.  Throttled or rejected calls come back as HTTP 200
// with a "Note", "Information" or "Error Message" key instead of data.
// =============================================================================

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::runtime_config::RuntimeConfig;
use crate::sources::{NewsSource, PriceSource};
use crate::types::{NewsItem, PriceBar};

const BASE_URL: &str = "https://www.alphavantage.co/query";

#[derive(Debug, Deserialize)]
struct FxDailyResponse {
    #[serde(rename = "Time Series FX (Daily)")]
    series: HashMap<String, FxDailyBar>,
}

#[derive(Debug, Deserialize)]
struct FxDailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    feed: Vec<NewsEntry>,
}

#[derive(Debug, Deserialize)]
struct NewsEntry {
    title: String,
    #[serde(default)]
    summary: String,
    /// Provider score in [-1, 1]; missing on some feed entries.
    #[serde(default)]
    overall_sentiment_score: Option<f64>,
}

#[derive(Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
    from_symbol: String,
    to_symbol: String,
    news_topics: String,
    news_limit: u32,
}

impl AlphaVantageClient {
    pub fn new(config: &RuntimeConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        debug!(pair = %config.pair(), "AlphaVantageClient initialised");

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: BASE_URL.to_string(),
            from_symbol: config.from_symbol.clone(),
            to_symbol: config.to_symbol.clone(),
            news_topics: config.news_topics.clone(),
            news_limit: config.news_limit,
        })
    }

    async fn query<P>(&self, params: &P) -> Result<serde_json::Value, FetchError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let resp = self
            .client
            .get(&self.base_url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Request(format!("HTTP {status}")));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;
        if let Some(err) = provider_error(&body) {
            return Err(err);
        }
        Ok(body)
    }

    /// NEWS_SENTIMENT parameters for the configured pair.  `tickers` names
    /// both currencies; `topics` is sent only when configured.
    fn news_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("function", "NEWS_SENTIMENT".to_string()),
            (
                "tickers",
                format!("FOREX:{},FOREX:{}", self.from_symbol, self.to_symbol),
            ),
        ];
        if !self.news_topics.trim().is_empty() {
            params.push(("topics", self.news_topics.clone()));
        }
        params.push(("limit", self.news_limit.to_string()));
        params
    }
}

#[async_trait]
impl PriceSource for AlphaVantageClient {
    #[instrument(skip(self), fields(from = %self.from_symbol, to = %self.to_symbol), name = "alpha_vantage::fx_daily")]
    async fn daily_closes(&self) -> Result<Vec<PriceBar>, FetchError> {
        let body = self
            .query(&[
                ("function", "FX_DAILY"),
                ("from_symbol", self.from_symbol.as_str()),
                ("to_symbol", self.to_symbol.as_str()),
                ("outputsize", "compact"),
            ])
            .await?;
        let bars = parse_fx_daily(body)?;
        debug!(count = bars.len(), "FX daily bars fetched");
        Ok(bars)
    }

    fn name(&self) -> &str {
        "alpha_vantage"
    }
}

#[async_trait]
impl NewsSource for AlphaVantageClient {
    #[instrument(skip(self), fields(from = %self.from_symbol, to = %self.to_symbol), name = "alpha_vantage::news")]
    async fn latest_news(&self) -> Result<Vec<NewsItem>, FetchError> {
        let body = self.query(&self.news_params()).await?;
        let news = parse_news(body)?;
        debug!(count = news.len(), "news items fetched");
        Ok(news)
    }

    fn name(&self) -> &str {
        "alpha_vantage"
    }
}

/// Extract a provider-side rejection from an otherwise successful response.
fn provider_error(body: &serde_json::Value) -> Option<FetchError> {
    ["Error Message", "Note", "Information"]
        .iter()
        .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .map(|msg| FetchError::Provider(msg.to_string()))
}

fn parse_fx_daily(body: serde_json::Value) -> Result<Vec<PriceBar>, FetchError> {
    let resp: FxDailyResponse =
        serde_json::from_value(body).map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

    let mut bars = Vec::with_capacity(resp.series.len());
    for (date, bar) in resp.series {
        let parsed = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .ok()
            .zip(bar.close.trim().parse::<f64>().ok());
        match parsed {
            Some((date, close)) => bars.push(PriceBar { date, close }),
            None => warn!(date = %date, close = %bar.close, "skipping malformed FX bar"),
        }
    }

    if bars.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(bars)
}

fn parse_news(body: serde_json::Value) -> Result<Vec<NewsItem>, FetchError> {
    let resp: NewsResponse =
        serde_json::from_value(body).map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

    Ok(resp
        .feed
        .into_iter()
        .filter(|e| !e.title.trim().is_empty())
        .map(|e| {
            let item = NewsItem::new(e.title, e.summary);
            match e.overall_sentiment_score {
                Some(score) => item.with_sentiment(score),
                None => item,
            }
        })
        .collect())
}
