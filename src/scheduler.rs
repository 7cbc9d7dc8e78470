// =============================================================================
// Scheduler — periodic cycles with a re-entrancy guard
// =============================================================================
//
// One cycle at start-up, then one per interval.  Only one cycle runs at a
// time: a trigger that arrives while a cycle is still fetching is skipped.
// Price and news fetches run concurrently; the engine lock is taken only after
// both have finished (join barrier).
// =============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::engine::{CycleInput, PredictionEngine};
use crate::report;
use crate::sources::{NewsSource, PriceSource};
use crate::types::{CycleOutcome, PriceSeries};

pub struct Scheduler {
    engine: Mutex<PredictionEngine>,
    prices: Arc<dyn PriceSource>,
    news: Arc<dyn NewsSource>,
    history_len: usize,
    running: AtomicBool,
}

/// Clears the running flag when a cycle ends, however it ends.
struct CycleGuard<'a>(&'a AtomicBool);

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Scheduler {
    pub fn new(
        engine: PredictionEngine,
        prices: Arc<dyn PriceSource>,
        news: Arc<dyn NewsSource>,
        history_len: usize,
    ) -> Self {
        Self {
            engine: Mutex::new(engine),
            prices,
            news,
            history_len,
            running: AtomicBool::new(false),
        }
    }

    fn try_begin(&self) -> Option<CycleGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CycleGuard(&self.running))
    }

    /// Run one cycle.  Returns `None` when another cycle is still in flight.
    pub async fn run_once(&self) -> Option<CycleOutcome> {
        let Some(_guard) = self.try_begin() else {
            warn!("previous cycle still running, skipping this trigger");
            return None;
        };

        let (bars, news) = tokio::join!(self.prices.daily_closes(), self.news.latest_news());

        let series = bars.and_then(|bars| PriceSeries::from_bars(bars, self.history_len));
        let news = news.unwrap_or_else(|e| {
            warn!(source = self.news.name(), error = %e, "news fetch failed, treating as empty");
            Vec::new()
        });

        let outcome = self.engine.lock().run_cycle(CycleInput { series, news });
        Some(outcome)
    }

    /// Run forever: immediately, then every `period`.
    pub async fn run(self: Arc<Self>, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            period_secs = period.as_secs(),
            prices = self.prices.name(),
            news = self.news.name(),
            "scheduler started"
        );

        loop {
            interval.tick().await;
            let this = self.clone();
            // Spawned so a slow fetch never delays the timer; overlap is
            // rejected by the guard inside `run_once`.
            tokio::spawn(async move {
                if let Some(outcome) = this.run_once().await {
                    report::render(&outcome);
                }
            });
        }
    }
}
