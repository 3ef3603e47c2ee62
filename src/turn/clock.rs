//! Time source for run polling.
//!
//! The controller asks a [`Clock`] for a [`Ticker`] at the start of each poll
//! loop and drops it when the run completes, so exactly one timer is alive
//! per turn. Tests swap in [`ImmediateClock`] to poll without real delays.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A repeating timer.
#[async_trait]
pub trait Ticker: Send {
    /// Wait for the next period to elapse.
    async fn tick(&mut self);
}

/// Factory for tickers.
pub trait Clock: Send + Sync {
    fn ticker(&self, period: Duration) -> Box<dyn Ticker>;
}

// ── Tokio clock ──────────────────────────────────────────────────

/// Wall-clock ticker backed by `tokio::time::interval_at`. The first tick
/// fires one full period after creation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

struct IntervalTicker {
    interval: tokio::time::Interval,
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

impl Clock for TokioClock {
    fn ticker(&self, period: Duration) -> Box<dyn Ticker> {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        Box::new(IntervalTicker { interval })
    }
}

// ── Immediate clock ──────────────────────────────────────────────

/// Clock whose ticks complete immediately. Counts every tick across all
/// tickers it hands out.
#[derive(Debug, Clone, Default)]
pub struct ImmediateClock {
    ticks: Arc<AtomicU32>,
    tickers: Arc<AtomicU32>,
}

impl ImmediateClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks observed so far.
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Tickers created so far.
    pub fn tickers_started(&self) -> u32 {
        self.tickers.load(Ordering::SeqCst)
    }
}

struct ImmediateTicker {
    ticks: Arc<AtomicU32>,
}

#[async_trait]
impl Ticker for ImmediateTicker {
    async fn tick(&mut self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }
}

impl Clock for ImmediateClock {
    fn ticker(&self, _period: Duration) -> Box<dyn Ticker> {
        self.tickers.fetch_add(1, Ordering::SeqCst);
        Box::new(ImmediateTicker {
            ticks: Arc::clone(&self.ticks),
        })
    }
}
