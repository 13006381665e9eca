//! Courtesy-delay policy for article-detail requests.
//!
//! The enrichment loop hits the listing site twice per article (abstract,
//! then main content). [`CourtesyDelay`] inserts a randomized pause between
//! those requests: a fixed-rate courtesy toward the scraped service, not a
//! failure backoff. The policy is a trait so tests and `--no-delay` runs can
//! substitute [`NoDelay`] and skip real-time waits.

use rand::{Rng, rng};
use std::time::Duration;
use tokio::time::sleep;
use tracing::trace;

/// A pause taken between consecutive requests to the same host.
pub trait Pacing {
    async fn pause(&self);
}

/// Uniformly random sleep in `min_ms..=max_ms`.
#[derive(Debug, Clone)]
pub struct CourtesyDelay {
    min_ms: u64,
    max_ms: u64,
}

impl CourtesyDelay {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        debug_assert!(min_ms <= max_ms);
        Self { min_ms, max_ms }
    }
}

impl Default for CourtesyDelay {
    /// One to two seconds.
    fn default() -> Self {
        Self::new(1_000, 2_000)
    }
}

impl Pacing for CourtesyDelay {
    async fn pause(&self) {
        let ms: u64 = rng().random_range(self.min_ms..=self.max_ms);
        trace!(ms, "Courtesy pause");
        sleep(Duration::from_millis(ms)).await;
    }
}

/// No pause at all.
#[derive(Debug, Clone, Copy)]
pub struct NoDelay;

impl Pacing for NoDelay {
    async fn pause(&self) {}
}
