//! Courtesy pacing towards the source site
//!
//! The harvester sleeps a fixed delay before every chapter request and,
//! in sequential batches, after every novel. The delay is injected so tests
//! can run with [`FixedDelay::none`].

use std::time::Duration;

/// A fixed-delay rate limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// A limiter that never waits
    pub fn none() -> Self {
        Self::default()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspends the calling task for the configured delay
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
