//! Batch scheduling of novel downloads
//!
//! This module handles:
//! - Randomizing batch order before dispatch
//! - Sequential runs with a fixed delay after each novel
//! - Concurrent runs bounded by a semaphore of `max_workers` permits
//! - Isolating every URL so a failure or panic only marks that URL failed
//!
//! Concurrent results come back in completion order.

use crate::config::Config;
use crate::crawler::outcome::NovelOutcome;
use crate::crawler::pacing::FixedDelay;
use rand::seq::SliceRandom;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// How a batch is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Run novels in parallel instead of one at a time
    pub concurrent: bool,
    /// Upper bound on novels in flight (concurrent mode)
    pub max_workers: usize,
    /// Randomize order before dispatch
    pub shuffle: bool,
    /// Delay after each novel (sequential mode)
    pub novel_pacing: FixedDelay,
}

impl BatchOptions {
    pub fn from_config(config: &Config, concurrent: bool) -> Self {
        Self {
            concurrent,
            max_workers: config.scheduler.max_workers,
            shuffle: config.scheduler.shuffle,
            novel_pacing: FixedDelay::from_millis(config.pacing.novel_delay_ms),
        }
    }
}

/// Runs a batch of URLs through a per-URL job
pub struct DownloadScheduler {
    options: BatchOptions,
}

impl DownloadScheduler {
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    /// Runs `job` once per URL and collects every outcome
    ///
    /// The returned list always has one entry per input URL. Nothing is
    /// retried; re-running the batch is the retry mechanism.
    pub async fn run_batch<F, Fut>(&self, mut urls: Vec<String>, job: F) -> Vec<(String, NovelOutcome)>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = NovelOutcome> + Send + 'static,
    {
        tracing::info!("{} urls to download.", urls.len());

        if self.options.shuffle {
            urls.shuffle(&mut rand::rng());
        }

        // TODO: accept a cancellation token and stop dispatching between URLs
        if self.options.concurrent {
            self.run_concurrent(urls, job).await
        } else {
            self.run_sequential(urls, job).await
        }
    }

    async fn run_sequential<F, Fut>(&self, urls: Vec<String>, job: F) -> Vec<(String, NovelOutcome)>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = NovelOutcome> + Send + 'static,
    {
        let total = urls.len();
        let mut results = Vec::with_capacity(total);

        for url in urls {
            let outcome = run_isolated(&job, url.clone()).await;
            report_progress(results.len() + 1, total, &url, &outcome);
            results.push((url, outcome));

            self.options.novel_pacing.wait().await;
        }

        results
    }

    async fn run_concurrent<F, Fut>(&self, urls: Vec<String>, job: F) -> Vec<(String, NovelOutcome)>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = NovelOutcome> + Send + 'static,
    {
        let total = urls.len();
        let job = Arc::new(job);
        let permits = Arc::new(Semaphore::new(self.options.max_workers.max(1)));
        let mut workers = JoinSet::new();

        for url in urls {
            let job = Arc::clone(&job);
            let permits = Arc::clone(&permits);
            workers.spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (url, NovelOutcome::Failed("worker pool closed".to_string()));
                    }
                };
                let outcome = run_isolated(job.as_ref(), url.clone()).await;
                (url, outcome)
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((url, outcome)) => {
                    report_progress(results.len() + 1, total, &url, &outcome);
                    results.push((url, outcome));
                }
                Err(e) => tracing::error!("Worker task failed: {}", e),
            }
        }

        results
    }
}

/// Runs one job on its own task so a panic is contained to its URL
async fn run_isolated<F, Fut>(job: &F, url: String) -> NovelOutcome
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = NovelOutcome> + Send + 'static,
{
    match tokio::spawn(job(url)).await {
        Ok(outcome) => outcome,
        Err(e) => NovelOutcome::Failed(format!("worker aborted: {}", e)),
    }
}

fn report_progress(done: usize, total: usize, url: &str, outcome: &NovelOutcome) {
    if outcome.is_failed() {
        tracing::error!("[{}/{}] {}: {}", done, total, url, outcome);
    } else {
        tracing::info!("[{}/{}] {}: {}", done, total, url, outcome);
    }
}
