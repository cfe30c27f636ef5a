//! Bounded worker pool driving the batch generation job.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use zentap_client::GenerationClient;
use zentap_prompt::compose_batch_prompt;

use crate::combos::enumerate_combinations;
use crate::error::BatchResult;
use crate::split::split_into_fields;
use crate::store::{OutputStore, ResultMap};
use crate::types::{Combination, JobSummary, OutputRecord, SemanticSummaries};
use crate::universe::IdentifierUniverse;

/// Tuning knobs of the worker pool.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Maximum combinations generated concurrently.
    pub concurrency: usize,
    /// Generation attempts per combination before a terminal failure.
    pub max_attempts: u32,
    /// Backoff base; attempt `n` sleeps `n * backoff_base` before retrying.
    pub backoff_base: Duration,
    /// Checkpoint the result map after this many successfully generated
    /// records.
    pub checkpoint_every: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            concurrency: 6,
            max_attempts: 3,
            backoff_base: Duration::from_millis(1500),
            checkpoint_every: 50,
        }
    }
}

/// Runs one batch job: enumerate, skip completed ids, generate the rest
/// through a bounded pool, checkpoint along the way.
pub struct BatchRunner {
    shared: Arc<Shared>,
    config: RunnerConfig,
}

struct Shared {
    client: Arc<dyn GenerationClient>,
    store: Arc<dyn OutputStore>,
    results: DashMap<String, OutputRecord>,
    generated: AtomicUsize,
    flush_lock: Mutex<()>,
}

impl Shared {
    /// Snapshot the live map and write it out. Mid-run checkpoints are
    /// best effort; a failed write must not kill in-flight workers.
    async fn checkpoint(&self) {
        let _guard = self.flush_lock.lock().await;
        let snapshot = self.snapshot();
        if let Err(err) = self.store.flush(&snapshot).await {
            tracing::warn!(%err, "checkpoint flush failed, continuing");
        }
    }

    fn snapshot(&self) -> ResultMap {
        self.results
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl BatchRunner {
    pub fn new(
        client: Arc<dyn GenerationClient>,
        store: Arc<dyn OutputStore>,
        config: RunnerConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                client,
                store,
                results: DashMap::new(),
                generated: AtomicUsize::new(0),
                flush_lock: Mutex::new(()),
            }),
            config,
        }
    }

    /// Run the job over the universe, truncated to `limit` combinations
    /// when given. Returns how much was generated, skipped, and the size
    /// of the persisted set afterwards.
    pub async fn run(
        &self,
        universe: &IdentifierUniverse,
        limit: Option<usize>,
    ) -> BatchResult<JobSummary> {
        let prior = self.shared.store.load().await?;
        for (id, record) in prior {
            self.shared.results.insert(id, record);
        }

        let combos = enumerate_combinations(&universe.ids(), limit);
        tracing::info!(
            combinations = combos.len(),
            prior = self.shared.results.len(),
            concurrency = self.config.concurrency,
            "batch job starting"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut workers = JoinSet::new();
        let mut skipped = 0usize;

        for combo in combos {
            let id = combo.id();
            if self.shared.results.contains_key(&id) {
                skipped += 1;
                continue;
            }

            let shared = Arc::clone(&self.shared);
            let config = self.config.clone();
            let summaries = SemanticSummaries {
                main_summary: universe.summary_for(&combo.main),
                trend_summary: universe.summary_for(&combo.trend),
                change_summary: combo.change.summary().to_string(),
            };
            let permit = Arc::clone(&semaphore);
            workers.spawn(async move {
                let Ok(_permit) = permit.acquire_owned().await else {
                    return;
                };
                generate_one(&shared, &config, combo, summaries).await;
            });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(err) = joined {
                tracing::error!(%err, "batch worker panicked");
            }
        }

        // Final flush always runs, and its failure is a job failure.
        let _guard = self.shared.flush_lock.lock().await;
        let snapshot = self.shared.snapshot();
        self.shared.store.flush(&snapshot).await?;

        let summary = JobSummary {
            generated: self.shared.generated.load(Ordering::SeqCst),
            skipped,
            total: snapshot.len(),
        };
        tracing::info!(
            generated = summary.generated,
            skipped = summary.skipped,
            total = summary.total,
            "batch job finished"
        );
        Ok(summary)
    }
}

async fn generate_one(
    shared: &Shared,
    config: &RunnerConfig,
    combo: Combination,
    summaries: SemanticSummaries,
) {
    let id = combo.id();
    let prompt = compose_batch_prompt(
        &summaries.main_summary,
        &summaries.trend_summary,
        &summaries.change_summary,
    );

    let mut last_error = String::new();
    for attempt in 1..=config.max_attempts {
        match shared.client.generate(&prompt).await {
            Ok(raw) => {
                let output = split_into_fields(&raw);
                let record = OutputRecord::success(&combo, summaries, output, raw);
                shared.results.insert(id.clone(), record);
                let generated = shared.generated.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::debug!(%id, attempt, "combination generated");
                if generated % config.checkpoint_every == 0 {
                    shared.checkpoint().await;
                }
                return;
            }
            Err(err) => {
                last_error = err.to_string();
                tracing::warn!(%id, attempt, error = %last_error, "generation attempt failed");
                if attempt < config.max_attempts {
                    tokio::time::sleep(config.backoff_base * attempt).await;
                }
            }
        }
    }

    // Retries exhausted: persist the failure so the job never re-loops
    // over a dead combination within one run. Failures count toward the
    // persisted total but not toward `generated`, and they do not advance
    // the checkpoint cadence.
    let record = OutputRecord::terminal_failure(&combo, last_error);
    shared.results.insert(id.clone(), record);
    tracing::error!(%id, "combination terminally failed");
    shared.checkpoint().await;
}
