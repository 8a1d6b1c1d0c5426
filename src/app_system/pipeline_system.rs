use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::generator::{worker_rng, UserFactory};
use crate::storage::ReportStore;
use crate::workers::{CompletionCounter, GenerationWorker, PersistenceWorker, PipelineStats};

/// Totals for a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub users_generated: usize,
    pub files_written: usize,
    /// Users whose write failed under [`ErrorPolicy::ContinueWithLogging`](crate::config::ErrorPolicy).
    pub failed: usize,
    pub elapsed: Duration,
}

/// Coordinates the generation and persistence pools for one run.
///
/// Responsible for seeding the job queue, starting both pools, waiting on the
/// completion counter, and shutting the pools down.
pub struct PipelineSystem {
    config: PipelineConfig,
}

impl PipelineSystem {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[instrument(name = "pipeline_system", skip(self), fields(users = self.config.user_count))]
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let config = &self.config;

        let store = Arc::new(ReportStore::new(&config.output_dir, config.write_mode));
        if config.create_output_dir {
            store.prepare().await?;
        }

        let completion = Arc::new(CompletionCounter::new(config.user_count));
        let stats = Arc::new(PipelineStats::default());

        // 1. Seed every job before any worker starts
        let (job_tx, job_rx) = async_channel::bounded(config.job_queue_capacity);
        for job in 0..config.user_count as u64 {
            job_tx
                .send(job)
                .await
                .map_err(|_| PipelineError::QueueClosed("job"))?;
        }
        drop(job_tx);

        let master_seed = config.seed.unwrap_or_else(|| rand::rng().random());
        info!(
            seed = master_seed,
            generation_workers = config.generation_workers,
            persistence_workers = config.persistence_workers,
            "Starting pipeline"
        );

        // 2. Generation pool
        let (user_tx, user_rx) = async_channel::bounded(config.output_queue_capacity);
        let factory = UserFactory::new(config.max_log_entries, config.generation_delay);
        let mut generators = JoinSet::new();
        for worker in 0..config.generation_workers {
            let generation_worker = GenerationWorker::new(
                worker,
                job_rx.clone(),
                user_tx.clone(),
                factory.clone(),
                worker_rng(master_seed, worker),
                stats.clone(),
            );
            generators.spawn(generation_worker.run());
        }
        // The output queue closes once the last generation worker exits.
        drop(job_rx);
        drop(user_tx);

        // 3. Persistence pool
        let mut writers = JoinSet::new();
        for worker in 0..config.persistence_workers {
            let persistence_worker = PersistenceWorker::new(
                worker,
                user_rx.clone(),
                store.clone(),
                completion.clone(),
                stats.clone(),
                config.error_policy,
                config.write_delay,
            );
            writers.spawn(persistence_worker.run());
        }
        drop(user_rx);

        // 4. Wait, then shut down
        if let Err(e) = Self::await_completion(&completion, &mut writers).await {
            error!(error = %e, "Aborting pipeline");
            generators.abort_all();
            writers.abort_all();
            return Err(e);
        }

        debug!("All users resolved, joining workers");
        while let Some(joined) = generators.join_next().await {
            joined?;
        }
        while let Some(joined) = writers.join_next().await {
            joined??;
        }

        let (users_generated, files_written, failed) = stats.snapshot();
        let summary = RunSummary {
            users_generated,
            files_written,
            failed,
            elapsed: started.elapsed(),
        };
        info!(
            files_written,
            failed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Pipeline complete"
        );
        Ok(summary)
    }

    /// Waits for the counter to reach zero while watching the writers for the
    /// first failure.
    async fn await_completion(
        completion: &CompletionCounter,
        writers: &mut JoinSet<Result<()>>,
    ) -> Result<()> {
        loop {
            tokio::select! {
                biased;
                _ = completion.wait() => return Ok(()),
                joined = writers.join_next() => match joined {
                    // A writer only exits cleanly after the queue is drained.
                    Some(Ok(Ok(()))) => continue,
                    Some(Ok(Err(e))) => return Err(e),
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        let remaining = completion.remaining();
                        if remaining == 0 {
                            return Ok(());
                        }
                        return Err(PipelineError::Incomplete { remaining });
                    }
                },
            }
        }
    }
}
