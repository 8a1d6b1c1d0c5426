use std::sync::Arc;
use std::time::Duration;

use async_channel::Receiver;
use tracing::{debug, error, info, instrument, warn};

use crate::config::ErrorPolicy;
use crate::domain::User;
use crate::error::Result;
use crate::report::render_report;
use crate::storage::ReportStore;

use super::{CompletionCounter, PipelineStats};

/// Drains generated users, writes each one's report, and resolves its slot
/// in the completion counter.
pub struct PersistenceWorker {
    id: usize,
    users: Receiver<User>,
    store: Arc<ReportStore>,
    completion: Arc<CompletionCounter>,
    stats: Arc<PipelineStats>,
    policy: ErrorPolicy,
    delay: Duration,
}

impl PersistenceWorker {
    pub fn new(
        id: usize,
        users: Receiver<User>,
        store: Arc<ReportStore>,
        completion: Arc<CompletionCounter>,
        stats: Arc<PipelineStats>,
        policy: ErrorPolicy,
        delay: Duration,
    ) -> Self {
        Self {
            id,
            users,
            store,
            completion,
            stats,
            policy,
            delay,
        }
    }

    /// Runs until the queue is closed and drained, or until the first write
    /// error under [`ErrorPolicy::FailFast`].
    #[instrument(name = "persistence_worker", skip(self), fields(worker = self.id))]
    pub async fn run(self) -> Result<()> {
        debug!("Persistence worker starting");

        while let Ok(user) = self.users.recv().await {
            self.persist(user).await?;
        }

        debug!("Persistence worker stopped");
        Ok(())
    }

    async fn persist(&self, user: User) -> Result<()> {
        info!(user_id = user.id, "writing file for uid {}", user.id);
        let report = render_report(&user);

        match self.store.write(user.id, &report).await {
            Ok(_) => {
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                self.stats.record_written();
            }
            Err(e) => match self.policy {
                ErrorPolicy::FailFast => {
                    error!(user_id = user.id, error = %e, "Report write failed");
                    return Err(e);
                }
                ErrorPolicy::ContinueWithLogging => {
                    warn!(user_id = user.id, error = %e, "Report write failed, continuing");
                    self.stats.record_failed();
                }
            },
        }

        let remaining = self.completion.complete_one()?;
        debug!(remaining, "User resolved");
        Ok(())
    }
}
