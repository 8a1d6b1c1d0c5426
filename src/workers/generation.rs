use std::sync::Arc;

use async_channel::{Receiver, Sender};
use rand::rngs::StdRng;
use tracing::{debug, instrument, warn};

use crate::domain::User;
use crate::generator::UserFactory;

use super::PipelineStats;

/// Pulls job indices and pushes generated users downstream.
///
/// Sending blocks while the output queue is full, which is what throttles
/// generation to the pace of the persistence pool.
pub struct GenerationWorker {
    id: usize,
    jobs: Receiver<u64>,
    users: Sender<User>,
    factory: UserFactory,
    rng: StdRng,
    stats: Arc<PipelineStats>,
}

impl GenerationWorker {
    pub fn new(
        id: usize,
        jobs: Receiver<u64>,
        users: Sender<User>,
        factory: UserFactory,
        rng: StdRng,
        stats: Arc<PipelineStats>,
    ) -> Self {
        Self {
            id,
            jobs,
            users,
            factory,
            rng,
            stats,
        }
    }

    #[instrument(name = "generation_worker", skip(self), fields(worker = self.id))]
    pub async fn run(mut self) {
        debug!("Generation worker starting");

        while let Ok(job) = self.jobs.recv().await {
            let user = self.factory.build(job, &mut self.rng).await;
            self.stats.record_generated();

            if self.users.send(user).await.is_err() {
                warn!(job, "Output queue closed, dropping generated user");
                break;
            }
        }

        debug!("Generation worker stopped");
    }
}
