//! Synthetic activity generation.
//!
//! Randomness is always passed in. Each generation worker owns a [`StdRng`]
//! derived from the run's master seed with [`worker_rng`], so no generator
//! state is shared between tasks.

use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::domain::{Action, ActivityEntry, User};

/// Produces exactly `count` entries with uniformly chosen actions, stamped
/// with the current UTC time.
pub fn generate_activity<R: Rng>(rng: &mut R, count: usize) -> Vec<ActivityEntry> {
    (0..count)
        .map(|_| {
            let action = Action::ALL[rng.random_range(0..Action::ALL.len())];
            ActivityEntry::new(action, Utc::now())
        })
        .collect()
}

/// Derives an independent generator for one worker from the master seed.
pub fn worker_rng(master_seed: u64, worker: usize) -> StdRng {
    StdRng::seed_from_u64(master_seed.wrapping_add(worker as u64))
}

/// Builds users from job indices.
#[derive(Debug, Clone)]
pub struct UserFactory {
    max_log_entries: usize,
    delay: Duration,
}

impl UserFactory {
    pub fn new(max_log_entries: usize, delay: Duration) -> Self {
        Self {
            max_log_entries,
            delay,
        }
    }

    /// Builds the user for `job` with a log length drawn from `[0, max_log_entries)`.
    pub fn generate<R: Rng>(&self, job: u64, rng: &mut R) -> User {
        let count = if self.max_log_entries == 0 {
            0
        } else {
            rng.random_range(0..self.max_log_entries)
        };
        User::from_job(job, generate_activity(rng, count))
    }

    /// Generates the user, reports progress, then waits out the generation delay.
    pub async fn build(&self, job: u64, rng: &mut StdRng) -> User {
        let user = self.generate(job, rng);
        info!(user_id = user.id, "generated user {}", user.id);
        debug!(entries = user.activity_log.len(), "Activity log generated");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count_yields_empty_log() {
        let mut rng = worker_rng(7, 0);
        assert!(generate_activity(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_log_length_matches_count() {
        let mut rng = worker_rng(7, 0);
        for count in [1, 2, 17, 999] {
            assert_eq!(generate_activity(&mut rng, count).len(), count);
        }
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut rng = worker_rng(3, 0);
        let log = generate_activity(&mut rng, 500);
        assert!(log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_same_seed_same_actions() {
        let actions = |seed| {
            let mut rng = worker_rng(seed, 0);
            generate_activity(&mut rng, 200)
                .into_iter()
                .map(|e| e.action)
                .collect::<Vec<_>>()
        };
        assert_eq!(actions(42), actions(42));
    }

    #[test]
    fn test_every_action_reachable() {
        let mut rng = worker_rng(11, 0);
        let log = generate_activity(&mut rng, 2000);
        for action in Action::ALL {
            assert!(
                log.iter().any(|e| e.action == action),
                "{} never generated",
                action
            );
        }
    }

    #[test]
    fn test_factory_identity_and_bounds() {
        let factory = UserFactory::new(10, Duration::ZERO);
        let mut rng = worker_rng(5, 0);
        for job in 0..50 {
            let user = factory.generate(job, &mut rng);
            assert_eq!(user.id, job + 1);
            assert_eq!(user.email, format!("user{}@company.com", job + 1));
            assert!(user.activity_log.len() < 10);
        }
    }

    #[test]
    fn test_factory_zero_max_entries() {
        let factory = UserFactory::new(0, Duration::ZERO);
        let mut rng = worker_rng(5, 0);
        assert!(factory.generate(3, &mut rng).activity_log.is_empty());
    }

    #[test]
    fn test_factory_reproducible_lengths() {
        let factory = UserFactory::new(1000, Duration::ZERO);
        let lengths = |seed| {
            let mut rng = worker_rng(seed, 2);
            (0..20)
                .map(|job| factory.generate(job, &mut rng).activity_log.len())
                .collect::<Vec<_>>()
        };
        assert_eq!(lengths(99), lengths(99));
    }

    #[tokio::test]
    async fn test_build_async() {
        let factory = UserFactory::new(5, Duration::from_millis(1));
        let mut rng = worker_rng(1, 0);
        let user = factory.build(9, &mut rng).await;
        assert_eq!(user.id, 10);
    }
}
