use std::path::PathBuf;
use std::time::Duration;

use crate::error::{PipelineError, Result};

pub const USER_COUNT: usize = 100;
pub const GENERATION_WORKERS: usize = 100;
pub const PERSISTENCE_WORKERS: usize = 100;

pub const DEFAULT_OUTPUT_DIR: &str = "users";
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 1000;
pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_WRITE_DELAY: Duration = Duration::from_secs(1);

/// What the coordinator does when a report cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort both pools and return the first error.
    #[default]
    FailFast,
    /// Log the failure, count it, and keep draining the queue.
    ContinueWithLogging,
}

/// How an existing report file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Truncate,
    /// Overwrite from the start without truncating. A shorter report leaves
    /// the tail of the previous one in place.
    InPlace,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub user_count: usize,
    pub generation_workers: usize,
    pub persistence_workers: usize,
    pub job_queue_capacity: usize,
    pub output_queue_capacity: usize,
    pub output_dir: PathBuf,
    pub create_output_dir: bool,
    pub write_mode: WriteMode,
    pub error_policy: ErrorPolicy,
    /// Master seed for the per-worker random generators. `None` draws one at startup.
    pub seed: Option<u64>,
    /// Exclusive upper bound on the length of a generated activity log.
    pub max_log_entries: usize,
    pub generation_delay: Duration,
    pub write_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            user_count: USER_COUNT,
            generation_workers: GENERATION_WORKERS,
            persistence_workers: PERSISTENCE_WORKERS,
            job_queue_capacity: USER_COUNT,
            output_queue_capacity: USER_COUNT,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            create_output_dir: true,
            write_mode: WriteMode::default(),
            error_policy: ErrorPolicy::default(),
            seed: None,
            max_log_entries: DEFAULT_MAX_LOG_ENTRIES,
            generation_delay: DEFAULT_GENERATION_DELAY,
            write_delay: DEFAULT_WRITE_DELAY,
        }
    }
}

impl PipelineConfig {
    /// Sets the user count and resizes both queues to hold every user.
    pub fn with_user_count(mut self, user_count: usize) -> Self {
        self.user_count = user_count;
        self.job_queue_capacity = user_count.max(1);
        self.output_queue_capacity = user_count.max(1);
        self
    }

    pub fn with_workers(mut self, generation: usize, persistence: usize) -> Self {
        self.generation_workers = generation;
        self.persistence_workers = persistence;
        self
    }

    pub fn with_output_queue_capacity(mut self, capacity: usize) -> Self {
        self.output_queue_capacity = capacity;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_create_output_dir(mut self, create: bool) -> Self {
        self.create_output_dir = create;
        self
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_log_entries(mut self, max: usize) -> Self {
        self.max_log_entries = max;
        self
    }

    pub fn with_delays(mut self, generation: Duration, write: Duration) -> Self {
        self.generation_delay = generation;
        self.write_delay = write;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.generation_workers == 0 {
            return Err(PipelineError::InvalidConfig(
                "generation_workers must be at least 1".to_string(),
            ));
        }
        if self.persistence_workers == 0 {
            return Err(PipelineError::InvalidConfig(
                "persistence_workers must be at least 1".to_string(),
            ));
        }
        // Jobs are seeded before any worker starts, so the queue must hold all of them.
        if self.job_queue_capacity < self.user_count.max(1) {
            return Err(PipelineError::InvalidConfig(format!(
                "job_queue_capacity {} cannot hold {} jobs",
                self.job_queue_capacity, self.user_count
            )));
        }
        if self.output_queue_capacity == 0 {
            return Err(PipelineError::InvalidConfig(
                "output_queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_configuration() {
        let config = PipelineConfig::default();
        assert_eq!(config.user_count, 100);
        assert_eq!(config.generation_workers, 100);
        assert_eq!(config.persistence_workers, 100);
        assert_eq!(config.output_dir, PathBuf::from("users"));
        assert_eq!(config.max_log_entries, 1000);
        assert_eq!(config.error_policy, ErrorPolicy::FailFast);
        assert_eq!(config.write_mode, WriteMode::Truncate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = PipelineConfig::default().with_workers(0, 1);
        assert!(matches!(config.validate(), Err(PipelineError::InvalidConfig(_))));

        let config = PipelineConfig::default().with_workers(1, 0);
        assert!(matches!(config.validate(), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn test_job_queue_must_hold_every_job() {
        let mut config = PipelineConfig::default().with_user_count(10);
        config.job_queue_capacity = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_users_still_valid() {
        let config = PipelineConfig::default().with_user_count(0);
        assert_eq!(config.job_queue_capacity, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_output_capacity_rejected() {
        let config = PipelineConfig::default().with_output_queue_capacity(0);
        assert!(config.validate().is_err());
    }
}
