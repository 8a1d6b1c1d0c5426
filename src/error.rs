use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to prepare output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write report for user {user_id} to {}: {source}", path.display())]
    Write {
        user_id: u64,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Worker task failed: {0}")]
    WorkerPanicked(#[from] tokio::task::JoinError),
    #[error("The {0} queue closed unexpectedly")]
    QueueClosed(&'static str),
    #[error("Completion counter released more times than there are jobs")]
    CounterOverflow,
    #[error("Workers exited with {remaining} users unresolved")]
    Incomplete { remaining: usize },
}
