use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use crate::error::{PipelineError, Result};

/// Countdown of unresolved users. Waiters are released once it hits zero.
#[derive(Debug)]
pub struct CompletionCounter {
    remaining: AtomicUsize,
    notify: Notify,
}

impl CompletionCounter {
    pub fn new(total: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(total),
            notify: Notify::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Resolves one user and returns how many remain.
    ///
    /// Releasing past zero is an error and leaves the counter at zero.
    pub fn complete_one(&self) -> Result<usize> {
        let previous = self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .map_err(|_| PipelineError::CounterOverflow)?;
        if previous == 1 {
            self.notify.notify_waiters();
        }
        Ok(previous - 1)
    }

    /// Returns once every user has been resolved.
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking so a release between the load and the await is not missed.
            notified.as_mut().enable();
            if self.remaining() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Running totals reported in the run summary.
#[derive(Debug, Default)]
pub struct PipelineStats {
    pub generated: AtomicUsize,
    pub written: AtomicUsize,
    pub failed: AtomicUsize,
}

impl PipelineStats {
    pub fn record_generated(&self) {
        self.generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_written(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> (usize, usize, usize) {
        (
            self.generated.load(Ordering::Relaxed),
            self.written.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed),
        )
    }
}
