use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use crate::config::WriteMode;
use crate::error::{PipelineError, Result};

/// Writes one report file per user under a single directory.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
    mode: WriteMode,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>, mode: WriteMode) -> Self {
        Self {
            dir: dir.into(),
            mode,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/uid<id>.txt`
    pub fn path_for(&self, user_id: u64) -> PathBuf {
        self.dir.join(format!("uid{}.txt", user_id))
    }

    pub async fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| PipelineError::OutputDir {
                path: self.dir.clone(),
                source,
            })
    }

    /// Opens (creating if absent) and writes the whole report.
    #[instrument(skip(self, report), fields(bytes = report.len()))]
    pub async fn write(&self, user_id: u64, report: &str) -> Result<PathBuf> {
        let path = self.path_for(user_id);
        let write_error = |source| PipelineError::Write {
            user_id,
            path: path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(self.mode == WriteMode::Truncate)
            .open(&path)
            .await
            .map_err(write_error)?;
        file.write_all(report.as_bytes()).await.map_err(write_error)?;
        file.flush().await.map_err(write_error)?;

        debug!(path = %path.display(), "Report written");
        Ok(path)
    }
}
