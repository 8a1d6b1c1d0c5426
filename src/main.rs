mod app_system;
mod config;
mod domain;
mod error;
mod generator;
mod report;
mod storage;
mod workers;


use tracing::{error, info, warn};

use crate::app_system::{setup_tracing, PipelineSystem};
use crate::config::PipelineConfig;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = PipelineConfig::default();
    info!(
        users = config.user_count,
        output_dir = %config.output_dir.display(),
        "Generating user activity reports"
    );

    let system = PipelineSystem::new(config).map_err(|e| {
        error!(error = %e, "Invalid pipeline configuration");
        e.to_string()
    })?;

    match system.run().await {
        Ok(summary) => {
            if summary.failed > 0 {
                warn!(failed = summary.failed, "Some reports could not be written");
            }
            println!(
                "DONE! Time Elapsed: {:.2} seconds",
                summary.elapsed.as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Pipeline failed");
            Err(e.to_string())
        }
    }
}
