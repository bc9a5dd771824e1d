//! Long-running scheduler mode.
//!
//! Registers the scrape-and-append job on the configured cron expression
//! and parks until Ctrl-C. A failed run is logged and dropped; the next
//! scheduled tick is the retry.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use retailwatch_core::AppConfig;

use crate::run::run_and_write;

/// Builds and starts the scheduler, then blocks until Ctrl-C.
///
/// The [`JobScheduler`] handle must stay alive for the lifetime of the
/// process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns an error if the cron expression is invalid, the scheduler
/// cannot be initialised, or the job cannot be registered.
pub(crate) async fn run_scheduled(config: AppConfig) -> anyhow::Result<()> {
    let config = Arc::new(config);
    let scheduler = JobScheduler::new().await?;

    register_scrape_job(&scheduler, Arc::clone(&config)).await?;
    scheduler.start().await?;

    tracing::info!(schedule = %config.schedule, "scheduler started; waiting for ticks");
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received; stopping scheduler");

    drop(scheduler);
    Ok(())
}

async fn register_scrape_job(
    scheduler: &JobScheduler,
    config: Arc<AppConfig>,
) -> Result<(), JobSchedulerError> {
    let schedule = config.schedule.clone();

    let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&config);

        Box::pin(async move {
            tracing::info!("scheduler: starting daily scrape run");
            match run_and_write(&config).await {
                Ok(()) => tracing::info!("scheduler: daily scrape run complete"),
                Err(e) => {
                    // Swallow and wait for the next tick rather than
                    // bringing the whole process down.
                    tracing::error!(error = %e, "scheduler: daily scrape run failed");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
