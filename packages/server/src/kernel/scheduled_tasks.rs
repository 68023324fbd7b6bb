//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! The verifier purges an expired code only when someone attempts it, so
//! abandoned codes would otherwise sit in memory until overwritten or the
//! process exits. The sweep evicts them on a fixed cadence.

use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::auth::store::OtpStore;

/// Start all scheduled tasks
pub async fn start_scheduler(otp_store: Arc<dyn OtpStore>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // OTP sweep - runs every 5 minutes
    let sweep_store = otp_store.clone();
    let sweep_job = Job::new_async("0 */5 * * * *", move |_uuid, _lock| {
        let store = sweep_store.clone();
        Box::pin(async move {
            let purged = store.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Swept expired OTP records");
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (OTP sweep every 5 minutes)");
    Ok(scheduler)
}
