//! Bounded polling of extraction jobs
//!
//! Drives a [`StatusPoller`] until the job reaches a terminal state or the
//! attempt budget runs out. A transport failure aborts immediately; transient
//! and permanent network errors are not distinguished.

use std::time::Duration;

use crate::core::error::ExtractError;
use crate::extract::client::StatusPoller;
use crate::extract::types::{ExtractionJob, JobHandle, JobState};

/// Polls `handle` until it completes, fails, or the budget is exhausted.
///
/// Worst-case wall time is roughly `max_attempts * interval` (60 s with the
/// defaults from [`crate::core::config::poll`]).
///
/// # Errors
/// * [`ExtractError::RemoteFailed`] as soon as the job reports failure
/// * [`ExtractError::Timeout`] after `max_attempts` polls without a terminal state
/// * any transport error from the poller, unretried
pub async fn resolve<P>(
    poller: &P,
    handle: &JobHandle,
    max_attempts: u32,
    interval: Duration,
) -> Result<ExtractionJob, ExtractError>
where
    P: StatusPoller + ?Sized,
{
    for attempt in 1..=max_attempts {
        let job = poller.poll(handle).await?;

        match job.state {
            JobState::Completed => {
                log::info!("Extraction job completed: href={}, attempts={}", handle, attempt);
                return Ok(job);
            }
            JobState::Failed => {
                let message = job.error_message();
                log::warn!("Extraction job failed: href={}, reason={}", handle, message);
                return Err(ExtractError::RemoteFailed(message));
            }
            JobState::Pending | JobState::Other => {
                log::debug!("Extraction job pending: href={}, attempt={}/{}", handle, attempt, max_attempts);
                tokio::time::sleep(interval).await;
            }
        }
    }

    log::warn!("Extraction job timed out after {} polls: href={}", max_attempts, handle);
    Err(ExtractError::Timeout)
}
