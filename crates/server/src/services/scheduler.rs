//! Periodic job infrastructure.
//!
//! Each job runs in its own long-lived tokio task on a fixed interval
//! and can be stopped through its handle at a tick boundary; work
//! already in flight finishes before the task exits.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Message types for periodic jobs
pub enum JobMessage {
    Shutdown,
}

/// A task executed on a fixed interval for the lifetime of the process.
///
/// The first execution happens immediately after the job is spawned, so
/// the system starts useful work without waiting out a full interval.
pub trait PeriodicJob: Send + 'static {
    /// The interval between executions
    fn interval(&self) -> Duration;

    /// The job name (used for logging)
    fn name(&self) -> &'static str;

    /// Execute one run of the job. Errors are the job's own concern;
    /// the loop keeps ticking regardless.
    fn execute(&self) -> impl std::future::Future<Output = ()> + Send;
}

/// Handle for communicating with a spawned periodic job
#[derive(Clone)]
pub struct JobHandle {
    sender: mpsc::Sender<JobMessage>,
}

impl JobHandle {
    /// Signal the job to stop at the next tick boundary
    pub async fn shutdown(&self) {
        let _ = self.sender.send(JobMessage::Shutdown).await;
    }
}

/// Spawn a periodic job and return a handle to communicate with it.
///
/// A run that takes longer than the interval delays subsequent ticks
/// rather than overlapping them; missed ticks are skipped, not bursted.
pub fn spawn_periodic_job<J: PeriodicJob>(job: J) -> JobHandle {
    let (sender, mut receiver) = mpsc::channel(8);

    tokio::spawn(async move {
        let mut timer = tokio::time::interval(job.interval());
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    job.execute().await;
                }
                msg = receiver.recv() => {
                    match msg {
                        Some(JobMessage::Shutdown) | None => {
                            tracing::info!("{} job stopped", job.name());
                            break;
                        }
                    }
                }
            }
        }
    });

    JobHandle { sender }
}
