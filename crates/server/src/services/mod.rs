mod fetch_job;
mod ingest;
mod scheduler;

pub use fetch_job::FeedFetchJob;
pub use ingest::IngestService;
pub use scheduler::{spawn_periodic_job, JobHandle, JobMessage, PeriodicJob};
