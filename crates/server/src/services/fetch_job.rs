use std::sync::Arc;
use std::time::Duration;

use super::{IngestService, PeriodicJob};

/// The scheduled entry point of the ingestion pipeline.
///
/// Every tick runs one full ingestion cycle and absorbs everything that
/// goes wrong below it; the scheduler keeps ticking no matter what a
/// cycle encountered.
pub struct FeedFetchJob {
    ingest: Arc<IngestService>,
    interval: Duration,
}

impl FeedFetchJob {
    pub fn new(ingest: Arc<IngestService>, interval: Duration) -> Self {
        Self { ingest, interval }
    }
}

impl PeriodicJob for FeedFetchJob {
    fn interval(&self) -> Duration {
        self.interval
    }

    fn name(&self) -> &'static str {
        "feed_fetch"
    }

    async fn execute(&self) {
        tracing::debug!("Feed fetch cycle started");
        self.ingest.run_cycle().await;
        tracing::debug!("Feed fetch cycle finished");
    }
}
