use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::FeedError;
use crate::models::Channel;
use crate::parser::parse_channel;

/// How long a single feed fetch may take before it is abandoned.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The transport seam the ingestion pipeline consumes.
///
/// Production code uses [`FeedClient`]; tests substitute instrumented
/// implementations.
#[async_trait]
pub trait FetchFeed: Send + Sync {
    async fn fetch(&self, url: &str) -> crate::Result<Channel>;
}

/// Feed fetcher backed by a shared reqwest client.
///
/// # Example
/// ```no_run
/// use feed::{FeedClient, FetchFeed};
///
/// # async fn example() -> feed::Result<()> {
/// let client = FeedClient::new();
/// let channel = client.fetch("https://example.com/index.xml").await?;
///
/// for item in channel.items {
///     println!("{}", item.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Create a FeedClient with a custom reqwest Client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchFeed for FeedClient {
    async fn fetch(&self, url: &str) -> crate::Result<Channel> {
        tracing::debug!("Fetching feed from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FeedError::Parse(format!(
                "HTTP {} when fetching {}",
                status, url
            )));
        }

        let bytes = response.bytes().await?;
        let channel = parse_channel(&bytes)?;

        tracing::debug!("Parsed {} items from {}", channel.items.len(), url);
        Ok(channel)
    }
}
