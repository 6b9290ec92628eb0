use std::sync::Arc;

use feed::{ChannelItem, FetchFeed};
use futures::stream::{self, StreamExt};
use sqlx::SqlitePool;

use crate::models::{CreatePost, Feed};
use crate::repositories::{FeedRepository, PostRepository, RepoError};

/// Periodic feed ingestion: selects the feeds most overdue for a fetch,
/// pulls each one through the feed client, and stores whatever items are
/// not already present.
///
/// One instance drives one cycle at a time; within a cycle at most
/// `concurrency` feeds are in flight. Failures never cross feed
/// boundaries, and a failure inside one item never stops the rest of
/// that feed's items.
pub struct IngestService {
    db: SqlitePool,
    feed_client: Arc<dyn FetchFeed>,
    concurrency: usize,
}

impl IngestService {
    pub fn new(db: SqlitePool, feed_client: Arc<dyn FetchFeed>, concurrency: usize) -> Self {
        Self {
            db,
            feed_client,
            concurrency: concurrency.max(1),
        }
    }

    /// Run one ingestion cycle and block until every feed in the batch
    /// has been processed.
    ///
    /// A selection error only skips this cycle; the next tick retries
    /// naturally.
    pub async fn run_cycle(&self) {
        let feeds = match FeedRepository::next_to_fetch(&self.db, self.concurrency as i64).await {
            Ok(feeds) => feeds,
            Err(e) => {
                tracing::error!("Failed to select feeds for this cycle: {}", e);
                return;
            }
        };

        if feeds.is_empty() {
            tracing::debug!("No feeds due for fetching");
            return;
        }

        self.ingest_batch(feeds).await;
    }

    /// Drive every feed in the batch through its own task, with at most
    /// `concurrency` tasks in flight. Correct even when the batch is
    /// larger than the budget.
    async fn ingest_batch(&self, feeds: Vec<Feed>) {
        tracing::debug!(
            "Fetching {} feeds, at most {} in flight",
            feeds.len(),
            self.concurrency
        );

        let mut tasks = stream::iter(feeds.into_iter().map(|feed| self.ingest_feed(feed)))
            .buffer_unordered(self.concurrency);

        while tasks.next().await.is_some() {}
    }

    /// Process a single feed: mark it fetched, pull the document, store
    /// its items.
    ///
    /// The mark-fetched write happens before the fetch so a slow or hung
    /// source cannot cause the same feed to be re-selected every cycle.
    async fn ingest_feed(&self, feed: Feed) {
        if let Err(e) = FeedRepository::mark_fetched(&self.db, feed.id).await {
            tracing::error!("[{}] Failed to mark feed as fetched: {}", feed.name, e);
            return;
        }

        let channel = match self.feed_client.fetch(&feed.url).await {
            Ok(channel) => channel,
            Err(e) => {
                tracing::error!("[{}] Failed to fetch feed: {}", feed.name, e);
                return;
            }
        };

        let total = channel.items.len();
        for item in channel.items {
            self.store_item(&feed, item).await;
        }

        tracing::info!("[{}] Feed collected, {} items found", feed.name, total);
    }

    async fn store_item(&self, feed: &Feed, item: ChannelItem) {
        let published_at = match item.published_at() {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(
                    "[{}] Skipping item with unparseable date {:?}: {}",
                    feed.name,
                    item.pub_date,
                    e
                );
                return;
            }
        };

        let post = CreatePost {
            title: item.title,
            url: item.link,
            description: item.description.filter(|d| !d.is_empty()),
            published_at,
            feed_id: feed.id,
        };

        match PostRepository::create(&self.db, post).await {
            Ok(_) => {}
            // Already ingested in an earlier cycle
            Err(RepoError::UniqueViolation) => {}
            Err(e) => tracing::error!("[{}] Failed to store post: {}", feed.name, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use feed::{Channel, FeedClient, FeedError};

    use crate::models::{CreateFeed, CreateUser};
    use crate::repositories::UserRepository;
    use crate::test_util::test_pool;

    async fn seed_feed(pool: &SqlitePool, user_id: i64, name: &str, url: &str) -> Feed {
        FeedRepository::create(
            pool,
            user_id,
            CreateFeed {
                name: name.to_string(),
                url: url.to_string(),
            },
        )
        .await
        .unwrap()
    }

    async fn seed_user(pool: &SqlitePool) -> i64 {
        UserRepository::create(pool, CreateUser { name: "alice".into() })
            .await
            .unwrap()
            .id
    }

    fn feed_body(slug: &str) -> String {
        format!(
            r#"<rss version="2.0"><channel>
                <title>{slug}</title>
                <item>
                    <title>{slug} first</title>
                    <link>https://example.com/{slug}/first</link>
                    <description>Opening words</description>
                    <pubDate>Mon, 02 Jan 2006 15:04:05 -0700</pubDate>
                </item>
                <item>
                    <title>{slug} second</title>
                    <link>https://example.com/{slug}/second</link>
                    <pubDate>Tue, 03 Jan 2006 08:00:00 -0700</pubDate>
                </item>
            </channel></rss>"#
        )
    }

    #[tokio::test]
    async fn it_ingests_a_batch_exactly_once() {
        let mut server = mockito::Server::new_async().await;
        let _a = server
            .mock("GET", "/a.xml")
            .with_status(200)
            .with_body(feed_body("a"))
            .expect_at_least(1)
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/b.xml")
            .with_status(200)
            .with_body(feed_body("b"))
            .expect_at_least(1)
            .create_async()
            .await;

        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let feed_a = seed_feed(&pool, user_id, "a", &format!("{}/a.xml", server.url())).await;
        let feed_b = seed_feed(&pool, user_id, "b", &format!("{}/b.xml", server.url())).await;

        let service = IngestService::new(pool.clone(), Arc::new(FeedClient::new()), 10);
        service.run_cycle().await;

        let posts_a = PostRepository::get_by_feed_id(&pool, feed_a.id).await.unwrap();
        let posts_b = PostRepository::get_by_feed_id(&pool, feed_b.id).await.unwrap();
        assert_eq!(posts_a.len(), 2);
        assert_eq!(posts_b.len(), 2);

        // Items without a description are stored as NULL
        assert!(posts_a.iter().any(|p| p.description.is_none()));
        assert!(posts_a.iter().any(|p| p.description.is_some()));

        let marked_a = FeedRepository::get_by_id(&pool, feed_a.id).await.unwrap().unwrap();
        let marked_b = FeedRepository::get_by_id(&pool, feed_b.id).await.unwrap().unwrap();
        assert!(marked_a.last_fetched_at.is_some());
        assert!(marked_b.last_fetched_at.is_some());

        // A second cycle over unchanged documents adds nothing
        service.run_cycle().await;

        assert_eq!(
            PostRepository::get_by_feed_id(&pool, feed_a.id).await.unwrap().len(),
            2
        );
        assert_eq!(
            PostRepository::get_by_feed_id(&pool, feed_b.id).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn it_skips_items_with_unparseable_dates() {
        let body = r#"<rss version="2.0"><channel>
            <title>Feed</title>
            <item>
                <title>Broken date</title>
                <link>https://example.com/broken</link>
                <pubDate>not-a-date</pubDate>
            </item>
            <item>
                <title>Good date</title>
                <link>https://example.com/good</link>
                <pubDate>Mon, 02 Jan 2006 15:04:05 -0700</pubDate>
            </item>
        </channel></rss>"#;

        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/feed.xml")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let feed = seed_feed(&pool, user_id, "f", &format!("{}/feed.xml", server.url())).await;

        let service = IngestService::new(pool.clone(), Arc::new(FeedClient::new()), 10);
        service.run_cycle().await;

        let posts = PostRepository::get_by_feed_id(&pool, feed.id).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, "https://example.com/good");
    }

    #[tokio::test]
    async fn it_isolates_failing_feeds_from_their_siblings() {
        let mut server = mockito::Server::new_async().await;
        let _a = server
            .mock("GET", "/a.xml")
            .with_status(500)
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/b.xml")
            .with_status(200)
            .with_body(feed_body("b"))
            .create_async()
            .await;

        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let feed_a = seed_feed(&pool, user_id, "a", &format!("{}/a.xml", server.url())).await;
        let feed_b = seed_feed(&pool, user_id, "b", &format!("{}/b.xml", server.url())).await;

        let service = IngestService::new(pool.clone(), Arc::new(FeedClient::new()), 10);
        service.run_cycle().await;

        assert!(PostRepository::get_by_feed_id(&pool, feed_a.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            PostRepository::get_by_feed_id(&pool, feed_b.id).await.unwrap().len(),
            2
        );

        // The failing feed was still marked, so it waits its turn again
        let marked_a = FeedRepository::get_by_id(&pool, feed_a.id).await.unwrap().unwrap();
        assert!(marked_a.last_fetched_at.is_some());
    }

    struct CountingFetcher {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FetchFeed for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<Channel, FeedError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight
                .fetch_max(current, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(30)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            Ok(Channel {
                title: "empty".to_string(),
                items: vec![],
            })
        }
    }

    #[tokio::test]
    async fn it_never_exceeds_the_concurrency_budget() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        for i in 0..5 {
            seed_feed(
                &pool,
                user_id,
                &format!("feed-{i}"),
                &format!("https://example.com/{i}.xml"),
            )
            .await;
        }

        let fetcher = Arc::new(CountingFetcher::new());
        let service = IngestService::new(pool.clone(), Arc::clone(&fetcher) as Arc<dyn FetchFeed>, 2);

        // Larger batch than the budget: drive all five feeds through a
        // two-wide window
        let feeds = FeedRepository::next_to_fetch(&pool, 5).await.unwrap();
        service.ingest_batch(feeds).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 5);
        assert!(fetcher.max_in_flight.load(Ordering::SeqCst) <= 2);
    }
}
