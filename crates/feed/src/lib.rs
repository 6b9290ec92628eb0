mod client;
mod error;
pub mod models;
mod parser;

pub use client::{FeedClient, FetchFeed, FETCH_TIMEOUT};
pub use error::FeedError;
pub use models::{Channel, ChannelItem};

pub type Result<T> = std::result::Result<T, FeedError>;
