mod error;
mod feed_follows;
mod feeds;
mod posts;
mod users;

pub use error::{RepoError, RepoResult};
pub use feed_follows::FeedFollowRepository;
pub use feeds::FeedRepository;
pub use posts::PostRepository;
pub use users::UserRepository;
