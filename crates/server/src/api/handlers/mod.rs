mod feed_follows;
mod feeds;
mod health;
mod posts;
mod users;

pub use feed_follows::{
    __path_create_feed_follow, __path_delete_feed_follow, __path_get_feed_follows,
    create_feed_follow, delete_feed_follow, get_feed_follows,
};
pub use feeds::{__path_create_feed, __path_get_feeds, create_feed, get_feeds};
pub use health::{__path_err, __path_healthz, err, healthz};
pub use posts::{__path_get_posts, get_posts, PostsQuery};
pub use users::{__path_create_user, __path_get_user, create_user, get_user};
