mod auth;
pub mod handlers;
mod router;

pub use auth::ApiUser;
pub use router::create_router;
