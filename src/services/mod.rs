pub mod auth_service;
pub mod cookie_store;
pub mod feed_service;
pub mod like_service;
pub mod rate_limit;
pub mod reporter;

pub use auth_service::{AuthMethod, AuthService};
pub use cookie_store::CookieStore;
pub use feed_service::{extract_post_links, FeedService};
pub use like_service::LikeService;
pub use rate_limit::{RateLimitProbe, RestrictionNoticeProbe};
pub use reporter::{BatchInfo, Reporter, TracingReporter};
