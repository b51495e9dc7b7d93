pub mod auth;
pub mod rate_limit;

pub use auth::{AuthMiddleware, AuthenticatedUser};
pub use rate_limit::RateLimitMiddleware;
