pub mod auth;
pub mod cors;
pub mod rate_limit;

pub use auth::{get_user_data, AuthenticatedUser};
pub use cors::cors_middleware;
pub use rate_limit::{rate_limit_middleware, RateLimitState};
