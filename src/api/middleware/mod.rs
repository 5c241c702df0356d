//! API middleware.

mod auth;
mod rate_limit;

pub use auth::{auth_middleware, authorize, require_admin, CurrentUser, RequestMeta};
pub use rate_limit::rate_limit_middleware;
