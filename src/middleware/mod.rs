//! HTTP middleware for the checkout API

pub mod cors;
pub mod rate_limit;

pub use cors::CorsMiddleware;
pub use rate_limit::RateLimitMiddleware;
