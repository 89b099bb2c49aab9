//! Per-IP rate limiting for payment endpoints
//!
//! Payment initiation creates provider-side transactions, so the keyed
//! limiter sits in front of those routes specifically.

use crate::config::AppConfig;
use crate::shared::error::AppError;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Keyed rate limiter over client IPs
#[derive(Clone)]
pub struct RateLimitMiddleware {
    limiter: Option<Arc<DefaultKeyedRateLimiter<String>>>,
}

impl RateLimitMiddleware {
    pub fn new(config: &AppConfig) -> Self {
        if !config.rate_limit.enabled {
            return Self { limiter: None };
        }
        let per_minute = NonZeroU32::new(config.rate_limit.requests_per_minute.max(1)).unwrap();
        let burst = NonZeroU32::new(config.rate_limit.burst_size.max(1)).unwrap();
        let quota = Quota::per_minute(per_minute).allow_burst(burst);
        Self {
            limiter: Some(Arc::new(RateLimiter::keyed(quota))),
        }
    }

    /// Check the per-client quota; Ok when limiting is disabled
    pub fn check(&self, client_ip: &str) -> Result<(), AppError> {
        match &self.limiter {
            Some(limiter) => limiter
                .check_key(&client_ip.to_string())
                .map_err(|_| AppError::RateLimit),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_limiter_always_allows() {
        let mut config = AppConfig::default();
        config.rate_limit.enabled = false;
        let middleware = RateLimitMiddleware::new(&config);
        for _ in 0..1000 {
            assert!(middleware.check("10.0.0.1").is_ok());
        }
    }

    #[test]
    fn burst_exhaustion_rejects() {
        let mut config = AppConfig::default();
        config.rate_limit.requests_per_minute = 60;
        config.rate_limit.burst_size = 3;
        let middleware = RateLimitMiddleware::new(&config);
        for _ in 0..3 {
            assert!(middleware.check("10.0.0.2").is_ok());
        }
        assert!(matches!(middleware.check("10.0.0.2"), Err(AppError::RateLimit)));
    }

    #[test]
    fn clients_are_limited_independently() {
        let mut config = AppConfig::default();
        config.rate_limit.requests_per_minute = 60;
        config.rate_limit.burst_size = 1;
        let middleware = RateLimitMiddleware::new(&config);
        assert!(middleware.check("10.0.0.3").is_ok());
        assert!(middleware.check("10.0.0.3").is_err());
        assert!(middleware.check("10.0.0.4").is_ok());
    }
}
