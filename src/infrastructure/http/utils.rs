//! HTTP utilities - Common helper functions
//!
//! This module contains utility functions used across the HTTP
//! infrastructure for client IP extraction and route injection.

use crate::application::services::checkout_service::CheckoutService;
use crate::application::services::method_service::MethodRegistry;
use crate::config::AppConfig;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::shared::metrics::MetricsUtils;
use std::sync::Arc;
use warp::Filter;

/// Validate a forwarded client IP, falling back to loopback
pub fn normalize_client_ip(raw_ip: Option<&str>) -> String {
    match raw_ip {
        Some(ip) if ip.parse::<std::net::IpAddr>().is_ok() => ip.to_string(),
        _ => "127.0.0.1".to_string(),
    }
}

/// Extract the client IP from the `x-forwarded-for` header set by the
/// reverse proxy; the first entry is the originating client
pub fn client_ip() -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("x-forwarded-for").map(|header: Option<String>| {
        let first = header
            .as_deref()
            .and_then(|value| value.split(',').next())
            .map(str::trim);
        normalize_client_ip(first)
    })
}

/// Helper function to inject configuration into route
pub fn with_config(
    config: AppConfig,
) -> impl Filter<Extract = (AppConfig,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || config.clone())
}

/// Helper function to inject the method registry into route
pub fn with_registry(
    registry: Arc<MethodRegistry>,
) -> impl Filter<Extract = (Arc<MethodRegistry>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || registry.clone())
}

/// Helper function to inject the checkout service into route
pub fn with_checkout_service(
    service: Arc<CheckoutService>,
) -> impl Filter<Extract = (Arc<CheckoutService>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || service.clone())
}

/// Helper function to inject the rate limiting middleware into route
pub fn with_rate_limit(
    rate_limit: Arc<RateLimitMiddleware>,
) -> impl Filter<Extract = (Arc<RateLimitMiddleware>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || rate_limit.clone())
}

/// Helper function to inject the metrics collector into route
pub fn with_metrics(
    metrics: Arc<MetricsUtils>,
) -> impl Filter<Extract = (Arc<MetricsUtils>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || metrics.clone())
}
