//! CORS middleware for the storefront SPA
//!
//! The React storefront calls the checkout API cross-origin, so the
//! server answers preflights itself instead of deferring to a reverse
//! proxy.

use crate::config::AppConfig;

/// CORS middleware built from the configured storefront origins
pub struct CorsMiddleware;

impl CorsMiddleware {
    /// Build the warp CORS filter from configuration
    pub fn create(config: &AppConfig) -> warp::cors::Cors {
        let mut cors = warp::cors()
            .allow_headers(vec!["content-type", "accept"])
            .max_age(3600);

        for method in &config.cors.allowed_methods {
            cors = cors.allow_method(method.as_str());
        }

        if Self::allows_any_origin(config) {
            cors = cors.allow_any_origin();
        } else {
            for origin in &config.cors.allowed_origins {
                cors = cors.allow_origin(origin.as_str());
            }
        }

        cors.build()
    }

    /// Check if CORS allows any origin
    pub fn allows_any_origin(config: &AppConfig) -> bool {
        config.cors.allowed_origins.iter().any(|o| o == "*")
    }

    /// Validate the configured origins and methods
    pub fn validate_config(config: &AppConfig) -> Result<(), String> {
        for origin in &config.cors.allowed_origins {
            if !Self::is_valid_origin(origin) {
                return Err(format!("Invalid CORS origin: {}", origin));
            }
        }
        for method in &config.cors.allowed_methods {
            if method.parse::<warp::http::Method>().is_err() {
                return Err(format!("Invalid CORS method: {}", method));
            }
        }
        Ok(())
    }

    fn is_valid_origin(origin: &str) -> bool {
        origin == "*" || origin.starts_with("http://") || origin.starts_with("https://")
    }
}
