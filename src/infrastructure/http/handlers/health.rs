//! Health check handler module
//!
//! This module contains the health check endpoint handler for monitoring
//! system status.

use crate::application::services::method_service::MethodRegistry;
use crate::domain::health::HealthResponse;
use std::sync::Arc;
use warp::Reply;

/// Handle health check requests. Status derives from the loaded method
/// registry and session storage connectivity.
pub async fn handle_health_request(
    registry: Arc<MethodRegistry>,
    storage_ok: bool,
) -> Result<impl Reply, warp::reject::Rejection> {
    let health = HealthResponse::from_checks(registry.len(), storage_ok);
    let status = warp::http::StatusCode::from_u16(health.http_status_code())
        .unwrap_or(warp::http::StatusCode::OK);
    Ok(warp::reply::with_status(warp::reply::json(&health), status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn healthy_with_methods_and_storage() {
        let registry = Arc::new(MethodRegistry::from_config(&AppConfig::default().payments).unwrap());
        let result = handle_health_request(registry, true).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn empty_registry_is_reported() {
        let registry = Arc::new(MethodRegistry::empty());
        let result = handle_health_request(registry, true).await;
        assert!(result.is_ok());
    }
}
