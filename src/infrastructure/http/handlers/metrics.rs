//! Metrics handler module
//!
//! This module contains the metrics endpoint handler for monitoring.

use crate::shared::metrics::MetricsUtils;
use std::sync::Arc;
use warp::Reply;

/// Handle metrics requests
pub async fn handle_metrics_request(
    metrics: Arc<MetricsUtils>,
) -> Result<impl Reply, warp::reject::Rejection> {
    Ok(warp::reply::json(&metrics.get_metrics()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn metrics_snapshot_is_served() {
        let metrics = Arc::new(MetricsUtils::new());
        metrics.increment_initiated();
        metrics.record_outcome("completed");
        let result = handle_metrics_request(metrics).await;
        assert!(result.is_ok());
    }
}
