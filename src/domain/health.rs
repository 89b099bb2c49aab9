//! Health reporting types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Health status enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is fully operational
    Healthy,
    /// Session storage backend is unavailable
    Degraded,
    /// Service is unavailable
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Degraded => write!(f, "degraded"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,
    /// Detailed health information
    pub details: Value,
}

impl HealthResponse {
    pub fn new(status: HealthStatus, details: Value) -> Self {
        Self { status, details }
    }

    /// Derive overall status from the registry and session storage: no
    /// methods configured means checkout cannot proceed at all, while a
    /// lost storage backend still leaves the in-memory mirror working
    pub fn from_checks(methods_configured: usize, storage_ok: bool) -> Self {
        let status = if methods_configured == 0 {
            HealthStatus::Unhealthy
        } else if storage_ok {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };
        Self::new(
            status,
            serde_json::json!({
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "version": env!("CARGO_PKG_VERSION"),
                "payment_methods": methods_configured,
                "storage_ok": storage_ok,
            }),
        )
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self.status, HealthStatus::Healthy)
    }

    /// Get HTTP status code for the health status
    pub fn http_status_code(&self) -> u16 {
        match self.status {
            HealthStatus::Healthy | HealthStatus::Degraded => 200,
            HealthStatus::Unhealthy => 503,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_is_unhealthy() {
        let health = HealthResponse::from_checks(0, true);
        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert_eq!(health.http_status_code(), 503);
    }

    #[test]
    fn lost_storage_degrades() {
        let health = HealthResponse::from_checks(5, false);
        assert_eq!(health.status, HealthStatus::Degraded);
        assert_eq!(health.http_status_code(), 200);
        assert!(!health.is_healthy());
    }
}
