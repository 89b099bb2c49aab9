//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use tracing::{error, info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    pub fn initialize(level: &str) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| crate::shared::error::AppError::Internal(format!("Failed to initialize logging: {}", e)))?;

        Ok(())
    }

    /// Log a payment initiation attempt with structured data
    pub fn log_payment_attempt(
        request_id: &str,
        method_id: &str,
        order_id: &str,
        amount: &str,
        currency: &str,
    ) {
        info!(
            request_id = %request_id,
            method_id = %method_id,
            order_id = %order_id,
            amount = %amount,
            currency = %currency,
            "Initiating payment"
        );
    }

    /// Log a normalized payment outcome
    pub fn log_payment_outcome(request_id: &str, method_id: &str, outcome: &str, duration_ms: u64) {
        info!(
            request_id = %request_id,
            method_id = %method_id,
            outcome = %outcome,
            duration_ms = %duration_ms,
            "Payment initiation completed"
        );
    }

    /// Log an error response
    pub fn log_error(request_id: &str, operation: &str, error: &crate::shared::error::AppError, duration_ms: u64) {
        error!(
            request_id = %request_id,
            operation = %operation,
            error = %error,
            duration_ms = %duration_ms,
            "Request failed"
        );
    }

    /// Log rate limiting events
    pub fn log_rate_limit(client_ip: &str, endpoint: &str) {
        warn!(
            client_ip = %client_ip,
            endpoint = %endpoint,
            "Rate limit exceeded"
        );
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();

        format!("req_{:x}", now)
    }
}
