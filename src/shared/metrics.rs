//! Metrics utilities module
//!
//! This module provides centralized metrics functionality and utilities.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};
use serde::{Deserialize, Serialize};

/// Metrics data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    /// Payment initiations attempted
    pub payments_initiated: u64,

    /// Initiations that resolved to a redirect outcome
    pub payments_redirected: u64,

    /// Initiations that resolved to a completed outcome
    pub payments_completed: u64,

    /// Initiations that resolved to a pending outcome
    pub payments_pending: u64,

    /// Initiations that resolved to a failed outcome
    pub payments_failed: u64,

    /// Requests rejected by validation before any provider call
    pub validation_rejections: u64,

    /// Rate limited requests
    pub rate_limited_requests: u64,

    /// Average provider response time in milliseconds
    pub avg_provider_time_ms: f64,

    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Metrics utilities for the application
pub struct MetricsUtils {
    payments_initiated: AtomicU64,
    payments_redirected: AtomicU64,
    payments_completed: AtomicU64,
    payments_pending: AtomicU64,
    payments_failed: AtomicU64,
    validation_rejections: AtomicU64,
    rate_limited_requests: AtomicU64,
    total_provider_time: AtomicU64,
    provider_call_count: AtomicU64,
    start_time: SystemTime,
}

impl MetricsUtils {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            payments_initiated: AtomicU64::new(0),
            payments_redirected: AtomicU64::new(0),
            payments_completed: AtomicU64::new(0),
            payments_pending: AtomicU64::new(0),
            payments_failed: AtomicU64::new(0),
            validation_rejections: AtomicU64::new(0),
            rate_limited_requests: AtomicU64::new(0),
            total_provider_time: AtomicU64::new(0),
            provider_call_count: AtomicU64::new(0),
            start_time: SystemTime::now(),
        }
    }

    /// Increment payment initiations
    pub fn increment_initiated(&self) {
        self.payments_initiated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a normalized outcome by its tag
    pub fn record_outcome(&self, outcome_tag: &str) {
        let counter = match outcome_tag {
            "redirect" => &self.payments_redirected,
            "completed" => &self.payments_completed,
            "pending" => &self.payments_pending,
            _ => &self.payments_failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment validation rejections
    pub fn increment_validation_rejections(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment rate limited requests
    pub fn increment_rate_limited_requests(&self) {
        self.rate_limited_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record provider call duration
    pub fn record_provider_time(&self, duration_ms: u64) {
        self.total_provider_time.fetch_add(duration_ms, Ordering::Relaxed);
        self.provider_call_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics
    pub fn get_metrics(&self) -> Metrics {
        let total_provider_time = self.total_provider_time.load(Ordering::Relaxed);
        let provider_call_count = self.provider_call_count.load(Ordering::Relaxed);

        let avg_provider_time_ms = if provider_call_count > 0 {
            total_provider_time as f64 / provider_call_count as f64
        } else {
            0.0
        };

        let uptime = SystemTime::now()
            .duration_since(self.start_time)
            .unwrap_or(Duration::from_secs(0))
            .as_secs();

        Metrics {
            payments_initiated: self.payments_initiated.load(Ordering::Relaxed),
            payments_redirected: self.payments_redirected.load(Ordering::Relaxed),
            payments_completed: self.payments_completed.load(Ordering::Relaxed),
            payments_pending: self.payments_pending.load(Ordering::Relaxed),
            payments_failed: self.payments_failed.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
            rate_limited_requests: self.rate_limited_requests.load(Ordering::Relaxed),
            avg_provider_time_ms,
            uptime_seconds: uptime,
        }
    }

    /// Reset all metrics
    pub fn reset(&self) {
        self.payments_initiated.store(0, Ordering::Relaxed);
        self.payments_redirected.store(0, Ordering::Relaxed);
        self.payments_completed.store(0, Ordering::Relaxed);
        self.payments_pending.store(0, Ordering::Relaxed);
        self.payments_failed.store(0, Ordering::Relaxed);
        self.validation_rejections.store(0, Ordering::Relaxed);
        self.rate_limited_requests.store(0, Ordering::Relaxed);
        self.total_provider_time.store(0, Ordering::Relaxed);
        self.provider_call_count.store(0, Ordering::Relaxed);
    }
}

impl Default for MetricsUtils {
    fn default() -> Self {
        Self::new()
    }
}
