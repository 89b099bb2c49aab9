//! Error handling module
//!
//! This module provides centralized error handling for the application.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown payment method: {method}")]
    MethodNotFound { method: String },

    #[error("Provider error for {method}: {message}")]
    Provider { method: String, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> warp::http::StatusCode {
        match self {
            AppError::Validation(_) => warp::http::StatusCode::BAD_REQUEST,
            AppError::MethodNotFound { .. } => warp::http::StatusCode::BAD_REQUEST,
            AppError::Json(_) => warp::http::StatusCode::BAD_REQUEST,
            AppError::RateLimit => warp::http::StatusCode::TOO_MANY_REQUESTS,
            AppError::Provider { .. } => warp::http::StatusCode::BAD_GATEWAY,
            AppError::Transport(_) => warp::http::StatusCode::BAD_GATEWAY,
            _ => warp::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to surface to the storefront
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::MethodNotFound { method } => format!("unknown payment method: {}", method),
            AppError::Provider { message, .. } => message.clone(),
            AppError::Transport(_) => "network error".to_string(),
            AppError::RateLimit => "rate limit exceeded".to_string(),
            _ => "internal error".to_string(),
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

// Implement warp::reject::Reject for AppError
impl warp::reject::Reject for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}
