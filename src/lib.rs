//! DZ Checkout Server - Payment routing and checkout orchestration for the
//! DZ bookstore storefront
//!
//! This library exposes the payment method registry, the provider
//! initiation dispatcher with its normalized outcomes, the checkout state
//! machine, and the cart aggregate behind a small HTTP API.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod middleware;
pub mod shared;

pub use config::AppConfig;
pub use infrastructure::http::server::CheckoutServer;
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
