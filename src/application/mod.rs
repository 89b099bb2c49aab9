//! Application layer - Application services
//!
//! This module contains application services that orchestrate domain logic
//! for the checkout server.

pub mod services;

pub use services::*;
