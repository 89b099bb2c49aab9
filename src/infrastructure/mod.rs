//! Infrastructure layer - External concerns and adapters
//!
//! This module contains infrastructure concerns including payment provider
//! adapters, session storage, and HTTP handling.

pub mod adapters;
pub mod http;

pub use adapters::{CartStore, OrderStore, PaymentDispatcher};
