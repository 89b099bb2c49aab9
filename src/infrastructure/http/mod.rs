//! HTTP infrastructure module
//!
//! This module contains HTTP-related concerns including models, server
//! implementation, routes, utilities, and handlers.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod utils;

pub use models::{CheckoutHttpRequest, CheckoutHttpResponse, InitializePaymentRequest, RequestContext};
pub use server::CheckoutServer;
pub use utils::*;
