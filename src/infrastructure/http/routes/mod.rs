//! HTTP routes module
//!
//! This module contains all HTTP route configurations.

pub mod health;
pub mod methods;
pub mod metrics;
pub mod orders;
pub mod payments;

pub use health::HealthRoutes;
pub use methods::MethodsRoutes;
pub use metrics::MetricsRoutes;
pub use orders::OrdersRoutes;
pub use payments::PaymentsRoutes;
