//! Application services - Orchestration of domain logic

pub mod checkout_service;
pub mod method_service;

pub use checkout_service::{CheckoutOrchestrator, CheckoutService, CheckoutSummary};
pub use method_service::{CategoryGroup, MethodRegistry, MethodSelector};
