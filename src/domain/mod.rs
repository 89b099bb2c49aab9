//! Domain layer - Core business logic and domain models
//!
//! This module contains the core business logic, domain models, and business
//! rules that are independent of infrastructure concerns like HTTP, storage,
//! or provider wire formats.

pub mod cart;
pub mod checkout;
pub mod health;
pub mod order;
pub mod payment;

pub use cart::{CartAggregate, CartEntry, ItemKind};
pub use checkout::{CheckoutEffect, CheckoutFlow, CheckoutState};
pub use health::{HealthResponse, HealthStatus};
pub use order::{Address, CustomerInfo, OrderItem, OrderRequest};
pub use payment::{InstallmentOption, MethodCategory, PaymentMethod, PaymentOutcome};
