//! Order domain models and validation

use crate::shared::error::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer contact details carried on an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Postal address for shipping or billing
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// A priced order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Ephemeral payment request, constructed per checkout attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub customer: CustomerInfo,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_address: Address,
    #[serde(default)]
    pub billing_address: Address,
    #[serde(default)]
    pub shipping_cost: Decimal,
    #[serde(default)]
    pub tax_amount: Decimal,
}

impl OrderRequest {
    /// Sum of line totals plus shipping and tax
    pub fn computed_total(&self) -> Decimal {
        let items: Decimal = self.items.iter().map(OrderItem::line_total).sum();
        items + self.shipping_cost + self.tax_amount
    }

    /// Validate the order before dispatch. The declared amount must match
    /// the computed total exactly; a single currency applies to the whole
    /// order.
    pub fn validate(&self) -> AppResult<()> {
        if self.currency.trim().is_empty() {
            return Err(AppError::Validation("currency must not be empty".to_string()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(AppError::Validation("amount must be positive".to_string()));
        }
        if self.items.is_empty() {
            return Err(AppError::Validation("order has no items".to_string()));
        }
        if self.items.iter().any(|item| item.quantity == 0) {
            return Err(AppError::Validation("item quantity must be at least 1".to_string()));
        }
        let computed = self.computed_total();
        if computed != self.amount {
            return Err(AppError::Validation(format!(
                "amount {} does not match computed total {}",
                self.amount, computed
            )));
        }
        Ok(())
    }
}

/// Order record persisted after a checkout attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub method_id: String,
    pub request: OrderRequest,
    pub outcome: crate::domain::payment::PaymentOutcome,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl OrderRecord {
    pub fn new(method_id: &str, request: OrderRequest, outcome: crate::domain::payment::PaymentOutcome) -> Self {
        Self {
            order_id: request.order_id.clone(),
            method_id: method_id.to_string(),
            request,
            outcome,
            created_at: chrono::Utc::now(),
        }
    }
}
