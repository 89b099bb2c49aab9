//! HTTP models - Infrastructure concerns
//!
//! This module contains models that are specific to infrastructure concerns
//! like HTTP requests/responses, serialization, and external interfaces.

use crate::application::services::checkout_service::CheckoutSummary;
use crate::application::services::method_service::CategoryGroup;
use crate::domain::order::{Address, CustomerInfo, OrderItem, OrderRequest};
use crate::domain::payment::{InstallmentOption, PaymentMethod, PaymentOutcome};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Customer details as submitted by the storefront
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerInfoDto {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,
}

impl CustomerInfoDto {
    pub fn to_domain(&self) -> CustomerInfo {
        CustomerInfo {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Body of `POST /orders`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutHttpRequest {
    #[validate(length(min = 1, max = 80))]
    pub session_id: String,

    #[validate(length(min = 1, max = 40))]
    pub payment_method: String,

    #[validate(nested)]
    pub customer_info: CustomerInfoDto,

    #[serde(default)]
    pub shipping_address: Address,

    #[serde(default)]
    pub billing_address: Address,
}

/// Response of `POST /orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutHttpResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_result: Option<PaymentOutcome>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckoutHttpResponse {
    pub fn from_summary(summary: CheckoutSummary) -> Self {
        let error = match &summary.outcome {
            PaymentOutcome::Failed { reason } => Some(reason.clone()),
            _ => None,
        };
        Self {
            success: error.is_none(),
            order_id: Some(summary.order_id),
            redirect_url: summary.redirect_url,
            payment_result: Some(summary.outcome),
            error,
        }
    }

    pub fn from_error(message: String) -> Self {
        Self {
            success: false,
            order_id: None,
            redirect_url: None,
            payment_result: None,
            error: Some(message),
        }
    }
}

/// Body of `POST /payments/initialize`. Items are optional: a caller that
/// only knows the total gets a single synthesized line so the order-total
/// invariant still holds.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InitializePaymentRequest {
    #[validate(length(min = 1, max = 40))]
    pub payment_method: String,

    pub amount: Decimal,

    #[validate(length(min = 3, max = 3))]
    pub currency: String,

    #[serde(default)]
    pub order_id: Option<String>,

    #[validate(nested)]
    pub customer_info: CustomerInfoDto,

    #[serde(default)]
    pub items: Vec<OrderItem>,

    #[serde(default)]
    pub shipping_cost: Decimal,

    #[serde(default)]
    pub tax_amount: Decimal,

    #[serde(default)]
    pub shipping_address: Address,

    #[serde(default)]
    pub billing_address: Address,
}

impl InitializePaymentRequest {
    /// Build the ephemeral order request this initiation attempt is for
    pub fn into_order_request(self) -> OrderRequest {
        let order_id = self
            .order_id
            .unwrap_or_else(|| format!("ord_{}", Uuid::new_v4().simple()));
        let items = if self.items.is_empty() {
            vec![OrderItem {
                id: order_id.clone(),
                title: "Order total".to_string(),
                quantity: 1,
                unit_price: self.amount - self.shipping_cost - self.tax_amount,
            }]
        } else {
            self.items
        };
        OrderRequest {
            order_id,
            amount: self.amount,
            currency: self.currency,
            customer: self.customer_info.to_domain(),
            items,
            shipping_address: self.shipping_address,
            billing_address: self.billing_address,
            shipping_cost: self.shipping_cost,
            tax_amount: self.tax_amount,
        }
    }
}

/// Query parameters of `GET /payment_methods`. The amount is kept as a
/// raw string: an absent or unparseable amount skips bounds filtering
/// instead of failing the request.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodsQuery {
    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub amount: Option<String>,
}

/// Response of `GET /payment_methods`
#[derive(Debug, Clone, Serialize)]
pub struct MethodsResponse {
    pub payment_methods: Vec<PaymentMethod>,
    pub groups: Vec<CategoryGroup>,
}

/// Query parameters of `GET /payments/installments/<method_id>`
#[derive(Debug, Clone, Deserialize)]
pub struct InstallmentsQuery {
    #[serde(default)]
    pub amount: Option<String>,
}

/// Response of `GET /payments/installments/<method_id>`
#[derive(Debug, Clone, Serialize)]
pub struct InstallmentsResponse {
    pub method_id: String,
    pub options: Vec<InstallmentOption>,
}

/// HTTP request context for tracking and logging
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID
    pub request_id: String,

    /// Client IP address
    pub client_ip: String,

    /// Endpoint name for logging
    pub endpoint: String,

    /// Request timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl RequestContext {
    pub fn new(client_ip: String, endpoint: String) -> Self {
        Self {
            request_id: crate::shared::logging::LoggingUtils::generate_request_id(),
            client_ip,
            endpoint,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn customer_dto() -> CustomerInfoDto {
        CustomerInfoDto {
            name: "Amal".to_string(),
            email: "amal@example.com".to_string(),
            phone: None,
        }
    }

    #[test]
    fn checkout_request_validates_email() {
        let request = CheckoutHttpRequest {
            session_id: "s1".to_string(),
            payment_method: "stc_pay".to_string(),
            customer_info: CustomerInfoDto {
                name: "Amal".to_string(),
                email: "not-an-email".to_string(),
                phone: None,
            },
            shipping_address: Address::default(),
            billing_address: Address::default(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn initialize_request_synthesizes_a_line_when_items_missing() {
        let request = InitializePaymentRequest {
            payment_method: "stc_pay".to_string(),
            amount: dec!(145),
            currency: "SAR".to_string(),
            order_id: None,
            customer_info: customer_dto(),
            items: vec![],
            shipping_cost: dec!(10),
            tax_amount: dec!(5),
            shipping_address: Address::default(),
            billing_address: Address::default(),
        };
        let order = request.into_order_request();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].unit_price, dec!(130));
        assert!(order.validate().is_ok());
        assert!(order.order_id.starts_with("ord_"));
    }

    #[test]
    fn initialize_request_keeps_caller_items_and_order_id() {
        let request = InitializePaymentRequest {
            payment_method: "tamara".to_string(),
            amount: dec!(145),
            currency: "SAR".to_string(),
            order_id: Some("ord_abc".to_string()),
            customer_info: customer_dto(),
            items: vec![OrderItem {
                id: "bk_1".to_string(),
                title: "Novel".to_string(),
                quantity: 1,
                unit_price: dec!(145),
            }],
            shipping_cost: dec!(0),
            tax_amount: dec!(0),
            shipping_address: Address::default(),
            billing_address: Address::default(),
        };
        let order = request.into_order_request();
        assert_eq!(order.order_id, "ord_abc");
        assert_eq!(order.items[0].id, "bk_1");
    }

    #[test]
    fn failed_summary_maps_to_unsuccessful_response() {
        let summary = CheckoutSummary {
            order_id: "ord_1".to_string(),
            state: crate::domain::checkout::CheckoutState::Failed { reason: "declined".to_string() },
            outcome: PaymentOutcome::Failed { reason: "declined".to_string() },
            redirect_url: None,
        };
        let response = CheckoutHttpResponse::from_summary(summary);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("declined"));
    }

    #[test]
    fn redirect_summary_carries_the_url() {
        let summary = CheckoutSummary {
            order_id: "ord_2".to_string(),
            state: crate::domain::checkout::CheckoutState::Processing,
            outcome: PaymentOutcome::Redirect {
                url: "https://pay".to_string(),
                transaction_id: "t".to_string(),
            },
            redirect_url: Some("https://pay".to_string()),
        };
        let response = CheckoutHttpResponse::from_summary(summary);
        assert!(response.success);
        assert_eq!(response.redirect_url.as_deref(), Some("https://pay"));
    }
}
