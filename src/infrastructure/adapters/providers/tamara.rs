//! Tamara BNPL checkout session adapter

use crate::config::AppConfig;
use crate::domain::order::OrderRequest;
use crate::domain::payment::PaymentOutcome;
use crate::infrastructure::adapters::providers::{CallbackUrls, ProviderInitiator};
use crate::shared::error::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Creates a hosted Tamara checkout session and redirects the customer to it
pub struct TamaraAdapter {
    config: Arc<AppConfig>,
}

impl TamaraAdapter {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    fn build_payload(&self, order: &OrderRequest) -> Value {
        let urls = CallbackUrls::for_order(&self.config.storefront.origin, &order.order_id);
        json!({
            "order_reference_id": order.order_id,
            "total_amount": { "amount": order.amount, "currency": order.currency },
            "description": "DZ bookstore order",
            "payment_type": "PAY_BY_INSTALMENTS",
            "items": order.items.iter().map(|item| json!({
                "reference_id": item.id,
                "name": item.title,
                "quantity": item.quantity,
                "unit_price": { "amount": item.unit_price, "currency": order.currency },
            })).collect::<Vec<_>>(),
            "consumer": {
                "first_name": order.customer.name,
                "email": order.customer.email,
                "phone_number": order.customer.phone,
            },
            "shipping_amount": { "amount": order.shipping_cost, "currency": order.currency },
            "tax_amount": { "amount": order.tax_amount, "currency": order.currency },
            "merchant_url": {
                "success": urls.success,
                "failure": urls.failure,
                "cancel": urls.cancel,
                "notification": format!("{}/api/webhooks/tamara", self.config.storefront.origin),
            },
        })
    }

    /// Normalize the checkout-session response. Tamara returns the session
    /// id as `order_id` and the hosted page as `checkout_url`.
    fn normalize(body: &Value) -> AppResult<PaymentOutcome> {
        if let Some(message) = body.get("message").and_then(|m| m.as_str()) {
            if body.get("checkout_url").is_none() {
                return Err(AppError::Provider {
                    method: "tamara".to_string(),
                    message: message.to_string(),
                });
            }
        }
        let url = body
            .get("checkout_url")
            .and_then(|u| u.as_str())
            .ok_or_else(|| AppError::Provider {
                method: "tamara".to_string(),
                message: "response missing checkout_url".to_string(),
            })?;
        let transaction_id = body
            .get("order_id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| AppError::Provider {
                method: "tamara".to_string(),
                message: "response missing order_id".to_string(),
            })?;
        Ok(PaymentOutcome::Redirect {
            url: url.to_string(),
            transaction_id: transaction_id.to_string(),
        })
    }
}

#[async_trait]
impl ProviderInitiator for TamaraAdapter {
    fn name(&self) -> &'static str {
        "tamara"
    }

    async fn initiate(&self, order: &OrderRequest) -> AppResult<PaymentOutcome> {
        let provider = &self.config.providers.tamara;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(provider.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let response = client
            .post(format!("{}/checkout", provider.base_url))
            .bearer_auth(&provider.api_token)
            .json(&self.build_payload(order))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("checkout session rejected")
                .to_string();
            return Err(AppError::Provider { method: "tamara".to_string(), message });
        }
        Self::normalize(&body)
    }
}
