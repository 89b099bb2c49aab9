//! Tabby BNPL checkout session adapter

use crate::config::AppConfig;
use crate::domain::order::OrderRequest;
use crate::domain::payment::PaymentOutcome;
use crate::infrastructure::adapters::providers::{CallbackUrls, ProviderInitiator};
use crate::shared::error::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Creates a Tabby checkout session; Tabby pre-scores the buyer and can
/// reject the session outright
pub struct TabbyAdapter {
    config: Arc<AppConfig>,
}

impl TabbyAdapter {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    fn build_payload(&self, order: &OrderRequest) -> Value {
        let urls = CallbackUrls::for_order(&self.config.storefront.origin, &order.order_id);
        json!({
            "payment": {
                "amount": order.amount,
                "currency": order.currency,
                "description": "DZ bookstore order",
                "buyer": {
                    "name": order.customer.name,
                    "email": order.customer.email,
                    "phone": order.customer.phone,
                },
                "order": {
                    "reference_id": order.order_id,
                    "items": order.items.iter().map(|item| json!({
                        "reference_id": item.id,
                        "title": item.title,
                        "quantity": item.quantity,
                        "unit_price": item.unit_price,
                    })).collect::<Vec<_>>(),
                },
                "shipping_amount": order.shipping_cost,
                "tax_amount": order.tax_amount,
            },
            "lang": "ar",
            "merchant_code": self.config.providers.tabby.merchant_code,
            "merchant_urls": {
                "success": urls.success,
                "cancel": urls.cancel,
                "failure": urls.failure,
            },
        })
    }

    /// Normalize the session response. A created session carries the
    /// hosted page under `configuration.available_products.installments`;
    /// a rejected session only carries `status` and a rejection reason.
    fn normalize(body: &Value) -> AppResult<PaymentOutcome> {
        let status = body.get("status").and_then(|s| s.as_str()).unwrap_or("");
        if status.eq_ignore_ascii_case("rejected") {
            let message = body
                .get("rejection_reason_code")
                .and_then(|r| r.as_str())
                .unwrap_or("session rejected")
                .to_string();
            return Err(AppError::Provider { method: "tabby".to_string(), message });
        }

        let transaction_id = body
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| AppError::Provider {
                method: "tabby".to_string(),
                message: "response missing session id".to_string(),
            })?;
        let url = body
            .pointer("/configuration/available_products/installments/0/web_url")
            .and_then(|u| u.as_str())
            .ok_or_else(|| AppError::Provider {
                method: "tabby".to_string(),
                message: "response missing web_url".to_string(),
            })?;
        Ok(PaymentOutcome::Redirect {
            url: url.to_string(),
            transaction_id: transaction_id.to_string(),
        })
    }
}

#[async_trait]
impl ProviderInitiator for TabbyAdapter {
    fn name(&self) -> &'static str {
        "tabby"
    }

    async fn initiate(&self, order: &OrderRequest) -> AppResult<PaymentOutcome> {
        let provider = &self.config.providers.tabby;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(provider.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let response = client
            .post(format!("{}/api/v2/checkout", provider.base_url))
            .bearer_auth(&provider.api_key)
            .json(&self.build_payload(order))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("checkout session rejected")
                .to_string();
            return Err(AppError::Provider { method: "tabby".to_string(), message });
        }
        Self::normalize(&body)
    }
}
