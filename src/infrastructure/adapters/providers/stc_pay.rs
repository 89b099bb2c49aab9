//! STC Pay wallet adapter

use crate::config::AppConfig;
use crate::domain::order::OrderRequest;
use crate::domain::payment::PaymentOutcome;
use crate::infrastructure::adapters::providers::{CallbackUrls, ProviderInitiator};
use crate::shared::error::{AppError, AppResult};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Direct wallet payment through STC Pay. The wallet either hands back a
/// hosted authorization page or, for pre-authorized customers, settles
/// immediately.
pub struct StcPayAdapter {
    config: Arc<AppConfig>,
}

impl StcPayAdapter {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    fn build_payload(&self, order: &OrderRequest) -> Value {
        let urls = CallbackUrls::for_order(&self.config.storefront.origin, &order.order_id);
        json!({
            "merchant_id": self.config.providers.stc_pay.merchant_id,
            "merchant_reference": order.order_id,
            "amount": order.amount,
            "currency": order.currency,
            "customer_mobile": order.customer.phone,
            "callback_url": urls.success,
            "failure_url": urls.failure,
        })
    }

    /// Normalize the wallet response: a `payment_url` means the customer
    /// must authorize on the hosted page; a `PAID` status means the wallet
    /// settled synchronously.
    fn normalize(body: &Value) -> AppResult<PaymentOutcome> {
        let transaction_id = body
            .get("transaction_id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| AppError::Provider {
                method: "stc_pay".to_string(),
                message: "response missing transaction_id".to_string(),
            })?;

        if let Some(url) = body.get("payment_url").and_then(|u| u.as_str()) {
            return Ok(PaymentOutcome::Redirect {
                url: url.to_string(),
                transaction_id: transaction_id.to_string(),
            });
        }

        let status = body.get("status").and_then(|s| s.as_str()).unwrap_or("");
        if status.eq_ignore_ascii_case("paid") {
            let paid_amount = body
                .get("amount")
                .and_then(|a| a.as_str().map(str::to_string).or_else(|| a.as_f64().map(|f| f.to_string())))
                .and_then(|s| s.parse::<Decimal>().ok())
                .ok_or_else(|| AppError::Provider {
                    method: "stc_pay".to_string(),
                    message: "paid response missing amount".to_string(),
                })?;
            return Ok(PaymentOutcome::Completed {
                transaction_id: transaction_id.to_string(),
                paid_amount,
            });
        }

        Err(AppError::Provider {
            method: "stc_pay".to_string(),
            message: body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("payment not accepted")
                .to_string(),
        })
    }
}

#[async_trait]
impl ProviderInitiator for StcPayAdapter {
    fn name(&self) -> &'static str {
        "stc_pay"
    }

    async fn initiate(&self, order: &OrderRequest) -> AppResult<PaymentOutcome> {
        let provider = &self.config.providers.stc_pay;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(provider.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let response = client
            .post(format!("{}/payments/direct", provider.base_url))
            .header("X-Merchant-Id", provider.merchant_id.as_str())
            .json(&self.build_payload(order))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("wallet request rejected")
                .to_string();
            return Err(AppError::Provider { method: "stc_pay".to_string(), message });
        }
        Self::normalize(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Address, CustomerInfo, OrderItem};
    use rust_decimal_macros::dec;

    fn order() -> OrderRequest {
        OrderRequest {
            order_id: "ord_2".to_string(),
            amount: dec!(145),
            currency: "SAR".to_string(),
            customer: CustomerInfo {
                name: "Amal".to_string(),
                email: "amal@example.com".to_string(),
                phone: Some("+966500000000".to_string()),
            },
            items: vec![OrderItem {
                id: "bk_1".to_string(),
                title: "Novel".to_string(),
                quantity: 1,
                unit_price: dec!(145),
            }],
            shipping_address: Address::default(),
            billing_address: Address::default(),
            shipping_cost: dec!(0),
            tax_amount: dec!(0),
        }
    }

    #[test]
    fn payload_names_the_merchant_and_reference() {
        let adapter = StcPayAdapter::new(Arc::new(AppConfig::default()));
        let payload = adapter.build_payload(&order());
        assert_eq!(payload["merchant_id"], "merchant-id");
        assert_eq!(payload["merchant_reference"], "ord_2");
        assert!(payload["callback_url"].as_str().unwrap().contains("/checkout/success"));
    }

    #[test]
    fn hosted_page_response_normalizes_to_redirect() {
        let body = serde_json::json!({
            "transaction_id": "stc_1",
            "payment_url": "https://pay.stcpay.com.sa/auth/stc_1",
        });
        let outcome = StcPayAdapter::normalize(&body).unwrap();
        assert!(matches!(outcome, PaymentOutcome::Redirect { .. }));
    }

    #[test]
    fn paid_response_normalizes_to_completed() {
        let body = serde_json::json!({
            "transaction_id": "stc_2",
            "status": "PAID",
            "amount": "145.00",
        });
        let outcome = StcPayAdapter::normalize(&body).unwrap();
        assert_eq!(outcome, PaymentOutcome::Completed {
            transaction_id: "stc_2".to_string(),
            paid_amount: dec!(145.00),
        });
    }

    #[test]
    fn declined_response_is_a_provider_error() {
        let body = serde_json::json!({
            "transaction_id": "stc_3",
            "status": "DECLINED",
            "message": "insufficient wallet balance",
        });
        let err = StcPayAdapter::normalize(&body).unwrap_err();
        match err {
            AppError::Provider { message, .. } => assert_eq!(message, "insufficient wallet balance"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn missing_transaction_id_is_a_provider_error() {
        let body = serde_json::json!({ "status": "PAID", "amount": "145.00" });
        assert!(StcPayAdapter::normalize(&body).is_err());
    }
}
