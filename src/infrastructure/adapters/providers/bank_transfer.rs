//! Manual bank transfer adapter
//!
//! No provider is contacted: the customer receives the bank account
//! details and a reference number, and the order stays pending until the
//! transfer is reconciled out-of-band.

use crate::config::AppConfig;
use crate::domain::order::OrderRequest;
use crate::domain::payment::PaymentOutcome;
use crate::infrastructure::adapters::providers::ProviderInitiator;
use crate::shared::error::AppResult;
use async_trait::async_trait;
use rand::Rng;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub struct BankTransferAdapter {
    config: Arc<AppConfig>,
}

impl BankTransferAdapter {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Reference the customer quotes on the wire transfer
    fn generate_reference() -> String {
        let mut rng = rand::rng();
        format!("DZ-{:08}", rng.random_range(0..100_000_000u32))
    }
}

#[async_trait]
impl ProviderInitiator for BankTransferAdapter {
    fn name(&self) -> &'static str {
        "bank_transfer"
    }

    async fn initiate(&self, order: &OrderRequest) -> AppResult<PaymentOutcome> {
        let bank = &self.config.providers.bank_transfer;
        Ok(PaymentOutcome::Pending {
            transaction_id: Uuid::new_v4().to_string(),
            reference_number: Self::generate_reference(),
            provider_details: json!({
                "bank_name": bank.bank_name,
                "account_name": bank.account_name,
                "iban": bank.iban,
                "amount": order.amount,
                "currency": order.currency,
            }),
        })
    }
}
