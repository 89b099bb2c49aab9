//! Internal card-entry gateway
//!
//! Card-network methods (mada, Visa/Mastercard) have no hosted-fields
//! integration here; they synthesize a redirect to the storefront's own
//! card-entry route instead of contacting an external processor.

use crate::config::AppConfig;
use crate::domain::order::OrderRequest;
use crate::domain::payment::PaymentOutcome;
use crate::infrastructure::adapters::providers::ProviderInitiator;
use crate::shared::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct CardGatewayAdapter {
    config: Arc<AppConfig>,
}

impl CardGatewayAdapter {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProviderInitiator for CardGatewayAdapter {
    fn name(&self) -> &'static str {
        "card_gateway"
    }

    async fn initiate(&self, order: &OrderRequest) -> AppResult<PaymentOutcome> {
        let storefront = &self.config.storefront;
        let transaction_id = Uuid::new_v4().to_string();
        let url = format!(
            "{}{}?order_id={}&amount={}&currency={}&transaction_id={}",
            storefront.origin,
            storefront.card_entry_path,
            order.order_id,
            order.amount,
            order.currency,
            transaction_id,
        );
        Ok(PaymentOutcome::Redirect { url, transaction_id })
    }
}
