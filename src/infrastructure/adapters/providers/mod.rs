//! Payment provider adapters and the initiation dispatcher
//!
//! Dispatch is a registered-handler map from method id to a
//! provider-specific initiator, so adding a provider is one registration
//! call. Every error is converted to the `Failed` outcome at this
//! boundary; callers always receive exactly one of the four outcome
//! variants.

pub mod bank_transfer;
pub mod card;
pub mod stc_pay;
pub mod tabby;
pub mod tamara;

pub use bank_transfer::BankTransferAdapter;
pub use card::CardGatewayAdapter;
pub use stc_pay::StcPayAdapter;
pub use tabby::TabbyAdapter;
pub use tamara::TamaraAdapter;

use crate::application::services::method_service::MethodRegistry;
use crate::config::AppConfig;
use crate::domain::order::OrderRequest;
use crate::domain::payment::{MethodCategory, PaymentMethod, PaymentOutcome};
use crate::shared::error::{AppError, AppResult};
use crate::shared::logging::LoggingUtils;
use crate::shared::metrics::MetricsUtils;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Success/failure/cancel URLs appended to hosted-checkout requests,
/// derived from the storefront origin
#[derive(Debug, Clone)]
pub struct CallbackUrls {
    pub success: String,
    pub failure: String,
    pub cancel: String,
}

impl CallbackUrls {
    pub fn for_order(origin: &str, order_id: &str) -> Self {
        Self {
            success: format!("{}/checkout/success?order_id={}", origin, order_id),
            failure: format!("{}/checkout/failure?order_id={}", origin, order_id),
            cancel: format!("{}/checkout/cancel?order_id={}", origin, order_id),
        }
    }
}

/// A provider-specific initiation routine
#[async_trait]
pub trait ProviderInitiator: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Build the provider-shaped request, call the provider, and
    /// normalize its response into a `PaymentOutcome`
    async fn initiate(&self, order: &OrderRequest) -> AppResult<PaymentOutcome>;
}

/// Routes a chosen method id to its registered initiator
pub struct PaymentDispatcher {
    registry: Arc<MethodRegistry>,
    handlers: HashMap<String, Arc<dyn ProviderInitiator>>,
    metrics: Arc<MetricsUtils>,
}

impl PaymentDispatcher {
    pub fn new(registry: Arc<MethodRegistry>, metrics: Arc<MetricsUtils>) -> Self {
        Self {
            registry,
            handlers: HashMap::new(),
            metrics,
        }
    }

    /// Register the initiator handling a method id
    pub fn register(&mut self, method_id: &str, handler: Arc<dyn ProviderInitiator>) {
        self.handlers.insert(method_id.to_string(), handler);
    }

    /// Wire the built-in providers for every configured method. Card
    /// methods share the internal card-entry gateway; each registration
    /// keys on the method id, not the category.
    pub fn from_config(
        config: Arc<AppConfig>,
        registry: Arc<MethodRegistry>,
        metrics: Arc<MetricsUtils>,
    ) -> Self {
        let mut dispatcher = Self::new(registry.clone(), metrics);
        let card_gateway: Arc<dyn ProviderInitiator> = Arc::new(CardGatewayAdapter::new(config.clone()));
        for method in registry.methods() {
            let handler: Arc<dyn ProviderInitiator> = match method.id.as_str() {
                "stc_pay" => Arc::new(StcPayAdapter::new(config.clone())),
                "tamara" => Arc::new(TamaraAdapter::new(config.clone())),
                "tabby" => Arc::new(TabbyAdapter::new(config.clone())),
                "bank_transfer" => Arc::new(BankTransferAdapter::new(config.clone())),
                _ if method.category == MethodCategory::Card => card_gateway.clone(),
                other => {
                    tracing::warn!(method_id = %other, "No provider wired for configured method");
                    continue;
                }
            };
            dispatcher.register(&method.id, handler);
        }
        dispatcher
    }

    /// Resolve and validate before any provider contact: the method must
    /// exist, the order must be internally consistent, and the amount and
    /// currency must fit the method's bounds.
    pub fn validate(&self, method_id: &str, order: &OrderRequest) -> AppResult<PaymentMethod> {
        let method = self
            .registry
            .find(method_id)
            .ok_or_else(|| AppError::MethodNotFound { method: method_id.to_string() })?;

        order.validate()?;

        if !method.enabled {
            return Err(AppError::Validation(format!("payment method {} is disabled", method_id)));
        }
        if !method.supported_currencies.iter().any(|c| c == &order.currency) {
            return Err(AppError::Validation(format!(
                "currency {} is not supported by {}",
                order.currency, method_id
            )));
        }
        if order.amount < method.min_amount || order.amount > method.max_amount {
            return Err(AppError::Validation(format!(
                "amount {} is outside the {}..{} bounds of {}",
                order.amount, method.min_amount, method.max_amount, method_id
            )));
        }
        Ok(method.clone())
    }

    /// Initiate a payment. Never returns an error: validation failures,
    /// transport failures, and provider rejections all normalize to the
    /// `Failed` variant. Each call creates a new provider-side attempt;
    /// there is no idempotency key.
    pub async fn initiate(&self, method_id: &str, order: &OrderRequest) -> PaymentOutcome {
        let request_id = LoggingUtils::generate_request_id();
        LoggingUtils::log_payment_attempt(
            &request_id,
            method_id,
            &order.order_id,
            &order.amount.to_string(),
            &order.currency,
        );
        self.metrics.increment_initiated();

        let started = Instant::now();
        let outcome = match self.try_initiate(method_id, order).await {
            Ok(outcome) => outcome,
            Err(err @ (AppError::Validation(_) | AppError::MethodNotFound { .. })) => {
                self.metrics.increment_validation_rejections();
                PaymentOutcome::Failed { reason: err.public_message() }
            }
            Err(err @ AppError::Transport(_)) => {
                LoggingUtils::log_error(&request_id, "payments.initiate", &err, started.elapsed().as_millis() as u64);
                PaymentOutcome::network_failure()
            }
            Err(err) => {
                LoggingUtils::log_error(&request_id, "payments.initiate", &err, started.elapsed().as_millis() as u64);
                PaymentOutcome::Failed { reason: err.public_message() }
            }
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        self.metrics.record_provider_time(duration_ms);
        self.metrics.record_outcome(outcome.tag());
        LoggingUtils::log_payment_outcome(&request_id, method_id, outcome.tag(), duration_ms);
        outcome
    }

    async fn try_initiate(&self, method_id: &str, order: &OrderRequest) -> AppResult<PaymentOutcome> {
        self.validate(method_id, order)?;

        let handler = self.handlers.get(method_id).ok_or_else(|| {
            // Configured but not wired: fail closed rather than guessing
            AppError::MethodNotFound { method: method_id.to_string() }
        })?;

        info!(method_id = %method_id, provider = %handler.name(), "Dispatching to provider");
        handler.initiate(order).await
    }
}
