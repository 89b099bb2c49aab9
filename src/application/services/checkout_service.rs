//! Checkout orchestration service
//!
//! Drives the checkout state machine for one storefront session: builds
//! the order from the cart, hands it to the payment dispatcher, reacts to
//! the normalized outcome, and performs the associated side effects. On a
//! completed payment the cart is cleared before the success callback runs,
//! so a caller reacting to the callback never observes stale cart
//! contents.

use crate::config::AppConfig;
use crate::domain::cart::CartAggregate;
use crate::domain::checkout::{CheckoutEffect, CheckoutFlow, CheckoutState};
use crate::domain::order::{Address, CustomerInfo, OrderItem, OrderRecord, OrderRequest};
use crate::domain::payment::PaymentOutcome;
use crate::infrastructure::adapters::cart_store::CartStore;
use crate::infrastructure::adapters::order_store::OrderStore;
use crate::infrastructure::adapters::providers::PaymentDispatcher;
use crate::shared::error::{AppError, AppResult};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// Invoked after a completed payment, with the (already cleared) cart
pub type SuccessCallback = Box<dyn Fn(&CartAggregate, &PaymentOutcome) + Send + Sync>;

/// Invoked with the failure reason when an initiation fails
pub type FailureCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Result of one confirm call, for the HTTP layer to render
#[derive(Debug, Clone)]
pub struct CheckoutSummary {
    pub order_id: String,
    pub state: CheckoutState,
    pub outcome: PaymentOutcome,
    pub redirect_url: Option<String>,
}

/// Per-session checkout orchestrator
pub struct CheckoutOrchestrator {
    session_id: String,
    config: Arc<AppConfig>,
    flow: CheckoutFlow,
    cart: CartAggregate,
    dispatcher: Arc<PaymentDispatcher>,
    carts: Arc<CartStore>,
    orders: Arc<OrderStore>,
    on_success: Option<SuccessCallback>,
    on_failure: Option<FailureCallback>,
}

impl CheckoutOrchestrator {
    pub fn new(
        session_id: &str,
        config: Arc<AppConfig>,
        cart: CartAggregate,
        dispatcher: Arc<PaymentDispatcher>,
        carts: Arc<CartStore>,
        orders: Arc<OrderStore>,
    ) -> Self {
        Self {
            session_id: session_id.to_string(),
            config,
            flow: CheckoutFlow::new(),
            cart,
            dispatcher,
            carts,
            orders,
            on_success: None,
            on_failure: None,
        }
    }

    pub fn with_on_success(mut self, callback: SuccessCallback) -> Self {
        self.on_success = Some(callback);
        self
    }

    pub fn with_on_failure(mut self, callback: FailureCallback) -> Self {
        self.on_failure = Some(callback);
        self
    }

    pub fn state(&self) -> &CheckoutState {
        self.flow.state()
    }

    pub fn cart(&self) -> &CartAggregate {
        &self.cart
    }

    /// Store the user's method selection
    pub fn select_method(&mut self, method_id: &str) -> AppResult<()> {
        self.flow.pick_method(method_id)
    }

    /// Build the order request from the session cart. The total is derived
    /// here on every call rather than stored, so cart mutations can never
    /// drift from the displayed amount.
    pub fn build_order(
        &self,
        customer: CustomerInfo,
        shipping_address: Address,
        billing_address: Address,
    ) -> AppResult<OrderRequest> {
        if self.cart.is_empty() {
            return Err(AppError::Validation("cart is empty".to_string()));
        }
        let storefront = &self.config.storefront;
        let items: Vec<OrderItem> = self
            .cart
            .entries()
            .iter()
            .map(|entry| OrderItem {
                id: entry.item_id.clone(),
                title: entry.title.clone(),
                quantity: entry.quantity,
                unit_price: entry.unit_price,
            })
            .collect();
        let subtotal = self.cart.total();
        let shipping_cost = storefront.shipping_cost;
        let tax_amount = (subtotal * storefront.tax_rate).round_dp(2);
        Ok(OrderRequest {
            order_id: format!("ord_{}", Uuid::new_v4().simple()),
            amount: subtotal + shipping_cost + tax_amount,
            currency: storefront.currency.clone(),
            customer,
            items,
            shipping_address,
            billing_address,
            shipping_cost,
            tax_amount,
        })
    }

    /// Confirm the payment: validate, dispatch, and apply the outcome.
    /// Validation failures surface as errors and leave the flow in
    /// `Select`; everything past dispatch resolves to a summary.
    pub async fn confirm(&mut self, order: OrderRequest) -> AppResult<CheckoutSummary> {
        order.validate()?;

        let method_id = self.flow.begin_processing()?;
        let outcome = self.dispatcher.initiate(&method_id, &order).await;
        let effect = self.flow.apply_outcome(&outcome)?;

        self.orders
            .put(&OrderRecord::new(&method_id, order.clone(), outcome.clone()))
            .await?;

        let mut redirect_url = None;
        match &effect {
            CheckoutEffect::Navigate { url } => {
                redirect_url = Some(url.clone());
            }
            CheckoutEffect::ClearCart => {
                // Cart first, callback second
                self.cart.clear();
                self.carts.clear(&self.session_id).await?;
                if let Some(callback) = &self.on_success {
                    callback(&self.cart, &outcome);
                }
            }
            CheckoutEffect::ShowInstructions => {}
            CheckoutEffect::OfferRetry => {
                if let PaymentOutcome::Failed { reason } = &outcome {
                    if let Some(callback) = &self.on_failure {
                        callback(reason);
                    }
                }
            }
        }

        Ok(CheckoutSummary {
            order_id: order.order_id,
            state: self.flow.state().clone(),
            outcome,
            redirect_url,
        })
    }

    /// After a failure, clear the error and try the same method again
    pub fn retry(&mut self) -> AppResult<()> {
        self.flow.retry()
    }

    /// After a failure, clear the error and the selection
    pub fn change_method(&mut self) -> AppResult<()> {
        self.flow.change_method()
    }
}

/// Application service owning the shared checkout dependencies
pub struct CheckoutService {
    config: Arc<AppConfig>,
    dispatcher: Arc<PaymentDispatcher>,
    carts: Arc<CartStore>,
    orders: Arc<OrderStore>,
}

impl CheckoutService {
    pub fn new(
        config: Arc<AppConfig>,
        dispatcher: Arc<PaymentDispatcher>,
        carts: Arc<CartStore>,
        orders: Arc<OrderStore>,
    ) -> Self {
        Self { config, dispatcher, carts, orders }
    }

    pub fn carts(&self) -> &Arc<CartStore> {
        &self.carts
    }

    /// Start an orchestrator for a session, loading its persisted cart
    pub async fn begin(&self, session_id: &str) -> AppResult<CheckoutOrchestrator> {
        let cart = self.carts.load(session_id).await?;
        Ok(CheckoutOrchestrator::new(
            session_id,
            self.config.clone(),
            cart,
            self.dispatcher.clone(),
            self.carts.clone(),
            self.orders.clone(),
        ))
    }

    /// One-shot checkout used by the orders endpoint: select, build, confirm
    pub async fn checkout(
        &self,
        session_id: &str,
        method_id: &str,
        customer: CustomerInfo,
        shipping_address: Address,
        billing_address: Address,
    ) -> AppResult<CheckoutSummary> {
        let mut orchestrator = self.begin(session_id).await?;
        orchestrator.select_method(method_id)?;
        let order = orchestrator.build_order(customer, shipping_address, billing_address)?;
        orchestrator.confirm(order).await
    }

    /// Initiate a payment for a caller-supplied order, persisting the
    /// attempt; used by the payment initialization endpoint
    pub async fn initiate(&self, method_id: &str, order: OrderRequest) -> AppResult<PaymentOutcome> {
        let outcome = self.dispatcher.initiate(method_id, &order).await;
        self.orders
            .put(&OrderRecord::new(method_id, order, outcome.clone()))
            .await?;
        Ok(outcome)
    }

    /// Fetch a stored order record
    pub async fn order_status(&self, order_id: &str) -> AppResult<Option<OrderRecord>> {
        self.orders.get(order_id).await
    }
}

/// Amount helper shared by handlers parsing optional query amounts
pub fn parse_amount(raw: Option<&str>) -> Option<Decimal> {
    raw.and_then(|s| s.parse::<Decimal>().ok())
        .filter(|a| *a > Decimal::ZERO)
}
