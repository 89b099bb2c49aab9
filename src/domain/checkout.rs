//! Checkout flow state machine
//!
//! States: `Select -> Processing -> {Completed | Pending | Failed}`, with
//! `Failed -> Select` for retry and change-method. The state after an
//! outcome is a direct projection of the outcome's tag; a redirect leaves
//! the state in `Processing` because the browser navigates away.

use crate::domain::payment::PaymentOutcome;
use crate::shared::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Customer-facing checkout state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    Select,
    Processing,
    Completed {
        transaction_id: String,
    },
    Pending {
        transaction_id: String,
        reference_number: String,
        provider_details: serde_json::Value,
    },
    Failed {
        reason: String,
    },
}

impl CheckoutState {
    pub fn tag(&self) -> &'static str {
        match self {
            CheckoutState::Select => "select",
            CheckoutState::Processing => "processing",
            CheckoutState::Completed { .. } => "completed",
            CheckoutState::Pending { .. } => "pending",
            CheckoutState::Failed { .. } => "failed",
        }
    }
}

/// Side effect the caller must perform after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutEffect {
    /// Navigate the browser to the provider's hosted page
    Navigate { url: String },
    /// Clear the cart, then notify success, in that order
    ClearCart,
    /// Display out-of-band payment instructions
    ShowInstructions,
    /// Surface the failure and offer retry
    OfferRetry,
}

/// The checkout flow: current state plus the picked method id
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    state: CheckoutState,
    selected_method: Option<String>,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self { state: CheckoutState::Select, selected_method: None }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn selected_method(&self) -> Option<&str> {
        self.selected_method.as_deref()
    }

    /// Store the user's method selection; only legal while selecting
    pub fn pick_method(&mut self, method_id: &str) -> AppResult<()> {
        match self.state {
            CheckoutState::Select => {
                self.selected_method = Some(method_id.to_string());
                Ok(())
            }
            _ => Err(self.invalid_transition("pick a method")),
        }
    }

    /// Enter `Processing` once order data has validated. Requires a
    /// selection; fails without advancing otherwise.
    pub fn begin_processing(&mut self) -> AppResult<String> {
        match (&self.state, &self.selected_method) {
            (CheckoutState::Select, Some(method)) => {
                let method = method.clone();
                self.state = CheckoutState::Processing;
                Ok(method)
            }
            (CheckoutState::Select, None) => {
                Err(AppError::Validation("no payment method selected".to_string()))
            }
            _ => Err(self.invalid_transition("confirm payment")),
        }
    }

    /// React to the dispatcher's normalized outcome. Only legal in
    /// `Processing`; the next state is the projection of the outcome tag.
    pub fn apply_outcome(&mut self, outcome: &PaymentOutcome) -> AppResult<CheckoutEffect> {
        if self.state != CheckoutState::Processing {
            return Err(self.invalid_transition("apply a payment outcome"));
        }
        let effect = match outcome {
            PaymentOutcome::Redirect { url, .. } => {
                // Navigation leaves the app; state stays Processing
                CheckoutEffect::Navigate { url: url.clone() }
            }
            PaymentOutcome::Completed { transaction_id, .. } => {
                self.state = CheckoutState::Completed { transaction_id: transaction_id.clone() };
                CheckoutEffect::ClearCart
            }
            PaymentOutcome::Pending { transaction_id, reference_number, provider_details } => {
                self.state = CheckoutState::Pending {
                    transaction_id: transaction_id.clone(),
                    reference_number: reference_number.clone(),
                    provider_details: provider_details.clone(),
                };
                CheckoutEffect::ShowInstructions
            }
            PaymentOutcome::Failed { reason } => {
                self.state = CheckoutState::Failed { reason: reason.clone() };
                CheckoutEffect::OfferRetry
            }
        };
        Ok(effect)
    }

    /// Retry with the same method after a failure
    pub fn retry(&mut self) -> AppResult<()> {
        match self.state {
            CheckoutState::Failed { .. } => {
                self.state = CheckoutState::Select;
                Ok(())
            }
            _ => Err(self.invalid_transition("retry")),
        }
    }

    /// Go back to method selection after a failure, dropping the selection
    pub fn change_method(&mut self) -> AppResult<()> {
        match self.state {
            CheckoutState::Failed { .. } => {
                self.state = CheckoutState::Select;
                self.selected_method = None;
                Ok(())
            }
            _ => Err(self.invalid_transition("change method")),
        }
    }

    fn invalid_transition(&self, action: &str) -> AppError {
        AppError::Validation(format!("cannot {} in state {}", action, self.state.tag()))
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}
