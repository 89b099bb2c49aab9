//! Payment domain models and types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment method categories, in the order the storefront renders them
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MethodCategory {
    Wallet,
    Bnpl,
    Card,
    BankTransfer,
}

impl MethodCategory {
    /// Fixed category list; grouping iterates this order
    pub const ALL: [MethodCategory; 4] = [
        MethodCategory::Wallet,
        MethodCategory::Bnpl,
        MethodCategory::Card,
        MethodCategory::BankTransfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodCategory::Wallet => "wallet",
            MethodCategory::Bnpl => "bnpl",
            MethodCategory::Card => "card",
            MethodCategory::BankTransfer => "bank_transfer",
        }
    }

    /// Human-readable group heading
    pub fn display_name(&self) -> &'static str {
        match self {
            MethodCategory::Wallet => "Wallets",
            MethodCategory::Bnpl => "Buy Now, Pay Later",
            MethodCategory::Card => "Cards",
            MethodCategory::BankTransfer => "Bank Transfer",
        }
    }
}

impl std::str::FromStr for MethodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wallet" => Ok(MethodCategory::Wallet),
            "bnpl" => Ok(MethodCategory::Bnpl),
            "card" => Ok(MethodCategory::Card),
            "bank_transfer" => Ok(MethodCategory::BankTransfer),
            _ => Err(format!("unsupported method category: {}", s)),
        }
    }
}

/// A configured payment method; created through admin configuration and
/// read-only at checkout time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Stable string key, e.g. `stc_pay`, `tamara`, `bank_transfer`
    pub id: String,

    /// Display label
    pub label: String,

    /// Method category
    pub category: MethodCategory,

    /// Whether the method is offered at checkout
    pub enabled: bool,

    /// ISO currency codes the method accepts
    pub supported_currencies: Vec<String>,

    /// Inclusive lower amount bound
    pub min_amount: Decimal,

    /// Inclusive upper amount bound
    pub max_amount: Decimal,

    /// Configured installment counts; empty unless category is bnpl
    #[serde(default)]
    pub installment_counts: Vec<u32>,
}

impl PaymentMethod {
    /// Eligibility predicate. A `None` amount skips bounds filtering, used
    /// before the order total is known.
    pub fn is_eligible(&self, amount: Option<Decimal>, currency: &str) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.supported_currencies.iter().any(|c| c == currency) {
            return false;
        }
        match amount {
            Some(a) => self.min_amount <= a && a <= self.max_amount,
            None => true,
        }
    }
}

/// One BNPL installment choice offered for a given order amount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallmentOption {
    pub count: u32,
    pub amount_per_installment: Decimal,
}

/// Normalized result of a payment initiation call. Exactly one variant is
/// active; the checkout state machine is a direct projection of the tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentOutcome {
    Redirect {
        url: String,
        transaction_id: String,
    },
    Completed {
        transaction_id: String,
        paid_amount: Decimal,
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

impl PaymentOutcome {
    /// Tag string used for logging, metrics, and state projection
    pub fn tag(&self) -> &'static str {
        match self {
            PaymentOutcome::Redirect { .. } => "redirect",
            PaymentOutcome::Completed { .. } => "completed",
            PaymentOutcome::Pending { .. } => "pending",
            PaymentOutcome::Failed { .. } => "failed",
        }
    }

    /// Failed outcome used wherever a transport error surfaces
    pub fn network_failure() -> Self {
        PaymentOutcome::Failed { reason: "network error".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn method(enabled: bool, min: Decimal, max: Decimal) -> PaymentMethod {
        PaymentMethod {
            id: "bank_transfer".to_string(),
            label: "Bank Transfer".to_string(),
            category: MethodCategory::BankTransfer,
            enabled,
            supported_currencies: vec!["SAR".to_string()],
            min_amount: min,
            max_amount: max,
            installment_counts: vec![],
        }
    }

    #[test]
    fn eligibility_honors_bounds_inclusively() {
        let m = method(true, dec!(50), dec!(100000));
        assert!(m.is_eligible(Some(dec!(50)), "SAR"));
        assert!(m.is_eligible(Some(dec!(100000)), "SAR"));
        assert!(!m.is_eligible(Some(dec!(30)), "SAR"));
        assert!(!m.is_eligible(Some(dec!(100001)), "SAR"));
    }

    #[test]
    fn missing_amount_skips_bounds() {
        let m = method(true, dec!(50), dec!(100000));
        assert!(m.is_eligible(None, "SAR"));
    }

    #[test]
    fn disabled_or_wrong_currency_is_ineligible() {
        assert!(!method(false, dec!(1), dec!(10)).is_eligible(None, "SAR"));
        assert!(!method(true, dec!(1), dec!(10)).is_eligible(None, "USD"));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = PaymentOutcome::Redirect {
            url: "https://checkout.tamara.co/abc".to_string(),
            transaction_id: "tx_1".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "redirect");
        assert_eq!(json["transaction_id"], "tx_1");
    }

    #[test]
    fn category_parse_round_trip() {
        for category in MethodCategory::ALL {
            let parsed: MethodCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("cash_on_delivery".parse::<MethodCategory>().is_err());
    }
}
