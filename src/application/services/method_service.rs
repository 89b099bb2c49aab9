//! Payment method registry and eligibility selection

use crate::config::app_config::PaymentsAppConfig;
use crate::domain::payment::{InstallmentOption, MethodCategory, PaymentMethod};
use rust_decimal::Decimal;
use serde::Serialize;

/// In-memory catalog of configured payment methods. Built once from
/// configuration at startup and read-only afterwards.
pub struct MethodRegistry {
    methods: Vec<PaymentMethod>,
}

impl MethodRegistry {
    /// Build the registry from configuration, preserving declared order
    pub fn from_config(config: &PaymentsAppConfig) -> crate::Result<Self> {
        let methods = config
            .methods
            .iter()
            .map(|m| m.to_domain())
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(Self { methods })
    }

    /// Empty registry; selection degrades to "no methods available"
    pub fn empty() -> Self {
        Self { methods: Vec::new() }
    }

    pub fn methods(&self) -> &[PaymentMethod] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Look up a method by its stable id
    pub fn find(&self, method_id: &str) -> Option<&PaymentMethod> {
        self.methods.iter().find(|m| m.id == method_id)
    }
}

/// One category bucket in the grouped method listing. Categories with no
/// eligible methods stay present but empty.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub category: MethodCategory,
    pub display_name: &'static str,
    pub methods: Vec<PaymentMethod>,
}

/// Eligibility selection over the registry. Pure reads; no side effects.
pub struct MethodSelector<'a> {
    registry: &'a MethodRegistry,
}

impl<'a> MethodSelector<'a> {
    pub fn new(registry: &'a MethodRegistry) -> Self {
        Self { registry }
    }

    /// Methods eligible for the given amount and currency, in registry
    /// order. An absent or non-positive amount skips bounds filtering;
    /// an empty currency matches nothing.
    pub fn available_methods(&self, amount: Option<Decimal>, currency: &str) -> Vec<PaymentMethod> {
        if currency.trim().is_empty() {
            return Vec::new();
        }
        let amount = amount.filter(|a| *a > Decimal::ZERO);
        self.registry
            .methods()
            .iter()
            .filter(|m| m.is_eligible(amount, currency))
            .cloned()
            .collect()
    }

    /// Eligible methods grouped by the fixed category list
    pub fn methods_by_category(&self, amount: Option<Decimal>, currency: &str) -> Vec<CategoryGroup> {
        let available = self.available_methods(amount, currency);
        MethodCategory::ALL
            .iter()
            .map(|category| CategoryGroup {
                category: *category,
                display_name: category.display_name(),
                methods: available
                    .iter()
                    .filter(|m| m.category == *category)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Installment choices for a BNPL method and amount; empty for
    /// non-BNPL or unknown methods
    pub fn installment_options(&self, method_id: &str, amount: Decimal) -> Vec<InstallmentOption> {
        if amount <= Decimal::ZERO {
            return Vec::new();
        }
        let Some(method) = self.registry.find(method_id) else {
            return Vec::new();
        };
        if method.category != MethodCategory::Bnpl {
            return Vec::new();
        }
        method
            .installment_counts
            .iter()
            .map(|count| InstallmentOption {
                count: *count,
                amount_per_installment: (amount / Decimal::from(*count)).round_dp(2),
            })
            .collect()
    }
}
