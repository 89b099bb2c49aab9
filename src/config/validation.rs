//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::AppConfig;
use crate::shared::error::AppError;
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Uppercase ISO 4217 code
fn currency_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{3}$").expect("valid currency pattern"))
}

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_origin(&config.storefront.origin)?;
        Self::validate_methods(config)?;
        Self::validate_rate_limit_config(&config.rate_limit)?;
        Ok(())
    }

    /// Validate the storefront origin used for callback URLs
    fn validate_origin(origin: &str) -> crate::Result<()> {
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Err(AppError::Validation(
                "Storefront origin must start with http:// or https://".to_string()
            ));
        }
        if origin.ends_with('/') {
            return Err(AppError::Validation(
                "Storefront origin must not have a trailing slash".to_string()
            ));
        }
        Ok(())
    }

    /// Validate the payment method catalog
    fn validate_methods(config: &AppConfig) -> crate::Result<()> {
        let mut seen = HashSet::new();
        for method in &config.payments.methods {
            if !seen.insert(method.id.as_str()) {
                return Err(AppError::Validation(
                    format!("Duplicate payment method id: {}", method.id)
                ));
            }

            // Parses the category string; fails closed on typos
            let domain = method.to_domain().map_err(|e| {
                AppError::Validation(format!("Method {}: {}", method.id, e))
            })?;

            if method.supported_currencies.is_empty() {
                return Err(AppError::Validation(
                    format!("Method {} supports no currencies", method.id)
                ));
            }
            for currency in &method.supported_currencies {
                if !currency_code_pattern().is_match(currency) {
                    return Err(AppError::Validation(
                        format!("Method {}: invalid currency code {}", method.id, currency)
                    ));
                }
            }

            if method.min_amount < Decimal::ZERO || method.max_amount < method.min_amount {
                return Err(AppError::Validation(
                    format!("Method {}: amount bounds are inverted or negative", method.id)
                ));
            }

            let is_bnpl = domain.category == crate::domain::payment::MethodCategory::Bnpl;
            if is_bnpl && method.installment_counts.is_empty() {
                return Err(AppError::Validation(
                    format!("BNPL method {} defines no installment counts", method.id)
                ));
            }
            if !is_bnpl && !method.installment_counts.is_empty() {
                return Err(AppError::Validation(
                    format!("Method {} is not BNPL but defines installments", method.id)
                ));
            }
            if method.installment_counts.iter().any(|c| *c < 2) {
                return Err(AppError::Validation(
                    format!("Method {}: installment counts must be at least 2", method.id)
                ));
            }
        }
        Ok(())
    }

    /// Validate rate limiting configuration
    fn validate_rate_limit_config(rate_limit: &crate::config::app_config::RateLimitConfig) -> crate::Result<()> {
        if rate_limit.enabled {
            if rate_limit.requests_per_minute == 0 {
                return Err(AppError::Validation(
                    "Rate limiting enabled but requests_per_minute is 0".to_string()
                ));
            }

            if rate_limit.burst_size > rate_limit.requests_per_minute {
                return Err(AppError::Validation(
                    "Burst size cannot be greater than requests per minute".to_string()
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::app_config::RateLimitConfig;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(ConfigValidator::validate_config(&config).is_ok());
    }

    #[test]
    fn trailing_slash_origin_rejected() {
        let result = ConfigValidator::validate_origin("https://dz-bookstore.example/");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("trailing slash"));
    }

    #[test]
    fn duplicate_method_ids_rejected() {
        let mut config = AppConfig::default();
        let dup = config.payments.methods[0].clone();
        config.payments.methods.push(dup);
        let result = ConfigValidator::validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate payment method id"));
    }

    #[test]
    fn inverted_bounds_rejected() {
        let mut config = AppConfig::default();
        config.payments.methods[0].min_amount = config.payments.methods[0].max_amount + Decimal::ONE;
        assert!(ConfigValidator::validate_config(&config).is_err());
    }

    #[test]
    fn lowercase_currency_rejected() {
        let mut config = AppConfig::default();
        config.payments.methods[0].supported_currencies = vec!["sar".to_string()];
        assert!(ConfigValidator::validate_config(&config).is_err());
    }

    #[test]
    fn bnpl_without_installments_rejected() {
        let mut config = AppConfig::default();
        config.payments.methods[1].installment_counts = vec![];
        let result = ConfigValidator::validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no installment counts"));
    }

    #[test]
    fn installments_on_wallet_rejected() {
        let mut config = AppConfig::default();
        config.payments.methods[0].installment_counts = vec![3];
        assert!(ConfigValidator::validate_config(&config).is_err());
    }

    #[test]
    fn burst_larger_than_rate_rejected() {
        let rate_limit = RateLimitConfig {
            requests_per_minute: 100,
            burst_size: 150,
            enabled: true,
        };
        let result = ConfigValidator::validate_rate_limit_config(&rate_limit);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Burst size cannot be greater"));
    }
}
