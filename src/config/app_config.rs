//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use crate::domain::payment::{MethodCategory, PaymentMethod};
use crate::shared::error::AppError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use validator::Validate;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Maximum request size in bytes
    #[validate(range(min = 1024, max = 10485760))] // 1KB to 10MB
    pub max_request_size: usize,
}

/// Storefront configuration consumed by provider request builders
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StorefrontConfig {
    /// Public origin of the storefront, used to build success/failure/cancel
    /// callback URLs
    #[validate(url)]
    pub origin: String,

    /// Currency the catalog is priced in
    #[validate(length(min = 3, max = 3))]
    pub currency: String,

    /// Flat shipping cost applied to orders built from a cart
    pub shipping_cost: Decimal,

    /// Tax rate applied to the item subtotal (0.15 = 15% VAT)
    pub tax_rate: Decimal,

    /// Internal route card-network methods redirect to
    #[validate(length(min = 1))]
    pub card_entry_path: String,
}

/// STC Pay wallet provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StcPayConfig {
    #[validate(url)]
    pub base_url: String,

    #[validate(length(min = 1))]
    pub merchant_id: String,

    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,
}

/// Tamara BNPL provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TamaraConfig {
    #[validate(url)]
    pub base_url: String,

    #[validate(length(min = 1))]
    pub api_token: String,

    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,
}

/// Tabby BNPL provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TabbyConfig {
    #[validate(url)]
    pub base_url: String,

    #[validate(length(min = 1))]
    pub api_key: String,

    #[validate(length(min = 1))]
    pub merchant_code: String,

    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,
}

/// Bank transfer instructions shown to the customer on pending orders
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BankTransferConfig {
    #[validate(length(min = 1))]
    pub bank_name: String,

    #[validate(length(min = 1))]
    pub account_name: String,

    #[validate(length(min = 1))]
    pub iban: String,
}

/// External payment provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProvidersConfig {
    #[validate(nested)]
    pub stc_pay: StcPayConfig,

    #[validate(nested)]
    pub tamara: TamaraConfig,

    #[validate(nested)]
    pub tabby: TabbyConfig,

    #[validate(nested)]
    pub bank_transfer: BankTransferConfig,
}

/// One configured payment method; category is parsed into the domain enum
/// when the registry is built
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentMethodConfig {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub label: String,

    /// "wallet", "bnpl", "card", or "bank_transfer"
    #[validate(length(min = 1))]
    pub category: String,

    pub enabled: bool,

    pub supported_currencies: Vec<String>,

    pub min_amount: Decimal,

    pub max_amount: Decimal,

    #[serde(default)]
    pub installment_counts: Vec<u32>,
}

impl PaymentMethodConfig {
    /// Convert into the domain record
    pub fn to_domain(&self) -> crate::Result<PaymentMethod> {
        let category: MethodCategory = self
            .category
            .parse()
            .map_err(AppError::Config)?;
        Ok(PaymentMethod {
            id: self.id.clone(),
            label: self.label.clone(),
            category,
            enabled: self.enabled,
            supported_currencies: self.supported_currencies.clone(),
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            installment_counts: self.installment_counts.clone(),
        })
    }
}

/// Payment method catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentsAppConfig {
    pub methods: Vec<PaymentMethodConfig>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateLimitConfig {
    /// Requests per minute per IP
    #[validate(range(min = 1, max = 10000))]
    pub requests_per_minute: u32,

    /// Burst size
    #[validate(range(min = 1, max = 1000))]
    pub burst_size: u32,

    /// Enable rate limiting
    pub enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,
}

/// Cart and order session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StorageConfig {
    /// Use redis; an in-memory mirror is kept either way
    pub redis_enabled: bool,

    /// Redis connection URL
    #[validate(url)]
    pub redis_url: String,

    /// Cart TTL in seconds
    #[validate(range(min = 60, max = 2592000))]
    pub cart_ttl_seconds: u64,

    /// Order record TTL in seconds
    #[validate(range(min = 60, max = 7776000))]
    pub order_ttl_seconds: u64,
}

/// CORS configuration for the storefront SPA
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CorsConfig {
    /// Origins allowed to call the checkout API
    pub allowed_origins: Vec<String>,

    /// Allowed methods
    pub allowed_methods: Vec<String>,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Storefront configuration
    pub storefront: StorefrontConfig,

    /// Provider configuration
    pub providers: ProvidersConfig,

    /// Payment method catalog
    pub payments: PaymentsAppConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1".parse().unwrap(),
                port: 8080,
                max_request_size: 256 * 1024, // 256KB
            },
            storefront: StorefrontConfig {
                origin: "https://dz-bookstore.example".to_string(),
                currency: "SAR".to_string(),
                shipping_cost: Decimal::ZERO,
                tax_rate: Decimal::ZERO,
                card_entry_path: "/checkout/card".to_string(),
            },
            providers: ProvidersConfig {
                stc_pay: StcPayConfig {
                    base_url: "https://api.stcpay.com.sa".to_string(),
                    merchant_id: "merchant-id".to_string(),
                    timeout_seconds: 30,
                },
                tamara: TamaraConfig {
                    base_url: "https://api.tamara.co".to_string(),
                    api_token: "tamara-api-token".to_string(),
                    timeout_seconds: 30,
                },
                tabby: TabbyConfig {
                    base_url: "https://api.tabby.ai".to_string(),
                    api_key: "tabby-api-key".to_string(),
                    merchant_code: "dzbooks".to_string(),
                    timeout_seconds: 30,
                },
                bank_transfer: BankTransferConfig {
                    bank_name: "Al Rajhi Bank".to_string(),
                    account_name: "DZ Bookstore LLC".to_string(),
                    iban: "SA0000000000000000000000".to_string(),
                },
            },
            payments: PaymentsAppConfig {
                methods: vec![
                    PaymentMethodConfig {
                        id: "stc_pay".to_string(),
                        label: "STC Pay".to_string(),
                        category: "wallet".to_string(),
                        enabled: true,
                        supported_currencies: vec!["SAR".to_string()],
                        min_amount: dec!(1),
                        max_amount: dec!(20000),
                        installment_counts: vec![],
                    },
                    PaymentMethodConfig {
                        id: "tamara".to_string(),
                        label: "Tamara".to_string(),
                        category: "bnpl".to_string(),
                        enabled: true,
                        supported_currencies: vec!["SAR".to_string()],
                        min_amount: dec!(100),
                        max_amount: dec!(30000),
                        installment_counts: vec![3, 4],
                    },
                    PaymentMethodConfig {
                        id: "tabby".to_string(),
                        label: "Tabby".to_string(),
                        category: "bnpl".to_string(),
                        enabled: true,
                        supported_currencies: vec!["SAR".to_string()],
                        min_amount: dec!(10),
                        max_amount: dec!(15000),
                        installment_counts: vec![4],
                    },
                    PaymentMethodConfig {
                        id: "mada".to_string(),
                        label: "mada".to_string(),
                        category: "card".to_string(),
                        enabled: true,
                        supported_currencies: vec!["SAR".to_string()],
                        min_amount: dec!(1),
                        max_amount: dec!(50000),
                        installment_counts: vec![],
                    },
                    PaymentMethodConfig {
                        id: "visa_mastercard".to_string(),
                        label: "Visa / Mastercard".to_string(),
                        category: "card".to_string(),
                        enabled: true,
                        supported_currencies: vec!["SAR".to_string(), "USD".to_string()],
                        min_amount: dec!(1),
                        max_amount: dec!(50000),
                        installment_counts: vec![],
                    },
                    PaymentMethodConfig {
                        id: "bank_transfer".to_string(),
                        label: "Bank Transfer".to_string(),
                        category: "bank_transfer".to_string(),
                        enabled: true,
                        supported_currencies: vec!["SAR".to_string()],
                        min_amount: dec!(50),
                        max_amount: dec!(100000),
                        installment_counts: vec![],
                    },
                ],
            },
            rate_limit: RateLimitConfig {
                requests_per_minute: 300,
                burst_size: 30,
                enabled: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            storage: StorageConfig {
                redis_enabled: false,
                redis_url: "redis://127.0.0.1:6379".to_string(),
                cart_ttl_seconds: 7 * 24 * 3600,
                order_ttl_seconds: 48 * 3600,
            },
            cors: CorsConfig {
                allowed_origins: vec!["https://dz-bookstore.example".to_string()],
                allowed_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("Conf").required(false))
            .add_source(config::Environment::with_prefix("DZ_CHECKOUT").separator("__"))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config.try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        config.validate_config()
            .map_err(|e| AppError::Validation(format!("Configuration validation failed: {}", e)))?;

        crate::config::ConfigValidator::validate_config(&config)?;

        Ok(config)
    }

    /// Validate the entire configuration with the validator derives
    pub fn validate_config(&self) -> Result<(), validator::ValidationErrors> {
        self.server.validate()?;
        self.storefront.validate()?;
        self.providers.validate()?;
        self.rate_limit.validate()?;
        self.logging.validate()?;
        self.storage.validate()?;
        for method in &self.payments.methods {
            method.validate()?;
        }
        Ok(())
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let config = AppConfig::default();
        assert!(config.validate_config().is_ok());
    }

    #[test]
    fn method_config_converts_to_domain() {
        let config = AppConfig::default();
        let method = config.payments.methods[1].to_domain().unwrap();
        assert_eq!(method.id, "tamara");
        assert_eq!(method.category, MethodCategory::Bnpl);
        assert_eq!(method.installment_counts, vec![3, 4]);
    }

    #[test]
    fn unknown_category_fails_conversion() {
        let mut method = AppConfig::default().payments.methods[0].clone();
        method.category = "crypto".to_string();
        assert!(method.to_domain().is_err());
    }

    #[test]
    fn server_address_formats_host_and_port() {
        let config = AppConfig::default();
        assert_eq!(config.server_address(), "127.0.0.1:8080");
    }
}
