//! Payments routes

use std::sync::Arc;
use warp::Filter;

use crate::application::services::checkout_service::CheckoutService;
use crate::application::services::method_service::MethodRegistry;
use crate::config::AppConfig;
use crate::infrastructure::http::handlers::{handle_initialize_payment, handle_installments};
use crate::infrastructure::http::models::InstallmentsQuery;
use crate::infrastructure::http::utils::{client_ip, with_checkout_service, with_rate_limit, with_registry};
use crate::middleware::rate_limit::RateLimitMiddleware;

pub struct PaymentsRoutes;

impl PaymentsRoutes {
    pub fn create_routes(
        config: AppConfig,
        service: Arc<CheckoutService>,
        registry: Arc<MethodRegistry>,
        rate_limit: Arc<RateLimitMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let initialize = warp::path("payments")
            .and(warp::path("initialize"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(config.server.max_request_size as u64))
            .and(warp::body::json())
            .and(client_ip())
            .and(with_checkout_service(service))
            .and(with_rate_limit(rate_limit))
            .and_then(handle_initialize_payment);

        let installments = warp::path("payments")
            .and(warp::path("installments"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<InstallmentsQuery>())
            .and(with_registry(registry))
            .and_then(handle_installments);

        initialize.or(installments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::cart_store::CartStore;
    use crate::infrastructure::adapters::order_store::OrderStore;
    use crate::infrastructure::adapters::providers::PaymentDispatcher;
    use crate::shared::metrics::MetricsUtils;
    use serde_json::Value;

    fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let config = Arc::new(AppConfig::default());
        let registry = Arc::new(MethodRegistry::from_config(&config.payments).unwrap());
        let dispatcher = Arc::new(PaymentDispatcher::from_config(
            config.clone(),
            registry.clone(),
            Arc::new(MetricsUtils::new()),
        ));
        let service = Arc::new(CheckoutService::new(
            config.clone(),
            dispatcher,
            Arc::new(CartStore::new(None, 3600)),
            Arc::new(OrderStore::new(None, 3600)),
        ));
        let mut limit_config = AppConfig::default();
        limit_config.rate_limit.enabled = false;
        PaymentsRoutes::create_routes(
            (*config).clone(),
            service,
            registry,
            Arc::new(RateLimitMiddleware::new(&limit_config)),
        )
    }

    #[tokio::test]
    async fn installments_route_returns_options() {
        let res = warp::test::request()
            .method("GET")
            .path("/payments/installments/tamara?amount=300")
            .reply(&routes())
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["method_id"], "tamara");
        assert_eq!(body["options"][0]["count"], 3);
    }

    #[tokio::test]
    async fn installments_for_wallet_method_are_empty() {
        let res = warp::test::request()
            .method("GET")
            .path("/payments/installments/stc_pay?amount=300")
            .reply(&routes())
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert!(body["options"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn initialize_with_unknown_method_returns_failed_outcome() {
        let res = warp::test::request()
            .method("POST")
            .path("/payments/initialize")
            .json(&serde_json::json!({
                "payment_method": "unknown_method",
                "amount": "145",
                "currency": "SAR",
                "customer_info": { "name": "Amal", "email": "amal@example.com" },
            }))
            .reply(&routes())
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["status"], "failed");
    }

    #[tokio::test]
    async fn initialize_with_bank_transfer_returns_pending_instructions() {
        let res = warp::test::request()
            .method("POST")
            .path("/payments/initialize")
            .json(&serde_json::json!({
                "payment_method": "bank_transfer",
                "amount": "500",
                "currency": "SAR",
                "customer_info": { "name": "Amal", "email": "amal@example.com" },
            }))
            .reply(&routes())
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["status"], "pending");
        assert!(body["reference_number"].as_str().unwrap().starts_with("DZ-"));
        assert_eq!(body["provider_details"]["account_name"], "DZ Bookstore LLC");
    }

    #[tokio::test]
    async fn initialize_with_card_method_redirects_internally() {
        let res = warp::test::request()
            .method("POST")
            .path("/payments/initialize")
            .json(&serde_json::json!({
                "payment_method": "mada",
                "amount": "145",
                "currency": "SAR",
                "order_id": "ord_77",
                "customer_info": { "name": "Amal", "email": "amal@example.com" },
            }))
            .reply(&routes())
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["status"], "redirect");
        let url = body["url"].as_str().unwrap();
        assert!(url.contains("/checkout/card"));
        assert!(url.contains("order_id=ord_77"));
    }
}
