//! Order checkout routes

use std::sync::Arc;
use warp::Filter;

use crate::application::services::checkout_service::CheckoutService;
use crate::config::AppConfig;
use crate::infrastructure::http::handlers::{handle_create_order, handle_get_order};
use crate::infrastructure::http::utils::{client_ip, with_checkout_service, with_rate_limit};
use crate::middleware::rate_limit::RateLimitMiddleware;

pub struct OrdersRoutes;

impl OrdersRoutes {
    pub fn create_routes(
        config: AppConfig,
        service: Arc<CheckoutService>,
        rate_limit: Arc<RateLimitMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let create = warp::path("orders")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(config.server.max_request_size as u64))
            .and(warp::body::json())
            .and(client_ip())
            .and(with_checkout_service(service.clone()))
            .and(with_rate_limit(rate_limit))
            .and_then(handle_create_order);

        let status = warp::path("orders")
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and(with_checkout_service(service))
            .and_then(handle_get_order);

        create.or(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::method_service::MethodRegistry;
    use crate::domain::cart::{CartAggregate, ItemKind};
    use crate::domain::order::OrderRequest;
    use crate::domain::payment::PaymentOutcome;
    use crate::infrastructure::adapters::cart_store::CartStore;
    use crate::infrastructure::adapters::order_store::OrderStore;
    use crate::infrastructure::adapters::providers::{PaymentDispatcher, ProviderInitiator};
    use crate::shared::error::AppResult;
    use crate::shared::metrics::MetricsUtils;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use serde_json::Value;

    struct CompletingInitiator;

    #[async_trait]
    impl ProviderInitiator for CompletingInitiator {
        fn name(&self) -> &'static str {
            "completing"
        }

        async fn initiate(&self, order: &OrderRequest) -> AppResult<PaymentOutcome> {
            Ok(PaymentOutcome::Completed {
                transaction_id: "t1".to_string(),
                paid_amount: order.amount,
            })
        }
    }

    async fn routes_with_cart() -> (
        impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone,
        Arc<CartStore>,
    ) {
        let config = Arc::new(AppConfig::default());
        let registry = Arc::new(MethodRegistry::from_config(&config.payments).unwrap());
        let mut dispatcher = PaymentDispatcher::new(registry, Arc::new(MetricsUtils::new()));
        dispatcher.register("stc_pay", Arc::new(CompletingInitiator));
        let carts = Arc::new(CartStore::new(None, 3600));
        let orders = Arc::new(OrderStore::new(None, 3600));

        let mut cart = CartAggregate::new();
        cart.add_item("bk_1", ItemKind::Book, "Novel", dec!(45));
        cart.update_quantity("bk_1", ItemKind::Book, 2);
        cart.add_item("bk_2", ItemKind::Book, "Atlas", dec!(55));
        carts.save("s1", &cart).await.unwrap();

        let service = Arc::new(CheckoutService::new(
            config.clone(),
            Arc::new(dispatcher),
            carts.clone(),
            orders,
        ));
        let mut limit_config = AppConfig::default();
        limit_config.rate_limit.enabled = false;
        let routes = OrdersRoutes::create_routes(
            (*config).clone(),
            service,
            Arc::new(RateLimitMiddleware::new(&limit_config)),
        );
        (routes, carts)
    }

    #[tokio::test]
    async fn full_checkout_completes_and_clears_the_cart() {
        let (routes, carts) = routes_with_cart().await;
        let res = warp::test::request()
            .method("POST")
            .path("/orders")
            .json(&serde_json::json!({
                "session_id": "s1",
                "payment_method": "stc_pay",
                "customer_info": { "name": "Amal", "email": "amal@example.com" },
            }))
            .reply(&routes)
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["payment_result"]["status"], "completed");
        assert_eq!(body["payment_result"]["paid_amount"], "145");
        assert!(carts.load("s1").await.unwrap().is_empty());

        // the order record is retrievable afterwards
        let order_id = body["order_id"].as_str().unwrap();
        let res = warp::test::request()
            .method("GET")
            .path(&format!("/orders/{}", order_id))
            .reply(&routes)
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let record: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(record["method_id"], "stc_pay");
    }

    #[tokio::test]
    async fn empty_cart_is_a_validation_failure() {
        let (routes, _) = routes_with_cart().await;
        let res = warp::test::request()
            .method("POST")
            .path("/orders")
            .json(&serde_json::json!({
                "session_id": "s_empty",
                "payment_method": "stc_pay",
                "customer_info": { "name": "Amal", "email": "amal@example.com" },
            }))
            .reply(&routes)
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unknown_order_is_a_404() {
        let (routes, _) = routes_with_cart().await;
        let res = warp::test::request()
            .method("GET")
            .path("/orders/ord_missing")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::NOT_FOUND);
    }
}
