//! HTTP server implementation
//!
//! Wires the registry, dispatcher, stores, and middleware together and
//! serves the checkout API. TLS and compression are left to the reverse
//! proxy.

use crate::{
    application::services::checkout_service::CheckoutService,
    application::services::method_service::MethodRegistry,
    config::AppConfig,
    infrastructure::adapters::cart_store::CartStore,
    infrastructure::adapters::order_store::OrderStore,
    infrastructure::adapters::providers::PaymentDispatcher,
    infrastructure::http::routes::{HealthRoutes, MethodsRoutes, MetricsRoutes, OrdersRoutes, PaymentsRoutes},
    middleware::{cors::CorsMiddleware, rate_limit::RateLimitMiddleware},
    shared::error::{AppError, AppResult},
    shared::metrics::MetricsUtils,
};
use redis::aio::ConnectionManager;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use warp::{Filter, Reply};

/// Checkout HTTP server
pub struct CheckoutServer {
    config: AppConfig,
    registry: Arc<MethodRegistry>,
    service: Arc<CheckoutService>,
    metrics: Arc<MetricsUtils>,
    rate_limit: Arc<RateLimitMiddleware>,
    storage_ok: bool,
}

impl CheckoutServer {
    /// Create a new server instance. A redis connection failure degrades
    /// to the in-memory stores instead of refusing to start.
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        let config_arc = Arc::new(config.clone());
        let registry = Arc::new(MethodRegistry::from_config(&config.payments)?);
        let metrics = Arc::new(MetricsUtils::new());
        let dispatcher = Arc::new(PaymentDispatcher::from_config(
            config_arc.clone(),
            registry.clone(),
            metrics.clone(),
        ));

        let (redis, storage_ok) = if config.storage.redis_enabled {
            match Self::connect_redis(&config.storage.redis_url).await {
                Ok(conn) => (Some(Arc::new(conn)), true),
                Err(e) => {
                    warn!(error = %e, "Redis unavailable, using in-memory session storage");
                    (None, false)
                }
            }
        } else {
            (None, true)
        };

        let carts = Arc::new(CartStore::new(redis.clone(), config.storage.cart_ttl_seconds));
        let orders = Arc::new(OrderStore::new(redis, config.storage.order_ttl_seconds));
        let service = Arc::new(CheckoutService::new(config_arc, dispatcher, carts, orders));
        let rate_limit = Arc::new(RateLimitMiddleware::new(&config));

        info!(payment_methods = registry.len(), "Checkout server initialized");

        Ok(Self {
            config,
            registry,
            service,
            metrics,
            rate_limit,
            storage_ok,
        })
    }

    async fn connect_redis(url: &str) -> AppResult<ConnectionManager> {
        let client = redis::Client::open(url)
            .map_err(|e| AppError::Storage(format!("redis client: {}", e)))?;
        ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Storage(format!("redis connect: {}", e)))
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr = self.config.server_address();
        info!("Starting checkout server on {}", addr);

        let addr: std::net::SocketAddr = addr
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        let routes = self.create_routes();

        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Create the application routes
    fn create_routes(self) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
        let cors = CorsMiddleware::create(&self.config);

        MethodsRoutes::create_routes(self.config.clone(), self.registry.clone())
            .or(PaymentsRoutes::create_routes(
                self.config.clone(),
                self.service.clone(),
                self.registry.clone(),
                self.rate_limit.clone(),
            ))
            .or(OrdersRoutes::create_routes(
                self.config.clone(),
                self.service.clone(),
                self.rate_limit,
            ))
            .or(HealthRoutes::create_health_route(self.registry, self.storage_ok))
            .or(MetricsRoutes::create_metrics_route(self.metrics))
            .with(cors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn test_server() -> CheckoutServer {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.storage.redis_enabled = false;
        config.rate_limit.enabled = false;
        CheckoutServer::new(config).await.unwrap()
    }

    #[tokio::test]
    async fn server_initializes_with_default_config() {
        let server = test_server().await;
        assert_eq!(server.config().server.port, 0);
        assert!(server.storage_ok);
    }

    #[tokio::test]
    async fn routes_serve_methods_and_health() {
        let server = test_server().await;
        let routes = server.create_routes();

        let res = warp::test::request()
            .method("GET")
            .path("/payment_methods?currency=SAR&amount=500")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert!(body["payment_methods"]
            .as_array()
            .unwrap()
            .iter()
            .any(|m| m["id"] == "bank_transfer"));

        let res = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn preflight_from_the_storefront_origin_is_allowed() {
        let server = test_server().await;
        let routes = server.create_routes();

        let res = warp::test::request()
            .method("OPTIONS")
            .path("/orders")
            .header("origin", "https://dz-bookstore.example")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        assert_eq!(
            res.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("https://dz-bookstore.example")
        );
    }
}
