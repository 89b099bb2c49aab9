//! Payment method listing routes

use std::sync::Arc;
use warp::Filter;

use crate::application::services::method_service::MethodRegistry;
use crate::config::AppConfig;
use crate::infrastructure::http::handlers::handle_list_methods;
use crate::infrastructure::http::models::MethodsQuery;
use crate::infrastructure::http::utils::{with_config, with_registry};

pub struct MethodsRoutes;

impl MethodsRoutes {
    pub fn create_routes(
        config: AppConfig,
        registry: Arc<MethodRegistry>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("payment_methods")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<MethodsQuery>())
            .and(with_registry(registry))
            .and(with_config(config))
            .and_then(handle_list_methods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let config = AppConfig::default();
        let registry = Arc::new(MethodRegistry::from_config(&config.payments).unwrap());
        MethodsRoutes::create_routes(config, registry)
    }

    #[tokio::test]
    async fn amount_filters_the_listing() {
        let res = warp::test::request()
            .method("GET")
            .path("/payment_methods?currency=SAR&amount=30")
            .reply(&routes())
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        let ids: Vec<&str> = body["payment_methods"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        // bank_transfer starts at 50, tamara at 100
        assert!(!ids.contains(&"bank_transfer"));
        assert!(!ids.contains(&"tamara"));
        assert!(ids.contains(&"stc_pay"));
    }

    #[tokio::test]
    async fn groups_include_empty_categories() {
        let res = warp::test::request()
            .method("GET")
            .path("/payment_methods?currency=USD")
            .reply(&routes())
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        let groups = body["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 4);
        // only visa_mastercard supports USD
        let wallet = &groups[0];
        assert_eq!(wallet["category"], "wallet");
        assert!(wallet["methods"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn default_currency_comes_from_the_storefront() {
        let res = warp::test::request()
            .method("GET")
            .path("/payment_methods")
            .reply(&routes())
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert!(!body["payment_methods"].as_array().unwrap().is_empty());
    }
}
